//! Secondary index hints.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Forces Phoenix to serve a query from a secondary index.
///
/// Identifiers are emitted verbatim; names containing `)` or whitespace are
/// not supported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecondaryIndexHint {
    table: String,
    index: String,
}

impl SecondaryIndexHint {
    /// Creates a hint for `index` on `table`.
    #[must_use]
    pub fn new(table: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            index: index.into(),
        }
    }

    /// Creates a hint for `index` on `schema.table`.
    #[must_use]
    pub fn with_schema(schema: &str, table: &str, index: impl Into<String>) -> Self {
        Self::new(format!("{schema}.{table}"), index)
    }

    /// Returns the hinted table.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the hinted index.
    #[must_use]
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Renders `/*+ INDEX(<table> <index>) */`.
    #[must_use]
    pub fn build(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SecondaryIndexHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/*+ INDEX({} {}) */", self.table, self.index)
    }
}

impl From<&phoenix_sql_core::IndexHintConfig> for SecondaryIndexHint {
    fn from(config: &phoenix_sql_core::IndexHintConfig) -> Self {
        Self::new(config.table.clone(), config.index.clone())
    }
}
