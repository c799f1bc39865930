//! SQL Dialect support.
//!
//! The ORM layer emits generic SQL. Whether that SQL has to be rewritten is
//! decided once, at configuration time, by the [`TargetDialect`] selected for
//! the connection. Dialect descriptors implement [`Dialect`] and report which
//! gate they open.

use serde::{Deserialize, Serialize};

/// The dialect gate: which SQL engine statements are finalized for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetDialect {
    /// Any engine that accepts the ORM's SQL as-is.
    #[default]
    Passthrough,
    /// Apache Phoenix: UPDATE is unavailable and INSERT is spelled UPSERT.
    Phoenix,
}

impl TargetDialect {
    /// Returns `true` when statements must be rewritten for Phoenix.
    #[must_use]
    pub const fn is_phoenix(self) -> bool {
        matches!(self, Self::Phoenix)
    }

    /// Returns the configuration name of the dialect.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Passthrough => "passthrough",
            Self::Phoenix => "phoenix",
        }
    }
}

impl std::fmt::Display for TargetDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for TargetDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "passthrough" | "generic" => Ok(Self::Passthrough),
            "phoenix" => Ok(Self::Phoenix),
            other => Err(format!("unknown dialect '{other}'")),
        }
    }
}

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the gate this dialect opens in the statement rewriter.
    fn target(&self) -> TargetDialect {
        TargetDialect::Passthrough
    }

    /// Returns the identifier quote character (e.g., `"` for standard SQL, `` ` `` for MySQL).
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Quotes an identifier.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        format!("{quote}{name}{quote}")
    }
}
