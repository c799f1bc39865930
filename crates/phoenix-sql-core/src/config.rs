//! Rewriter configuration.
//!
//! The dialect gate is chosen once, when the configuration is loaded, and
//! baked into the [`StatementRewriter`] handed to the ORM.
//!
//! ```json
//! {
//!   "dialect": "phoenix",
//!   "hints": [{ "table": "HR.DEPARTMENT", "index": "D_I0" }]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dialect::TargetDialect;
use crate::error::ConfigError;
use crate::rewrite::StatementRewriter;

/// A secondary index to steer queries on `table` towards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexHintConfig {
    /// Table name, optionally schema-qualified.
    pub table: String,
    /// Index name.
    pub index: String,
}

/// Configuration for statement rewriting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RewriteConfig {
    /// Dialect statements are finalized for.
    pub dialect: TargetDialect,
    /// Index hints applied to queries.
    pub hints: Vec<IndexHintConfig>,
}

impl RewriteConfig {
    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the JSON is malformed or names an
    /// unknown field or dialect.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if its content is invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Overrides the dialect.
    #[must_use]
    pub fn with_dialect(mut self, dialect: TargetDialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Builds the rewriter for this configuration.
    #[must_use]
    pub const fn rewriter(&self) -> StatementRewriter {
        StatementRewriter::new(self.dialect)
    }
}
