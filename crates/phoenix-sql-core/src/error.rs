//! Error types for statement rewriting and configuration.

use std::path::PathBuf;

/// Reasons a statement could not be rewritten.
///
/// None of these escape [`StatementRewriter::rewrite`](crate::StatementRewriter::rewrite):
/// every variant degrades to returning the statement text unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewriteError {
    /// The configured dialect does not need rewriting.
    #[error("Dialect '{0}' does not require rewriting")]
    UnsupportedDialect(&'static str),

    /// The statement descriptor could not be obtained from the ORM.
    #[error("Statement descriptor unavailable: {0}")]
    IntrospectionFailure(String),

    /// The descriptor names no table or binds no columns.
    #[error("Statement on '{table}' has nothing to upsert")]
    EmptyStatement {
        /// Table named by the descriptor (may be empty).
        table: String,
    },

    /// Hint injection found no `select` keyword outside comments.
    #[error("No select keyword found outside comments")]
    MissingSelectKeyword,
}

/// Result type for rewrite operations.
pub type Result<T> = std::result::Result<T, RewriteError>;

/// Errors that can occur while loading a [`RewriteConfig`](crate::RewriteConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the config file.
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The config is not valid JSON or does not match the schema.
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
