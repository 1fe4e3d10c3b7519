//! Error types shared by every dialect adapter.

use thiserror::Error;

/// Errors surfaced by adapters and their collaborators.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The engine rejected a statement because it does not know the syntax.
    ///
    /// Adapters treat this as a signal to retry through a fallback path.
    #[error("unsupported syntax in `{sql}`: {message}")]
    UnsupportedSyntax {
        /// The statement that was rejected.
        sql: String,
        /// The driver's message.
        message: String,
    },

    /// Any other failure reported by the underlying connection.
    #[error("driver error: {0}")]
    Driver(String),

    /// An in-memory table alteration referenced a missing column.
    #[error("no column `{column}` in table `{table}`")]
    UnknownColumn {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// An in-memory table alteration would leave two columns with one name.
    #[error("column `{column}` already exists in table `{table}`")]
    DuplicateColumn {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// The configured dialect has no adapter.
    #[error("unknown dialect: {0}")]
    UnknownDialect(String),

    /// Invalid adapter configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AdapterError {
    /// Creates a driver error from any displayable message.
    pub fn driver(message: impl std::fmt::Display) -> Self {
        Self::Driver(message.to_string())
    }

    /// Creates an unsupported-syntax error for the given statement.
    pub fn unsupported_syntax(sql: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnsupportedSyntax {
            sql: sql.into(),
            message: message.into(),
        }
    }

    /// Returns true when the error only means the engine lacks the syntax.
    #[must_use]
    pub const fn is_unsupported_syntax(&self) -> bool {
        matches!(self, Self::UnsupportedSyntax { .. })
    }
}

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;
