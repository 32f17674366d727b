//! Error types for pgbind

use thiserror::Error;

/// Result type alias for pgbind operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Error type for query building, rendering, and execution
#[derive(Debug, Error)]
pub enum QueryError {
    /// Invalid query construction, rejected before any SQL text is generated
    #[error("Invalid query: {0}")]
    Invalid(String),

    /// A template placeholder has no entry in the argument map
    #[error("Missing argument '{name}' for template: {template} (known arguments: [{known}])")]
    MissingArgument {
        name: String,
        template: String,
        known: String,
    },

    /// Unresolved braces survived rendering
    #[error("Malformed template; unresolved braces in rendered SQL: {0}")]
    MalformedTemplate(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Db(#[from] tokio_postgres::Error),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },
}

impl QueryError {
    /// Create an invalid-construction error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a missing-argument error
    pub fn is_missing_argument(&self) -> bool {
        matches!(self, Self::MissingArgument { .. })
    }

    /// Check if this is a malformed-template error
    pub fn is_malformed_template(&self) -> bool {
        matches!(self, Self::MalformedTemplate(_))
    }
}
