//! Core error types for the infobase query layer
//!
//! Every failure a query builder can report is a variant of [`QueryError`].

use thiserror::Error;

use crate::config::ConfigError;

/// Core error type for all query operations
#[derive(Error, Debug)]
pub enum QueryError {
    /// A non-common field was queried without a `type=` condition
    #[error("missing 'type' in query")]
    MissingType,

    /// A versions query named a column outside the revision whitelist
    #[error("Invalid field in versions query: {field}")]
    InvalidField { field: String },

    /// One of the `limit`/`offset`/`sort` meta-parameters had the wrong shape
    #[error("Invalid value for {name}: {message}")]
    InvalidOption { name: &'static str, message: String },

    /// A field value that has no counterpart in the value model
    #[error("Unsupported value for {field}: {kind}")]
    UnsupportedValue { field: String, kind: &'static str },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// HTTP status code mapping for errors
impl QueryError {
    pub fn status_code(&self) -> u16 {
        match self {
            QueryError::MissingType | QueryError::InvalidField { .. } => 422,
            QueryError::InvalidOption { .. }
            | QueryError::UnsupportedValue { .. }
            | QueryError::InvalidQuery(_) => 400,
            QueryError::Schema(_) | QueryError::Config(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::MissingType => "missing_type",
            QueryError::InvalidField { .. } => "invalid_field",
            QueryError::InvalidOption { .. } => "invalid_option",
            QueryError::UnsupportedValue { .. } => "unsupported_value",
            QueryError::InvalidQuery(_) => "invalid_query",
            QueryError::Schema(_) => "schema_error",
            QueryError::Config(_) => "configuration_error",
        }
    }

    /// Whether the error is one of the two domain failures a builder raises
    /// after its input has been accepted
    pub fn is_domain_violation(&self) -> bool {
        matches!(self, QueryError::MissingType | QueryError::InvalidField { .. })
    }
}
