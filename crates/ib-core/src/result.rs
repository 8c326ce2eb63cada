//! Result type aliases

use crate::error::QueryError;

/// Standard Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
