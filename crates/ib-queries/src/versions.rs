//! Versions Query Builder
//!
//! Revision history records have a fixed set of columns, so a versions
//! query only allows exact matches on those columns and skips datatype
//! resolution.

use ib_core::{QueryConfig, QueryError, QueryResult};
use tracing::debug;

use crate::operators::Operator;
use crate::query::{ConditionFields, Query, QueryOptions};
use crate::raw::RawQuery;

/// Columns of a revision record that a versions query may match on
pub const VERSION_COLUMNS: &[&str] = &[
    "key",
    "revision",
    "author",
    "comment",
    "machine_comment",
    "ip",
    "created",
];

/// Builds queries over revision history
#[derive(Debug, Clone, Default)]
pub struct VersionsQueryBuilder {
    config: QueryConfig,
}

impl VersionsQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use other limit settings
    pub fn config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }

    /// Build a versions query. Field names are taken literally: an
    /// operator suffix makes the field unknown.
    pub fn build(&self, options: QueryOptions, fields: ConditionFields) -> QueryResult<Query> {
        let mut query = Query::with_options(options, &self.config);

        for (field, value) in fields {
            if !VERSION_COLUMNS.contains(&field.as_str()) {
                return Err(QueryError::InvalidField { field });
            }
            query.add_condition(field, Operator::Equals, None, value);
        }

        debug!(conditions = query.len(), limit = ?query.limit, "Built versions query");
        Ok(query)
    }
}

/// Build a versions query with the default limits
pub fn make_versions_query(raw: RawQuery) -> QueryResult<Query> {
    VersionsQueryBuilder::new().build(raw.options, raw.fields)
}
