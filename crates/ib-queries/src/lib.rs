//! # ib-queries
//!
//! Query normalization for infobase.
//!
//! This crate turns the flat field/value mappings callers send (from a
//! query string or a JSON object) into typed queries a store can execute.
//!
//! ## Structure
//!
//! - `operators` - Comparison operators and field token parsing
//! - `query` - The Query and Condition model
//! - `sorts` - Reading the sort option
//! - `datatype` - Datatype resolution for conditions
//! - `raw` - Raw query ingestion
//! - `builder` - Builds typed queries against a schema store
//! - `versions` - Builds queries over revision history
//!
//! ## Example
//!
//! ```
//! use ib_core::MemorySchemaStore;
//! use ib_queries::{make_query, RawQuery};
//!
//! let store = MemorySchemaStore::new();
//! let raw = RawQuery::from_query_string("type=/type/page&title~=foo").unwrap();
//! let query = make_query(&store, raw).unwrap();
//!
//! assert_eq!(
//!     query.to_string(),
//!     "<query: ['type = ref:/type/page', 'title ~ str:foo']>"
//! );
//! assert_eq!(query.limit, Some(1000));
//! ```

pub mod operators;
pub mod query;
pub mod sorts;
pub mod datatype;
pub mod raw;
pub mod builder;
pub mod versions;

// Re-exports for convenience
pub use operators::{parse_key, Operator};
pub use query::{Condition, ConditionFields, Query, QueryOptions};
pub use sorts::{SortDirection, SortKey};
pub use datatype::{find_datatype, reserved_datatype};
pub use raw::RawQuery;
pub use builder::{make_query, QueryBuilder};
pub use versions::{make_versions_query, VersionsQueryBuilder, VERSION_COLUMNS};
