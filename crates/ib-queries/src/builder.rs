//! Query Builder
//!
//! Turns raw field tokens into a typed [`Query`], checking that queries
//! over type-specific fields name their type.

use ib_core::{DefaultTypeMapping, QueryConfig, QueryResult, SchemaStore, TypeMapping, Value};
use tracing::debug;

use crate::datatype::find_datatype;
use crate::operators::parse_key;
use crate::query::{ConditionFields, Query, QueryOptions};
use crate::raw::RawQuery;

/// Builds typed queries against a schema store
#[derive(Debug)]
pub struct QueryBuilder<'a, S, M = DefaultTypeMapping> {
    store: &'a S,
    mapping: M,
    config: QueryConfig,
}

impl<'a, S: SchemaStore> QueryBuilder<'a, S> {
    /// Create a builder using the default type mapping and limits
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            mapping: DefaultTypeMapping,
            config: QueryConfig::default(),
        }
    }
}

impl<'a, S: SchemaStore, M: TypeMapping> QueryBuilder<'a, S, M> {
    /// Use another expected-type to datatype mapping
    pub fn mapping<N: TypeMapping>(self, mapping: N) -> QueryBuilder<'a, S, N> {
        QueryBuilder {
            store: self.store,
            mapping,
            config: self.config,
        }
    }

    /// Use other limit settings
    pub fn config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }

    /// Build a query from its options and condition fields.
    ///
    /// Performs at most one schema lookup, for the declared type.
    pub fn build(&self, options: QueryOptions, fields: ConditionFields) -> QueryResult<Query> {
        let mut query = Query::with_options(options, &self.config);

        for (token, value) in fields {
            let (key, op) = parse_key(&token);
            query.add_condition(key, op, None, value);
        }

        query.assert_type_required(|key| self.store.is_common_property(key))?;

        let declared_type = query.get_type().and_then(Value::as_key);
        let schema_type = declared_type.and_then(|type_key| {
            let found = self.store.lookup(type_key);
            if found.is_none() {
                debug!(type_key, "Declared type not found in schema store");
            }
            found
        });

        for condition in &mut query.conditions {
            condition.datatype = Some(find_datatype(
                schema_type.as_ref(),
                &condition.key,
                &condition.value,
                &self.mapping,
            ));
        }

        debug!(
            conditions = query.len(),
            limit = ?query.limit,
            "Built query: {}",
            query
        );
        Ok(query)
    }

    /// Build a query from a raw query
    pub fn build_raw(&self, raw: RawQuery) -> QueryResult<Query> {
        self.build(raw.options, raw.fields)
    }
}

/// Build a query with the default mapping and limits
pub fn make_query<S: SchemaStore>(store: &S, raw: RawQuery) -> QueryResult<Query> {
    QueryBuilder::new(store).build_raw(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ib_core::{Datatype, MemorySchemaStore, QueryError, SchemaTypeDef};
    use mockall::mock;
    use mockall::predicate::eq;

    use crate::operators::Operator;

    mock! {
        Store {}

        impl SchemaStore for Store {
            type Type = SchemaTypeDef;

            fn lookup(&self, type_key: &str) -> Option<SchemaTypeDef>;
            fn is_common_property(&self, name: &str) -> bool;
        }
    }

    fn page_store() -> MemorySchemaStore {
        MemorySchemaStore::new().with_type(
            SchemaTypeDef::new("/type/page")
                .with_property("title", "/type/string")
                .with_property("pages", "/type/int"),
        )
    }

    #[test]
    fn test_builder_type_only() {
        let store = MemorySchemaStore::new();
        let raw = RawQuery::new().field("type", "/type/page");
        let query = make_query(&store, raw).unwrap();

        assert_eq!(query.to_string(), "<query: ['type = ref:/type/page']>");
        assert_eq!(query.limit, Some(1000));
    }

    #[test]
    fn test_builder_unknown_type_infers_from_values() {
        let store = MemorySchemaStore::new();
        let raw = RawQuery::new()
            .field("life", 42)
            .field("type", "/type/page")
            .field("title~", "foo");
        let query = make_query(&store, raw).unwrap();

        assert_eq!(
            query.to_string(),
            "<query: ['life = int:42', 'type = ref:/type/page', 'title ~ str:foo']>"
        );
        assert_eq!(query.offset, None);
    }

    #[test]
    fn test_builder_uses_schema() {
        let store = page_store();
        let raw = RawQuery::new()
            .field("type", "/type/page")
            .field("pages>=", "10");
        let query = make_query(&store, raw).unwrap();

        let pages = query.conditions_for("pages")[0];
        assert_eq!(pages.op, Operator::GreaterThanOrEqual);
        assert_eq!(pages.datatype, Some(Datatype::Int));
        assert!(query.is_resolved());
    }

    #[test]
    fn test_builder_missing_type() {
        let store = page_store();
        let raw = RawQuery::new().field("title", "foo");
        let err = make_query(&store, raw).unwrap_err();

        assert!(matches!(err, QueryError::MissingType));
        assert_eq!(err.to_string(), "missing 'type' in query");
    }

    #[test]
    fn test_builder_type_must_use_equals() {
        let store = page_store();
        let raw = RawQuery::new()
            .field("type!=", "/type/page")
            .field("title", "foo");
        assert!(matches!(
            make_query(&store, raw),
            Err(QueryError::MissingType)
        ));
    }

    #[test]
    fn test_builder_common_properties_need_no_type() {
        let store = MemorySchemaStore::new();
        let raw = RawQuery::new()
            .field("key~", "/books/*")
            .field("last_modified>", "2009-01-01");
        let query = make_query(&store, raw).unwrap();

        assert_eq!(query.conditions[0].datatype, Some(Datatype::Key));
        assert_eq!(query.conditions[1].datatype, Some(Datatype::Datetime));
    }

    #[test]
    fn test_builder_limit_options() {
        let store = MemorySchemaStore::new();

        let query = make_query(&store, RawQuery::new().limit(5000)).unwrap();
        assert_eq!(query.limit, Some(1000));

        let query = make_query(&store, RawQuery::new().limit(10).offset(20).sort("-created")).unwrap();
        assert_eq!(query.limit, Some(10));
        assert_eq!(query.offset, Some(20));
        assert_eq!(query.sort.as_deref(), Some("-created"));
        assert!(query.is_empty());
    }

    #[test]
    fn test_builder_custom_config() {
        let store = MemorySchemaStore::new();
        let config = QueryConfig {
            default_limit: 50,
            max_limit: 100,
        };
        let builder = QueryBuilder::new(&store).config(config);

        let query = builder.build(QueryOptions::new(), ConditionFields::new()).unwrap();
        assert_eq!(query.limit, Some(50));

        let query = builder.build(QueryOptions::new().limit(500), ConditionFields::new()).unwrap();
        assert_eq!(query.limit, Some(100));
    }

    #[test]
    fn test_builder_custom_mapping() {
        let store = page_store();
        let builder = QueryBuilder::new(&store).mapping(|_: &str| Datatype::Ref);
        let fields = ConditionFields::new()
            .with("type", "/type/page")
            .with("title", "foo");
        let query = builder.build(QueryOptions::new(), fields).unwrap();

        assert_eq!(query.conditions_for("title")[0].datatype, Some(Datatype::Ref));
    }

    #[test]
    fn test_builder_store_common_properties() {
        let store = MemorySchemaStore::new().with_common_properties(["key", "type", "title"]);
        let raw = RawQuery::new().field("title", "foo");
        assert!(make_query(&store, raw).is_ok());
    }

    #[test]
    fn test_builder_looks_up_declared_type_once() {
        let mut store = MockStore::new();
        store
            .expect_is_common_property()
            .returning(|name| name == "type");
        store
            .expect_lookup()
            .with(eq("/type/page"))
            .times(1)
            .returning(|_| Some(SchemaTypeDef::new("/type/page").with_property("title", "/type/text")));

        let raw = RawQuery::new()
            .field("type", "/type/page")
            .field("title", "foo")
            .field("body", "bar");
        let query = make_query(&store, raw).unwrap();

        assert_eq!(query.conditions_for("title")[0].datatype, Some(Datatype::Str));
        assert_eq!(query.conditions_for("body")[0].datatype, Some(Datatype::Str));
    }

    #[test]
    fn test_builder_skips_lookup_without_type() {
        let mut store = MockStore::new();
        store.expect_is_common_property().returning(|_| true);
        store.expect_lookup().times(0);

        let raw = RawQuery::new().field("key", "/a/b");
        let query = make_query(&store, raw).unwrap();
        assert_eq!(query.len(), 1);
    }

    #[test]
    fn test_builder_fails_before_lookup() {
        let mut store = MockStore::new();
        store.expect_is_common_property().returning(|_| false);
        store.expect_lookup().times(0);

        let raw = RawQuery::new().field("title", "foo");
        assert!(matches!(
            make_query(&store, raw),
            Err(QueryError::MissingType)
        ));
    }
}
