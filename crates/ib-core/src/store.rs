//! In-memory schema store
//!
//! Holds type definitions loaded from JSON or built in code. Query builders
//! only ever read from it.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::result::QueryResult;
use crate::traits::{Property, SchemaStore, SchemaType, COMMON_PROPERTIES};

/// A type definition with its declared properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaTypeDef {
    pub key: String,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl SchemaTypeDef {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            properties: vec![],
        }
    }

    /// Declare a property (builder pattern)
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        expected_type: impl Into<String>,
    ) -> Self {
        self.properties.push(Property::new(name, expected_type));
        self
    }
}

impl SchemaType for SchemaTypeDef {
    fn key(&self) -> &str {
        &self.key
    }

    fn get_property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// Schema store backed by a map of type key to definition
#[derive(Debug, Clone, Default)]
pub struct MemorySchemaStore {
    types: HashMap<String, Arc<SchemaTypeDef>>,
    common_properties: Option<HashSet<String>>,
}

impl MemorySchemaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load definitions from a JSON array of `{"key", "properties"}` objects
    pub fn from_json(json: &str) -> QueryResult<Self> {
        let defs: Vec<SchemaTypeDef> =
            serde_json::from_str(json).map_err(|e| QueryError::Schema(e.to_string()))?;

        let mut store = Self::new();
        for def in defs {
            store.insert(def);
        }
        tracing::debug!(types = store.len(), "Loaded schema store");
        Ok(store)
    }

    /// Add a type definition (builder pattern)
    pub fn with_type(mut self, def: SchemaTypeDef) -> Self {
        self.insert(def);
        self
    }

    /// Add or replace a type definition
    pub fn insert(&mut self, def: SchemaTypeDef) {
        self.types.insert(def.key.clone(), Arc::new(def));
    }

    /// Replace the set of fields that need no `type` condition
    pub fn with_common_properties<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.common_properties = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl SchemaStore for MemorySchemaStore {
    type Type = Arc<SchemaTypeDef>;

    fn lookup(&self, type_key: &str) -> Option<Self::Type> {
        self.types.get(type_key).cloned()
    }

    fn is_common_property(&self, name: &str) -> bool {
        match &self.common_properties {
            Some(names) => names.contains(name),
            None => COMMON_PROPERTIES.contains(&name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_type() -> SchemaTypeDef {
        SchemaTypeDef::new("/type/page")
            .with_property("title", "/type/string")
            .with_property("body", "/type/text")
    }

    #[test]
    fn test_lookup() {
        let store = MemorySchemaStore::new().with_type(page_type());
        assert_eq!(store.len(), 1);

        let ty = store.lookup("/type/page").unwrap();
        assert_eq!(ty.key(), "/type/page");
        assert_eq!(
            ty.get_property("title").map(|p| p.expected_type.as_str()),
            Some("/type/string")
        );
        assert!(ty.get_property("life").is_none());
        assert!(store.lookup("/type/book").is_none());
    }

    #[test]
    fn test_insert_replaces() {
        let mut store = MemorySchemaStore::new().with_type(page_type());
        store.insert(SchemaTypeDef::new("/type/page"));
        assert_eq!(store.len(), 1);
        assert!(store.lookup("/type/page").unwrap().properties.is_empty());
    }

    #[test]
    fn test_from_json() {
        let store = MemorySchemaStore::from_json(
            r#"[
                {"key": "/type/page", "properties": [
                    {"name": "title", "expected_type": "/type/string"}
                ]},
                {"key": "/type/empty"}
            ]"#,
        )
        .unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.lookup("/type/empty").is_some());
    }

    #[test]
    fn test_from_json_invalid() {
        let err = MemorySchemaStore::from_json("{not json").unwrap_err();
        assert!(matches!(err, QueryError::Schema(_)));
    }

    #[test]
    fn test_common_properties_override() {
        let store = MemorySchemaStore::new();
        assert!(store.is_common_property("created"));
        assert!(!store.is_common_property("title"));

        let store = store.with_common_properties(["key", "title"]);
        assert!(store.is_common_property("title"));
        assert!(!store.is_common_property("created"));
        assert!(MemorySchemaStore::new().is_empty());
    }
}
