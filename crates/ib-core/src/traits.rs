//! Collaborator traits
//!
//! The query layer never owns schemas. It reads them through these
//! interfaces, which a store implements.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::types::Datatype;

/// Properties every object carries whatever its type.
///
/// Queries restricted to these fields need no `type` condition.
pub const COMMON_PROPERTIES: &[&str] = &[
    "key",
    "type",
    "permission",
    "child_permission",
    "revision",
    "latest_revision",
    "created",
    "last_modified",
];

/// A declared property of a schema type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    /// Key of the property's declared type, e.g. `/type/string`
    pub expected_type: String,
}

impl Property {
    pub fn new(name: impl Into<String>, expected_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expected_type: expected_type.into(),
        }
    }
}

/// A type definition that can resolve its declared properties
pub trait SchemaType {
    /// The type's own key, e.g. `/type/page`
    fn key(&self) -> &str;

    fn get_property(&self, name: &str) -> Option<&Property>;
}

impl<T: SchemaType + ?Sized> SchemaType for Arc<T> {
    fn key(&self) -> &str {
        (**self).key()
    }

    fn get_property(&self, name: &str) -> Option<&Property> {
        (**self).get_property(name)
    }
}

impl<T: SchemaType + ?Sized> SchemaType for &T {
    fn key(&self) -> &str {
        (**self).key()
    }

    fn get_property(&self, name: &str) -> Option<&Property> {
        (**self).get_property(name)
    }
}

/// Read access to the schema store
pub trait SchemaStore {
    type Type: SchemaType;

    /// Find the type definition stored under `type_key`
    fn lookup(&self, type_key: &str) -> Option<Self::Type>;

    /// Check if a field is exempt from the type-scoping rule
    fn is_common_property(&self, name: &str) -> bool {
        COMMON_PROPERTIES.contains(&name)
    }
}

/// Translates a property's expected type into a datatype
pub trait TypeMapping {
    fn datatype_for(&self, expected_type: &str) -> Datatype;
}

impl<F> TypeMapping for F
where
    F: Fn(&str) -> Datatype,
{
    fn datatype_for(&self, expected_type: &str) -> Datatype {
        self(expected_type)
    }
}

/// Mapping for the built-in primitive types.
///
/// Any other expected type is a user-defined type, so the property holds
/// references.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTypeMapping;

impl TypeMapping for DefaultTypeMapping {
    fn datatype_for(&self, expected_type: &str) -> Datatype {
        match expected_type {
            "/type/key" => Datatype::Key,
            "/type/string" | "/type/text" | "/type/uri" => Datatype::Str,
            "/type/int" => Datatype::Int,
            "/type/float" => Datatype::Float,
            "/type/boolean" => Datatype::Boolean,
            "/type/datetime" => Datatype::Datetime,
            _ => Datatype::Ref,
        }
    }
}
