//! Datatype resolution
//!
//! Decides what kind of value a condition compares against, from the
//! field name, the value's own shape, and the declared schema.

use std::collections::HashMap;

use ib_core::{Datatype, SchemaType, TypeMapping, Value};
use once_cell::sync::Lazy;

/// System properties whose datatype is the same in every schema
static RESERVED_DATATYPES: Lazy<HashMap<&'static str, Datatype>> = Lazy::new(|| {
    HashMap::from([
        ("key", Datatype::Key),
        ("type", Datatype::Ref),
        ("permission", Datatype::Ref),
        ("child_permission", Datatype::Ref),
        ("created", Datatype::Datetime),
        ("last_modified", Datatype::Datetime),
    ])
});

/// Datatype of a reserved system property
pub fn reserved_datatype(key: &str) -> Option<Datatype> {
    RESERVED_DATATYPES.get(key).copied()
}

/// Resolve the datatype of one condition.
///
/// First match wins:
/// 1. reserved system properties
/// 2. the value's shape (boolean, integer, float)
/// 3. the property's expected type in `schema_type`, through `mapping`
/// 4. `ref` for reference values, `str` for everything else
pub fn find_datatype<T, M>(
    schema_type: Option<&T>,
    key: &str,
    value: &Value,
    mapping: &M,
) -> Datatype
where
    T: SchemaType + ?Sized,
    M: TypeMapping + ?Sized,
{
    if let Some(datatype) = reserved_datatype(key) {
        return datatype;
    }

    match value {
        Value::Boolean(_) => return Datatype::Boolean,
        Value::Integer(_) => return Datatype::Int,
        Value::Float(_) => return Datatype::Float,
        Value::String(_) | Value::Reference(_) => {}
    }

    if let Some(property) = schema_type.and_then(|ty| ty.get_property(key)) {
        return mapping.datatype_for(&property.expected_type);
    }

    match value {
        Value::Reference(_) => Datatype::Ref,
        _ => Datatype::Str,
    }
}
