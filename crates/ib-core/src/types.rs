//! Common types used throughout the query layer

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::QueryError;
use crate::result::QueryResult;

/// A raw comparison value, tagged with its shape at ingestion
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// Key of another object, e.g. `/type/page`
    Reference(String),
}

impl Value {
    /// Create a reference value
    pub fn reference(key: impl Into<String>) -> Self {
        Self::Reference(key.into())
    }

    /// Convert one member of a JSON query object.
    ///
    /// `{"key": "/a/b"}` is the JSON spelling of a reference; any other
    /// object, array or null has no counterpart in the value model.
    pub fn from_json(field: &str, json: serde_json::Value) -> QueryResult<Self> {
        use serde_json::Value as Json;

        match json {
            Json::Bool(b) => Ok(Self::Boolean(b)),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Ok(Self::Integer(i)),
                None => n.as_f64().map(Self::Float).ok_or_else(|| {
                    QueryError::UnsupportedValue {
                        field: field.to_string(),
                        kind: "number",
                    }
                }),
            },
            Json::String(s) => Ok(Self::String(s)),
            Json::Object(map) if map.len() == 1 => match map.get("key") {
                Some(Json::String(key)) => Ok(Self::Reference(key.clone())),
                _ => Err(QueryError::UnsupportedValue {
                    field: field.to_string(),
                    kind: "object",
                }),
            },
            Json::Object(_) => Err(QueryError::UnsupportedValue {
                field: field.to_string(),
                kind: "object",
            }),
            Json::Array(_) => Err(QueryError::UnsupportedValue {
                field: field.to_string(),
                kind: "array",
            }),
            Json::Null => Err(QueryError::UnsupportedValue {
                field: field.to_string(),
                kind: "null",
            }),
        }
    }

    /// Text usable as an object key (strings and references)
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Reference(s) => Some(s),
            _ => None,
        }
    }

    /// Shape name, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Reference(_) => "reference",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::String(s) | Self::Reference(s) => f.write_str(s),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::String(s) => serializer.serialize_str(s),
            Self::Reference(key) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("key", key)?;
                map.end()
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i.into())
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

/// Semantic kind of a condition value, as the store understands it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Datatype {
    Str,
    Int,
    Float,
    Boolean,
    Ref,
    Datetime,
    /// Object keys; only the `key` property has this datatype
    Key,
}

impl Datatype {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "str" => Some(Self::Str),
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "boolean" => Some(Self::Boolean),
            "ref" => Some(Self::Ref),
            "datetime" => Some(Self::Datetime),
            "key" => Some(Self::Key),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Ref => "ref",
            Self::Datetime => "datetime",
            Self::Key => "key",
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
