//! Raw query ingestion
//!
//! Callers receive queries as a JSON object or as a URL query string. Both
//! mix the `limit`/`offset`/`sort` meta-parameters in with condition fields;
//! [`RawQuery`] separates them.

use ib_core::{QueryError, QueryResult, Value};
use url::form_urlencoded;

use crate::query::{ConditionFields, QueryOptions};

const OFFSET: &str = "offset";
const LIMIT: &str = "limit";
const SORT: &str = "sort";

/// A query as supplied by a caller, before normalization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawQuery {
    pub options: QueryOptions,
    pub fields: ConditionFields,
}

impl RawQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition field (builder pattern)
    pub fn field(mut self, token: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(token, value);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.options.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.options.offset = Some(offset);
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.options.sort = Some(sort.into());
        self
    }

    /// Read a JSON query object such as
    /// `{"type": "/type/page", "title~": "foo", "limit": 10}`.
    ///
    /// Member order is kept. A `null` meta-parameter counts as absent.
    pub fn from_json(json: serde_json::Value) -> QueryResult<Self> {
        use serde_json::Value as Json;

        let members = match json {
            Json::Object(members) => members,
            other => {
                return Err(QueryError::InvalidQuery(format!(
                    "expected a JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let mut raw = Self::new();
        for (name, value) in members {
            match name.as_str() {
                OFFSET => raw.options.offset = json_integer(OFFSET, value)?,
                LIMIT => raw.options.limit = json_integer(LIMIT, value)?,
                SORT => {
                    raw.options.sort = match value {
                        Json::Null => None,
                        Json::String(s) => Some(s),
                        other => {
                            return Err(QueryError::InvalidOption {
                                name: SORT,
                                message: format!("expected a string, got {}", json_kind(&other)),
                            })
                        }
                    }
                }
                _ => {
                    let value = Value::from_json(&name, value)?;
                    raw.fields.insert(name, value);
                }
            }
        }
        Ok(raw)
    }

    /// Read a URL query string such as `type=/type/page&title~=foo&limit=10`.
    ///
    /// Field values stay strings; the schema decides their datatype.
    pub fn from_query_string(query: &str) -> QueryResult<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut raw = Self::new();
        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            match &*name {
                OFFSET => raw.options.offset = Some(parse_integer(OFFSET, &value)?),
                LIMIT => raw.options.limit = Some(parse_integer(LIMIT, &value)?),
                SORT => raw.options.sort = Some(value.into_owned()),
                _ => {
                    raw.fields.insert(name.into_owned(), value.into_owned());
                }
            }
        }
        Ok(raw)
    }

    /// Split into options and fields
    pub fn into_parts(self) -> (QueryOptions, ConditionFields) {
        (self.options, self.fields)
    }
}

fn json_integer(name: &'static str, value: serde_json::Value) -> QueryResult<Option<i64>> {
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Number(n) => n.as_i64().map(Some).ok_or_else(|| QueryError::InvalidOption {
            name,
            message: format!("expected an integer, got {}", n),
        }),
        other => Err(QueryError::InvalidOption {
            name,
            message: format!("expected an integer, got {}", json_kind(&other)),
        }),
    }
}

fn parse_integer(name: &'static str, value: &str) -> QueryResult<i64> {
    value.trim().parse().map_err(|_| QueryError::InvalidOption {
        name,
        message: format!("expected an integer, got {:?}", value),
    })
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
