//! Query Model
//!
//! A Query is an ordered list of conditions plus the paging options the
//! store applies when executing it.

use std::fmt;

use ib_core::{Datatype, QueryConfig, QueryError, QueryResult, Value};
use serde::Serialize;

use crate::operators::Operator;
use crate::sorts::SortKey;

/// A single field comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    /// The bare field name, operator suffix removed
    pub key: String,
    pub op: Operator,
    /// `None` only while a builder is still resolving it, and in versions
    /// queries, whose schema is fixed
    pub datatype: Option<Datatype>,
    pub value: Value,
}

impl Condition {
    pub fn new(
        key: impl Into<String>,
        op: Operator,
        datatype: Option<Datatype>,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            key: key.into(),
            op,
            datatype,
            value: value.into(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.datatype {
            Some(datatype) => write!(f, "{} {} {}:{}", self.key, self.op, datatype, self.value),
            None => write!(f, "{} {} None:{}", self.key, self.op, self.value),
        }
    }
}

/// Meta-parameters of a raw query, kept apart from its condition fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Field to sort by, optionally prefixed with `-` for descending
    pub sort: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Field tokens mapped to values, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionFields {
    entries: Vec<(String, Value)>,
}

impl ConditionFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing the value of an existing one in place.
    /// Returns the replaced value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let field = field.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((field, value));
                None
            }
        }
    }

    /// Add a field and return self (builder pattern)
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl IntoIterator for ConditionFields {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K, V> FromIterator<(K, V)> for ConditionFields
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (field, value) in iter {
            fields.insert(field, value);
        }
        fields
    }
}

/// A normalized query, ready for a store to execute
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Query {
    pub conditions: Vec<Condition>,
    pub sort: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Query {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty query carrying the given options, with the limit
    /// defaulted and capped according to `config`
    pub fn with_options(options: QueryOptions, config: &QueryConfig) -> Self {
        let limit = config.effective_limit(options.limit);
        if let Some(requested) = options.limit.filter(|l| *l != limit) {
            tracing::warn!(requested, limit, "Query limit clamped");
        }

        Self {
            conditions: vec![],
            sort: options.sort,
            limit: Some(limit),
            offset: options.offset,
        }
    }

    pub fn add_condition(
        &mut self,
        key: impl Into<String>,
        op: Operator,
        datatype: Option<Datatype>,
        value: impl Into<Value>,
    ) {
        self.conditions.push(Condition::new(key, op, datatype, value));
    }

    /// Value of the `type=` condition, if there is one
    pub fn get_type(&self) -> Option<&Value> {
        self.conditions
            .iter()
            .find(|c| c.key == "type" && c.op == Operator::Equals)
            .map(|c| &c.value)
    }

    /// Fail with [`QueryError::MissingType`] if a field outside the common
    /// properties is queried without a `type=` condition
    pub fn assert_type_required(&self, is_common: impl Fn(&str) -> bool) -> QueryResult<()> {
        let type_required = self.conditions.iter().any(|c| !is_common(&c.key));
        if type_required && self.get_type().is_none() {
            return Err(QueryError::MissingType);
        }
        Ok(())
    }

    /// Get conditions for a specific key
    pub fn conditions_for(&self, key: &str) -> Vec<&Condition> {
        self.conditions.iter().filter(|c| c.key == key).collect()
    }

    /// Check if every condition has a datatype
    pub fn is_resolved(&self) -> bool {
        self.conditions.iter().all(|c| c.datatype.is_some())
    }

    /// Parsed sort key, if a sort was requested
    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort.as_deref().and_then(SortKey::parse)
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<query: [")?;
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{}'", condition)?;
        }
        f.write_str("]>")
    }
}
