//! Condition operators
//!
//! Field tokens in a raw query may carry a trailing operator, as in
//! `title~` or `revision>=`. [`parse_key`] splits the two apart.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparison operators a condition can use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Operator {
    /// Equals (=)
    #[default]
    #[serde(rename = "=")]
    Equals,
    /// Not equals (!=)
    #[serde(rename = "!=")]
    NotEquals,
    /// Less than (<)
    #[serde(rename = "<")]
    LessThan,
    /// Less than or equal (<=)
    #[serde(rename = "<=")]
    LessThanOrEqual,
    /// Greater than or equal (>=)
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    /// Greater than (>)
    #[serde(rename = ">")]
    GreaterThan,
    /// Pattern match (~)
    #[serde(rename = "~")]
    Like,
}

/// Suffixes in match order. Two-character operators come first so that
/// `<=` is never read as a key ending in `<` followed by `=`.
const SUFFIXES: [Operator; 7] = [
    Operator::NotEquals,
    Operator::LessThanOrEqual,
    Operator::GreaterThanOrEqual,
    Operator::Equals,
    Operator::LessThan,
    Operator::GreaterThan,
    Operator::Like,
];

impl Operator {
    /// Parse operator from string representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "=" => Some(Self::Equals),
            "!=" => Some(Self::NotEquals),
            "<" => Some(Self::LessThan),
            "<=" => Some(Self::LessThanOrEqual),
            ">=" => Some(Self::GreaterThanOrEqual),
            ">" => Some(Self::GreaterThan),
            "~" => Some(Self::Like),
            _ => None,
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::NotEquals => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThanOrEqual => ">=",
            Self::GreaterThan => ">",
            Self::Like => "~",
        }
    }

    /// All operators
    pub fn all() -> [Operator; 7] {
        SUFFIXES
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a raw field token into its bare key and operator.
///
/// A token without an operator suffix compares with `=`.
pub fn parse_key(token: &str) -> (&str, Operator) {
    SUFFIXES
        .iter()
        .find_map(|op| token.strip_suffix(op.as_str()).map(|key| (key, *op)))
        .unwrap_or((token, Operator::Equals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_without_operator() {
        assert_eq!(parse_key("foo"), ("foo", Operator::Equals));
        assert_eq!(parse_key(""), ("", Operator::Equals));
    }

    #[test]
    fn test_parse_key_single_char_operators() {
        assert_eq!(parse_key("foo="), ("foo", Operator::Equals));
        assert_eq!(parse_key("foo<"), ("foo", Operator::LessThan));
        assert_eq!(parse_key("foo>"), ("foo", Operator::GreaterThan));
        assert_eq!(parse_key("foo~"), ("foo", Operator::Like));
    }

    #[test]
    fn test_parse_key_two_char_operators() {
        assert_eq!(parse_key("foo!="), ("foo", Operator::NotEquals));
        assert_eq!(parse_key("foo<="), ("foo", Operator::LessThanOrEqual));
        assert_eq!(parse_key("foo>="), ("foo", Operator::GreaterThanOrEqual));
    }

    #[test]
    fn test_parse_key_every_operator() {
        for op in Operator::all() {
            let token = format!("revision{}", op);
            assert_eq!(parse_key(&token), ("revision", op));
        }
    }

    #[test]
    fn test_parse_key_strips_only_one_suffix() {
        assert_eq!(parse_key("a~~"), ("a~", Operator::Like));
    }

    #[test]
    fn test_operator_parsing() {
        for op in Operator::all() {
            assert_eq!(Operator::from_str(op.as_str()), Some(op));
        }
        assert_eq!(Operator::from_str("=="), None);
        assert_eq!(Operator::default(), Operator::Equals);
    }

    #[test]
    fn test_operator_serde() {
        assert_eq!(
            serde_json::to_string(&Operator::LessThanOrEqual).unwrap(),
            "\"<=\""
        );
        let op: Operator = serde_json::from_str("\"~\"").unwrap();
        assert_eq!(op, Operator::Like);
    }
}
