//! Query Sort Keys
//!
//! A query's `sort` option is passed through as the caller wrote it. These
//! helpers read the usual `-field` convention for descending order.

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending order (A-Z, 1-9, oldest first)
    #[default]
    Asc,
    /// Descending order (Z-A, 9-1, newest first)
    Desc,
}

impl SortDirection {
    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Get the opposite direction
    pub fn reverse(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// A sort option split into field and direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    /// Read `field`, `+field` or `-field`. Returns `None` for an empty field.
    pub fn parse(sort: &str) -> Option<Self> {
        let sort = sort.trim();
        let (field, direction) = if let Some(field) = sort.strip_prefix('-') {
            (field, SortDirection::Desc)
        } else if let Some(field) = sort.strip_prefix('+') {
            (field, SortDirection::Asc)
        } else {
            (sort, SortDirection::Asc)
        };

        if field.is_empty() {
            return None;
        }

        Some(Self {
            field: field.to_string(),
            direction,
        })
    }

    /// Check if sorting is descending
    pub fn is_desc(&self) -> bool {
        self.direction == SortDirection::Desc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_ascending() {
        let key = SortKey::parse("created").unwrap();
        assert_eq!(key.field, "created");
        assert_eq!(key.direction, SortDirection::Asc);

        assert_eq!(SortKey::parse("+key").unwrap().direction, SortDirection::Asc);
    }

    #[test]
    fn test_sort_key_descending() {
        let key = SortKey::parse("-last_modified").unwrap();
        assert_eq!(key.field, "last_modified");
        assert!(key.is_desc());
        assert_eq!(key.direction.as_str(), "desc");
    }

    #[test]
    fn test_sort_key_empty() {
        assert!(SortKey::parse("").is_none());
        assert!(SortKey::parse("-").is_none());
    }

    #[test]
    fn test_sort_direction_reverse() {
        assert_eq!(SortDirection::Asc.reverse(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.reverse(), SortDirection::Asc);
    }
}
