//! Configuration types and loading

use serde::{Deserialize, Serialize};

/// Limit used when a query does not ask for one
pub const DEFAULT_LIMIT: i64 = 1000;

/// Largest limit a query may carry
pub const MAX_LIMIT: i64 = 1000;

/// Query builder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct QueryConfig {
    /// Limit applied when none is supplied
    pub default_limit: i64,
    /// Supplied limits above this are clamped down to it
    pub max_limit: i64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl QueryConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(limit) = read_limit("INFOBASE_QUERY_DEFAULT_LIMIT")? {
            config.default_limit = limit;
        }
        if let Some(limit) = read_limit("INFOBASE_QUERY_MAX_LIMIT")? {
            config.max_limit = limit;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject a default that the maximum would clamp
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_limit > self.max_limit {
            return Err(ConfigError::InvalidValue {
                key: "default_limit".to_string(),
                message: format!(
                    "{} exceeds max_limit {}",
                    self.default_limit, self.max_limit
                ),
            });
        }
        Ok(())
    }

    /// Apply the default and the cap to a requested limit
    pub fn effective_limit(&self, requested: Option<i64>) -> i64 {
        match requested {
            Some(limit) => limit.min(self.max_limit),
            None => self.default_limit,
        }
    }
}

fn read_limit(key: &str) -> Result<Option<i64>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
