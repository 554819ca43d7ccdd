//! Cache configuration and preset policies
//!
//! Provides `CacheConfig` for sizing the cache, choosing how entries are
//! weighed and tuning the freshen comparison.

use serde::{Deserialize, Serialize};

use super::cache_entry::WeightPolicy;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("capacity_bytes must be greater than zero")]
    ZeroCapacity,

    #[error("max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("invalid header name in freshen_ignored_headers: {0}")]
    InvalidHeaderName(String),
}

/// Cache sizing and behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Total weight the store may hold before evicting
    pub capacity_bytes: u64,
    /// Largest body `store` will drain; `None` means `capacity_bytes`
    pub max_body_bytes: Option<u64>,
    /// How entries are charged against the capacity
    pub weight_policy: WeightPolicy,
    /// Header names left out of the freshen equality check
    pub freshen_ignored_headers: Vec<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity_bytes: 64 * 1024 * 1024, // 64MB
            max_body_bytes: None,
            weight_policy: WeightPolicy::Body,
            freshen_ignored_headers: Vec::new(),
        }
    }
}

impl CacheConfig {
    /// Default configuration with the given byte capacity
    #[must_use]
    pub fn with_capacity(capacity_bytes: u64) -> Self {
        Self {
            capacity_bytes,
            ..Self::default()
        }
    }

    /// Small cache for tests and embedded use
    #[must_use]
    pub fn small() -> Self {
        Self {
            capacity_bytes: 4 * 1024 * 1024,   // 4MB
            max_body_bytes: Some(512 * 1024), // 512KB
            ..Self::default()
        }
    }

    /// Large cache that also charges header bytes
    #[must_use]
    pub fn large() -> Self {
        Self {
            capacity_bytes: 1024 * 1024 * 1024,      // 1GB
            max_body_bytes: Some(64 * 1024 * 1024), // 64MB
            weight_policy: WeightPolicy::BodyAndHeaders,
            freshen_ignored_headers: Vec::new(),
        }
    }

    /// Effective per-body limit
    #[must_use]
    pub fn body_limit(&self) -> u64 {
        self.max_body_bytes.unwrap_or(self.capacity_bytes)
    }

    /// Check the configuration for unusable values
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the capacity or body limit is zero, or if an
    /// ignored header is not a valid header name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity_bytes == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.max_body_bytes == Some(0) {
            return Err(ConfigError::ZeroBodyLimit);
        }
        for name in &self.freshen_ignored_headers {
            http::HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ConfigError::InvalidHeaderName(name.clone()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert_eq!(CacheConfig::default().validate(), Ok(()));
        assert_eq!(CacheConfig::small().validate(), Ok(()));
        assert_eq!(CacheConfig::large().validate(), Ok(()));
    }

    #[test]
    fn test_zero_values_rejected() {
        assert_eq!(CacheConfig::with_capacity(0).validate(), Err(ConfigError::ZeroCapacity));

        let config = CacheConfig {
            max_body_bytes: Some(0),
            ..CacheConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroBodyLimit));
    }

    #[test]
    fn test_invalid_ignored_header() {
        let config = CacheConfig {
            freshen_ignored_headers: vec!["bad header".to_string()],
            ..CacheConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidHeaderName(_))));
    }

    #[test]
    fn test_body_limit_defaults_to_capacity() {
        assert_eq!(CacheConfig::with_capacity(100).body_limit(), 100);
        assert_eq!(CacheConfig::small().body_limit(), 512 * 1024);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: CacheConfig = serde_json::from_str(
            r#"{"capacity_bytes": 1024, "weight_policy": "body_and_headers", "freshen_ignored_headers": ["date"]}"#,
        )
        .unwrap();
        assert_eq!(config.capacity_bytes, 1024);
        assert_eq!(config.max_body_bytes, None);
        assert_eq!(config.weight_policy, WeightPolicy::BodyAndHeaders);
        assert_eq!(config.freshen_ignored_headers, vec!["date".to_string()]);
    }
}
