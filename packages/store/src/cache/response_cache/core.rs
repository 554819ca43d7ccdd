//! Core ResponseCache structure and initialization

use std::sync::Arc;
use std::time::SystemTime;

use http::HeaderName;

use super::super::{
    cache_config::CacheConfig,
    cache_stats::CacheStats,
    eviction::{EvictionStore, LruStore},
    stale_overlay::StaleOverlay,
};
use crate::clock::{Clock, SystemClock};
use crate::error::{CacheError, Result};

/// Byte-bounded HTTP response cache with stale markers
pub struct ResponseCache<S = LruStore> {
    /// Entry storage and eviction
    pub(super) store: S,
    /// Invalidation markers
    pub(super) stale: StaleOverlay,
    /// Configuration
    pub(super) config: CacheConfig,
    /// Largest body `store` drains; `config.max_body_bytes` or the store capacity
    pub(super) body_limit: u64,
    /// Parsed form of `config.freshen_ignored_headers`
    pub(super) ignored_headers: Vec<HeaderName>,
    /// Source of invalidation timestamps
    pub(super) clock: Arc<dyn Clock>,
    /// Cache statistics
    pub(super) stats: CacheStats,
}

impl ResponseCache<LruStore> {
    /// Create an LRU-backed cache holding at most `capacity_bytes`
    ///
    /// # Errors
    ///
    /// Returns `CacheError::InvalidCapacity` if `capacity_bytes` is zero.
    pub fn new(capacity_bytes: u64) -> Result<Self> {
        Self::with_config(CacheConfig::with_capacity(capacity_bytes))
    }

    /// Create an LRU-backed cache from a full configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        if config.capacity_bytes == 0 {
            return Err(CacheError::InvalidCapacity);
        }
        let store = LruStore::new(config.capacity_bytes)?;
        Self::with_store(store, config)
    }
}

impl<S: EvictionStore> ResponseCache<S> {
    /// Create a cache over a caller-provided eviction store
    ///
    /// The store's own capacity governs eviction and, unless
    /// `config.max_body_bytes` is set, the body limit. `config` supplies the
    /// weight policy and freshen settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn with_store(store: S, config: CacheConfig) -> Result<Self> {
        config.validate()?;
        let ignored_headers = config
            .freshen_ignored_headers
            .iter()
            .filter_map(|name| HeaderName::from_bytes(name.as_bytes()).ok())
            .collect();
        let body_limit = config.max_body_bytes.unwrap_or_else(|| store.capacity());

        tracing::debug!(
            target: "respcache::cache",
            capacity = store.capacity(),
            body_limit = body_limit,
            weight_policy = ?config.weight_policy,
            "Response cache created"
        );

        Ok(Self {
            store,
            stale: StaleOverlay::new(),
            config,
            body_limit,
            ignored_headers,
            clock: Arc::new(SystemClock),
            stats: CacheStats::default(),
        })
    }

    /// Replace the clock used to stamp invalidations
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// The underlying eviction store
    pub fn eviction_store(&self) -> &S {
        &self.store
    }

    /// Largest body `store` will accept
    pub fn body_limit(&self) -> u64 {
        self.body_limit
    }

    /// When `key` was last invalidated, if its marker is still present
    pub fn stale_since(&self, key: &str) -> Option<SystemTime> {
        self.stale.stale_since(key)
    }

    /// Get current cache size information: (entries, resident weight, capacity)
    pub fn size_info(&self) -> (usize, u64, u64) {
        (self.store.len(), self.store.weight(), self.store.capacity())
    }
}

impl<S: EvictionStore> std::fmt::Debug for ResponseCache<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (entries, weight, capacity) = self.size_info();
        f.debug_struct("ResponseCache")
            .field("entries", &entries)
            .field("weight", &weight)
            .field("capacity", &capacity)
            .field("stale_markers", &self.stale.len())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cache_is_empty() {
        let cache = ResponseCache::new(1024).unwrap();
        assert_eq!(cache.size_info(), (0, 0, 1024));
        assert_eq!(cache.stats().snapshot().stores, 0);
    }

    #[test]
    fn test_zero_capacity_is_fatal() {
        let err = ResponseCache::new(0).unwrap_err();
        assert!(err.is_config());
        assert!(matches!(err, CacheError::InvalidCapacity));
    }

    #[test]
    fn test_body_limit_follows_injected_store() {
        let cache = ResponseCache::with_store(LruStore::new(8).unwrap(), CacheConfig::default()).unwrap();
        assert_eq!(cache.body_limit(), 8);

        let config = CacheConfig {
            max_body_bytes: Some(4),
            ..CacheConfig::default()
        };
        let cache = ResponseCache::with_store(LruStore::new(8).unwrap(), config).unwrap();
        assert_eq!(cache.body_limit(), 4);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CacheConfig {
            freshen_ignored_headers: vec!["not a header".to_string()],
            ..CacheConfig::with_capacity(10)
        };
        assert!(matches!(
            ResponseCache::with_config(config),
            Err(CacheError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_ignored_headers_parsed() {
        let config = CacheConfig {
            freshen_ignored_headers: vec!["Date".to_string(), "age".to_string()],
            ..CacheConfig::with_capacity(10)
        };
        let cache = ResponseCache::with_config(config).unwrap();
        assert_eq!(
            cache.ignored_headers,
            vec![http::header::DATE, http::header::AGE]
        );
    }
}
