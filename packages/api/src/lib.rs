//! respcache public API
//!
//! In-memory HTTP response cache bounded by total stored bytes. Responses can
//! be stored under several keys, marked stale without being removed, and
//! revalidated by swapping headers while the cached body stays in place.
//!
//! ```
//! use respcache::prelude::*;
//!
//! let cache = respcache::HttpCache::lru(1024 * 1024).expect("non-zero capacity");
//! let mut res = Resource::from_bytes(StatusCode::OK, HeaderMap::new(), "hello");
//! cache.store(&mut res, &["/greeting"]).expect("body fits");
//!
//! let cached = cache.retrieve("/greeting").expect("just stored");
//! assert!(!cached.is_stale());
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

use std::sync::Arc;

pub mod prelude;

// Re-export the implementation crate's public surface
pub use respcache_store::cache::{
    CacheEntry, CacheStats, CacheStatsSnapshot, CachedHead, ConfigError, EvictionListener,
    EvictionStore, HttpDateParseError, InsertOutcome, LruStore, StaleOverlay, SwapFn, SwapOutcome,
    WeightPolicy, fmt_http_date, parse_http_date,
};
pub use respcache_store::{
    BodyReadError, Cache, CacheConfig, CacheError, Clock, ManualClock, Resource, ResponseCache,
    Result, SystemClock,
};

/// Main entry point providing cache constructors
pub struct HttpCache;

impl HttpCache {
    /// LRU cache holding at most `capacity_bytes` of response bodies
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity_bytes` is zero.
    pub fn lru(capacity_bytes: u64) -> Result<ResponseCache> {
        ResponseCache::new(capacity_bytes)
    }

    /// LRU cache built from a full configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn from_config(config: CacheConfig) -> Result<ResponseCache> {
        ResponseCache::with_config(config)
    }

    /// Cache over a custom eviction store
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn with_store<S: EvictionStore>(store: S, config: CacheConfig) -> Result<ResponseCache<S>> {
        ResponseCache::with_store(store, config)
    }

    /// LRU cache behind the object-safe `Cache` interface, ready to share
    /// across request handlers
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity_bytes` is zero.
    pub fn shared(capacity_bytes: u64) -> Result<Arc<dyn Cache>> {
        let cache = ResponseCache::new(capacity_bytes)?;
        tracing::debug!(target: "respcache", capacity_bytes, "Created shared response cache");
        Ok(Arc::new(cache))
    }
}
