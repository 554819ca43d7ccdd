//! Object-safe cache interface for the caching layer

use super::cache_entry::CachedHead;
use super::eviction::EvictionStore;
use super::response_cache::ResponseCache;
use crate::error::Result;
use crate::resource::Resource;

/// Operations the HTTP caching layer needs from a response cache
///
/// Implemented by `ResponseCache` so callers can hold `Arc<dyn Cache>`.
pub trait Cache: Send + Sync {
    /// Headers and status stored under `key`
    fn header(&self, key: &str) -> Result<CachedHead>;

    /// Drain `resource` and store it under every key
    fn store(&self, resource: &mut Resource, keys: &[&str]) -> Result<()>;

    /// Cached response for `key`, flagged stale where a marker applies
    fn retrieve(&self, key: &str) -> Result<Resource>;

    /// Mark keys stale as of now
    fn invalidate(&self, keys: &[&str]);

    /// Refresh headers of keys that still match `resource`, invalidate the rest
    fn freshen(&self, resource: &Resource, keys: &[&str]) -> Result<()>;
}

impl<S: EvictionStore> Cache for ResponseCache<S> {
    fn header(&self, key: &str) -> Result<CachedHead> {
        ResponseCache::header(self, key)
    }

    fn store(&self, resource: &mut Resource, keys: &[&str]) -> Result<()> {
        ResponseCache::store(self, resource, keys)
    }

    fn retrieve(&self, key: &str) -> Result<Resource> {
        ResponseCache::retrieve(self, key)
    }

    fn invalidate(&self, keys: &[&str]) {
        ResponseCache::invalidate(self, keys);
    }

    fn freshen(&self, resource: &Resource, keys: &[&str]) -> Result<()> {
        ResponseCache::freshen(self, resource, keys)
    }
}
