//! Store, retrieve, header and invalidate

use std::io::{ErrorKind, Read};

use bytes::Bytes;

use super::super::{
    cache_entry::{CacheEntry, CachedHead},
    cache_stats::CacheStats,
    eviction::{EvictionStore, InsertOutcome},
};
use super::core::ResponseCache;
use crate::error::{BodyReadError, CacheError, Result};
use crate::resource::Resource;

impl<S: EvictionStore> ResponseCache<S> {
    /// Drain `resource` and store it under every key in `keys`
    ///
    /// Each key gets its own entry and loses any stale marker it had.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::BodyRead` if the body cannot be read or is
    /// shorter than its declared `Content-Length`, and
    /// `CacheError::BodyTooLarge` if it exceeds the configured body limit.
    pub fn store<K: AsRef<str>>(&self, resource: &mut Resource, keys: &[K]) -> Result<()> {
        let body = match read_body(resource, self.body_limit) {
            Ok(body) => body,
            Err(err) => {
                CacheStats::bump(&self.stats.errors, 1);
                tracing::debug!(
                    target: "respcache::cache",
                    error = %err,
                    "Failed to read response body for storage"
                );
                return Err(err);
            }
        };

        let entry = CacheEntry::new(resource.status(), resource.headers().clone(), body);
        let weight = entry.weight(self.config.weight_policy);

        for key in keys {
            let key = key.as_ref();
            self.stale.clear(key);

            match self.store.insert(key, entry.clone(), weight) {
                InsertOutcome::Stored { evicted } => {
                    CacheStats::bump(&self.stats.stores, 1);
                    CacheStats::bump(&self.stats.evictions, evicted as u64);
                    tracing::debug!(
                        target: "respcache::cache",
                        key = key,
                        weight = weight,
                        evicted_count = evicted,
                        "Stored response"
                    );
                }
                InsertOutcome::TooHeavy => {
                    tracing::warn!(
                        target: "respcache::cache",
                        key = key,
                        weight = weight,
                        capacity = self.store.capacity(),
                        "Response outweighs cache capacity, not stored"
                    );
                }
            }
        }

        Ok(())
    }

    /// Rebuild the cached response for `key`
    ///
    /// The returned resource is marked stale if `key` was invalidated and its
    /// `Date` is not strictly after the invalidation time. The marker itself
    /// is left in place.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::NotFoundInCache` if `key` is not resident.
    pub fn retrieve(&self, key: &str) -> Result<Resource> {
        let Some(entry) = self.store.get(key) else {
            CacheStats::bump(&self.stats.misses, 1);
            tracing::trace!(target: "respcache::cache", key = key, "Cache miss");
            return Err(CacheError::not_found(key));
        };
        CacheStats::bump(&self.stats.hits, 1);

        let mut resource = entry.to_resource();
        if self.stale.is_stale_before(key, resource.date()) {
            CacheStats::bump(&self.stats.stale_hits, 1);
            tracing::debug!(
                target: "respcache::cache",
                key = key,
                stale_since = ?self.stale.stale_since(key),
                "Stale marker applies to cached response"
            );
            resource.mark_stale();
        }

        tracing::trace!(target: "respcache::cache", key = key, stale = resource.is_stale(), "Cache hit");
        Ok(resource)
    }

    /// Headers and status stored under `key`, ignoring stale markers
    ///
    /// # Errors
    ///
    /// Returns `CacheError::NotFoundInCache` if `key` is not resident.
    pub fn header(&self, key: &str) -> Result<CachedHead> {
        self.store
            .get(key)
            .map(|entry| entry.head())
            .ok_or_else(|| CacheError::not_found(key))
    }

    /// Mark every key in `keys` stale as of now, stored or not
    pub fn invalidate<K: AsRef<str>>(&self, keys: &[K]) {
        let now = self.clock.now();
        for key in keys {
            self.stale.mark_stale(key.as_ref(), now);
        }
        CacheStats::bump(&self.stats.invalidations, keys.len() as u64);

        tracing::debug!(
            target: "respcache::cache",
            keys = ?keys.iter().map(<K as AsRef<str>>::as_ref).collect::<Vec<&str>>(),
            "Invalidated keys"
        );
    }
}

/// Read the whole body, trusting a declared `Content-Length` when present
fn read_body(resource: &mut Resource, limit: u64) -> Result<Bytes> {
    match resource.content_length() {
        Some(declared) => {
            if declared > limit {
                return Err(CacheError::BodyTooLarge { limit });
            }
            let len = usize::try_from(declared).map_err(|_| CacheError::BodyTooLarge { limit })?;
            let mut buf = vec![0; len];
            let mut filled = 0;
            while filled < len {
                match resource.read(&mut buf[filled..]) {
                    Ok(0) => {
                        tracing::warn!(
                            target: "respcache::cache",
                            declared = declared,
                            read = filled,
                            "Response body shorter than its Content-Length"
                        );
                        return Err(BodyReadError::ContentLengthMismatch {
                            declared,
                            read: filled as u64,
                        }
                        .into());
                    }
                    Ok(n) => filled += n,
                    Err(err) if err.kind() == ErrorKind::Interrupted => {}
                    Err(err) => return Err(err.into()),
                }
            }
            Ok(Bytes::from(buf))
        }
        None => {
            let mut buf = Vec::new();
            resource.by_ref().take(limit.saturating_add(1)).read_to_end(&mut buf)?;
            if buf.len() as u64 > limit {
                return Err(CacheError::BodyTooLarge { limit });
            }
            Ok(Bytes::from(buf))
        }
    }
}
