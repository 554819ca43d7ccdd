//! Freshen: header-only revalidation
//!
//! When a candidate response proves that a cached body is still current, only
//! the stored headers are replaced. The candidate body is never read. The
//! match test and the replacement run as one compare-and-swap on the store.

use http::{HeaderMap, HeaderName, StatusCode};

use super::super::{
    cache_entry::CacheEntry,
    cache_stats::CacheStats,
    eviction::{EvictionStore, SwapOutcome},
};
use super::core::ResponseCache;
use crate::error::{CacheError, Result};
use crate::resource::Resource;

impl<S: EvictionStore> ResponseCache<S> {
    /// Revalidate `keys` against `resource`
    ///
    /// For each resident key: if status and headers match, the stored headers
    /// are replaced with the candidate's, the body is kept and any stale
    /// marker is cleared; otherwise the key is invalidated. Keys that are not
    /// resident are skipped.
    ///
    /// # Errors
    ///
    /// Propagates failures from the header update. A mismatch is not an error.
    pub fn freshen<K: AsRef<str>>(&self, resource: &Resource, keys: &[K]) -> Result<()> {
        let policy = self.config.weight_policy;

        for key in keys {
            let key = key.as_ref();
            let outcome = self.store.compare_and_swap(key, &mut |current: &CacheEntry| {
                if !self.head_matches(current, resource) {
                    return None;
                }
                let entry = current.with_head(resource.headers().clone(), current.status());
                let weight = entry.weight(policy);
                Some((entry, weight))
            });

            match outcome {
                SwapOutcome::Swapped { evicted } => {
                    self.stale.clear(key);
                    CacheStats::bump(&self.stats.freshened, 1);
                    CacheStats::bump(&self.stats.evictions, evicted as u64);
                    tracing::debug!(target: "respcache::cache", key = key, "Freshened cached headers");
                }
                SwapOutcome::Rejected => {
                    tracing::debug!(
                        target: "respcache::cache",
                        key = key,
                        status = %resource.status(),
                        "Freshen candidate differs from cached response, invalidating"
                    );
                    self.invalidate(&[key]);
                }
                SwapOutcome::Missing => {
                    tracing::trace!(target: "respcache::cache", key = key, "Nothing cached to freshen");
                }
            }
        }

        Ok(())
    }

    /// Replace the headers and status stored under `key`, keeping its body
    ///
    /// Unlike `freshen` this does no comparison; callers use it once they
    /// have validated the cached body themselves.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::NotFoundInCache` if `key` is no longer resident.
    pub fn update_header(&self, key: &str, headers: HeaderMap, status: StatusCode) -> Result<()> {
        let policy = self.config.weight_policy;
        let outcome = self.store.compare_and_swap(key, &mut |current: &CacheEntry| {
            let entry = current.with_head(headers.clone(), status);
            let weight = entry.weight(policy);
            Some((entry, weight))
        });

        match outcome {
            SwapOutcome::Swapped { evicted } => {
                CacheStats::bump(&self.stats.evictions, evicted as u64);
                Ok(())
            }
            SwapOutcome::Rejected | SwapOutcome::Missing => Err(CacheError::not_found(key)),
        }
    }

    fn head_matches(&self, current: &CacheEntry, candidate: &Resource) -> bool {
        current.status() == candidate.status()
            && headers_equal(current.headers(), candidate.headers(), &self.ignored_headers)
    }
}

/// Same names and, per name, the same values in the same order.
///
/// Entry order across different names does not matter.
fn headers_equal(a: &HeaderMap, b: &HeaderMap, ignored: &[HeaderName]) -> bool {
    let relevant = |name: &&HeaderName| !ignored.contains(*name);

    a.keys().filter(relevant).count() == b.keys().filter(relevant).count()
        && a
            .keys()
            .filter(relevant)
            .all(|name| a.get_all(name).iter().eq(b.get_all(name).iter()))
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::{HeaderValue, header};

    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_headers_equal_ignores_entry_order() {
        let a = headers(&[("etag", "a"), ("vary", "accept")]);
        let b = headers(&[("vary", "accept"), ("etag", "a")]);
        assert!(headers_equal(&a, &b, &[]));
    }

    #[test]
    fn test_headers_equal_respects_value_order() {
        let a = headers(&[("link", "1"), ("link", "2")]);
        let b = headers(&[("link", "2"), ("link", "1")]);
        assert!(!headers_equal(&a, &b, &[]));
    }

    #[test]
    fn test_headers_equal_detects_extra_names() {
        let a = headers(&[("etag", "a")]);
        let b = headers(&[("etag", "a"), ("date", "now")]);
        assert!(!headers_equal(&a, &b, &[]));
        assert!(headers_equal(&a, &b, &[header::DATE]));
    }

    #[test]
    fn test_freshen_match_clears_stale_marker() {
        let cache = ResponseCache::new(100).unwrap();
        let mut res = Resource::from_bytes(StatusCode::OK, headers(&[("etag", "a")]), "body");
        cache.store(&mut res, &["/x"]).unwrap();
        cache.invalidate(&["/x"]);
        assert!(cache.retrieve("/x").unwrap().is_stale());

        let candidate = Resource::from_bytes(StatusCode::OK, headers(&[("etag", "a")]), "");
        cache.freshen(&candidate, &["/x"]).unwrap();

        assert!(cache.stale_since("/x").is_none());
        assert!(!cache.retrieve("/x").unwrap().is_stale());
    }

    #[test]
    fn test_update_header_keeps_body() {
        let cache = ResponseCache::new(100).unwrap();
        let mut res = Resource::from_bytes(StatusCode::OK, headers(&[("etag", "a")]), "body");
        cache.store(&mut res, &["/x"]).unwrap();

        cache
            .update_header("/x", headers(&[("etag", "b")]), StatusCode::OK)
            .unwrap();

        let head = cache.header("/x").unwrap();
        assert_eq!(head.headers["etag"], "b");
        let mut res = cache.retrieve("/x").unwrap();
        assert_eq!(res.read_body().unwrap(), Bytes::from_static(b"body"));
    }

    #[test]
    fn test_update_header_on_missing_key() {
        let cache = ResponseCache::new(100).unwrap();
        let err = cache
            .update_header("/gone", HeaderMap::new(), StatusCode::OK)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_freshen_with_ignored_date() {
        let config = crate::cache::CacheConfig {
            freshen_ignored_headers: vec!["date".to_string()],
            ..crate::cache::CacheConfig::with_capacity(100)
        };
        let cache = ResponseCache::with_config(config).unwrap();
        let mut res = Resource::from_bytes(
            StatusCode::OK,
            headers(&[("etag", "a"), ("date", "Sun, 06 Nov 1994 08:49:37 GMT")]),
            "body",
        );
        cache.store(&mut res, &["/x"]).unwrap();

        let candidate = Resource::from_bytes(
            StatusCode::OK,
            headers(&[("etag", "a"), ("date", "Mon, 07 Nov 1994 08:49:37 GMT")]),
            "",
        );
        cache.freshen(&candidate, &["/x"]).unwrap();

        assert_eq!(cache.stats().snapshot().freshened, 1);
        assert!(cache.stale_since("/x").is_none());
        assert_eq!(
            cache.header("/x").unwrap().headers[header::DATE],
            "Mon, 07 Nov 1994 08:49:37 GMT"
        );
    }
}
