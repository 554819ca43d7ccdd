//! Tests for the respcache public API

use std::io::Read;
use std::sync::{Arc, Mutex};

use respcache::prelude::*;
use respcache::{CacheStatsSnapshot, LruStore};

fn response(body: &'static str, etag: &'static str) -> Resource {
    let mut headers = HeaderMap::new();
    headers.insert(http::header::ETAG, HeaderValue::from_static(etag));
    Resource::from_bytes(StatusCode::OK, headers, Bytes::from_static(body.as_bytes()))
}

#[test]
fn test_shared_cache_round_trip() {
    let cache = HttpCache::shared(1024).unwrap();
    let mut res = response("hello", "a");
    cache.store(&mut res, &["/x", "/x?variant=1"]).unwrap();

    let mut cached = cache.retrieve("/x?variant=1").unwrap();
    let mut body = String::new();
    cached.read_to_string(&mut body).unwrap();
    assert_eq!(body, "hello");
    assert_eq!(cache.header("/x").unwrap().headers["etag"], "a");
}

#[test]
fn test_zero_capacity_rejected() {
    assert!(HttpCache::lru(0).unwrap_err().is_config());
    assert!(HttpCache::shared(0).is_err());
}

#[test]
fn test_config_from_json() {
    let config: CacheConfig = serde_json::from_str(
        r#"{"capacity_bytes": 16, "weight_policy": "body_and_headers"}"#,
    )
    .unwrap();
    let cache = HttpCache::from_config(config).unwrap();

    // 5 body bytes + "etag" + "a"
    let mut res = response("hello", "a");
    cache.store(&mut res, &["/x"]).unwrap();
    assert_eq!(cache.size_info(), (1, 10, 16));

    let mut res = response("world", "b");
    cache.store(&mut res, &["/y"]).unwrap();
    assert!(cache.retrieve("/x").unwrap_err().is_not_found());
}

#[test]
fn test_custom_store_with_eviction_listener() {
    let evicted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&evicted);
    let store = LruStore::new(8)
        .unwrap()
        .with_eviction_listener(move |key, _| sink.lock().unwrap().push(key.to_string()));
    let cache = HttpCache::with_store(store, CacheConfig::with_capacity(8)).unwrap();

    for key in ["/a", "/b", "/c"] {
        let mut res = response("four", "a");
        cache.store(&mut res, &[key]).unwrap();
    }

    assert_eq!(*evicted.lock().unwrap(), vec!["/a".to_string()]);
    let stats: CacheStatsSnapshot = cache.stats().snapshot();
    assert_eq!(stats.stores, 3);
    assert_eq!(stats.evictions, 1);
}

#[test]
fn test_revalidation_cycle() {
    let clock = Arc::new(ManualClock::default());
    let cache = HttpCache::lru(1024).unwrap().with_clock(Arc::clone(&clock));

    let mut res = response("body", "v1");
    cache.store(&mut res, &["/doc"]).unwrap();

    cache.invalidate(&["/doc"]);
    assert!(cache.retrieve("/doc").unwrap().is_stale());

    // A matching candidate revalidates the cached body
    cache.freshen(&response("", "v1"), &["/doc"]).unwrap();
    assert!(!cache.retrieve("/doc").unwrap().is_stale());

    // A changed candidate invalidates it again
    cache.freshen(&response("", "v2"), &["/doc"]).unwrap();
    assert!(cache.retrieve("/doc").unwrap().is_stale());

    let mut res = response("body2", "v2");
    cache.store(&mut res, &["/doc"]).unwrap();
    assert!(!cache.retrieve("/doc").unwrap().is_stale());
}
