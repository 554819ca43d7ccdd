//! In-memory HTTP response cache bounded by stored bytes
//!
//! This module provides:
//! - An LRU eviction store charged by entry weight (body bytes by default)
//! - A stale overlay that marks keys invalid without removing them
//! - Header-only revalidation that keeps the cached body
//! - Atomic counters for hits, misses, evictions and revalidations

pub mod cache_config;
pub mod cache_entry;
pub mod cache_stats;
pub mod eviction;
pub mod http_date;
pub mod response_cache;
pub mod stale_overlay;
pub mod traits;

// Re-export all public types and functions
pub use cache_config::{CacheConfig, ConfigError};
pub use cache_entry::{CacheEntry, CachedHead, WeightPolicy};
pub use cache_stats::{CacheStats, CacheStatsSnapshot};
pub use eviction::{EvictionListener, EvictionStore, InsertOutcome, LruStore, SwapFn, SwapOutcome};
pub use http_date::{HttpDateParseError, fmt_http_date, parse_http_date};
pub use response_cache::ResponseCache;
pub use stale_overlay::StaleOverlay;
pub use traits::Cache;
