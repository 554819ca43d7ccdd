//! # respcache store
//!
//! Size-bounded in-memory cache for HTTP response representations.
//!
//! - **Byte-weighted LRU eviction**: capacity is total stored body bytes, not
//!   entry count
//! - **Multi-key storage**: one response can be stored under several keys,
//!   each an independent entry
//! - **Lazy staleness**: `invalidate` marks keys without removing them and
//!   `retrieve` reports the mark unless the content is newer
//! - **Freshening**: header-only revalidation that never re-reads a body
//!
//! Freshness calculation, cacheability policy and network I/O belong to the
//! caching layer that sits on top of this crate.

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod cache;
pub mod clock;
pub mod error;
pub mod prelude;
pub mod resource;

pub use cache::{
    Cache, CacheConfig, CacheEntry, CacheStats, CachedHead, EvictionStore, LruStore,
    ResponseCache, StaleOverlay, WeightPolicy,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{BodyReadError, CacheError, Result};
pub use resource::Resource;
