//! respcache prelude
//!
//! The types a caching layer needs to store, retrieve and revalidate
//! responses.

pub use crate::cache::{Cache, CacheConfig, CachedHead, EvictionStore, ResponseCache, WeightPolicy};
pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::error::{CacheError, Result};
pub use crate::resource::Resource;

// HTTP standard types from http crate
pub use ::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
