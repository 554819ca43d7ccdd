//! respcache prelude
//!
//! Essential types for storing, retrieving and revalidating responses.

pub use crate::HttpCache;
pub use respcache_store::prelude::*;

pub use bytes::Bytes;
