//! Error types for cache operations
//!
//! A cache miss is an ordinary outcome for the caching layer above us, so
//! `NotFoundInCache` is kept distinct from the failures that indicate a broken
//! response body or a misconfigured cache.

use std::io;

/// A Result alias where the Err case is `CacheError`.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Errors produced by the response cache.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The key is not present in the eviction store.
    #[error("key '{key}' not found in cache")]
    NotFoundInCache { key: String },

    /// The stored value did not have the expected entry shape.
    #[error("cache held a malformed entry for key '{key}': {detail}")]
    MalformedStoredEntry { key: String, detail: String },

    /// Draining the response body during `store` failed.
    #[error("failed to read response body: {0}")]
    BodyRead(#[from] BodyReadError),

    /// The response body exceeds the configured per-body limit.
    #[error("response body exceeds the {limit} byte limit")]
    BodyTooLarge { limit: u64 },

    /// The byte capacity is not usable.
    #[error("cache capacity must be greater than zero")]
    InvalidCapacity,

    /// The configuration failed validation.
    #[error("invalid cache configuration: {0}")]
    InvalidConfig(#[from] crate::cache::cache_config::ConfigError),
}

/// Failures while draining a response body.
#[derive(Debug, thiserror::Error)]
pub enum BodyReadError {
    /// Fewer bytes were available than the declared `Content-Length`.
    #[error("declared content-length {declared} but only {read} bytes were available")]
    ContentLengthMismatch { declared: u64, read: u64 },

    /// The underlying reader failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CacheError {
    pub(crate) fn not_found(key: impl Into<String>) -> Self {
        CacheError::NotFoundInCache { key: key.into() }
    }
}

impl From<io::Error> for CacheError {
    fn from(err: io::Error) -> Self {
        CacheError::BodyRead(BodyReadError::Io(err))
    }
}
