//! Stored representation of one cached response
//!
//! The body is fixed when the entry is created. Revalidation swaps in new
//! headers and status through `with_head`, which keeps the same body buffer.

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};

use crate::resource::Resource;

/// Cached response: body, headers and status
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    body: Bytes,
    headers: HeaderMap,
    status: StatusCode,
}

/// Headers and status of a cached entry, without its body
#[derive(Debug, Clone, PartialEq)]
pub struct CachedHead {
    pub headers: HeaderMap,
    pub status: StatusCode,
}

/// How an entry's weight is charged against the byte capacity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightPolicy {
    /// Body length only
    #[default]
    Body,
    /// Body length plus the bytes of every header name and value
    BodyAndHeaders,
}

impl CacheEntry {
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            body,
            headers,
            status,
        }
    }

    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn head(&self) -> CachedHead {
        CachedHead {
            headers: self.headers.clone(),
            status: self.status,
        }
    }

    /// Same body, new headers and status
    #[must_use]
    pub fn with_head(&self, headers: HeaderMap, status: StatusCode) -> Self {
        Self {
            body: self.body.clone(),
            headers,
            status,
        }
    }

    /// Weight charged against the store capacity under `policy`
    #[must_use]
    pub fn weight(&self, policy: WeightPolicy) -> u64 {
        let body = self.body.len() as u64;
        match policy {
            WeightPolicy::Body => body,
            WeightPolicy::BodyAndHeaders => body + header_bytes(&self.headers),
        }
    }

    /// Rebuild a readable resource from this entry
    #[must_use]
    pub fn to_resource(&self) -> Resource {
        Resource::from_bytes(self.status, self.headers.clone(), self.body.clone())
    }
}

fn header_bytes(headers: &HeaderMap) -> u64 {
    headers
        .iter()
        .map(|(name, value)| (name.as_str().len() + value.len()) as u64)
        .sum()
}
