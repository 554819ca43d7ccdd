use super::types::{BodyReadError, CacheError};

impl CacheError {
    /// Returns true if the key was simply absent from the cache.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFoundInCache { .. })
    }

    /// Returns true if the error came from draining a response body.
    #[must_use]
    pub fn is_body_read(&self) -> bool {
        matches!(self, CacheError::BodyRead(_) | CacheError::BodyTooLarge { .. })
    }

    /// Returns true if the declared content-length could not be satisfied.
    #[must_use]
    pub fn is_content_length_mismatch(&self) -> bool {
        matches!(
            self,
            CacheError::BodyRead(BodyReadError::ContentLengthMismatch { .. })
        )
    }

    /// Returns true for construction-time misconfiguration.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, CacheError::InvalidCapacity | CacheError::InvalidConfig(_))
    }

    /// The cache key the error refers to, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            CacheError::NotFoundInCache { key } | CacheError::MalformedStoredEntry { key, .. } => {
                Some(key)
            }
            _ => None,
        }
    }
}
