//! Stale markers kept beside the eviction store
//!
//! A marker records when a key was invalidated. It does not remove anything:
//! the entry stays readable and is only reported stale while its `Date` is
//! not newer than the marker. Markers are dropped when the key is stored again.

use std::time::SystemTime;

use dashmap::DashMap;

/// Concurrent key -> "invalidated at" map
#[derive(Debug, Default)]
pub struct StaleOverlay {
    markers: DashMap<String, SystemTime>,
}

impl StaleOverlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `key` was invalidated at `at`, replacing any older marker
    pub fn mark_stale(&self, key: &str, at: SystemTime) {
        self.markers.insert(key.to_string(), at);
    }

    /// Forget the marker for `key`
    pub fn clear(&self, key: &str) -> bool {
        self.markers.remove(key).is_some()
    }

    /// When `key` was invalidated, if it was
    #[must_use]
    pub fn stale_since(&self, key: &str) -> Option<SystemTime> {
        self.markers.get(key).map(|marker| *marker)
    }

    /// True if `key` carries a marker and `date` is not strictly after it.
    ///
    /// `None` stands for content without a usable date, which never
    /// outranks a marker.
    #[must_use]
    pub fn is_stale_before(&self, key: &str, date: Option<SystemTime>) -> bool {
        match (self.stale_since(key), date) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(marked), Some(date)) => date <= marked,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
