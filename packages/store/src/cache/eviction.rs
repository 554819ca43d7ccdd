//! Weight-bounded eviction store
//!
//! `EvictionStore` is the seam between the response cache and the structure
//! that decides what to drop under memory pressure. `LruStore` is the default:
//! a least-recently-used map that keeps a running total of caller supplied
//! weights and evicts from the cold end until the total fits the capacity.

use std::fmt;

use lru::LruCache;
use parking_lot::Mutex;

use super::cache_entry::CacheEntry;
use crate::error::{CacheError, Result};

/// Result of an insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The entry is resident; `evicted` other entries were dropped to make room
    Stored { evicted: usize },
    /// The entry alone outweighs the capacity and was not kept
    TooHeavy,
}

/// Result of a compare-and-swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The replacement is resident; `evicted` other entries were dropped
    Swapped { evicted: usize },
    /// The key is present but the swap function declined
    Rejected,
    /// The key is not present
    Missing,
}

/// Swap function for `compare_and_swap`: sees the current entry and returns
/// the replacement with its weight, or `None` to leave it alone
pub type SwapFn<'a> = dyn FnMut(&CacheEntry) -> Option<(CacheEntry, u64)> + 'a;

/// Called with each key and entry dropped by capacity pressure
pub type EvictionListener = Box<dyn Fn(&str, &CacheEntry) + Send + Sync>;

/// Key -> entry storage bounded by total weight
///
/// Implementations provide their own synchronization; every method takes
/// `&self` and may be called from many threads at once.
pub trait EvictionStore: Send + Sync {
    /// Look up `key`, counting it as a use
    fn get(&self, key: &str) -> Option<CacheEntry>;

    /// Insert or replace `key` with the given weight, evicting as needed
    fn insert(&self, key: &str, entry: CacheEntry, weight: u64) -> InsertOutcome;

    /// Atomically replace the entry under `key` if `swap` returns a replacement
    fn compare_and_swap(&self, key: &str, swap: &mut SwapFn<'_>) -> SwapOutcome;

    /// Whether `key` is resident, without counting it as a use
    fn contains(&self, key: &str) -> bool;

    /// Configured weight capacity
    fn capacity(&self) -> u64;

    /// Sum of the weights of resident entries
    fn weight(&self) -> u64;

    /// Number of resident entries
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct Weighted {
    entry: CacheEntry,
    weight: u64,
}

struct LruInner {
    lru: LruCache<String, Weighted>,
    weight: u64,
}

impl LruInner {
    /// Pop cold entries until the total weight fits
    fn shrink_to(&mut self, capacity: u64) -> Vec<(String, CacheEntry)> {
        let mut evicted = Vec::new();
        while self.weight > capacity {
            match self.lru.pop_lru() {
                Some((key, removed)) => {
                    self.weight = self.weight.saturating_sub(removed.weight);
                    evicted.push((key, removed.entry));
                }
                None => break,
            }
        }
        evicted
    }
}

/// Least-recently-used store bounded by total weight
pub struct LruStore {
    inner: Mutex<LruInner>,
    capacity: u64,
    listener: Option<EvictionListener>,
}

impl LruStore {
    /// Create an empty store holding at most `capacity` weight
    ///
    /// # Errors
    ///
    /// Returns `CacheError::InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: u64) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity);
        }
        Ok(Self {
            inner: Mutex::new(LruInner {
                lru: LruCache::unbounded(),
                weight: 0,
            }),
            capacity,
            listener: None,
        })
    }

    /// Register a callback for capacity-driven evictions.
    ///
    /// The callback runs after the store lock is released.
    #[must_use]
    pub fn with_eviction_listener<F>(mut self, listener: F) -> Self
    where
        F: Fn(&str, &CacheEntry) + Send + Sync + 'static,
    {
        self.listener = Some(Box::new(listener));
        self
    }

    fn notify(&self, evicted: &[(String, CacheEntry)]) {
        if evicted.is_empty() {
            return;
        }
        tracing::debug!(
            target: "respcache::eviction",
            evicted_count = evicted.len(),
            capacity = self.capacity,
            "Store evicted entries to stay within capacity"
        );
        if let Some(listener) = &self.listener {
            for (key, entry) in evicted {
                listener(key, entry);
            }
        }
    }
}

impl EvictionStore for LruStore {
    fn get(&self, key: &str) -> Option<CacheEntry> {
        self.inner.lock().lru.get(key).map(|w| w.entry.clone())
    }

    fn insert(&self, key: &str, entry: CacheEntry, weight: u64) -> InsertOutcome {
        if weight > self.capacity {
            // Whatever was cached under this key is superseded either way
            let mut inner = self.inner.lock();
            if let Some(old) = inner.lru.pop(key) {
                inner.weight = inner.weight.saturating_sub(old.weight);
            }
            return InsertOutcome::TooHeavy;
        }

        let evicted = {
            let mut inner = self.inner.lock();
            if let Some(old) = inner.lru.put(key.to_string(), Weighted { entry, weight }) {
                inner.weight = inner.weight.saturating_sub(old.weight);
            }
            inner.weight += weight;
            inner.shrink_to(self.capacity)
        };

        self.notify(&evicted);
        InsertOutcome::Stored {
            evicted: evicted.len(),
        }
    }

    fn compare_and_swap(&self, key: &str, swap: &mut SwapFn<'_>) -> SwapOutcome {
        let evicted = {
            let mut inner = self.inner.lock();
            let Some(current) = inner.lru.get(key) else {
                return SwapOutcome::Missing;
            };
            let old_weight = current.weight;
            let Some((entry, weight)) = swap(&current.entry) else {
                return SwapOutcome::Rejected;
            };

            inner.lru.put(key.to_string(), Weighted { entry, weight });
            inner.weight = inner.weight.saturating_sub(old_weight) + weight;
            inner.shrink_to(self.capacity)
        };

        self.notify(&evicted);
        SwapOutcome::Swapped {
            evicted: evicted.len(),
        }
    }

    fn contains(&self, key: &str) -> bool {
        self.inner.lock().lru.contains(key)
    }

    fn capacity(&self) -> u64 {
        self.capacity
    }

    fn weight(&self) -> u64 {
        self.inner.lock().weight
    }

    fn len(&self) -> usize {
        self.inner.lock().lru.len()
    }
}

impl fmt::Debug for LruStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("LruStore")
            .field("capacity", &self.capacity)
            .field("weight", &inner.weight)
            .field("entries", &inner.lru.len())
            .field("listener", &self.listener.is_some())
            .finish()
    }
}
