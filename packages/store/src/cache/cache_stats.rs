//! Cache statistics tracked with atomic counters

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for cache activity
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Retrieve calls that found the key
    pub hits: AtomicU64,
    /// Retrieve calls that missed
    pub misses: AtomicU64,
    /// Hits that were handed back marked stale
    pub stale_hits: AtomicU64,
    /// Keys written by store
    pub stores: AtomicU64,
    /// Entries removed by capacity pressure
    pub evictions: AtomicU64,
    /// Keys whose headers were refreshed by freshen
    pub freshened: AtomicU64,
    /// Keys marked stale by invalidate or a freshen mismatch
    pub invalidations: AtomicU64,
    /// Failed store calls
    pub errors: AtomicU64,
}

/// Point-in-time copy of `CacheStats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub stale_hits: u64,
    pub stores: u64,
    pub evictions: u64,
    pub freshened: u64,
    pub invalidations: u64,
    pub errors: u64,
}

impl CacheStats {
    pub(crate) fn bump(counter: &AtomicU64, by: u64) {
        counter.fetch_add(by, Ordering::Relaxed);
    }

    /// Get hit rate as percentage
    pub fn hit_rate(&self) -> f64 {
        // Precision loss acceptable for cache hit rate statistics
        #[allow(clippy::cast_precision_loss)]
        let hits = self.hits.load(Ordering::Relaxed) as f64;
        #[allow(clippy::cast_precision_loss)]
        let total = hits + self.misses.load(Ordering::Relaxed) as f64;

        if total > 0.0 {
            (hits / total) * 100.0
        } else {
            0.0
        }
    }

    /// Get statistics snapshot
    pub fn snapshot(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stale_hits: self.stale_hits.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            freshened: self.freshened.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate_empty() {
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_and_snapshot() {
        let stats = CacheStats::default();
        CacheStats::bump(&stats.hits, 3);
        CacheStats::bump(&stats.misses, 1);
        CacheStats::bump(&stats.evictions, 2);

        assert!((stats.hit_rate() - 75.0).abs() < f64::EPSILON);
        let snapshot = stats.snapshot();
        assert_eq!(snapshot.hits, 3);
        assert_eq!(snapshot.misses, 1);
        assert_eq!(snapshot.evictions, 2);
        assert_eq!(snapshot.stores, 0);
    }
}
