//! Cache Statistics Module
//!
//! Tracks cache activity: hits, misses, writes, evictions, observer failures.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Counters ==
/// Lock-free counters shared by every caller of the cache.
///
/// Each counter only ever increases; there is no reset.
#[derive(Debug, Default)]
pub struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    puts: AtomicU64,
    evictions: AtomicU64,
    observer_failures: AtomicU64,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_put(&self) {
        self.puts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_observer_failures(&self, count: usize) {
        if count > 0 {
            self.observer_failures
                .fetch_add(count as u64, Ordering::Relaxed);
        }
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    // == Snapshot ==
    /// Reads every counter into a [`CacheStats`] value.
    ///
    /// Counters are read independently, so a snapshot taken during
    /// concurrent writes may be slightly skewed between fields.
    pub fn snapshot(&self, total_entries: usize, ranked_entries: usize) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            puts: self.puts.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            observer_failures: self.observer_failures.load(Ordering::Relaxed),
            total_entries,
            ranked_entries,
        }
    }
}

// == Cache Stats ==
/// Point-in-time view of the cache counters and sizes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of successful lookups
    pub hits: u64,
    /// Number of lookups for absent keys
    pub misses: u64,
    /// Number of writes
    pub puts: u64,
    /// Number of entries evicted by the LRU policy
    pub evictions: u64,
    /// Number of observer invocations that panicked
    pub observer_failures: u64,
    /// Current number of entries in the primary index
    pub total_entries: usize,
    /// Current number of entries in the ranking index
    pub ranked_entries: usize,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
