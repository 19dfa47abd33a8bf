//! Cache Statistics Module
//!
//! Introspection counters for the note cache.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of the cache's size, configuration and counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Current number of entries
    pub size: usize,
    /// Maximum number of entries
    pub max_size: usize,
    /// Idle time after which an entry is stale, in milliseconds
    pub ttl_ms: u64,
    /// Lookups that returned a payload
    pub hits: u64,
    /// Lookups that found nothing or a stale entry
    pub misses: u64,
    /// Entries dropped to make room for a new key
    pub evictions: u64,
    /// Entries dropped for exceeding the TTL, on read or during a sweep
    pub expirations: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates zeroed counters for a cache of the given shape.
    pub fn new(max_size: usize, ttl_ms: u64) -> Self {
        Self {
            max_size,
            ttl_ms,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }
}
