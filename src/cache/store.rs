//! Note Cache Store Module
//!
//! Single-threaded cache engine combining HashMap storage with LRU ordering
//! and idle-time expiration.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, Clock, LruOrder, SystemClock};
use crate::config::CacheConfig;

// == Note Cache ==
/// Bounded, time-aware LRU cache of note payloads keyed by note id.
///
/// The cache is passive: callers populate it after a miss. None of its
/// operations can fail, a lookup either returns the payload or reports a
/// miss.
#[derive(Debug)]
pub struct NoteCache<V, C = SystemClock> {
    /// Note id -> cached payload
    entries: HashMap<String, CacheEntry<V>>,
    /// Access order used for capacity eviction
    lru: LruOrder,
    /// Counters reported by `stats`
    stats: CacheStats,
    /// Maximum number of entries, at least 1
    capacity: usize,
    /// Maximum idle time in milliseconds
    ttl_ms: u64,
    clock: C,
}

impl<V> NoteCache<V, SystemClock> {
    /// Creates a cache that reads the wall clock.
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<V, C: Clock> NoteCache<V, C> {
    // == Constructor ==
    /// Creates a cache reading time from `clock`.
    ///
    /// A capacity of 0 is raised to 1 so a completed `set` always leaves
    /// the cache within bounds.
    pub fn with_clock(config: &CacheConfig, clock: C) -> Self {
        let capacity = config.capacity.max(1);
        let ttl_ms = u64::try_from(config.ttl.as_millis()).unwrap_or(u64::MAX);

        Self {
            entries: HashMap::new(),
            lru: LruOrder::new(),
            stats: CacheStats::new(capacity, ttl_ms),
            capacity,
            ttl_ms,
            clock,
        }
    }

    // == Get ==
    /// Returns the payload cached under `key` and marks it recently used.
    ///
    /// A stale entry is removed and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<Arc<V>> {
        let now = self.clock.now_ms();

        let Some(entry) = self.entries.get_mut(key) else {
            self.stats.record_miss();
            return None;
        };

        if entry.is_stale(now, self.ttl_ms) {
            debug!(key, age_ms = entry.age_ms(now), "note cache entry expired on read");
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            return None;
        }

        entry.touch(now);
        let payload = Arc::clone(&entry.payload);
        self.lru.touch(key);
        self.stats.record_hit();
        Some(payload)
    }

    // == Set ==
    /// Stores `payload` under `key`, replacing any previous payload.
    ///
    /// Inserting a new key into a full cache first evicts the least
    /// recently used entry. Overwriting an existing key never evicts.
    /// Returns the stored payload.
    pub fn set(&mut self, key: impl Into<String>, payload: impl Into<Arc<V>>) -> Arc<V> {
        let key = key.into();
        let payload = payload.into();
        let now = self.clock.now_ms();

        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!(key = %evicted, "evicted least recently used note");
            }
        }

        self.entries
            .insert(key.clone(), CacheEntry::new(Arc::clone(&payload), now));
        self.lru.touch(&key);
        payload
    }

    // == Remove ==
    /// Drops the entry for `key`. Returns whether one was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.lru.remove(key);
        }
        removed
    }

    // == Clear ==
    /// Drops every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
    }

    // == Sweep Expired ==
    /// Removes every entry whose idle time exceeds the TTL.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let ttl_ms = self.ttl_ms;

        let stale: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_stale(now, ttl_ms))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &stale {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        self.stats.record_expirations(stale.len());
        stale.len()
    }

    // == Stats ==
    /// Returns a snapshot of size, configuration and counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.len(),
            ..self.stats.clone()
        }
    }

    /// True if `key` is present, stale or not. Does not touch recency.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
