//! Cache Entry Module
//!
//! Defines a cached note payload together with its recency timestamp.

use std::sync::Arc;

// == Cache Entry ==
/// A single cached note payload and the last time it was read or written.
#[derive(Debug)]
pub struct CacheEntry<V> {
    /// The stored payload, shared immutably with readers
    pub payload: Arc<V>,
    /// Last read or write (milliseconds on the cache's clock)
    pub last_accessed: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry accessed at `now`.
    pub fn new(payload: Arc<V>, now: u64) -> Self {
        Self {
            payload,
            last_accessed: now,
        }
    }

    // == Touch ==
    /// Records an access at `now`.
    pub fn touch(&mut self, now: u64) {
        self.last_accessed = now;
    }

    // == Age ==
    /// Idle time since the last access.
    ///
    /// A clock that moved backwards yields an age of 0.
    pub fn age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.last_accessed)
    }

    // == Is Stale ==
    /// An entry is stale once its idle time is strictly greater than `ttl_ms`.
    pub fn is_stale(&self, now: u64, ttl_ms: u64) -> bool {
        self.age_ms(now) > ttl_ms
    }
}

// Manual impl: `V` itself need not be `Clone`.
impl<V> Clone for CacheEntry<V> {
    fn clone(&self) -> Self {
        Self {
            payload: Arc::clone(&self.payload),
            last_accessed: self.last_accessed,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(Arc::new("note".to_string()), 100);

        assert_eq!(entry.payload.as_str(), "note");
        assert_eq!(entry.last_accessed, 100);
        assert_eq!(entry.age_ms(100), 0);
    }

    #[test]
    fn test_touch_resets_age() {
        let mut entry = CacheEntry::new(Arc::new(1u32), 0);
        assert_eq!(entry.age_ms(500), 500);

        entry.touch(500);
        assert_eq!(entry.age_ms(500), 0);
        assert_eq!(entry.age_ms(750), 250);
    }

    #[test]
    fn test_stale_boundary_is_exclusive() {
        let entry = CacheEntry::new(Arc::new(()), 0);

        assert!(!entry.is_stale(1000, 1000), "age == ttl is still fresh");
        assert!(entry.is_stale(1001, 1000));
    }

    #[test]
    fn test_backwards_clock_is_not_stale() {
        let entry = CacheEntry::new(Arc::new(()), 5_000);

        assert_eq!(entry.age_ms(1_000), 0);
        assert!(!entry.is_stale(1_000, 10));
    }

    #[test]
    fn test_clone_shares_payload() {
        let entry = CacheEntry::new(Arc::new(vec![1, 2, 3]), 7);
        let copy = entry.clone();

        assert!(Arc::ptr_eq(&entry.payload, &copy.payload));
        assert_eq!(copy.last_accessed, 7);
    }
}
