//! LRU Order Module
//!
//! Tracks access order for least-recently-used eviction.

use std::collections::{BTreeMap, HashMap};

// == LRU Order ==
/// Access-order index over cache keys.
///
/// Every touch stamps the key with a fresh, strictly increasing sequence
/// number. The ordered map from sequence to key keeps the least recently
/// used key at the front, so touch, remove and eviction are O(log n)
/// instead of a linear scan over all entries.
#[derive(Debug, Default)]
pub struct LruOrder {
    /// Key -> sequence of its latest access
    positions: HashMap<String, u64>,
    /// Sequence -> key, oldest first
    order: BTreeMap<u64, String>,
    /// Next sequence number to hand out
    next_seq: u64,
}

impl LruOrder {
    // == Constructor ==
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as the most recently used one.
    pub fn touch(&mut self, key: &str) {
        let seq = self.next_seq;
        self.next_seq += 1;

        match self.positions.get_mut(key) {
            Some(pos) => {
                if let Some(owned) = self.order.remove(pos) {
                    self.order.insert(seq, owned);
                }
                *pos = seq;
            }
            None => {
                self.positions.insert(key.to_string(), seq);
                self.order.insert(seq, key.to_string());
            }
        }
    }

    // == Remove ==
    /// Stops tracking a key. Unknown keys are ignored.
    pub fn remove(&mut self, key: &str) {
        if let Some(seq) = self.positions.remove(key) {
            self.order.remove(&seq);
        }
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.positions.remove(&key);
        Some(key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.order.first_key_value().map(|(_, key)| key.as_str())
    }

    /// Forgets every key.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }
}
