//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::time::Instant;

/// Eviction rank: last access, then insertion, then call order.
type Rank = (Instant, Instant, u64);

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Keys are ranked by `(last_accessed_at, inserted_at, sequence)`:
/// - Lowest rank = next to be evicted
/// - Highest rank = most recently used
///
/// Entries read at the same instant fall back to the earlier insertion. The
/// per-touch sequence number only separates entries whose two timestamps are
/// both equal, so the later call counts as more recent.
#[derive(Debug)]
pub(crate) struct LruTracker<K> {
    /// Keys ordered by rank
    order: BTreeMap<Rank, K>,
    /// Current rank of each tracked key
    ranks: HashMap<K, Rank>,
    /// Next sequence number to hand out
    next_sequence: u64,
}

impl<K> LruTracker<K>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            order: BTreeMap::new(),
            ranks: HashMap::new(),
            next_sequence: 0,
        }
    }

    // == Touch ==
    /// Records the entry's current timestamps, tracking the key if it is new.
    pub fn touch(&mut self, key: &K, last_accessed_at: Instant, inserted_at: Instant) {
        let rank = (last_accessed_at, inserted_at, self.next_sequence);
        self.next_sequence += 1;

        match self.ranks.get_mut(key) {
            Some(current) => {
                if let Some(tracked) = self.order.remove(&*current) {
                    self.order.insert(rank, tracked);
                }
                *current = rank;
            }
            None => {
                self.ranks.insert(key.clone(), rank);
                self.order.insert(rank, key.clone());
            }
        }
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &K) {
        if let Some(rank) = self.ranks.remove(key) {
            self.order.remove(&rank);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the lowest-ranked key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        let (_, key) = self.order.pop_first()?;
        self.ranks.remove(&key);
        Some(key)
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.order.clear();
        self.ranks.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }
}
