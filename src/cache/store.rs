//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL expiration.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, Clock, Lookup, LruTracker, SystemClock};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Bounded Expiring Cache ==
/// Fixed-capacity key/value store with optional TTL and LRU eviction.
///
/// The cache is owned by a single caller and takes `&mut self` for every
/// operation that can touch recency or expiry. It has no internal locking and
/// no background timer: expired entries are purged when they are encountered
/// by `get`, `set`, `size` or an explicit [`cleanup_expired`](Self::cleanup_expired).
///
/// # Example
/// ```
/// use bounded_cache::BoundedExpiringCache;
///
/// let mut cache = BoundedExpiringCache::new(2, None).unwrap();
/// cache.set("a", 1);
/// cache.set("b", 2);
/// cache.get(&"a");
/// cache.set("c", 3);
///
/// assert_eq!(cache.get(&"b"), None);
/// assert_eq!(cache.get(&"a"), Some(1));
/// assert_eq!(cache.get(&"c"), Some(3));
/// ```
#[derive(Debug)]
pub struct BoundedExpiringCache<K, V, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker<K>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of live entries
    capacity: usize,
    /// Lifetime of an entry measured from its last write
    ttl: Option<Duration>,
    clock: C,
}

impl<K, V> BoundedExpiringCache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// `CacheError::InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize, ttl: Option<Duration>) -> Result<Self> {
        Self::with_clock(capacity, ttl, SystemClock)
    }

    /// Creates a cache from a validated configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.capacity, config.ttl())
    }
}

impl<K, V, C> BoundedExpiringCache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    /// Creates a cache that reads time from `clock`.
    pub fn with_clock(capacity: usize, ttl: Option<Duration>, clock: C) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        debug!(capacity, ttl = ?ttl, "cache created");

        Ok(Self {
            entries: HashMap::with_capacity(capacity.min(1024)),
            lru: LruTracker::new(),
            stats: CacheStats::default(),
            capacity,
            ttl,
            clock,
        })
    }

    // == Get ==
    /// Retrieves a copy of the value stored under `key`.
    ///
    /// Returns None if the key is absent or its TTL has elapsed; an expired
    /// entry is purged on the way out. A hit refreshes the entry's recency
    /// but not its TTL window.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let now = self.clock.now();

        let Some(entry) = self.entries.get_mut(key) else {
            self.stats.record_lookup(Lookup::Miss);
            return None;
        };

        if entry.is_expired(now, self.ttl) {
            self.remove_entry(key);
            self.stats.record_lookup(Lookup::Expired);
            trace!("expired entry purged on read");
            return None;
        }

        entry.touch(now);
        trace!(ttl_remaining = ?entry.ttl_remaining(now, self.ttl), "cache hit");
        self.lru.touch(key, entry.last_accessed_at, entry.inserted_at);
        self.stats.record_lookup(Lookup::Hit);
        Some(entry.value.clone())
    }

    // == Set ==
    /// Stores `value` under `key`.
    ///
    /// Overwriting an existing key starts a fresh TTL window and makes the key
    /// most recently used. Inserting a new key into a full cache first drops
    /// expired entries, then evicts the least recently used live entry if the
    /// cache is still full.
    pub fn set(&mut self, key: K, value: V) {
        let now = self.clock.now();

        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.purge_expired(now);
            if self.entries.len() >= self.capacity {
                self.evict_one();
            }
        }

        self.lru.touch(&key, now, now);
        self.entries.insert(key, CacheEntry::new(value, now));
        debug_assert_eq!(self.lru.len(), self.entries.len());
    }

    // == Delete ==
    /// Removes the entry for `key`, returning its value if it was live.
    ///
    /// Deleting an absent key is a no-op.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let entry = self.remove_entry(key)?;
        if entry.is_expired(now, self.ttl) {
            self.stats.record_expirations(1);
            return None;
        }
        Some(entry.value)
    }

    // == Clear ==
    /// Removes every entry. Capacity and TTL are unchanged.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
    }

    // == Size ==
    /// Returns the number of live entries, purging any that have expired.
    pub fn size(&mut self) -> usize {
        let now = self.clock.now();
        self.purge_expired(now);
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if no live entries remain.
    pub fn is_empty(&mut self) -> bool {
        self.size() == 0
    }

    // == Contains Key ==
    /// Checks whether `key` holds a live entry without refreshing its recency.
    pub fn contains_key(&mut self, key: &K) -> bool {
        let now = self.clock.now();
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now, self.ttl),
            None => return false,
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expirations(1);
        }
        !expired
    }

    // == Memoization ==
    /// Returns the cached value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with<F>(&mut self, key: K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(&key) {
            return value;
        }
        let value = compute();
        self.set(key, value.clone());
        value
    }

    /// Fallible variant of [`get_or_insert_with`](Self::get_or_insert_with).
    ///
    /// An error from `compute` is returned as-is and nothing is stored.
    pub fn try_get_or_insert_with<F, E>(&mut self, key: K, compute: F) -> std::result::Result<V, E>
    where
        F: FnOnce() -> std::result::Result<V, E>,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }
        let value = compute()?;
        self.set(key, value.clone());
        Ok(value)
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed. Calling this is optional: reads
    /// already hide expired entries.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = self.clock.now();
        let removed = self.purge_expired(now);
        if removed > 0 {
            debug!(removed, remaining = self.entries.len(), "expired entries cleaned up");
        }
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }

    // == Accessors ==
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    fn remove_entry(&mut self, key: &K) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.lru.remove(key);
        Some(entry)
    }

    fn purge_expired(&mut self, now: Instant) -> usize {
        if self.ttl.is_none() {
            return 0;
        }

        let expired_keys: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now, self.ttl))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        self.stats.record_expirations(expired_keys.len());
        expired_keys.len()
    }

    fn evict_one(&mut self) {
        if let Some(evicted) = self.lru.evict_oldest() {
            self.entries.remove(&evicted);
            self.stats.record_eviction();
            debug!(capacity = self.capacity, "evicted least recently used entry");
        }
    }
}
