//! Cache Statistics Module
//!
//! Counts lookup outcomes, LRU evictions and TTL expirations for a cache
//! instance, and produces the snapshots handed out by
//! [`BoundedExpiringCache::stats`](crate::cache::BoundedExpiringCache::stats).

use serde::Serialize;

// == Lookup Outcome ==
/// How a single `get` resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lookup {
    Hit,
    Miss,
    /// The key was present but past its TTL; counts as a miss and an expiration
    Expired,
}

// == Cache Stats ==
/// Counters accumulated over the lifetime of one cache.
///
/// `total_entries` is only meaningful on a snapshot: the cache fills it with
/// the live entry count at the moment the snapshot is taken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// `get` calls that returned a value
    pub hits: u64,
    /// `get` calls that returned nothing, including expired keys
    pub misses: u64,
    /// Live entries dropped to make room for a new key
    pub evictions: u64,
    /// Entries purged because their TTL elapsed
    pub expirations: u64,
    /// Live entries when the snapshot was taken
    pub total_entries: usize,
}

impl CacheStats {
    /// Total number of `get` calls observed.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups that hit, 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    pub(crate) fn record_lookup(&mut self, lookup: Lookup) {
        match lookup {
            Lookup::Hit => self.hits += 1,
            Lookup::Miss => self.misses += 1,
            Lookup::Expired => {
                self.misses += 1;
                self.expirations += 1;
            }
        }
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub(crate) fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    /// Copies the counters, stamped with the current live entry count.
    pub(crate) fn snapshot(&self, live_entries: usize) -> CacheStats {
        CacheStats {
            total_entries: live_entries,
            ..self.clone()
        }
    }
}
