//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with value and timestamps.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the entry was written (reset on overwrite)
    pub inserted_at: Instant,
    /// When the entry was last read or written
    pub last_accessed_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped at `now`.
    pub fn new(value: V, now: Instant) -> Self {
        Self {
            value,
            inserted_at: now,
            last_accessed_at: now,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl` at `now`.
    ///
    /// Boundary condition: an entry is expired only once strictly more than
    /// `ttl` has elapsed since insertion, so a read at exactly
    /// `inserted_at + ttl` still sees the value. Access recency plays no part.
    pub fn is_expired(&self, now: Instant, ttl: Option<Duration>) -> bool {
        match ttl {
            Some(ttl) => self.age(now) > ttl,
            None => false,
        }
    }

    // == Age ==
    /// Time elapsed since insertion, saturating at zero.
    fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.inserted_at)
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or None if `ttl` is None.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry has reached or passed its TTL
    /// - `Some(remaining)` if the entry has time left
    /// - `None` if entries never expire
    pub fn ttl_remaining(&self, now: Instant, ttl: Option<Duration>) -> Option<Duration> {
        ttl.map(|ttl| ttl.saturating_sub(self.age(now)))
    }

    // == Touch ==
    /// Records a read at `now`.
    pub fn touch(&mut self, now: Instant) {
        self.last_accessed_at = now;
    }
}
