//! Configuration Module
//!
//! Capacity and TTL settings for a cache instance, loadable from environment
//! variables or embedded in a caller's serde configuration document.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

/// Default maximum number of entries
pub const DEFAULT_CAPACITY: usize = 1000;

/// Cache configuration parameters.
///
/// The cache never reads the environment itself; owners build a `CacheConfig`
/// and hand it to [`BoundedExpiringCache::from_config`](crate::cache::BoundedExpiringCache::from_config).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of live entries the cache can hold
    pub capacity: usize,
    /// Time-to-live in milliseconds, None = entries never expire
    pub ttl_ms: Option<u64>,
}

impl CacheConfig {
    /// Creates a configuration with the given capacity and optional TTL.
    ///
    /// The TTL is stored in whole milliseconds, rounded up, so a non-zero
    /// TTL never becomes zero and entries never expire earlier than asked.
    pub fn new(capacity: usize, ttl: Option<Duration>) -> Self {
        Self {
            capacity,
            ttl_ms: ttl.map(ttl_to_millis),
        }
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `CACHE_TTL_MS` - Entry TTL in milliseconds (default: unset, no expiry)
    ///
    /// Unset variables fall back to defaults; a set variable that fails to
    /// parse is an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let capacity = parse_var(&lookup, "CACHE_CAPACITY")?.unwrap_or(DEFAULT_CAPACITY);
        let ttl_ms = parse_var(&lookup, "CACHE_TTL_MS")?;

        Ok(Self { capacity, ttl_ms })
    }

    /// Returns the TTL as a `Duration`.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_ms.map(Duration::from_millis)
    }

    /// Checks that the configuration describes a usable cache.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            ttl_ms: None,
        }
    }
}

fn ttl_to_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_nanos().div_ceil(1_000_000)).unwrap_or(u64::MAX)
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| CacheError::Config(format!("{}={}", name, raw))),
    }
}
