//! Bounded Cache - an in-process memoization cache
//!
//! Provides a fixed-capacity key/value store with TTL expiration and LRU eviction.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{BoundedExpiringCache, CacheStats, Clock, ManualClock, SystemClock};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
