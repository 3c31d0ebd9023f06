//! Clock Module
//!
//! Monotonic time sources used for entry timestamps and TTL checks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

// == Clock Trait ==
/// Source of monotonic timestamps.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

// == System Clock ==
/// Reads `Instant::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

// == Manual Clock ==
/// Clock that only moves when advanced.
///
/// Clones share the same time, so a test can keep one handle and give the
/// other to a cache.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset_nanos: Arc<AtomicU64>,
}

impl ManualClock {
    // == Constructor ==
    /// Creates a clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset_nanos: Arc::new(AtomicU64::new(0)),
        }
    }

    // == Advance ==
    /// Moves the clock forward by `by`.
    ///
    /// The total offset saturates at `u64::MAX` nanoseconds and never goes
    /// past the last instant representable from the origin, so `now` cannot
    /// overflow.
    pub fn advance(&self, by: Duration) {
        let by = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        let origin = self.origin;
        let _ = self
            .offset_nanos
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                let mut next = current.saturating_add(by);
                while next > current && origin.checked_add(Duration::from_nanos(next)).is_none() {
                    next = current + (next - current) / 2;
                }
                Some(next)
            });
    }

    // == Elapsed ==
    /// Total time advanced since construction.
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.offset_nanos.load(Ordering::SeqCst))
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin
            .checked_add(self.elapsed())
            .unwrap_or(self.origin)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }

    #[test]
    fn test_manual_clock_frozen_until_advanced() {
        let clock = ManualClock::new();
        let start = clock.now();
        assert_eq!(clock.now(), start);

        clock.advance(Duration::from_millis(150));
        assert_eq!(clock.now().duration_since(start), Duration::from_millis(150));
    }

    #[test]
    fn test_manual_clock_huge_advance_saturates() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_secs(1));

        clock.advance(Duration::MAX);
        let far = clock.now();
        assert!(clock.elapsed() > Duration::from_secs(1));

        clock.advance(Duration::MAX);
        assert!(clock.now() >= far);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        let start = clock.now();

        handle.advance(Duration::from_secs(3));

        assert_eq!(clock.elapsed(), Duration::from_secs(3));
        assert_eq!(clock.now(), start + Duration::from_secs(3));
    }
}
