//! The time capability.
//!
//! Time is an injected dependency, not a hidden global: components take a
//! clock at construction, which keeps the core deterministic and lets tests
//! drive expiration with simulated time instead of real delays.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::Timestamp;

/// A source of current time in Unix milliseconds.
///
/// Implementations must be monotonically non-decreasing across calls: the
/// core never has to reason about time moving backwards. A stalled clock
/// is acceptable; a rewinding one is not.
pub trait Clock: Send + Sync {
    /// The current time in Unix milliseconds.
    fn now(&self) -> Timestamp;
}

/// Wall-clock time, clamped so it never decreases.
///
/// The operating system clock may be stepped backwards (NTP corrections,
/// manual changes). This wrapper remembers the highest value it has
/// returned and holds there until the wall clock catches up.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: AtomicI64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        // fetch_max returns the previous maximum; report whichever is higher.
        let prev = self.last.fetch_max(wall, Ordering::SeqCst);
        wall.max(prev)
    }
}

/// A manually advanced clock for tests and simulation.
///
/// Starts at an arbitrary instant and only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// Create a clock frozen at the given instant.
    pub fn starting_at(now: Timestamp) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    /// Advance the clock by `millis`.
    pub fn advance_millis(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }

    /// Advance the clock by whole seconds.
    pub fn advance_secs(&self, secs: i64) {
        self.advance_millis(secs * 1000);
    }

    /// Jump the clock to an absolute instant. Panics if that would move
    /// time backwards, which would violate the clock contract.
    pub fn set(&self, now: Timestamp) {
        let prev = self.now.swap(now, Ordering::SeqCst);
        assert!(now >= prev, "ManualClock cannot move backwards");
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_at(0)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}
