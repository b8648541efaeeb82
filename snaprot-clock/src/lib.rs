//! Time source abstraction for snapshot description stamps.
//!
//! The snapshot creator stamps every description with the current wall-clock
//! time. Taking the time from an injected [`Clock`] instead of calling
//! `SystemTime::now` inline keeps description formatting deterministic under
//! test.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current time as Unix seconds.
pub trait Clock: Send + Sync {
    /// Current Unix time in seconds.
    fn now_unix_sec(&self) -> u64;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_unix_sec(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Clock pinned to a fixed instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    unix_sec: u64,
}

impl FixedClock {
    /// Create a clock that always reports `unix_sec`.
    pub fn new(unix_sec: u64) -> Self {
        Self { unix_sec }
    }
}

impl Clock for FixedClock {
    fn now_unix_sec(&self) -> u64 {
        self.unix_sec
    }
}

/// Clock that advances by a fixed step on every reading.
#[derive(Debug)]
pub struct SteppingClock {
    next: AtomicU64,
    step: u64,
}

impl SteppingClock {
    /// Create a clock starting at `start` and advancing by `step` per reading.
    pub fn new(start: u64, step: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now_unix_sec(&self) -> u64 {
        self.next.fetch_add(self.step, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_current_time() {
        let clock = SystemClock::new();
        // 2020-01-01T00:00:00Z as a floor for "not obviously broken".
        assert!(clock.now_unix_sec() > 1_577_836_800);
    }

    #[test]
    fn test_system_clock_does_not_go_backwards() {
        let clock = SystemClock::new();
        let first = clock.now_unix_sec();
        let second = clock.now_unix_sec();
        assert!(second >= first);
    }

    #[test]
    fn test_fixed_clock_returns_given_time() {
        let clock = FixedClock::new(1_714_556_130);
        assert_eq!(clock.now_unix_sec(), 1_714_556_130);
        assert_eq!(clock.now_unix_sec(), 1_714_556_130);
    }

    #[test]
    fn test_stepping_clock_advances_per_reading() {
        let clock = SteppingClock::new(1_000, 60);
        assert_eq!(clock.now_unix_sec(), 1_000);
        assert_eq!(clock.now_unix_sec(), 1_060);
        assert_eq!(clock.now_unix_sec(), 1_120);
    }

    #[test]
    fn test_stepping_clock_zero_step_stays_put() {
        let clock = SteppingClock::new(500, 0);
        assert_eq!(clock.now_unix_sec(), 500);
        assert_eq!(clock.now_unix_sec(), 500);
    }

    #[test]
    fn test_clock_as_trait_object() {
        let clock: Box<dyn Clock> = Box::new(FixedClock::new(42));
        assert_eq!(clock.now_unix_sec(), 42);
    }
}
