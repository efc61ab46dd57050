//! Wall-clock source for `timecreated` stamps.

use std::sync::atomic::{AtomicI64, Ordering};

/// Current time as unix seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// Reads the system clock through chrono.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Clock frozen at a settable instant.
#[derive(Debug, Default)]
pub struct FixedClock {
    now: AtomicI64,
}

impl FixedClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::Relaxed);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_only_moves_when_told() {
        let clock = FixedClock::new(10);
        assert_eq!(clock.now(), 10);
        clock.set(99);
        assert_eq!(clock.now(), 99);
    }

    #[test]
    fn system_clock_is_past_2020() {
        assert!(SystemClock.now() > 1_577_836_800);
    }
}
