//! Poll-driven repeating interval.
//!
//! The draft demo runs two of these side by side: a 30-second simulated
//! crash and a 5-second autosave checkpoint. Like the one-shot scheduler,
//! the host drives the clock explicitly; a poll that arrives late reports
//! every period that elapsed in the meantime so no tick is silently lost.

use std::time::{Duration, Instant};

/// Repeating interval driven by explicit `poll(now)` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTicker {
    period: Duration,
    next_deadline: Instant,
}

impl PeriodicTicker {
    /// Start a ticker whose first tick is `period` after `now`.
    ///
    /// A zero period is clamped to one millisecond so `poll` always
    /// terminates.
    #[must_use]
    pub fn new(period: Duration, now: Instant) -> Self {
        let period = period.max(Duration::from_millis(1));
        Self {
            period,
            next_deadline: now + period,
        }
    }

    /// Number of whole periods elapsed since the last poll, advancing the
    /// next deadline past `now`. Returns 0 when the deadline has not passed.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let mut ticks = 0;
        while now >= self.next_deadline {
            self.next_deadline += self.period;
            ticks += 1;
        }
        ticks
    }

    /// Restart the countdown from `now`.
    pub fn reset(&mut self, now: Instant) {
        self.next_deadline = now + self.period;
    }

    /// Time until the next tick. Zero once the deadline passed.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_deadline.saturating_duration_since(now)
    }

    /// Configured period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }
}
