//! Bounded randomized delay ranges.
//!
//! Several demos use an unpredictable delay (the interrupt trap fires
//! 3–6 seconds after the first keystroke). The bound is configuration,
//! not a source of testable nondeterminism: tests use [`DelayRange::fixed`]
//! and never assert on real elapsed wall-clock time.

use std::time::Duration;

use rand::Rng;

/// Inclusive delay range sampled once per arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min: Duration,
    max: Duration,
}

impl DelayRange {
    /// Build a range, swapping the bounds if given inverted.
    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// A degenerate range producing exactly `delay` — for deterministic tests.
    #[must_use]
    pub const fn fixed(delay: Duration) -> Self {
        Self {
            min: delay,
            max: delay,
        }
    }

    /// Build from millisecond bounds (the config representation).
    #[must_use]
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> Duration {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> Duration {
        self.max
    }

    /// Sample a delay uniformly from the inclusive range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let min_ms = u64::try_from(self.min.as_millis()).unwrap_or(u64::MAX);
        let max_ms = u64::try_from(self.max.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(rng.random_range(min_ms..=max_ms))
    }
}
