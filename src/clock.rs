//! Wall-clock budgets.
//!
//! Runners never read the system time directly. They poll a [`TimeBudget`],
//! which wraps an injectable [`Clock`], so tests can drive deadline expiry
//! deterministically with [`StepClock`] instead of sleeping.

use std::cell::Cell;
use std::time::{Duration, Instant};

use crate::error::ConfigError;

/// Source of elapsed time since some start mark.
pub trait Clock {
    fn elapsed(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn elapsed(&self) -> Duration {
        (**self).elapsed()
    }
}

/// Real time, measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    start: Instant,
}

impl WallClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::start()
    }
}

impl Clock for WallClock {
    #[inline]
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Simulated clock that advances by a fixed tick on every poll.
///
/// The k-th call to [`Clock::elapsed`] (counting from zero) returns `k * tick`.
///
/// ```
/// use atsp_metaheur::clock::{Clock, StepClock};
/// use std::time::Duration;
///
/// let clock = StepClock::new(Duration::from_millis(10));
/// assert_eq!(clock.elapsed(), Duration::ZERO);
/// assert_eq!(clock.elapsed(), Duration::from_millis(10));
/// assert_eq!(clock.polls(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct StepClock {
    tick: Duration,
    polls: Cell<u32>,
}

impl StepClock {
    pub fn new(tick: Duration) -> Self {
        Self {
            tick,
            polls: Cell::new(0),
        }
    }

    /// Number of times the clock has been read.
    pub fn polls(&self) -> u32 {
        self.polls.get()
    }
}

impl Clock for StepClock {
    fn elapsed(&self) -> Duration {
        let k = self.polls.get();
        self.polls.set(k.saturating_add(1));
        self.tick.saturating_mul(k)
    }
}

/// A start mark plus a maximum duration. Created once per run.
#[derive(Debug, Clone)]
pub struct TimeBudget<C = WallClock> {
    clock: C,
    limit: Duration,
}

impl TimeBudget<WallClock> {
    /// Starts a real-time budget now.
    pub fn start(limit: Duration) -> Self {
        Self::with_clock(WallClock::start(), limit)
    }

    /// Like [`TimeBudget::start`] but from seconds; rejects negative and NaN.
    pub fn from_secs_f64(secs: f64) -> Result<Self, ConfigError> {
        Ok(Self::start(secs_to_duration(secs)?))
    }
}

impl<C: Clock> TimeBudget<C> {
    pub fn with_clock(clock: C, limit: Duration) -> Self {
        Self { clock, limit }
    }

    #[inline]
    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Polls the clock.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    /// True once `elapsed` has reached the limit.
    #[inline]
    pub fn is_exhausted(&self, elapsed: Duration) -> bool {
        elapsed >= self.limit
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

/// Converts a time limit in seconds, rejecting negative and non-finite values.
pub fn secs_to_duration(secs: f64) -> Result<Duration, ConfigError> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(ConfigError::InvalidTimeLimit(secs));
    }
    Ok(Duration::from_secs_f64(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_clock_budget_expires_after_limit_ticks() {
        let budget = TimeBudget::with_clock(
            StepClock::new(Duration::from_millis(1)),
            Duration::from_millis(3),
        );
        let expired: Vec<bool> = (0..5).map(|_| budget.is_exhausted(budget.elapsed())).collect();
        assert_eq!(expired, vec![false, false, false, true, true]);
    }

    #[test]
    fn test_zero_budget_is_immediately_exhausted() {
        let budget = TimeBudget::with_clock(StepClock::new(Duration::from_secs(1)), Duration::ZERO);
        assert!(budget.is_exhausted(budget.elapsed()));
    }

    #[test]
    fn test_secs_validation() {
        assert!(TimeBudget::from_secs_f64(0.5).is_ok());
        assert!(TimeBudget::from_secs_f64(0.0).is_ok());
        assert_eq!(
            secs_to_duration(-1.0),
            Err(ConfigError::InvalidTimeLimit(-1.0))
        );
        assert!(secs_to_duration(f64::NAN).is_err());
    }

    #[test]
    fn test_wall_clock_advances() {
        let budget = TimeBudget::start(Duration::from_secs(3600));
        let first = budget.elapsed();
        std::thread::sleep(Duration::from_millis(2));
        assert!(budget.elapsed() > first);
        assert!(!budget.is_exhausted(budget.elapsed()));
    }
}
