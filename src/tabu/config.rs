//! Tabu Search configuration.

use std::time::Duration;

use crate::error::ConfigError;

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use atsp_metaheur::tabu::TabuConfig;
/// use std::time::Duration;
///
/// let config = TabuConfig::default()
///     .with_time_limit(Duration::from_secs(10))
///     .with_steps_per_restart_factor(20)
///     .with_tenure(7);
/// assert_eq!(config.steps_per_restart(50), 1000);
/// assert_eq!(config.tenure_for(50), 7);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuConfig {
    /// Wall-clock limit used by [`TabuRunner::run`](super::TabuRunner::run).
    pub time_limit: Duration,
    /// Steps per restart cycle, as a multiple of the vertex count.
    pub steps_per_restart_factor: usize,
    /// How many steps a committed swap stays forbidden. `None` = vertex count.
    pub tenure: Option<usize>,
    /// Cap on the wall-clock length of one restart cycle. `None` disables it.
    pub sweep_time_limit: Option<Duration>,
    /// Whether a tabu move may be committed when it produces a new global best.
    pub aspiration: bool,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(60),
            steps_per_restart_factor: 15,
            tenure: None,
            sweep_time_limit: Some(Duration::from_secs(30)),
            aspiration: true,
        }
    }
}

impl TabuConfig {
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn with_steps_per_restart_factor(mut self, factor: usize) -> Self {
        self.steps_per_restart_factor = factor;
        self
    }

    /// Sets the tabu tenure (number of steps a move remains tabu).
    pub fn with_tenure(mut self, tenure: usize) -> Self {
        self.tenure = Some(tenure);
        self
    }

    pub fn with_sweep_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.sweep_time_limit = limit;
        self
    }

    /// Enables or disables aspiration criterion.
    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    /// Step cap of one restart cycle for an `n`-vertex matrix.
    pub fn steps_per_restart(&self, n: usize) -> usize {
        self.steps_per_restart_factor.saturating_mul(n)
    }

    /// Effective tenure for an `n`-vertex matrix.
    pub fn tenure_for(&self, n: usize) -> usize {
        self.tenure.unwrap_or(n)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps_per_restart_factor == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "steps_per_restart_factor",
                reason: "must be positive",
            });
        }
        if self.tenure == Some(0) {
            return Err(ConfigError::InvalidParameter {
                name: "tenure",
                reason: "must be positive",
            });
        }
        if self.sweep_time_limit == Some(Duration::ZERO) {
            return Err(ConfigError::InvalidParameter {
                name: "sweep_time_limit",
                reason: "must be positive when set",
            });
        }
        Ok(())
    }
}
