//! SA configuration.

use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for the Simulated Annealing runner.
///
/// Cooling is geometric: after every batch of
/// `iterations_per_temperature` candidate moves the temperature is multiplied
/// by `cooling_rate`. When it falls below `min_temperature` it is reset to
/// the initial value and a new cycle begins; the best tour is kept.
///
/// # Examples
///
/// ```
/// use atsp_metaheur::sa::SaConfig;
/// use std::time::Duration;
///
/// let config = SaConfig::default()
///     .with_time_limit(Duration::from_secs(5))
///     .with_cooling_rate(0.995)
///     .with_iterations_per_temperature(2_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Wall-clock limit used by [`SaRunner::run`](super::SaRunner::run).
    pub time_limit: Duration,

    /// Geometric cooling factor in (0, 1). Higher = slower cooling.
    pub cooling_rate: f64,

    /// Number of candidate moves at each temperature level.
    pub iterations_per_temperature: usize,

    /// Restart floor. Below this the temperature is reset to its initial value.
    pub min_temperature: f64,

    /// Random tours sampled when calibrating the initial temperature.
    pub estimation_trials: usize,

    /// Fixed initial temperature. `None` calibrates it from the matrix.
    pub initial_temperature: Option<f64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(60),
            cooling_rate: 0.99,
            iterations_per_temperature: 10_000,
            min_temperature: 0.1,
            estimation_trials: 10_000,
            initial_temperature: None,
        }
    }
}

impl SaConfig {
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_estimation_trials(mut self, n: usize) -> Self {
        self.estimation_trials = n;
        self
    }

    /// Skips calibration and starts every cycle at `t`.
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = Some(t);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Written as a negated range check so NaN is rejected too.
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(ConfigError::InvalidCoolingRate(self.cooling_rate));
        }
        if self.iterations_per_temperature == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "iterations_per_temperature",
                reason: "must be positive",
            });
        }
        if !(self.min_temperature > 0.0 && self.min_temperature.is_finite()) {
            return Err(ConfigError::InvalidParameter {
                name: "min_temperature",
                reason: "must be a positive finite number",
            });
        }
        match self.initial_temperature {
            Some(t) if !(t > 0.0 && t.is_finite()) => {
                return Err(ConfigError::InvalidParameter {
                    name: "initial_temperature",
                    reason: "must be a positive finite number",
                });
            }
            None if self.estimation_trials == 0 => {
                return Err(ConfigError::InvalidParameter {
                    name: "estimation_trials",
                    reason: "must be positive when the initial temperature is calibrated",
                });
            }
            _ => {}
        }
        Ok(())
    }
}
