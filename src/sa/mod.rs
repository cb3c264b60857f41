//! Simulated Annealing (SA) over single-swap moves.
//!
//! Starts from the greedy tour, proposes random position swaps, accepts
//! improvements unconditionally and uphill moves with the Metropolis
//! probability `exp(-delta / T)`, and cools geometrically after every batch.
//! The starting temperature is calibrated from the matrix by
//! [`TemperatureEstimator`]. When `T` drops below the floor it is reset to
//! the starting value, so the search keeps running until the time budget
//! is spent.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;
mod temperature;

pub use config::SaConfig;
pub use runner::{SaResult, SaRunner};
pub use temperature::{
    metropolis_probability, temperature_for_delta, TemperatureEstimator, TARGET_ACCEPTANCE,
};
