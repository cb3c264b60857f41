//! SA execution loop.

use std::time::Duration;

use rand::Rng;

use super::config::SaConfig;
use super::temperature::{accept, TemperatureEstimator};
use crate::clock::{Clock, TimeBudget};
use crate::error::ConfigError;
use crate::observer::{NewBest, NullObserver, SearchObserver};
use crate::problem::{distinct_pair, Cost, CostMatrix, GreedyConstructor, Tour};

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SaResult {
    /// The best tour found.
    pub best: Tour,

    /// Cost of the best tour.
    pub best_cost: Cost,

    /// Cost of the greedy seed. `best_cost <= greedy_cost` always holds.
    pub greedy_cost: Cost,

    /// Starting temperature of every cooling cycle.
    pub initial_temperature: f64,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Total number of candidate moves evaluated.
    pub iterations: u64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: u64,

    /// Number of strictly improving moves.
    pub improving_moves: u64,

    /// Number of times the temperature was reset after reaching the floor.
    pub restarts: u64,

    /// Elapsed time at the final clock poll.
    pub elapsed: Duration,

    /// Elapsed time at the last clock poll before the best tour was found.
    ///
    /// The clock is polled once per temperature level, so this has the
    /// resolution of one batch.
    pub time_to_best: Duration,

    /// Iteration on which the best tour was found (0 = greedy seed).
    pub best_iteration: u64,

    /// Best cost after each temperature level, starting with the seed cost.
    pub cost_history: Vec<Cost>,
}

/// Executes the Simulated Annealing algorithm.
///
/// ```
/// use atsp_metaheur::problem::CostMatrix;
/// use atsp_metaheur::sa::{SaConfig, SaRunner};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use std::time::Duration;
///
/// let m = CostMatrix::new(vec![
///     vec![0, 2, 9, 10],
///     vec![1, 0, 6, 4],
///     vec![15, 7, 0, 8],
///     vec![6, 3, 12, 0],
/// ]).unwrap();
/// let config = SaConfig::default()
///     .with_time_limit(Duration::from_millis(50))
///     .with_iterations_per_temperature(200);
/// let result = SaRunner::run(&m, &config, &mut StdRng::seed_from_u64(1)).unwrap();
/// assert!(result.best_cost <= result.greedy_cost);
/// assert_eq!(m.tour_cost(&result.best), result.best_cost);
/// ```
pub struct SaRunner;

impl SaRunner {
    /// Runs SA under a real-time budget of `config.time_limit`.
    pub fn run<R: Rng + ?Sized>(
        matrix: &CostMatrix,
        config: &SaConfig,
        rng: &mut R,
    ) -> Result<SaResult, ConfigError> {
        let budget = TimeBudget::start(config.time_limit);
        Self::run_with(matrix, config, rng, &budget, &mut NullObserver)
    }

    /// Runs SA against an explicit budget, reporting progress to `observer`.
    ///
    /// `config.time_limit` is ignored; the budget's limit applies.
    #[tracing::instrument(
        level = "debug",
        name = "SA Search",
        skip_all,
        fields(n = matrix.dimension(), limit = ?budget.limit())
    )]
    pub fn run_with<R, C, O>(
        matrix: &CostMatrix,
        config: &SaConfig,
        rng: &mut R,
        budget: &TimeBudget<C>,
        observer: &mut O,
    ) -> Result<SaResult, ConfigError>
    where
        R: Rng + ?Sized,
        C: Clock,
        O: SearchObserver + ?Sized,
    {
        config.validate()?;
        let n = matrix.dimension();

        let (seed, greedy_cost) = GreedyConstructor::new(matrix).build_with_cost();
        let mut current = seed.into_inner();
        let mut current_cost = greedy_cost;
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let initial_temperature = match config.initial_temperature {
            Some(t) => t,
            None => TemperatureEstimator::new(matrix)
                .with_trials(config.estimation_trials)
                .estimate(rng),
        };
        tracing::debug!(initial_temperature, greedy_cost, "SA: calibrated");

        let mut temperature = initial_temperature;
        let mut iterations = 0u64;
        let mut accepted_moves = 0u64;
        let mut improving_moves = 0u64;
        let mut restarts = 0u64;
        let mut best_iteration = 0u64;
        let mut time_to_best = Duration::ZERO;
        let mut cost_history = vec![best_cost];

        let mut elapsed = budget.elapsed();

        // With two vertices every tour is a rotation of the greedy one.
        if n > 2 && !budget.is_exhausted(elapsed) {
            loop {
                for _ in 0..config.iterations_per_temperature {
                    let (i, j) = distinct_pair(n, rng);
                    let delta = matrix.swap_delta(&current, i, j);
                    iterations += 1;

                    if !accept(delta, temperature, rng) {
                        continue;
                    }
                    current.swap(i, j);
                    current_cost += delta;
                    accepted_moves += 1;
                    if delta < 0 {
                        improving_moves += 1;
                    }

                    if current_cost < best_cost {
                        best.copy_from_slice(&current);
                        best_cost = current_cost;
                        best_iteration = iterations;
                        time_to_best = elapsed;
                        tracing::trace!(best_cost, iterations, "SA: new best");
                        observer.on_new_best(&NewBest {
                            tour: &best,
                            cost: best_cost,
                            elapsed,
                            iteration: iterations,
                        });
                    }
                }

                // Cool down
                temperature *= config.cooling_rate;
                cost_history.push(best_cost);

                elapsed = budget.elapsed();
                if budget.is_exhausted(elapsed) {
                    break;
                }

                if temperature < config.min_temperature {
                    temperature = initial_temperature;
                    restarts += 1;
                    tracing::debug!(restarts, best_cost, "SA: reheat to T={}", temperature);
                    observer.on_restart(restarts, elapsed);
                }
            }
        }

        observer.on_finish(best_cost, elapsed);
        tracing::info!(
            best_cost,
            greedy_cost,
            iterations,
            restarts,
            final_temperature = temperature,
            elapsed_ms = elapsed.as_millis() as u64,
            "SA: finished"
        );

        Ok(SaResult {
            best: Tour::from_vec_unchecked(best),
            best_cost,
            greedy_cost,
            initial_temperature,
            final_temperature: temperature,
            iterations,
            accepted_moves,
            improving_moves,
            restarts,
            elapsed,
            time_to_best,
            best_iteration,
            cost_history,
        })
    }
}
