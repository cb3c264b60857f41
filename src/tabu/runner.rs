//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Seed the global best with the greedy tour; start the trajectory from a
//!    random permutation with an empty tabu memory
//! 2. At each step (numbered from 1 within a restart cycle):
//!    a. Evaluate every unordered position swap of the current tour
//!    b. Record any cost below the global best, tabu or not
//!    c. Commit the cheapest admissible swap (non-tabu, or tabu but producing
//!       a new global best), even if it worsens the tour
//!    d. Forbid that swap for the next `tenure` steps
//! 3. After `factor * N` steps, or when the cycle's wall-clock cap is hit,
//!    restart from a fresh random permutation with cleared memory
//! 4. Stop as soon as the time budget is spent, polling after every
//!    candidate evaluation
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.

use std::time::Duration;

use rand::Rng;

use super::config::TabuConfig;
use super::memory::TabuMemory;
use crate::clock::{Clock, TimeBudget};
use crate::error::ConfigError;
use crate::observer::{NewBest, NullObserver, SearchObserver};
use crate::problem::{random_permutation, Cost, CostMatrix, GreedyConstructor, Tour};

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TabuResult {
    /// Best tour found.
    pub best: Tour,
    /// Cost of the best tour.
    pub best_cost: Cost,
    /// Cost of the greedy seed. `best_cost <= greedy_cost` always holds.
    pub greedy_cost: Cost,
    /// Candidate swaps evaluated.
    pub evaluations: u64,
    /// Completed steps across all restart cycles.
    pub steps: u64,
    /// Restart cycles begun after the first.
    pub restarts: u64,
    /// Elapsed time at the final clock poll.
    pub elapsed: Duration,
    /// Elapsed time when the best tour was found.
    pub time_to_best: Duration,
    /// Evaluation at which the best tour was found (0 = greedy seed).
    pub best_evaluation: u64,
    /// Best cost after each completed step, starting with the seed cost.
    pub cost_history: Vec<Cost>,
}

/// A committed swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Move {
    pub i: usize,
    pub j: usize,
    pub cost: Cost,
    pub was_tabu: bool,
    pub improved_best: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepOutcome {
    Moved(Move),
    /// Every swap was tabu and none produced a new global best.
    Stuck,
    OutOfTime,
}

/// The tour being walked plus its tabu memory.
#[derive(Debug, Clone)]
pub(crate) struct Trajectory {
    pub current: Vec<usize>,
    pub cost: Cost,
    pub memory: TabuMemory,
}

impl Trajectory {
    pub fn random<R: Rng + ?Sized>(matrix: &CostMatrix, rng: &mut R) -> Self {
        let n = matrix.dimension();
        let current = random_permutation(n, rng);
        let cost = matrix.cycle_cost(&current);
        Self {
            current,
            cost,
            memory: TabuMemory::new(n),
        }
    }

    /// Jumps to a fresh random permutation and forgets every ban.
    pub fn restart<R: Rng + ?Sized>(&mut self, matrix: &CostMatrix, rng: &mut R) {
        self.current = random_permutation(matrix.dimension(), rng);
        self.cost = matrix.cycle_cost(&self.current);
        self.memory.clear();
    }
}

/// Global best bookkeeping shared by every restart cycle.
pub(crate) struct Search<'a, C, O: ?Sized> {
    matrix: &'a CostMatrix,
    budget: &'a TimeBudget<C>,
    observer: &'a mut O,
    aspiration: bool,
    pub best: Vec<usize>,
    pub best_cost: Cost,
    pub time_to_best: Duration,
    pub best_evaluation: u64,
    pub evaluations: u64,
    pub elapsed: Duration,
}

impl<'a, C: Clock, O: SearchObserver + ?Sized> Search<'a, C, O> {
    pub fn new(
        matrix: &'a CostMatrix,
        budget: &'a TimeBudget<C>,
        observer: &'a mut O,
        aspiration: bool,
        seed: Vec<usize>,
        seed_cost: Cost,
    ) -> Self {
        let elapsed = budget.elapsed();
        Self {
            matrix,
            budget,
            observer,
            aspiration,
            best: seed,
            best_cost: seed_cost,
            time_to_best: Duration::ZERO,
            best_evaluation: 0,
            evaluations: 0,
            elapsed,
        }
    }

    #[inline]
    pub fn out_of_time(&self) -> bool {
        self.budget.is_exhausted(self.elapsed)
    }

    /// Scans the full swap neighborhood of `t` and commits one move.
    pub fn step(&mut self, t: &mut Trajectory, step: usize, tenure: usize) -> StepOutcome {
        let n = t.current.len();
        let mut chosen: Option<Move> = None;

        for i in 0..n {
            for j in (i + 1)..n {
                let cost = t.cost + self.matrix.swap_delta(&t.current, i, j);
                self.evaluations += 1;
                self.elapsed = self.budget.elapsed();

                let improved_best = cost < self.best_cost;
                if improved_best {
                    self.record_best(&t.current, i, j, cost);
                }

                let was_tabu = t.memory.is_tabu(i, j, step);
                // Aspiration: a tabu swap is admissible if it beats the global best.
                let admissible = !was_tabu || (self.aspiration && improved_best);
                if admissible && chosen.is_none_or(|c| cost < c.cost) {
                    chosen = Some(Move {
                        i,
                        j,
                        cost,
                        was_tabu,
                        improved_best,
                    });
                }

                if self.out_of_time() {
                    return StepOutcome::OutOfTime;
                }
            }
        }

        match chosen {
            Some(mv) => {
                t.current.swap(mv.i, mv.j);
                t.cost = mv.cost;
                t.memory.forbid(mv.i, mv.j, step + tenure);
                StepOutcome::Moved(mv)
            }
            None => StepOutcome::Stuck,
        }
    }

    fn record_best(&mut self, current: &[usize], i: usize, j: usize, cost: Cost) {
        self.best.copy_from_slice(current);
        self.best.swap(i, j);
        self.best_cost = cost;
        self.time_to_best = self.elapsed;
        self.best_evaluation = self.evaluations;
        tracing::trace!(best_cost = cost, evaluations = self.evaluations, "Tabu: new best");
        self.observer.on_new_best(&NewBest {
            tour: &self.best,
            cost,
            elapsed: self.elapsed,
            iteration: self.evaluations,
        });
    }
}

/// Tabu Search runner.
///
/// ```
/// use atsp_metaheur::problem::CostMatrix;
/// use atsp_metaheur::tabu::{TabuConfig, TabuRunner};
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
/// let config = TabuConfig::default().with_time_limit(Duration::from_millis(20));
/// let result = TabuRunner::run(&m, &config, &mut StdRng::seed_from_u64(1)).unwrap();
/// assert!(result.best_cost <= result.greedy_cost);
/// assert_eq!(m.tour_cost(&result.best), result.best_cost);
/// ```
pub struct TabuRunner;

impl TabuRunner {
    /// Runs Tabu Search under a real-time budget of `config.time_limit`.
    pub fn run<R: Rng + ?Sized>(
        matrix: &CostMatrix,
        config: &TabuConfig,
        rng: &mut R,
    ) -> Result<TabuResult, ConfigError> {
        let budget = TimeBudget::start(config.time_limit);
        Self::run_with(matrix, config, rng, &budget, &mut NullObserver)
    }

    /// Runs Tabu Search against an explicit budget, reporting progress to
    /// `observer`. `config.time_limit` is ignored; the budget's limit applies.
    #[tracing::instrument(
        level = "debug",
        name = "Tabu Search",
        skip_all,
        fields(n = matrix.dimension(), limit = ?budget.limit())
    )]
    pub fn run_with<R, C, O>(
        matrix: &CostMatrix,
        config: &TabuConfig,
        rng: &mut R,
        budget: &TimeBudget<C>,
        observer: &mut O,
    ) -> Result<TabuResult, ConfigError>
    where
        R: Rng + ?Sized,
        C: Clock,
        O: SearchObserver + ?Sized,
    {
        config.validate()?;
        let n = matrix.dimension();
        let step_cap = config.steps_per_restart(n);
        let tenure = config.tenure_for(n);

        let (seed, greedy_cost) = GreedyConstructor::new(matrix).build_with_cost();
        let mut search = Search::new(
            matrix,
            budget,
            &mut *observer,
            config.aspiration,
            seed.into_inner(),
            greedy_cost,
        );

        let mut steps = 0u64;
        let mut restarts = 0u64;
        let mut cost_history = vec![greedy_cost];

        // With two vertices every tour is a rotation of the greedy one.
        if n > 2 && !search.out_of_time() {
            let mut trajectory = Trajectory::random(matrix, rng);
            'search: loop {
                let cycle_start = search.elapsed;
                for step in 1..=step_cap {
                    match search.step(&mut trajectory, step, tenure) {
                        StepOutcome::OutOfTime => break 'search,
                        StepOutcome::Moved(mv) if mv.was_tabu => tracing::trace!(
                            i = mv.i,
                            j = mv.j,
                            improved_best = mv.improved_best,
                            "Tabu: aspiration move"
                        ),
                        _ => {}
                    }
                    steps += 1;
                    cost_history.push(search.best_cost);

                    if config
                        .sweep_time_limit
                        .is_some_and(|cap| search.elapsed.saturating_sub(cycle_start) >= cap)
                    {
                        tracing::debug!(step, "Tabu: cycle time cap reached");
                        break;
                    }
                }

                trajectory.restart(matrix, rng);
                restarts += 1;
                tracing::debug!(
                    restarts,
                    best_cost = search.best_cost,
                    start_cost = trajectory.cost,
                    "Tabu: restart"
                );
                search.observer.on_restart(restarts, search.elapsed);
            }
        }

        let Search {
            best,
            best_cost,
            time_to_best,
            best_evaluation,
            evaluations,
            elapsed,
            ..
        } = search;

        observer.on_finish(best_cost, elapsed);
        tracing::info!(
            best_cost,
            greedy_cost,
            evaluations,
            steps,
            restarts,
            time_to_best_ms = time_to_best.as_millis() as u64,
            "Tabu: finished"
        );

        Ok(TabuResult {
            best: Tour::from_vec_unchecked(best),
            best_cost,
            greedy_cost,
            evaluations,
            steps,
            restarts,
            elapsed,
            time_to_best,
            best_evaluation,
            cost_history,
        })
    }
}
