//! Search progress callbacks.
//!
//! Runners perform no console or file output. Anything that wants to watch a
//! run (a progress printer, a CSV trace, a test) implements
//! [`SearchObserver`] and passes it to `run_with`.

use std::time::Duration;

use crate::problem::Cost;

/// A new best tour was found.
#[derive(Debug, Clone, Copy)]
pub struct NewBest<'a> {
    pub tour: &'a [usize],
    pub cost: Cost,
    /// Elapsed time at the most recent clock poll.
    pub elapsed: Duration,
    /// Candidate moves evaluated so far.
    pub iteration: u64,
}

/// Observer for search lifecycle events. All methods default to no-ops.
pub trait SearchObserver {
    fn on_new_best(&mut self, _best: &NewBest<'_>) {}

    /// A restart cycle begins. `cycle` counts from 1.
    fn on_restart(&mut self, _cycle: u64, _elapsed: Duration) {}

    fn on_finish(&mut self, _best_cost: Cost, _elapsed: Duration) {}
}

impl<O: SearchObserver + ?Sized> SearchObserver for &mut O {
    fn on_new_best(&mut self, best: &NewBest<'_>) {
        (**self).on_new_best(best)
    }

    fn on_restart(&mut self, cycle: u64, elapsed: Duration) {
        (**self).on_restart(cycle, elapsed)
    }

    fn on_finish(&mut self, best_cost: Cost, elapsed: Duration) {
        (**self).on_finish(best_cost, elapsed)
    }
}

/// Ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SearchObserver for NullObserver {}

/// Records every improvement and restart.
#[derive(Debug, Default, Clone)]
pub struct BestTrace {
    /// `(iteration, cost)` for each new best, in order.
    pub improvements: Vec<(u64, Cost)>,
    pub restarts: u64,
    pub finished: Option<Cost>,
}

impl BestTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if recorded best costs never increase.
    pub fn is_non_increasing(&self) -> bool {
        self.improvements.windows(2).all(|w| w[1].1 <= w[0].1)
    }
}

impl SearchObserver for BestTrace {
    fn on_new_best(&mut self, best: &NewBest<'_>) {
        self.improvements.push((best.iteration, best.cost));
    }

    fn on_restart(&mut self, _cycle: u64, _elapsed: Duration) {
        self.restarts += 1;
    }

    fn on_finish(&mut self, best_cost: Cost, _elapsed: Duration) {
        self.finished = Some(best_cost);
    }
}
