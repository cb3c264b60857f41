//! Tabu Search (TS) over the full pairwise-swap neighborhood.
//!
//! Deterministic steepest descent with short-term memory: every step scans
//! all O(N²) position swaps, moves to the cheapest admissible one even when
//! it is worse, and forbids undoing it for a while. Random restarts with a
//! cleared memory diversify the search; the greedy tour seeds the global best.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod memory;
mod runner;

pub use config::TabuConfig;
pub use memory::TabuMemory;
pub use runner::{TabuResult, TabuRunner};
