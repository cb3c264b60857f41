//! Anytime metaheuristics for the asymmetric travelling-salesman problem.
//!
//! Two complementary local searches over a dense, precomputed cost matrix,
//! both built on the single position-swap move:
//!
//! - **Simulated Annealing (SA)**: stochastic search with a calibrated
//!   starting temperature, geometric cooling, Metropolis acceptance and
//!   reheating when the temperature bottoms out.
//! - **Tabu Search (TS)**: deterministic steepest descent over the full
//!   swap neighborhood with short-term move memory, aspiration and random
//!   restarts.
//!
//! Both runners are seeded by the nearest-neighbor tour, draw randomness
//! only from a caller-supplied generator, stop on a wall-clock
//! [`TimeBudget`](clock::TimeBudget), and always return the best tour found
//! so far. Neither is guaranteed to find the optimum.
//!
//! # Architecture
//!
//! [`problem`] holds the shared read-only model. [`sa`] and [`tabu`] are
//! independent single-threaded engines. Progress reporting goes through
//! [`observer`], time through [`clock`], and file formats live in [`io`],
//! which the engines never call.

pub mod clock;
pub mod error;
pub mod io;
pub mod observer;
pub mod problem;
pub mod sa;
pub mod tabu;
