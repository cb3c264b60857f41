//! ATSP problem model: the cost matrix, tours, and the greedy seed.
//!
//! Both runners share this model read-only. [`CostMatrix`] is the only cost
//! oracle; [`GreedyConstructor`] provides the seed tour and the baseline
//! every run must match or beat.

mod greedy;
mod matrix;
mod tour;

pub use greedy::GreedyConstructor;
pub use matrix::CostMatrix;
pub use tour::Tour;

use rand::seq::SliceRandom;
use rand::Rng;

/// Integer arc and tour cost.
pub type Cost = i64;

/// A uniformly random permutation of `0..n`.
pub fn random_permutation<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(rng);
    perm
}

/// Two distinct positions in `0..n`, drawn uniformly. Requires `n >= 2`.
pub(crate) fn distinct_pair<R: Rng + ?Sized>(n: usize, rng: &mut R) -> (usize, usize) {
    let first = rng.random_range(0..n);
    // Drawing from n - 1 slots and skipping `first` avoids a rejection loop.
    let mut second = rng.random_range(0..n - 1);
    if second >= first {
        second += 1;
    }
    (first, second)
}
