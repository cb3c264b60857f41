//! Initial-temperature calibration and the Metropolis acceptance rule.

use rand::Rng;

use crate::problem::{distinct_pair, random_permutation, Cost, CostMatrix};

/// Probability with which a typical single-swap degradation should be
/// accepted at the calibrated starting temperature.
pub const TARGET_ACCEPTANCE: f64 = 0.99;

/// Calibrates a starting temperature from the matrix's cost volatility.
///
/// Each trial draws a uniformly random tour and two distinct positions, and
/// records `|cost(swapped) - cost(tour)|`. With `d` the mean over all
/// trials, the estimate is `-d / ln(0.99)`: the temperature at which an
/// average uphill swap passes the Metropolis test 99% of the time.
#[derive(Debug, Clone, Copy)]
pub struct TemperatureEstimator<'a> {
    matrix: &'a CostMatrix,
    trials: usize,
}

impl<'a> TemperatureEstimator<'a> {
    pub const DEFAULT_TRIALS: usize = 10_000;

    pub fn new(matrix: &'a CostMatrix) -> Self {
        Self {
            matrix,
            trials: Self::DEFAULT_TRIALS,
        }
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Mean absolute single-swap delta over `trials` random tours.
    pub fn mean_abs_delta<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let n = self.matrix.dimension();
        if self.trials == 0 || n < 2 {
            return 0.0;
        }
        let mut total = 0.0;
        for _ in 0..self.trials {
            let (i, j) = distinct_pair(n, rng);
            let tour = random_permutation(n, rng);
            total += self.matrix.swap_delta(&tour, i, j).abs() as f64;
        }
        total / self.trials as f64
    }

    pub fn estimate<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        temperature_for_delta(self.mean_abs_delta(rng))
    }
}

/// Temperature at which an uphill move of `mean_delta` is accepted with
/// probability [`TARGET_ACCEPTANCE`].
#[inline]
pub fn temperature_for_delta(mean_delta: f64) -> f64 {
    -mean_delta / TARGET_ACCEPTANCE.ln()
}

/// Metropolis acceptance probability of a move changing the cost by `delta`.
///
/// Returns 1 for `delta <= 0`. For an uphill move (`delta > 0`) returns
/// `exp(-delta / temperature)`, which lies in (0, 1) and decays as `delta`
/// grows or `temperature` falls. A non-positive temperature rejects every
/// uphill move.
#[inline]
pub fn metropolis_probability(delta: Cost, temperature: f64) -> f64 {
    if delta <= 0 {
        1.0
    } else if temperature > 0.0 {
        (-(delta as f64) / temperature).exp()
    } else {
        0.0
    }
}

/// Metropolis criterion: improving moves always pass; the rest pass with
/// [`metropolis_probability`] against a uniform draw from [0, 1).
#[inline]
pub(crate) fn accept<R: Rng + ?Sized>(delta: Cost, temperature: f64, rng: &mut R) -> bool {
    delta < 0 || rng.random_range(0.0..1.0) < metropolis_probability(delta, temperature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_calibrated_temperature_hits_target_acceptance() {
        let mean = 42.0;
        let t = temperature_for_delta(mean);
        assert!(t > 0.0);
        let p = (-mean / t).exp();
        assert!((p - TARGET_ACCEPTANCE).abs() < 1e-12);
    }

    #[test]
    fn test_flat_matrix_calibrates_to_zero() {
        let m = CostMatrix::new(vec![vec![5; 5]; 5]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let t = TemperatureEstimator::new(&m).with_trials(100).estimate(&mut rng);
        assert_eq!(t, 0.0);
    }

    #[test]
    fn test_estimate_is_positive_for_varied_costs() {
        let m = CostMatrix::new(vec![
            vec![0, 1, 50, 7],
            vec![30, 0, 2, 90],
            vec![4, 60, 0, 3],
            vec![8, 20, 40, 0],
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let estimator = TemperatureEstimator::new(&m).with_trials(2_000);
        let t = estimator.estimate(&mut rng);
        assert!(t > 0.0 && t.is_finite());
        // -1 / ln(0.99) is roughly 99.5, so T is about a hundred times the mean delta.
        let mean = estimator.mean_abs_delta(&mut StdRng::seed_from_u64(5));
        assert!((t / mean - 99.499).abs() < 0.01);
    }

    #[test]
    fn test_estimate_is_reproducible_for_a_seed() {
        let m = CostMatrix::new(vec![vec![0, 3, 9], vec![2, 0, 6], vec![7, 1, 0]]).unwrap();
        let estimator = TemperatureEstimator::new(&m).with_trials(500);
        let a = estimator.estimate(&mut StdRng::seed_from_u64(99));
        let b = estimator.estimate(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_metropolis_probability_bounds() {
        assert_eq!(metropolis_probability(-5, 10.0), 1.0);
        assert_eq!(metropolis_probability(0, 10.0), 1.0);
        let p = metropolis_probability(5, 10.0);
        assert!(p > 0.0 && p < 1.0);
        assert!((p - (-0.5f64).exp()).abs() < 1e-12);
        assert_eq!(metropolis_probability(5, 0.0), 0.0);
    }

    #[test]
    fn test_metropolis_probability_monotonicity() {
        let t = 20.0;
        assert!(metropolis_probability(10, t) > metropolis_probability(11, t));
        assert!(metropolis_probability(10, 25.0) > metropolis_probability(10, t));
    }

    #[test]
    fn test_current_minus_new_exponent_matches_metropolis() {
        // exp((current - new) / T) is sometimes read as a positive exponent that
        // accepts every uphill move. For new > current the numerator is negative,
        // so it is the same quantity as exp(-(new - current) / T).
        let (current, new, t): (Cost, Cost, f64) = (100, 130, 25.0);
        let written_as_current_minus_new = ((current - new) as f64 / t).exp();
        let p = metropolis_probability(new - current, t);
        assert!((written_as_current_minus_new - p).abs() < 1e-12);
        assert!(written_as_current_minus_new < 1.0);

        // The positive-exponent variant would always accept; this rule must not.
        let positive_exponent = ((new - current) as f64 / t).exp();
        assert!(positive_exponent > 1.0);
        assert!(p < positive_exponent);
    }

    #[test]
    fn test_accept_always_takes_improvements() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!((0..1000).all(|_| accept(-1, 1e-9, &mut rng)));
    }

    #[test]
    fn test_accept_rate_tracks_probability() {
        let mut rng = StdRng::seed_from_u64(8);
        let trials = 20_000;
        let hits = (0..trials).filter(|_| accept(10, 10.0, &mut rng)).count();
        let rate = hits as f64 / trials as f64;
        let expected = (-1.0f64).exp();
        assert!(
            (rate - expected).abs() < 0.02,
            "acceptance rate {rate} should be near {expected}"
        );
    }
}
