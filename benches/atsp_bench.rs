//! Criterion benchmarks for the ATSP runners.
//!
//! Uses random dense matrices and a simulated clock so each sample does a
//! fixed amount of search work regardless of machine speed.

use std::time::Duration;

use atsp_metaheur::clock::{StepClock, TimeBudget};
use atsp_metaheur::observer::NullObserver;
use atsp_metaheur::problem::{random_permutation, CostMatrix, GreedyConstructor};
use atsp_metaheur::sa::{SaConfig, SaRunner, TemperatureEstimator};
use atsp_metaheur::tabu::{TabuConfig, TabuRunner};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_matrix(n: usize, seed: u64) -> CostMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let costs = (0..n * n).map(|_| rng.random_range(1..1000)).collect();
    CostMatrix::from_flat(n, costs).unwrap()
}

fn ticks(limit: u64) -> TimeBudget<StepClock> {
    TimeBudget::with_clock(
        StepClock::new(Duration::from_millis(1)),
        Duration::from_millis(limit),
    )
}

// ===========================================================================
// Cost model
// ===========================================================================

fn bench_swap_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("swap_evaluation");

    for &n in &[17, 56, 171] {
        let m = random_matrix(n, 42);
        let tour = random_permutation(n, &mut StdRng::seed_from_u64(1));
        let (i, j) = (n / 3, 2 * n / 3);
        group.bench_with_input(BenchmarkId::new("full", n), &n, |b, _| {
            b.iter(|| {
                let mut t = tour.clone();
                t.swap(i, j);
                black_box(m.evaluate(black_box(&t)).unwrap())
            })
        });
        group.bench_with_input(BenchmarkId::new("delta", n), &n, |b, _| {
            b.iter(|| black_box(m.swap_delta(black_box(&tour), i, j)))
        });
    }
    group.finish();
}

fn bench_greedy_and_calibration(c: &mut Criterion) {
    let mut group = c.benchmark_group("seeding");
    group.sample_size(20);

    for &n in &[56, 171] {
        let m = random_matrix(n, 7);
        group.bench_with_input(BenchmarkId::new("greedy", n), &m, |b, m| {
            b.iter(|| black_box(GreedyConstructor::new(m).build_with_cost()))
        });
        group.bench_with_input(BenchmarkId::new("temperature", n), &m, |b, m| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(3);
                black_box(TemperatureEstimator::new(m).estimate(&mut rng))
            })
        });
    }
    group.finish();
}

// ===========================================================================
// Runners
// ===========================================================================

fn bench_sa(c: &mut Criterion) {
    let mut group = c.benchmark_group("sa");
    group.sample_size(10);

    for &n in &[17, 56] {
        let m = random_matrix(n, 42);
        let config = SaConfig::default()
            .with_iterations_per_temperature(1_000)
            .with_estimation_trials(1_000);
        group.bench_with_input(BenchmarkId::from_parameter(n), &(m, config), |b, (m, c)| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(42);
                let result = SaRunner::run_with(
                    black_box(m),
                    black_box(c),
                    &mut rng,
                    &ticks(50),
                    &mut NullObserver,
                );
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_tabu(c: &mut Criterion) {
    let mut group = c.benchmark_group("tabu");
    group.sample_size(10);

    for &n in &[17, 56] {
        let m = random_matrix(n, 42);
        let config = TabuConfig::default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &(m, config), |b, (m, c)| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(42);
                let result = TabuRunner::run_with(
                    black_box(m),
                    black_box(c),
                    &mut rng,
                    &ticks(50_000),
                    &mut NullObserver,
                );
                black_box(result)
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_swap_evaluation,
    bench_greedy_and_calibration,
    bench_sa,
    bench_tabu
);
criterion_main!(benches);
