//! Property and convergence tests for the multiplier catalog.
//!
//! Every strategy must stay within the configured bounds for any valid
//! configuration, and the closed-form expectations must agree with seeded
//! Monte Carlo draws.

use approx::assert_relative_eq;
use multgen_core::algorithms::{
    binary_high_low_mean, exponential_tail_commit_probability, exponential_tail_mean_candidate,
};
use multgen_core::rng::SeededSource;
use multgen_core::{Solver, SolverConfig, MAX_MULTIPLIER, MIN_MULTIPLIER};
use proptest::prelude::*;

fn config(algorithm: &str, rtp: f64, min: f64, max: f64) -> SolverConfig {
    SolverConfig::builder()
        .rtp(rtp)
        .algorithm(algorithm)
        .multiplier_bounds(min, max)
        .build()
        .unwrap()
}

// ============================================================================
// Bounds
// ============================================================================

fn bounds_strategy() -> impl proptest::strategy::Strategy<Value = (f64, f64)> {
    (MIN_MULTIPLIER..=MAX_MULTIPLIER, MIN_MULTIPLIER..=MAX_MULTIPLIER)
        .prop_map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_every_strategy_respects_bounds(
        rtp in 1e-6..=1.0f64,
        (min, max) in bounds_strategy(),
        k in 0.01..20.0f64,
        alpha in 1.0..5.0f64,
        seed in any::<u64>(),
    ) {
        for strategy in multgen_core::Strategy::ALL {
            let config = SolverConfig::builder()
                .rtp(rtp)
                .algorithm(strategy.name())
                .multiplier_bounds(min, max)
                .k(k)
                .alpha(alpha)
                .build()
                .unwrap();
            let solver = Solver::with_source(config, SeededSource::from_seed(seed)).unwrap();

            for _ in 0..50 {
                let m = solver.draw();
                prop_assert!(
                    m >= min && m <= max,
                    "{} produced {} outside [{}, {}]",
                    strategy, m, min, max
                );
            }
        }
    }

    #[test]
    fn test_unknown_names_always_fall_back(name in "[a-z]{4,12}") {
        let config = SolverConfig::builder().algorithm(name.as_str()).build().unwrap();
        let solver = Solver::new(config).unwrap();

        let known = multgen_core::Strategy::from_name(&name).is_some();
        prop_assert_eq!(solver.fell_back(), !known);
        prop_assert!(multgen_core::Strategy::from_name(&solver.config().algorithm).is_some());
    }
}

// ============================================================================
// Convergence
// ============================================================================

#[test]
fn test_binary_high_low_sample_mean() {
    let config = config("v1", 0.3, 1.0, 10.0);
    let expected = binary_high_low_mean(&config);
    let solver = Solver::with_source(config, SeededSource::from_seed(11)).unwrap();

    let n = 200_000;
    let mean = (0..n).map(|_| solver.draw()).sum::<f64>() / n as f64;

    // Variance is rtp*(1-rtp)*81 = 17.01, standard error ~ 0.009.
    assert_relative_eq!(mean, expected, epsilon = 0.05);
}

#[test]
fn test_exponential_tail_commit_frequency() {
    let config = SolverConfig::builder()
        .rtp(0.8)
        .algorithm("v3")
        .multiplier_bounds(1.0, 100.0)
        .k(2.0)
        .build()
        .unwrap();
    let expected = exponential_tail_commit_probability(&config);
    let solver = Solver::with_source(config, SeededSource::from_seed(17)).unwrap();

    let n = 200_000;
    let committed = (0..n).filter(|_| solver.draw() > 1.0).count() as f64 / n as f64;

    assert_relative_eq!(committed, expected, epsilon = 0.005);
}

#[test]
fn test_exponential_tail_candidate_mean_from_samples() {
    let config = SolverConfig::builder()
        .rtp(1.0)
        .algorithm("v3")
        .multiplier_bounds(1.0, 20.0)
        .k(1.5)
        .build()
        .unwrap();
    let expected = exponential_tail_mean_candidate(&config);
    let source = SeededSource::from_seed(23);

    let n = 200_000;
    let mean = (0..n)
        .map(|_| {
            let u = multgen_core::rng::UniformSource::next_uniform(&source);
            multgen_core::algorithms::exponential_tail_candidate(&config, u)
        })
        .sum::<f64>()
        / n as f64;

    assert_relative_eq!(mean, expected, epsilon = 0.05);
}

#[test]
fn test_degenerate_bounds_yield_the_bound() {
    for strategy in multgen_core::Strategy::ALL {
        let config = config(strategy.name(), 0.9, 42.0, 42.0);
        let solver = Solver::with_source(config, SeededSource::from_seed(3)).unwrap();
        for _ in 0..100 {
            assert_eq!(solver.draw(), 42.0, "{}", strategy);
        }
    }
}
