//! End-to-end convergence tests: solver → simulator → estimator.

use approx::assert_relative_eq;
use multgen_checker::{
    reference_intervals, replay, PayoutMode, PayoutSimulator, SimulationConfig,
};
use multgen_core::rng::SeededSource;
use multgen_core::{Solver, SolverConfig, Strategy, MAX_MULTIPLIER};

fn seeded_solver(algorithm: &str, rtp: f64, min: f64, max: f64, seed: u64) -> Solver<SeededSource> {
    let config = SolverConfig::builder()
        .rtp(rtp)
        .algorithm(algorithm)
        .multiplier_bounds(min, max)
        .build()
        .unwrap();
    Solver::with_source(config, SeededSource::from_seed(seed)).unwrap()
}

fn simulation(participants: usize, min: f64, max: f64, mode: PayoutMode) -> SimulationConfig {
    SimulationConfig::builder()
        .participants(participants)
        .stakes(min, max)
        .mode(mode)
        .seed(2024)
        .build()
        .unwrap()
}

// ============================================================================
// Strict payout condition
// ============================================================================

#[test]
fn test_max_bound_stream_against_max_stakes_pays_nothing() {
    for strategy in Strategy::ALL {
        let solver = seeded_solver(strategy.name(), 0.95, MAX_MULTIPLIER, MAX_MULTIPLIER, 5);
        let config = simulation(5, MAX_MULTIPLIER, MAX_MULTIPLIER, PayoutMode::Scaled);

        let mut simulator = PayoutSimulator::new(config).unwrap();
        simulator.simulate(&solver, 1_000);
        let report = simulator.finish();

        assert_eq!(report.peak_multiplier(), Some(MAX_MULTIPLIER));
        for rtp in report.rtps() {
            assert_eq!(rtp, 0.0, "{} produced non-zero rtp", strategy);
        }
    }
}

// ============================================================================
// Unit transform convergence
// ============================================================================

#[test]
fn test_binary_high_low_converges_under_unit_transform() {
    let solver = seeded_solver("v1", 0.9, 1.0, MAX_MULTIPLIER, 41);
    let mut simulator =
        PayoutSimulator::new(simulation(1, 1.0, 100.0, PayoutMode::Unit)).unwrap();
    simulator.simulate(&solver, 200_000);

    let rtp = simulator.finish().rtps()[0];
    assert_relative_eq!(rtp, 0.9, epsilon = 0.01);
}

#[test]
fn test_fair_pareto_pays_rtp_per_round_for_any_fixed_stake() {
    let rounds = 200_000;
    let mut ratios = Vec::new();

    for stake in [1.0, 4.0, 16.0] {
        let solver = seeded_solver("fair", 0.9, 1.0, MAX_MULTIPLIER, 43);
        let mut simulator =
            PayoutSimulator::new(simulation(1, stake, stake, PayoutMode::Unit)).unwrap();
        simulator.simulate(&solver, rounds);

        let report = simulator.finish();
        let player = report.participants()[0];
        let payout_per_round = player.total_profit() / rounds as f64;
        let rtp = report.rtps()[0];

        // A stake x pays x with probability rtp / x.
        assert_relative_eq!(payout_per_round, 0.9, epsilon = 0.05);
        assert_relative_eq!(rtp, 0.9 / stake, max_relative = 0.06);
        ratios.push(rtp);
    }

    assert!(ratios.windows(2).all(|w| w[0] > w[1]), "{:?}", ratios);
}

#[test]
fn test_fair_pareto_ratio_falls_with_mean_stake() {
    let solver = seeded_solver("fair", 0.9, 1.0, MAX_MULTIPLIER, 43);
    let mut simulator =
        PayoutSimulator::new(simulation(1, 1.0, 100.0, PayoutMode::Unit)).unwrap();
    simulator.simulate(&solver, 200_000);

    // Payout per round stays at rtp while the mean stake is 50.5.
    let rtp = simulator.finish().rtps()[0];
    assert_relative_eq!(rtp, 0.9 / 50.5, max_relative = 0.08);
}

#[test]
fn test_multi_participant_interval_covers_target() {
    let solver = seeded_solver("v1", 0.8, 1.0, MAX_MULTIPLIER, 47);
    let mut simulator =
        PayoutSimulator::new(simulation(40, 1.0, 50.0, PayoutMode::Unit)).unwrap();
    simulator.simulate(&solver, 20_000);

    let report = simulator.finish();
    let intervals = reference_intervals(&report).unwrap();

    assert_eq!(intervals.len(), 3);
    assert!(intervals.windows(2).all(|w| w[0].width() <= w[1].width()));
    assert_relative_eq!(intervals[2].mean, 0.8, epsilon = 0.02);
}

// ============================================================================
// Replay
// ============================================================================

#[test]
fn test_replayed_stream_matches_direct_simulation() {
    let solver = seeded_solver("v3", 0.95, 1.0, 1_000.0, 53);
    let stream: Vec<f64> = (0..2_000).map(|_| solver.draw()).collect();
    let text: String = stream.iter().map(|m| format!("{}\n", m)).collect();

    let config = simulation(3, 1.0, 500.0, PayoutMode::Scaled);
    let replayed = replay(text.as_bytes(), config.clone()).unwrap();

    let mut direct = PayoutSimulator::new(config).unwrap();
    direct.run(stream);
    let direct = direct.finish();

    assert_eq!(replayed.rounds(), direct.rounds());
    assert_eq!(replayed.rtps(), direct.rtps());
    assert_eq!(replayed.peak_multiplier(), direct.peak_multiplier());
}
