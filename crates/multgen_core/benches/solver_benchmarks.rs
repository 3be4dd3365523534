//! Criterion benchmarks for multiplier draws.
//!
//! Measures the cost of a single draw for every catalog strategy, with both
//! the lock-free per-thread source and the mutex-guarded seeded source.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use multgen_core::rng::SeededSource;
use multgen_core::{Solver, SolverConfig, Strategy};

fn config_for(strategy: Strategy) -> SolverConfig {
    SolverConfig::builder()
        .rtp(0.96)
        .algorithm(strategy.name())
        .k(2.0)
        .alpha(1.5)
        .build()
        .unwrap()
}

/// Benchmark one draw per strategy from the per-thread generator.
fn bench_thread_rng_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_thread_rng");

    for strategy in Strategy::ALL {
        let solver = Solver::new(config_for(strategy)).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(strategy.name()),
            &solver,
            |b, solver| b.iter(|| black_box(solver.draw())),
        );
    }

    group.finish();
}

/// Benchmark one draw per strategy from the seeded source.
fn bench_seeded_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_seeded");

    for strategy in Strategy::ALL {
        let solver =
            Solver::with_source(config_for(strategy), SeededSource::from_seed(42)).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(strategy.name()),
            &solver,
            |b, solver| b.iter(|| black_box(solver.draw())),
        );
    }

    group.finish();
}

/// Benchmark a batch of 1000 draws, the typical `generate` workload.
fn bench_batch(c: &mut Criterion) {
    let solver = Solver::new(config_for(Strategy::ExponentialTail)).unwrap();

    c.bench_function("draw_batch_1000", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for _ in 0..1000 {
                sum += solver.draw();
            }
            black_box(sum)
        })
    });
}

criterion_group!(benches, bench_thread_rng_draw, bench_seeded_draw, bench_batch);
criterion_main!(benches);
