//! Criterion benchmarks for whole runs to a fixed point.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use sandpile_bench::{reference_profile, tower, CUTOFFS};
use sandpile_engine::{EngineConfig, Sandpile};

/// Benchmark: stabilize the 256x256 random profile at each cutoff.
fn bench_stabilize_random_65k(c: &mut Criterion) {
    let start = reference_profile(7);
    let mut group = c.benchmark_group("stabilize_random_65k");
    group.sample_size(10);

    for cutoff in CUTOFFS {
        let config = EngineConfig::default().with_cutoff(cutoff);
        group.bench_with_input(BenchmarkId::from_parameter(cutoff), &config, |b, config| {
            b.iter_batched(
                || Sandpile::new(start.clone(), config.clone()).unwrap(),
                |mut pile| black_box(pile.stabilize()),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

/// Benchmark: stabilize a 4096-grain tower on a 65x65 grid.
///
/// Thousands of short steps, so per-step overhead dominates.
fn bench_stabilize_tower(c: &mut Criterion) {
    let start = tower(65, 4096);
    let mut group = c.benchmark_group("stabilize_tower_4096");
    group.sample_size(10);

    for cutoff in [8, 64] {
        let config = EngineConfig::default().with_cutoff(cutoff);
        group.bench_with_input(BenchmarkId::from_parameter(cutoff), &config, |b, config| {
            b.iter_batched(
                || Sandpile::new(start.clone(), config.clone()).unwrap(),
                |mut pile| black_box(pile.stabilize()),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_stabilize_random_65k, bench_stabilize_tower);
criterion_main!(benches);
