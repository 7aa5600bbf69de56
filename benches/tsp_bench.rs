//! Criterion benchmarks for u-tsp.
//!
//! Uses random planar instances to measure operator and loop overhead.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_numflow::random::create_rng;
use u_tsp::distance::DistanceTable;
use u_tsp::ga::{Crossover, GaConfig, GaRunner, Population, Selection};

fn random_instance(n: usize, seed: u64) -> DistanceTable {
    let mut rng = create_rng(seed);
    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
        .collect();
    DistanceTable::from_points(&points).expect("valid instance")
}

fn bench_breed(c: &mut Criterion) {
    let mut group = c.benchmark_group("breed");

    for n in [20, 100, 500] {
        let table = random_instance(n, 1);
        let mut rng = create_rng(42);
        let parents = Population::random(&table, 50, &mut rng).expect("non-empty");

        for crossover in [Crossover::TwoPointOrder, Crossover::PartiallyMapped] {
            group.bench_with_input(
                BenchmarkId::new(format!("{crossover:?}"), n),
                &n,
                |b, _| {
                    b.iter(|| {
                        crossover
                            .breed(
                                black_box(&parents),
                                40,
                                &Selection::Tournament(3),
                                &table,
                                &mut rng,
                            )
                            .expect("breed")
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_run");
    group.sample_size(10);

    for n in [10, 50] {
        let table = random_instance(n, 2);
        let config = GaConfig::default()
            .with_population_size(40)
            .with_offspring_size(30)
            .with_stall_patience(20)
            .with_max_generations(200)
            .with_seed(42);

        group.bench_with_input(BenchmarkId::new("random_planar", n), &n, |b, _| {
            b.iter(|| GaRunner::run(black_box(&table), &config).expect("run"));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_breed, bench_full_run);
criterion_main!(benches);
