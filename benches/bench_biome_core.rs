use biome_core::{crossover, evaluator, mutation, starter, BiomeRng, MutationConfig};
use criterion::{criterion_group, criterion_main, Criterion};

pub fn process_starter_benchmark(c: &mut Criterion) {
    let mut net = starter::build_starter_network(0);

    c.bench_function("process starter network", |b| b.iter(|| evaluator::process(&mut net, 0.016)));
}

pub fn mutate_starter_benchmark(c: &mut Criterion) {
    let mut net = starter::build_starter_network(0);
    let mut rng = BiomeRng::new(1);
    let config = MutationConfig::default();

    c.bench_function("mutate starter network", |b| {
        b.iter(|| mutation::mutate(&mut net, &mut rng, &config))
    });
}

pub fn crossover_highly_mutated_networks_benchmark(c: &mut Criterion) {
    let mut net_0 = starter::build_starter_network(0);
    let mut net_1 = starter::build_starter_network(0);
    let mut rng = BiomeRng::new(2);
    let config = MutationConfig::default();

    for _ in 0..100 {
        mutation::mutate(&mut net_0, &mut rng, &config);
        mutation::mutate(&mut net_1, &mut rng, &config);
    }

    c.bench_function("crossover highly mutated networks", |b| {
        b.iter(|| crossover::crossover(&net_0, &net_1, &mut rng))
    });
}

pub fn genetic_distance_benchmark(c: &mut Criterion) {
    let net_0 = starter::build_starter_network(0);
    let net_1 = starter::build_starter_network(0);

    c.bench_function("genetic distance between starter networks", |b| {
        b.iter(|| crossover::genetic_distance(&net_0, &net_1))
    });
}

criterion_group!(
    benches,
    process_starter_benchmark,
    mutate_starter_benchmark,
    crossover_highly_mutated_networks_benchmark,
    genetic_distance_benchmark
);
criterion_main!(benches);
