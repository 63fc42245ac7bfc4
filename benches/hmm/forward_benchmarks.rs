use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use hmm_forward::hmm::forward::{forward, forward_parallel};
use hmm_forward::hmm::forward_log::{forward_log, forward_log_parallel};

/// Draws a random row-stochastic model with the given dimensions.
fn random_model(
    num_steps: usize,
    num_states: usize,
    seed: u64,
) -> (Vec<f64>, Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let mut rng = StdRng::seed_from_u64(seed);

    let normalize = |mut row: Vec<f64>| {
        let total: f64 = row.iter().sum();
        for p in &mut row {
            *p /= total;
        }
        row
    };

    let initial = normalize((0..num_states).map(|_| rng.gen_range(0.1..1.0)).collect());
    let transition: Vec<Vec<f64>> = (0..num_states)
        .map(|_| normalize((0..num_states).map(|_| rng.gen_range(0.1..1.0)).collect()))
        .collect();
    let emission: Vec<Vec<f64>> = (0..num_steps)
        .map(|_| (0..num_states).map(|_| rng.gen_range(0.01..0.5)).collect())
        .collect();

    (initial, transition, emission)
}

fn forward_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("forward");

    for &(num_steps, num_states) in &[(100, 4), (1_000, 8), (1_000, 32)] {
        let (initial, transition, emission) = random_model(num_steps, num_states, 17);
        let size = format!("{}x{}", num_steps, num_states);

        group.bench_with_input(BenchmarkId::new("linear", &size), &size, |b, _| {
            b.iter(|| {
                forward(
                    black_box(&initial),
                    black_box(&transition),
                    black_box(&emission),
                )
            })
        });
        group.bench_with_input(BenchmarkId::new("log", &size), &size, |b, _| {
            b.iter(|| {
                forward_log(
                    black_box(&initial),
                    black_box(&transition),
                    black_box(&emission),
                )
            })
        });
        group.bench_with_input(BenchmarkId::new("linear_parallel", &size), &size, |b, _| {
            b.iter(|| {
                forward_parallel(
                    black_box(&initial),
                    black_box(&transition),
                    black_box(&emission),
                )
            })
        });
        group.bench_with_input(BenchmarkId::new("log_parallel", &size), &size, |b, _| {
            b.iter(|| {
                forward_log_parallel(
                    black_box(&initial),
                    black_box(&transition),
                    black_box(&emission),
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, forward_benchmarks);
criterion_main!(benches);
