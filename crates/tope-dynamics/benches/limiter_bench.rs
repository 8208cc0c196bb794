//! Criterion benchmarks for the look-ahead limiter.
//!
//! Run with: cargo bench
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tope_dynamics::Limiter;

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.9
        })
        .collect()
}

fn bench_limiter_f32(c: &mut Criterion) {
    let mut group = c.benchmark_group("Limiter/f32");
    let mut limiter = Limiter::<f32>::with_config(SAMPLE_RATE, 20.0, 0.01, 0.005, 0.05, -0.3);

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, _| {
                let mut out_l = vec![0.0; block_size];
                let mut out_r = vec![0.0; block_size];
                b.iter(|| {
                    limiter.process(black_box(&input), black_box(&input), &mut out_l, &mut out_r);
                    black_box(out_l[0])
                })
            },
        );
    }

    group.finish();
}

fn bench_limiter_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("Limiter/f64");
    let mut limiter = Limiter::<f64>::with_config(48000.0, 20.0, 0.01, 0.005, 0.05, -0.3);

    for &block_size in BLOCK_SIZES {
        let input: Vec<f64> = generate_test_signal(block_size)
            .into_iter()
            .map(f64::from)
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, _| {
                let mut out_l = vec![0.0; block_size];
                let mut out_r = vec![0.0; block_size];
                b.iter(|| {
                    limiter.process(black_box(&input), black_box(&input), &mut out_l, &mut out_r);
                    black_box(out_l[0])
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_limiter_f32, bench_limiter_f64);
criterion_main!(benches);
