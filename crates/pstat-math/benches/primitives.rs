//! Criterion benchmarks for numeric primitives: factorials, combinations,
//! the error function, and bisection.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pstat_math::{bisect, combination, error_function, factorial, ln_factorial};

fn bench_factorials(c: &mut Criterion) {
    let mut group = c.benchmark_group("factorial");
    for n in [10_u64, 100, 170] {
        group.bench_function(BenchmarkId::new("exact", n), |b| {
            b.iter(|| black_box(factorial(black_box(n as f64))))
        });
    }
    for n in [100_u64, 1_000, 100_000] {
        group.bench_function(BenchmarkId::new("ln", n), |b| {
            b.iter(|| black_box(ln_factorial(black_box(n))))
        });
    }
    group.finish();
}

fn bench_combination(c: &mut Criterion) {
    let mut group = c.benchmark_group("combination");
    for n in [20_u64, 200, 1_000] {
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| black_box(combination(black_box(n), black_box(n / 2))))
        });
    }
    group.finish();
}

fn bench_erf(c: &mut Criterion) {
    c.bench_function("erf/sweep", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for i in -50..=50 {
                acc += error_function(black_box(i as f64 * 0.1));
            }
            black_box(acc)
        })
    });
}

fn bench_bisect(c: &mut Criterion) {
    c.bench_function("bisect/60", |b| {
        b.iter(|| black_box(bisect(error_function, black_box(0.5), -10.0, 10.0, 60)))
    });
}

criterion_group!(benches, bench_factorials, bench_combination, bench_erf, bench_bisect);
criterion_main!(benches);
