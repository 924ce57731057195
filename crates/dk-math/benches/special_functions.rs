//! Criterion benchmarks for `dk-math`.
//!
//! Focus on the kernels the quantile solver calls on every iteration.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dk_math::{betainc, erfinv, gammainc};

fn bench_erfinv(c: &mut Criterion) {
    let mut group = c.benchmark_group("erfinv");
    for (name, y) in [("central", 0.3), ("shoulder", 0.95), ("tail", 1.0 - 1e-12)] {
        group.bench_with_input(BenchmarkId::new("erfinv", name), &y, |b, &y| {
            b.iter(|| black_box(erfinv(black_box(y))));
        });
    }
    group.finish();
}

fn bench_incomplete(c: &mut Criterion) {
    let mut group = c.benchmark_group("incomplete");

    for (name, a, x) in [
        ("series", 2.0, 1.0),
        ("fraction", 2.0, 8.0),
        ("large_shape", 500.0, 480.0),
    ] {
        group.bench_with_input(BenchmarkId::new("gammainc", name), &(a, x), |b, &(a, x)| {
            b.iter(|| black_box(gammainc(black_box(a), black_box(x))));
        });
    }

    for (name, a, b, x) in [
        ("uniform", 1.0, 1.0, 0.37),
        ("student_t_nu4", 2.0, 2.0, 0.8),
        ("skewed", 50.0, 5.0, 0.9),
    ] {
        group.bench_with_input(
            BenchmarkId::new("betainc", name),
            &(a, b, x),
            |bench, &(a, b, x)| {
                bench.iter(|| black_box(betainc(black_box(a), black_box(b), black_box(x))));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_erfinv, bench_incomplete);
criterion_main!(benches);
