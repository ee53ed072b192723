//! Criterion benchmarks for complete benchmark sessions.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use iso3dfd_bench::reference_profile;
use iso3dfd_engine::{RunConfig, Session};

fn bench_session_64(c: &mut Criterion) {
    let session = Session::new(RunConfig {
        verify: false,
        ..reference_profile()
    })
    .unwrap();

    c.bench_function("session_64", |b| {
        b.iter(|| {
            let report = session.run().unwrap();
            black_box(&report);
        });
    });
}

fn bench_session_64_verified(c: &mut Criterion) {
    let session = Session::new(reference_profile()).unwrap();

    let mut group = c.benchmark_group("verified");
    group.sample_size(10);
    group.bench_function("session_64_verified", |b| {
        b.iter(|| {
            let report = session.run().unwrap();
            assert!(report.passed());
            black_box(&report);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_session_64, bench_session_64_verified);
criterion_main!(benches);
