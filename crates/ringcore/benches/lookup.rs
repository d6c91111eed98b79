//! Lookup benchmarks.
//!
//! Measures the binary-search lookup path on a ring sized like a real
//! deployment (100 nodes, 64 virtual positions each).

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ringcore::HashRing;

fn bench_lookups(c: &mut Criterion) {
    let ring = HashRing::with_nodes((0..100).map(|i| format!("node-{i}")), 64);
    let keys: Vec<String> = (0..1024).map(|i| format!("bench-key-{i}")).collect();

    c.bench_function("locate/100x64", |b| {
        let mut i = 0;
        b.iter(|| {
            let key = &keys[i % keys.len()];
            i += 1;
            black_box(ring.locate(key.as_bytes()));
        });
    });

    c.bench_function("unique_candidates3/100x64", |b| {
        let mut i = 0;
        b.iter(|| {
            let key = &keys[i % keys.len()];
            i += 1;
            black_box(ring.unique_candidates(key.as_bytes(), 3));
        });
    });
}

criterion_group!(benches, bench_lookups);
criterion_main!(benches);
