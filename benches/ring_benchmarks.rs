//! Benchmarks for consistent-hash ring construction and lookup.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use meshcache::HashRing;

fn bench_ring_add(c: &mut Criterion) {
    c.bench_function("hash_ring_add_100_peers", |b| {
        b.iter(|| {
            let mut ring = HashRing::new();
            let peers: Vec<String> = (0..100).map(|i| format!("peer-{i}")).collect();
            ring.add(peers);
            black_box(&ring);
        });
    });
}

fn bench_ring_get(c: &mut Criterion) {
    let mut ring = HashRing::new();
    let peers: Vec<String> = (0..100).map(|i| format!("peer-{i}")).collect();
    ring.add(peers);

    c.bench_function("hash_ring_get", |b| {
        b.iter(|| {
            for i in 0..1_000 {
                black_box(ring.get(&format!("key-{i}")));
            }
        });
    });
}

criterion_group!(benches, bench_ring_add, bench_ring_get);
criterion_main!(benches);
