use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use orbit_core::{HashAlgorithm, RingBuilder};

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    for algorithm in HashAlgorithm::ALL {
        let ring = RingBuilder::new()
            .with_vnodes(135)
            .with_algorithm(algorithm)
            .add_nodes((1..=20).map(|i| format!("shard{}", i)))
            .build()
            .unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(algorithm), &ring, |b, ring| {
            let mut i = 0u64;
            b.iter(|| {
                i += 1;
                black_box(ring.lookup(&format!("user{}", i)).unwrap());
            })
        });
    }
    group.finish();
}

fn bench_add_node(c: &mut Criterion) {
    let ring = RingBuilder::new()
        .with_vnodes(135)
        .add_nodes((1..=20).map(|i| format!("shard{}", i)))
        .build()
        .unwrap();

    c.bench_function("add_node", |b| {
        b.iter(|| {
            let mut ring = ring.clone();
            black_box(ring.add_node("shard21").unwrap());
        })
    });
}

criterion_group!(benches, bench_lookup, bench_add_node);
criterion_main!(benches);
