//! Criterion micro-benchmarks for neighborhood ring walks.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tilth_bench::{probe_origins, reference_profile, sparse_profile};
use tilth_neighborhood::{Hex, Moore, Neighborhood, VonNeumann};

/// Benchmark: Collect neighbors within extent 3 from 100 origins, per shape.
fn bench_neighbors_extent3(c: &mut Criterion) {
    let grid = reference_profile(42).unwrap();
    let origins = probe_origins(grid.dims(), 100, 7);
    let von_neumann = VonNeumann::new(&grid).unwrap();
    let moore = Moore::new(&grid).unwrap();
    let hex = Hex::new(&grid).unwrap();

    c.bench_function("neighbors_von_neumann_e3_x100", |b| {
        b.iter(|| {
            for o in &origins {
                black_box(von_neumann.neighbors(&grid, o, 3, false).unwrap().count());
            }
        });
    });

    c.bench_function("neighbors_moore_e3_x100", |b| {
        b.iter(|| {
            for o in &origins {
                black_box(moore.neighbors(&grid, o, 3, false).unwrap().count());
            }
        });
    });

    c.bench_function("neighbors_hex_e3_x100", |b| {
        b.iter(|| {
            for o in &origins {
                black_box(hex.neighbors(&grid, o, 3, false).unwrap().count());
            }
        });
    });
}

/// Benchmark: Find the first empty location near each origin, the typical
/// "where can I move" query.
fn bench_first_empty(c: &mut Criterion) {
    let grid = reference_profile(42).unwrap();
    let origins = probe_origins(grid.dims(), 100, 11);
    let moore = Moore::new(&grid).unwrap();

    c.bench_function("first_empty_moore_x100", |b| {
        b.iter(|| {
            for o in &origins {
                let first = moore
                    .empty_locations(&grid, o, u32::MAX, false)
                    .unwrap()
                    .next()
                    .map(|l| l.coord().clone());
                black_box(first);
            }
        });
    });
}

/// Benchmark: Walk a wide 3D Moore shell over a sparse store.
fn bench_moore3_sparse(c: &mut Criterion) {
    let grid = sparse_profile(42).unwrap();
    let moore = Moore::new(&grid).unwrap();

    c.bench_function("moore3_sparse_e5", |b| {
        b.iter(|| {
            let n = moore
                .occupied_locations(&grid, &[32, 32, 32], 5, true)
                .unwrap()
                .count();
            black_box(n);
        });
    });
}

/// Benchmark: Wrapped hex distance for 1000 deterministic pairs.
fn bench_hex_distance(c: &mut Criterion) {
    let grid = reference_profile(42).unwrap();
    let hex = Hex::new(&grid).unwrap();
    let a = probe_origins(grid.dims(), 1000, 1);
    let b = probe_origins(grid.dims(), 1000, 2);

    c.bench_function("hex_distance_1000", |bench| {
        bench.iter(|| {
            let mut total = 0.0;
            for (x, y) in a.iter().zip(&b) {
                total += hex.distance(x, y).unwrap();
            }
            black_box(total);
        });
    });
}

criterion_group!(
    benches,
    bench_neighbors_extent3,
    bench_first_empty,
    bench_moore3_sparse,
    bench_hex_distance
);
criterion_main!(benches);
