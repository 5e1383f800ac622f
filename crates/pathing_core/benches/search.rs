//! Search benchmarks for pathing_core.
//!
//! Run with: `cargo bench -p pathing_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pathing_core::prelude::*;

/// Deterministic rolling terrain quantized into five tiers.
fn rolling_terrain(extent: u32) -> TierMap {
    let heights: Vec<f32> = (0..extent * extent)
        .map(|i| {
            let (x, y) = ((i % extent) as f32, (i / extent) as f32);
            (x * 0.15).sin() + (y * 0.11).cos()
        })
        .collect();
    TierMap::from_heights(extent, &heights, 5).expect("heights sized to extent")
}

/// Runs search benchmarks on a 100x100 grid.
pub fn search_benchmark(c: &mut Criterion) {
    let flat = SearchEngine::new(SquareGrid::default(), TierMap::uniform(100, 0));
    let rolling = SearchEngine::new(SquareGrid::default(), rolling_terrain(100));
    let origin = GridCoord::new(2, 3);
    let goal = GridCoord::new(96, 91);

    c.bench_function("search_flat_100", |b| {
        b.iter(|| flat.search(black_box(origin), black_box(goal), false))
    });
    c.bench_function("search_rolling_100", |b| {
        b.iter(|| rolling.search(black_box(origin), black_box(goal), false))
    });
    c.bench_function("search_rolling_100_diagnostics", |b| {
        b.iter(|| rolling.search(black_box(origin), black_box(goal), true))
    });
}

criterion_group!(benches, search_benchmark);
criterion_main!(benches);
