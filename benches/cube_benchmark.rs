//! Performance benchmarks for cube building
//!
//! Measures building a cube from `test_inventories/base_set.csv` using
//! Criterion.rs. The inventory is loaded once and cloned per iteration, so
//! file I/O is not part of the measurement.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cube_forge::{
    core::Inventory,
    cube::{build_cube, BuildConfig, CubeBuilder},
    export::{aggregate, pack_rows},
    loader::InventoryLoader,
    Result,
};
use std::path::PathBuf;

fn load_inventory() -> Result<Inventory> {
    let path = PathBuf::from("test_inventories/base_set.csv");
    Ok(InventoryLoader::load_from_file(&path)?.into_inventory())
}

/// Benchmark: full build for 1 to 3 players
fn bench_build(c: &mut Criterion) {
    let inventory = match load_inventory() {
        Ok(inventory) => inventory,
        Err(e) => {
            eprintln!("Skipping benchmark - failed to load inventory: {e}");
            return;
        }
    };

    let seed = 42u64;
    if let Ok(build) = build_cube(inventory.clone(), 2, seed) {
        println!("\nWarmup build (seed {seed}, 2 players):");
        println!("  Packs: {}", build.packs.len());
        println!("  Cube: {}/{} cards", build.cube.len(), build.target_size);
        println!("  Remaining: {}", build.remaining.len());
    }

    let mut group = c.benchmark_group("cube_build");
    for players in 1..=3usize {
        let config = match BuildConfig::new(players) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Skipping {players} player(s): {e}");
                continue;
            }
        };
        group.bench_with_input(BenchmarkId::new("players", players), &config, |b, config| {
            b.iter(|| {
                let mut builder =
                    CubeBuilder::with_seed(config.clone(), black_box(seed)).expect("valid config");
                builder.build(inventory.clone())
            });
        });
    }
    group.finish();
}

/// Benchmark: aggregating a finished build into output rows
fn bench_aggregate(c: &mut Criterion) {
    let build = match load_inventory().and_then(|inventory| build_cube(inventory, 2, 42)) {
        Ok(build) => build,
        Err(e) => {
            eprintln!("Skipping benchmark - failed to build cube: {e}");
            return;
        }
    };

    let mut group = c.benchmark_group("cube_export");
    group.bench_function("aggregate_remaining", |b| {
        b.iter(|| aggregate(black_box(&build.remaining)))
    });
    group.bench_function("pack_rows", |b| b.iter(|| pack_rows(black_box(&build.packs))));
    group.finish();
}

criterion_group!(benches, bench_build, bench_aggregate);
criterion_main!(benches);
