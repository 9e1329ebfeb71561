//! Pathfinding and movement-range throughput benchmarks.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use greyspire::battle::{
    find_path, reachable_tiles, ClassKind, CombatMap, CombatUnit, GridPos, Terrain, UnitManifest,
    UnitRoster, UnitStats,
};

/// Open arena with a few scattered wall segments
fn arena(width: u32, height: u32) -> CombatMap {
    let mut map = CombatMap::new(width, height).with_border_walls();
    for y in 2..height as i32 - 2 {
        if y % 4 != 0 {
            map.set_terrain(GridPos::new(width as i32 / 2, y), Terrain::Wall);
        }
    }
    map
}

fn bench_find_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_path");
    for size in [10u32, 20, 30] {
        let map = arena(size, size);
        let start = GridPos::new(1, 1);
        let end = GridPos::new(size as i32 - 2, size as i32 - 2);

        group.bench_with_input(BenchmarkId::from_parameter(size), &map, |b, map| {
            b.iter(|| find_path(black_box(map), black_box(start), black_box(end), 200));
        });
    }
    group.finish();
}

fn bench_reachable_tiles(c: &mut Criterion) {
    let map = arena(30, 20);
    let mut manifest = UnitManifest::new();
    let mut roster = UnitRoster::new();

    let mover = {
        let unit = CombatUnit::new("mover", ClassKind::Squire, UnitStats::default())
            .player_controlled();
        let id = roster.insert(unit);
        manifest.add_unit(id, GridPos::new(3, 10)).unwrap();
        id
    };

    // A crowd of allies and enemies to exercise the occupancy rules
    for i in 0..16 {
        let mut unit = CombatUnit::new("other", ClassKind::Squire, UnitStats::default());
        unit.is_player_controlled = i % 2 == 0;
        let id = roster.insert(unit);
        manifest
            .add_unit(id, GridPos::new(4 + (i % 8), 8 + i / 8))
            .unwrap();
    }

    let mut group = c.benchmark_group("reachable_tiles");
    for movement in [3i32, 6, 10] {
        group.bench_with_input(
            BenchmarkId::from_parameter(movement),
            &movement,
            |b, &movement| {
                b.iter(|| {
                    reachable_tiles(
                        black_box(&map),
                        black_box(&manifest),
                        black_box(&roster),
                        mover,
                        movement,
                    )
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_find_path, bench_reachable_tiles);
criterion_main!(benches);
