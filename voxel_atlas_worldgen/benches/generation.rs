// Generation benchmarks: terrain mesh synthesis for both shapes, k-NN
// graph construction and A* over a full-size galaxy.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use voxel_atlas_worldgen::config::{TerrainParams, WorldConfig};
use voxel_atlas_worldgen::galaxy::GalaxyState;
use voxel_atlas_worldgen::graph::build_knn_graph;
use voxel_atlas_worldgen::pathfinding::find_path;
use voxel_atlas_worldgen::terrain::TerrainWorld;
use voxel_atlas_worldgen::types::NodeId;

fn terrain(c: &mut Criterion) {
    let hex = WorldConfig::default();
    let cube = WorldConfig {
        terrain: TerrainParams::cube_world(),
        ..WorldConfig::default()
    };
    c.bench_function("terrain_hex_r15", |b| {
        b.iter(|| TerrainWorld::generate(black_box(&hex)))
    });
    c.bench_function("terrain_cube_r15", |b| {
        b.iter(|| TerrainWorld::generate(black_box(&cube)))
    });
}

fn galaxy(c: &mut Criterion) {
    let mut config = WorldConfig::default();
    config.galaxy.system_count = 1000;
    config.galaxy.neighbor_count = 6;
    let state = match GalaxyState::generate(42, &config) {
        Ok(state) => state,
        Err(e) => panic!("bench config rejected: {e}"),
    };
    let positions: Vec<_> = state.systems().iter().map(|s| s.position).collect();

    c.bench_function("knn_1000_k6", |b| {
        b.iter(|| build_knn_graph(black_box(&positions), 6))
    });
    c.bench_function("astar_1000_all_targets", |b| {
        b.iter(|| {
            for t in 0..positions.len() as u32 {
                black_box(find_path(state.graph(), NodeId(0), NodeId(t)));
            }
        })
    });
}

criterion_group!(benches, terrain, galaxy);
criterion_main!(benches);
