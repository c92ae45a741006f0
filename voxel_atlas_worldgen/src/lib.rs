// voxel_atlas_worldgen: procedural terrain and galaxy generation library.
//
// This crate builds hex/voxel terrain meshes from a height field and star
// galaxies linked by a k-nearest-neighbor jump graph, and routes across
// that graph with A*. It has no rendering, windowing or clock dependency:
// callers pull flat geometry buffers and events and draw them however they
// like.
//
// Module overview:
// - `terrain.rs`:     TerrainWorld: column layout, layer coloring, combined mesh, focus + minimap.
// - `height.rs`:      Sinusoidal height field sampled per column.
// - `prism_mesh.rs`:  MeshData buffers + hexagonal prism and cube synthesis.
// - `galaxy.rs`:      GalaxyState: star systems, current system, routes, highlights, geometry.
// - `graph.rs`:       KnnGraph + k-nearest-neighbor construction.
// - `pathfinding.rs`: A* over the graph, with an optional expansion budget.
// - `minimap.rs`:     Top-down projection around a focus point.
// - `command.rs`:     GalaxyCommand, all galaxy mutations from outside.
// - `event.rs`:       GalaxyEvent / StepResult / WarpOutcome.
// - `config.rs`:      WorldConfig, every tunable, with terrain presets.
// - `error.rs`:       ConfigError / WorldError.
// - `prng`:           Re-exported from `voxel_atlas_prng`, xoshiro256++ PRNG with SplitMix64 seeding.
// - `types.rs`:       Point3, Rgba, column coordinates, NodeId.
//
// The CLI crate `voxel_atlas_cli` drives this library from the command line.
//
// **Critical constraint: determinism.** Terrain is a pure function of its
// params; a galaxy is a pure function of `(seed, params)`, and
// `(state, commands) -> (new_state, events)` afterwards. All randomness
// comes from the seeded `WorldRng`. No `HashMap`, no system time, no OS
// entropy. Parallel work is collected in index order.

pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod galaxy;
pub mod graph;
pub mod height;
pub mod minimap;
pub mod pathfinding;
pub mod prism_mesh;
pub use voxel_atlas_prng as prng;
pub mod terrain;
pub mod types;
