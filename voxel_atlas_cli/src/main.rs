// voxel-atlas: command-line front end for the world generators.
//
// Subcommands:
// - `terrain`: build a hex or cube terrain, print a summary, optionally
//   dump the mesh buffers as JSON.
// - `galaxy`:  generate a galaxy from a seed, run a scripted sequence of
//   warps and a route request through `GalaxyState::step()`, then print
//   the HUD status (or a JSON report).
// - `config`:  print the default `WorldConfig` as JSON, a starting point
//   for `--config` files.
//
// Logging goes through `env_logger`, defaulting to `info`; set `RUST_LOG`
// to change it.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use voxel_atlas_worldgen::command::GalaxyCommand;
use voxel_atlas_worldgen::config::{CellShape, RouteMode, TerrainParams, WorldConfig};
use voxel_atlas_worldgen::galaxy::GalaxyState;
use voxel_atlas_worldgen::terrain::TerrainWorld;

#[derive(Parser)]
#[command(name = "voxel-atlas", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate terrain and print a summary
    Terrain(TerrainArgs),
    /// Generate a galaxy and run scripted warps and route requests
    Galaxy(GalaxyArgs),
    /// Print the default configuration as JSON
    Config {
        /// Terrain preset to embed
        #[arg(long, value_enum, default_value_t = Shape::Hex)]
        shape: Shape,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Shape {
    Hex,
    Cube,
}

impl Shape {
    fn preset(self) -> TerrainParams {
        match self {
            Shape::Hex => TerrainParams::hex_world(),
            Shape::Cube => TerrainParams::cube_world(),
        }
    }

    fn cell_shape(self) -> CellShape {
        match self {
            Shape::Hex => CellShape::Hex,
            Shape::Cube => CellShape::Cube,
        }
    }
}

#[derive(Args)]
struct TerrainArgs {
    /// Terrain preset (or shape override when --config is given)
    #[arg(short, long, value_enum)]
    shape: Option<Shape>,

    /// Grid radius in columns
    #[arg(short, long)]
    radius: Option<i32>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the mesh buffers to this file as JSON
    #[arg(long)]
    mesh_json: Option<PathBuf>,
}

#[derive(Args)]
struct GalaxyArgs {
    /// PRNG seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Number of star systems
    #[arg(long)]
    systems: Option<usize>,

    /// Neighbors per system (k)
    #[arg(short = 'k', long)]
    neighbors: Option<usize>,

    /// Let every connection be travelled both ways
    #[arg(long)]
    symmetric: bool,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Warp to this system; repeat for several warps
    #[arg(short, long)]
    warp: Vec<usize>,

    /// Random warps to make after the scripted ones
    #[arg(long, default_value_t = 0)]
    random_hops: usize,

    /// Search a route from the final system to this one
    #[arg(short, long)]
    route_to: Option<usize>,

    /// Print a JSON report instead of the HUD text
    #[arg(long)]
    json: bool,
}

fn load_config(path: Option<&Path>) -> Result<WorldConfig> {
    let Some(path) = path else {
        return Ok(WorldConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    WorldConfig::from_json_str(&text)
        .with_context(|| format!("invalid config {}", path.display()))
}

fn run_terrain(args: &TerrainArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    match (args.shape, args.config.is_some()) {
        (Some(shape), true) => config.terrain.shape = shape.cell_shape(),
        (Some(shape), false) => config.terrain = shape.preset(),
        (None, _) => {}
    }
    if let Some(radius) = args.radius {
        config.terrain.world_radius = radius;
    }

    let world = TerrainWorld::generate(&config)?;
    let mesh = world.mesh();
    let tallest = world.columns().iter().map(|c| c.height).max().unwrap_or(0);
    println!("shape:     {:?}", world.params().shape);
    println!("columns:   {}", world.columns().len());
    println!("cells:     {}", world.cells().len());
    println!("vertices:  {}", mesh.vertex_count());
    println!("triangles: {}", mesh.triangle_count());
    println!("tallest:   {tallest} layers");
    if let Some(focus) = world.focus() {
        println!("focus:     {} ({} layers)", focus.coord, focus.height);
    }

    if let Some(path) = &args.mesh_json {
        let json = serde_json::to_string(mesh)?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("mesh written to {}", path.display());
    }
    Ok(())
}

fn run_galaxy(args: &GalaxyArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(systems) = args.systems {
        config.galaxy.system_count = systems;
    }
    if let Some(k) = args.neighbors {
        config.galaxy.neighbor_count = k;
    }
    if args.symmetric {
        config.galaxy.route_mode = RouteMode::Symmetric;
    }

    let mut state = GalaxyState::generate(args.seed, &config)?;

    let mut script: Vec<GalaxyCommand> =
        args.warp.iter().map(|&i| GalaxyCommand::WarpTo(i)).collect();
    script.extend(std::iter::repeat_n(GalaxyCommand::WarpRandom, args.random_hops));
    if let Some(target) = args.route_to {
        script.push(GalaxyCommand::RequestPath(target));
    }
    let result = state.step(&script);
    for event in &result.events {
        log::info!("{event:?}");
    }

    if args.json {
        let report = serde_json::json!({
            "seed": args.seed,
            "status": state.status(),
            "events": result.events,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", state.status());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match &cli.command {
        Command::Terrain(args) => run_terrain(args),
        Command::Galaxy(args) => run_galaxy(args),
        Command::Config { shape } => {
            let config = WorldConfig {
                terrain: shape.preset(),
                ..WorldConfig::default()
            };
            println!("{}", config.to_json_pretty()?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn galaxy_flags_parse() {
        let cli = Cli::parse_from([
            "voxel-atlas", "galaxy", "--seed", "7", "-w", "3", "-w", "9", "--route-to", "12",
            "--random-hops", "2",
        ]);
        let Command::Galaxy(args) = cli.command else {
            panic!("expected galaxy subcommand");
        };
        assert_eq!(args.seed, 7);
        assert_eq!(args.warp, vec![3, 9]);
        assert_eq!(args.route_to, Some(12));
        assert_eq!(args.random_hops, 2);
    }

    #[test]
    fn missing_config_file_is_reported() {
        let err = load_config(Some(Path::new("/nonexistent/world.json"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
