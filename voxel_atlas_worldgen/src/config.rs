// Data-driven world configuration.
//
// Every tunable of terrain and galaxy generation lives in `WorldConfig`,
// loadable from JSON. Generation code never hard-codes sizes, seeds-derived
// ranges or colors; it reads them from here. `validate()` runs before any
// generation work so that a bad config is reported as a `ConfigError`
// instead of surfacing halfway through building a mesh or graph.
//
// Terrain parameters are grouped into `TerrainParams` with nested
// `HeightParams` and `TerrainPalette`. Two named presets reproduce the
// classic worlds: `TerrainParams::hex_world()` (hexagonal prisms) and
// `TerrainParams::cube_world()` (cubes).
//
// See also: `terrain.rs` and `galaxy.rs`, which consume these structs,
// `height.rs` for the column height formula driven by `HeightParams`.
//
// **Critical constraint: determinism.** Config values feed directly into
// generation; identical configs (and seeds) give identical worlds.

use crate::error::ConfigError;
use crate::types::Rgba;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

/// Prism shape used for terrain cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellShape {
    /// Hexagonal prisms on an axial grid.
    Hex,
    /// Axis-aligned cubes on a square grid.
    Cube,
}

/// Inputs of the sinusoidal height field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeightParams {
    /// Frequency applied to grid coordinates before `sin`/`cos`.
    pub scale: f32,
    /// Wave amplitude; also the vertical offset that keeps heights >= 0.
    pub amplitude: f32,
}

/// Top-layer color for columns shorter than `below_height` layers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiomeBand {
    pub below_height: u32,
    pub color: Rgba,
}

/// Layer coloring rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainPalette {
    /// Layer 0 of every column.
    pub bedrock: Rgba,
    /// Layers between bedrock and the top layer.
    pub soil: Rgba,
    /// Checked in order; the first band whose `below_height` exceeds the
    /// column height colors the top layer.
    pub biome_bands: Vec<BiomeBand>,
    /// Top-layer color for columns taller than every band.
    pub peak: Rgba,
}

impl TerrainPalette {
    /// Color of the top layer of a column `column_height` layers tall.
    pub fn top_color(&self, column_height: u32) -> Rgba {
        self.biome_bands
            .iter()
            .find(|band| column_height < band.below_height)
            .map(|band| band.color)
            .unwrap_or(self.peak)
    }

    /// Color of `layer` within a column. Bedrock wins over the biome color
    /// when a column is a single layer tall.
    pub fn layer_color(&self, layer: u32, column_height: u32) -> Rgba {
        if layer == 0 {
            self.bedrock
        } else if layer + 1 == column_height {
            self.top_color(column_height)
        } else {
            self.soil
        }
    }

    fn biome(water: u32, grass: u32, rock: u32, bedrock: Rgba) -> Self {
        Self {
            bedrock,
            soil: Rgba::new(0.4, 0.25, 0.05, 1.0),
            biome_bands: vec![
                BiomeBand {
                    below_height: water,
                    color: Rgba::new(0.1, 0.4, 0.9, 1.0),
                },
                BiomeBand {
                    below_height: grass,
                    color: Rgba::new(0.3, 0.8, 0.3, 1.0),
                },
                BiomeBand {
                    below_height: rock,
                    color: Rgba::new(0.6, 0.5, 0.4, 1.0),
                },
            ],
            peak: Rgba::WHITE,
        }
    }
}

/// Complete terrain generation profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainParams {
    pub shape: CellShape,
    /// Columns span `-world_radius..world_radius` on both grid axes. Hex
    /// grids also drop columns with `|q + r| > world_radius`.
    pub world_radius: i32,
    /// Hex circumradius, or cube edge length.
    pub cell_size: f32,
    /// Vertical extent of one hex layer. Cubes use `cell_size` instead.
    pub layer_height: f32,
    pub height: HeightParams,
    pub palette: TerrainPalette,
}

impl TerrainParams {
    /// Hexagonal world: gentle hills, water below 2 layers, snow from 8.
    pub fn hex_world() -> Self {
        Self {
            shape: CellShape::Hex,
            world_radius: 15,
            cell_size: 1.0,
            layer_height: 0.5,
            height: HeightParams {
                scale: 0.15,
                amplitude: 3.0,
            },
            palette: TerrainPalette::biome(2, 5, 8, Rgba::new(0.5, 0.3, 0.1, 1.0)),
        }
    }

    /// Cube world: taller relief, grey stone bedrock, snow from 12.
    pub fn cube_world() -> Self {
        Self {
            shape: CellShape::Cube,
            world_radius: 15,
            cell_size: 1.0,
            layer_height: 1.0,
            height: HeightParams {
                scale: 0.1,
                amplitude: 5.0,
            },
            palette: TerrainPalette::biome(3, 7, 12, Rgba::new(0.5, 0.5, 0.5, 1.0)),
        }
    }

    /// Height of one layer for this shape.
    pub fn layer_step(&self) -> f32 {
        match self.shape {
            CellShape::Hex => self.layer_height,
            CellShape::Cube => self.cell_size,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world_radius < 0 {
            return Err(ConfigError::NegativeRadius(self.world_radius));
        }
        require_positive("terrain.cell_size", self.cell_size)?;
        require_positive("terrain.layer_height", self.layer_height)?;
        require_positive("terrain.height.scale", self.height.scale)?;
        require_non_negative("terrain.height.amplitude", self.height.amplitude)?;
        let sorted = self
            .palette
            .biome_bands
            .windows(2)
            .all(|w| w[0].below_height < w[1].below_height);
        if !sorted {
            return Err(ConfigError::UnsortedBiomeBands);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Galaxy
// ---------------------------------------------------------------------------

/// How k-NN neighbor lists become search arcs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteMode {
    /// Each system can jump only to its own k nearest systems.
    Directed,
    /// Every k-NN relation can be travelled in both directions.
    Symmetric,
}

/// Star system layout and connectivity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalaxyParams {
    pub system_count: usize,
    /// X and Y are drawn uniformly from `[-extent, extent)`.
    pub extent: f32,
    /// Z is drawn from `[-extent * ratio, extent * ratio)`, flattening the
    /// galaxy into a disc.
    pub thickness_ratio: f32,
    /// k in the k-nearest-neighbor graph.
    pub neighbor_count: usize,
    pub route_mode: RouteMode,
    /// Display names are `"{prefix}-{id:03}"`.
    pub name_prefix: String,
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            system_count: 100,
            extent: 500.0,
            thickness_ratio: 1.0 / 3.0,
            neighbor_count: 3,
            route_mode: RouteMode::Directed,
            name_prefix: "System".to_string(),
        }
    }
}

impl GalaxyParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.system_count == 0 {
            return Err(ConfigError::NoSystems);
        }
        if self.neighbor_count == 0 {
            return Err(ConfigError::ZeroNeighbors);
        }
        // A single-system galaxy has no neighbors to connect, whatever k is.
        if self.system_count > 1 && self.neighbor_count >= self.system_count {
            return Err(ConfigError::TooManyNeighbors {
                k: self.neighbor_count,
                system_count: self.system_count,
            });
        }
        require_positive("galaxy.extent", self.extent)?;
        if !(self.thickness_ratio > 0.0 && self.thickness_ratio <= 1.0) {
            return Err(ConfigError::ThicknessOutOfRange(self.thickness_ratio));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Minimap
// ---------------------------------------------------------------------------

/// World-to-map scale factors. The visible map window is the open unit
/// square, centred (0.5, 0.5) on the focus.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinimapParams {
    pub galaxy_scale: f32,
    pub terrain_scale: f32,
}

impl Default for MinimapParams {
    fn default() -> Self {
        Self {
            galaxy_scale: 0.001,
            terrain_scale: 0.02,
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level configuration. Loaded once, never mutated by generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub terrain: TerrainParams,
    pub galaxy: GalaxyParams,
    pub minimap: MinimapParams,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            terrain: TerrainParams::hex_world(),
            galaxy: GalaxyParams::default(),
            minimap: MinimapParams::default(),
        }
    }
}

impl WorldConfig {
    /// Check every section. Called by the generators; callers may run it
    /// earlier to fail fast.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.terrain.validate()?;
        self.galaxy.validate()?;
        require_positive("minimap.galaxy_scale", self.minimap.galaxy_scale)?;
        require_positive("minimap.terrain_scale", self.minimap.terrain_scale)?;
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
