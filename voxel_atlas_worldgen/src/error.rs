// Error types for configuration and world queries.
//
// `ConfigError` is returned before any generation work starts (see
// `WorldConfig::validate`). `WorldError` covers misuse of an already
// generated world, such as warping to an index that does not exist.
// An unreachable path is deliberately not an error: the pathfinder reports
// it through `PathResult::is_reachable()`.

use thiserror::Error;

/// A configuration value that cannot produce a valid world.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be a finite non-negative number, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("world_radius must be non-negative, got {0}")]
    NegativeRadius(i32),

    #[error("galaxy must contain at least one system")]
    NoSystems,

    #[error("neighbor_count must be at least 1")]
    ZeroNeighbors,

    #[error("neighbor_count {k} must be smaller than system_count {system_count}")]
    TooManyNeighbors { k: usize, system_count: usize },

    #[error("thickness_ratio must be in (0, 1], got {0}")]
    ThicknessOutOfRange(f32),

    #[error("biome bands must be sorted by strictly increasing height")]
    UnsortedBiomeBands,
}

/// A request that does not fit the generated world.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("system index {index} out of range (galaxy has {count} systems)")]
    SystemOutOfRange { index: usize, count: usize },

    #[error("column index {index} out of range (terrain has {count} columns)")]
    ColumnOutOfRange { index: usize, count: usize },
}
