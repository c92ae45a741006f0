// Terrain world: columns, cells and the combined terrain mesh.
//
// `TerrainWorld::generate()` lays columns out on a hex (axial) or square
// grid of radius `world_radius`, samples the height field once per column,
// stacks that many cells, colors each layer from the palette and
// synthesizes one prism per cell. Prisms are built in parallel and
// concatenated in cell order, so the mesh is identical to a sequential
// build.
//
// Column order is fixed: outer loop over q (or x) from -R to R-1, inner
// loop over r (or y). Hex grids skip columns with |q + r| > R. Cells follow
// column order, bottom layer first.
//
// The world also keeps a focus column (initially the origin, if present)
// that `warp_to` moves and the minimap centres on.
//
// See also: `height.rs`, `prism_mesh.rs`, `config.rs` for `TerrainParams`.
//
// **Critical constraint: determinism.** Generation is a pure function of
// `TerrainParams`.

use crate::config::{CellShape, TerrainParams, WorldConfig};
use crate::error::{ConfigError, WorldError};
use crate::event::WarpOutcome;
use crate::height::HeightField;
use crate::minimap::{self, Minimap};
use crate::prism_mesh::{self, MeshData};
use crate::types::{ColumnCoord, GridCoord, HexCoord, Point3, Rgba};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One grid column and its stacked layer count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub coord: ColumnCoord,
    pub height: u32,
}

/// One solid terrain cell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub column: ColumnCoord,
    pub layer: u32,
    pub color: Rgba,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TerrainWorld {
    params: TerrainParams,
    minimap_scale: f32,
    columns: Vec<Column>,
    column_index: BTreeMap<ColumnCoord, usize>,
    cells: Vec<Cell>,
    mesh: MeshData,
    focus: Option<usize>,
}

impl TerrainWorld {
    /// Validate `config` and build the terrain it describes.
    pub fn generate(config: &WorldConfig) -> Result<Self, ConfigError> {
        config.terrain.validate()?;
        let params = config.terrain.clone();
        let columns = layout_columns(&params);
        let column_index: BTreeMap<ColumnCoord, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.coord, i))
            .collect();

        let cells: Vec<Cell> = columns
            .iter()
            .flat_map(|col| {
                let palette = &params.palette;
                (0..col.height).map(move |layer| Cell {
                    column: col.coord,
                    layer,
                    color: palette.layer_color(layer, col.height),
                })
            })
            .collect();

        let prisms: Vec<MeshData> = cells
            .par_iter()
            .map(|cell| cell_prism(&params, cell))
            .collect();
        let mut mesh = MeshData::default();
        for prism in &prisms {
            mesh.append(prism);
        }

        let focus = match params.shape {
            CellShape::Hex => column_index.get(&ColumnCoord::Hex(HexCoord::new(0, 0))),
            CellShape::Cube => column_index.get(&ColumnCoord::Square(GridCoord::new(0, 0))),
        }
        .copied()
        .or(if columns.is_empty() { None } else { Some(0) });

        log::info!(
            "terrain generated: shape={:?} columns={} cells={} triangles={}",
            params.shape,
            columns.len(),
            cells.len(),
            mesh.triangle_count()
        );

        Ok(Self {
            params,
            minimap_scale: config.minimap.terrain_scale,
            columns,
            column_index,
            cells,
            mesh,
            focus,
        })
    }

    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    /// Layer count of the column at `coord`, or `None` outside the grid.
    pub fn column_height(&self, coord: ColumnCoord) -> Option<u32> {
        self.column_index
            .get(&coord)
            .map(|&i| self.columns[i].height)
    }

    /// World-space centre of `cell`.
    pub fn cell_center(&self, cell: &Cell) -> Point3 {
        prism_mesh::cell_center(
            cell.column,
            cell.layer,
            self.params.cell_size,
            self.params.layer_step(),
        )
    }

    /// World-space point at the top surface of the column.
    pub fn column_top(&self, column: &Column) -> Point3 {
        let base = prism_mesh::cell_center(
            column.coord,
            0,
            self.params.cell_size,
            self.params.layer_step(),
        );
        let step = self.params.layer_step();
        let bottom = match column.coord {
            ColumnCoord::Hex(_) => 0.0,
            ColumnCoord::Square(_) => -step / 2.0,
        };
        Point3::new(base.x, base.y, bottom + column.height as f32 * step)
    }

    pub fn focus(&self) -> Option<&Column> {
        self.focus.map(|i| &self.columns[i])
    }

    pub fn focus_index(&self) -> Option<usize> {
        self.focus
    }

    /// Move the focus to column `index`.
    pub fn warp_to(&mut self, index: usize) -> Result<WarpOutcome, WorldError> {
        let count = self.columns.len();
        if index >= count {
            return Err(WorldError::ColumnOutOfRange { index, count });
        }
        match self.focus {
            Some(current) if current == index => Ok(WarpOutcome::AlreadyThere(index)),
            previous => {
                self.focus = Some(index);
                log::debug!("terrain focus -> {}", self.columns[index].coord);
                Ok(WarpOutcome::Warped {
                    from: previous.unwrap_or(index),
                    to: index,
                })
            }
        }
    }

    /// Top-down map of column tops around the focus. Markers use the
    /// column's top color at half alpha; the focus is yellow.
    pub fn minimap(&self) -> Minimap {
        let Some(focus) = self.focus() else {
            return Minimap::default();
        };
        let focus_pos = self.column_top(focus);
        let tops: Vec<Point3> = self.columns.iter().map(|c| self.column_top(c)).collect();
        let focus_index = self.focus;
        minimap::build_minimap(
            &tops,
            focus_pos,
            self.minimap_scale,
            |i| {
                if Some(i) == focus_index {
                    Rgba::YELLOW
                } else {
                    self.params
                        .palette
                        .top_color(self.columns[i].height)
                        .with_alpha(minimap::BACKGROUND_ALPHA)
                }
            },
            std::iter::empty(),
        )
    }
}

/// Columns in generation order with their sampled heights.
fn layout_columns(params: &TerrainParams) -> Vec<Column> {
    let field = HeightField::new(&params.height);
    let radius = params.world_radius;
    let mut columns = Vec::new();
    for a in -radius..radius {
        for b in -radius..radius {
            let coord = match params.shape {
                CellShape::Hex => {
                    if (a + b).abs() > radius {
                        continue;
                    }
                    ColumnCoord::Hex(HexCoord::new(a, b))
                }
                CellShape::Cube => ColumnCoord::Square(GridCoord::new(a, b)),
            };
            columns.push(Column {
                coord,
                height: field.sample(a, b),
            });
        }
    }
    columns
}

fn cell_prism(params: &TerrainParams, cell: &Cell) -> MeshData {
    let mut mesh = MeshData::default();
    match cell.column {
        ColumnCoord::Hex(hex) => prism_mesh::push_hex_prism(
            &mut mesh,
            hex,
            cell.layer,
            params.cell_size,
            params.layer_height,
            cell.color,
        ),
        ColumnCoord::Square(grid) => {
            prism_mesh::push_cube(&mut mesh, grid, cell.layer, params.cell_size, cell.color)
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::height::column_height;

    fn small(shape: CellShape, radius: i32) -> WorldConfig {
        let mut config = WorldConfig::default();
        config.terrain = match shape {
            CellShape::Hex => TerrainParams::hex_world(),
            CellShape::Cube => TerrainParams::cube_world(),
        };
        config.terrain.world_radius = radius;
        config
    }

    #[test]
    fn hex_layout_skips_far_corners() {
        let world = TerrainWorld::generate(&small(CellShape::Hex, 3)).unwrap();
        for col in world.columns() {
            let (q, r) = col.coord.components();
            assert!((-3..3).contains(&q) && (-3..3).contains(&r));
            assert!((q + r).abs() <= 3);
        }
        // 36 slots minus 6 with q + r < -3 and one, (2, 2), with q + r > 3.
        // The exclusive upper bound makes the trimming lopsided.
        assert_eq!(world.columns().len(), 29);
    }

    #[test]
    fn cube_layout_is_full_square() {
        let world = TerrainWorld::generate(&small(CellShape::Cube, 4)).unwrap();
        assert_eq!(world.columns().len(), 64);
        assert_eq!(world.mesh().triangle_count(), world.cells().len() * 12);
    }

    #[test]
    fn cells_match_column_heights() {
        let world = TerrainWorld::generate(&small(CellShape::Hex, 5)).unwrap();
        let total: u32 = world.columns().iter().map(|c| c.height).sum();
        assert_eq!(world.cells().len(), total as usize);
        assert_eq!(world.mesh().triangle_count(), world.cells().len() * 24);
        let h = world.column_height(ColumnCoord::Hex(HexCoord::new(2, -1)));
        assert_eq!(h, Some(column_height(2, -1, 0.15, 3.0)));
        assert_eq!(world.column_height(ColumnCoord::Hex(HexCoord::new(9, 9))), None);
    }

    #[test]
    fn layers_are_colored_by_position() {
        let world = TerrainWorld::generate(&small(CellShape::Hex, 4)).unwrap();
        let palette = &world.params().palette;
        for cell in world.cells() {
            if cell.layer == 0 {
                assert_eq!(cell.color, palette.bedrock);
            }
        }
        let origin = ColumnCoord::Hex(HexCoord::new(0, 0));
        let height = world.column_height(origin).unwrap();
        let top = world
            .cells()
            .iter()
            .find(|c| c.column == origin && c.layer + 1 == height)
            .unwrap();
        assert_eq!(top.color, palette.top_color(height));
    }

    #[test]
    fn zero_radius_is_empty() {
        let world = TerrainWorld::generate(&small(CellShape::Cube, 0)).unwrap();
        assert!(world.columns().is_empty());
        assert!(world.mesh().is_empty());
        assert!(world.focus().is_none());
        assert!(world.minimap().points.is_empty());
    }

    #[test]
    fn invalid_terrain_is_rejected() {
        let mut config = small(CellShape::Hex, 3);
        config.terrain.cell_size = -1.0;
        assert!(TerrainWorld::generate(&config).is_err());
    }

    #[test]
    fn warp_moves_focus_and_minimap() {
        let mut world = TerrainWorld::generate(&small(CellShape::Hex, 4)).unwrap();
        let start = world.focus_index().unwrap();
        assert_eq!(
            world.focus().unwrap().coord,
            ColumnCoord::Hex(HexCoord::new(0, 0))
        );
        assert_eq!(world.warp_to(start), Ok(WarpOutcome::AlreadyThere(start)));
        assert_eq!(
            world.warp_to(1),
            Ok(WarpOutcome::Warped { from: start, to: 1 })
        );
        let map = world.minimap();
        let centre = map.points.iter().find(|p| p.source == 1).unwrap();
        assert_eq!(centre.position, [0.5, 0.5]);
        assert_eq!(centre.color, Rgba::YELLOW);

        let count = world.columns().len();
        assert_eq!(
            world.warp_to(count),
            Err(WorldError::ColumnOutOfRange { index: count, count })
        );
    }
}
