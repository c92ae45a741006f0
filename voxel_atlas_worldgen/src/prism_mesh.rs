// Prism mesh synthesis for terrain cells.
//
// Turns one terrain cell (column coordinate, layer index, color) into a
// closed solid: a hexagonal prism for hex columns, a cube for square
// columns. Output goes into `MeshData`, flat vertex/normal/color/index
// buffers ready to hand to a renderer without reshaping.
//
// Hexagonal prisms (flat top, circumradius `size`):
//   top fan:    6 triangles around a shared centre vertex, normal +Z
//   bottom fan: 6 triangles, mirrored winding, normal -Z, color x 0.8
//   side quads: 6 quads of 2 triangles, normal = side midpoint minus
//               prism centre, normalised; color x 0.9
// Cubes use a static face table; each face has 4 unique vertices so its
// normal stays flat, split along the 0-2 diagonal.
//
// Every triangle is wound counter-clockwise seen from outside, so the
// geometric normal agrees with the stored one.
//
// See also: `terrain.rs`, which lays cells out on the grid and concatenates
// their prisms, `types.rs` for `Point3` and `Rgba`.

use crate::types::{ColumnCoord, GridCoord, HexCoord, Point3, Rgba};
use serde::{Deserialize, Serialize};

const SQRT_3: f32 = 1.732_050_8;

/// Bottom fan shade factor.
pub const BOTTOM_SHADE: f32 = 0.8;
/// Side quad shade factor.
pub const SIDE_SHADE: f32 = 0.9;

/// Triangle mesh as flat buffers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    /// Vertex positions as flat [x, y, z, x, y, z, ...].
    pub vertices: Vec<f32>,
    /// Per-vertex normals as flat [nx, ny, nz, ...].
    pub normals: Vec<f32>,
    /// Per-vertex colors as flat [r, g, b, a, ...].
    pub colors: Vec<f32>,
    /// Triangle indices (3 per triangle).
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Append a vertex and return its index.
    pub fn push_vertex(&mut self, position: Point3, normal: Point3, color: Rgba) -> u32 {
        let index = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&position.to_array());
        self.normals.extend_from_slice(&normal.to_array());
        self.colors.extend_from_slice(&color.to_array());
        index
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Append `other`, offsetting its indices past the existing vertices.
    pub fn append(&mut self, other: &MeshData) {
        let offset = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.colors.extend_from_slice(&other.colors);
        self.indices.extend(other.indices.iter().map(|i| i + offset));
    }

    pub fn position(&self, vertex: u32) -> Point3 {
        let i = vertex as usize * 3;
        Point3::new(self.vertices[i], self.vertices[i + 1], self.vertices[i + 2])
    }

    pub fn normal(&self, vertex: u32) -> Point3 {
        let i = vertex as usize * 3;
        Point3::new(self.normals[i], self.normals[i + 1], self.normals[i + 2])
    }

    pub fn color(&self, vertex: u32) -> Rgba {
        let i = vertex as usize * 4;
        Rgba::new(
            self.colors[i],
            self.colors[i + 1],
            self.colors[i + 2],
            self.colors[i + 3],
        )
    }

    /// Vertex index triples, one per triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Push a planar quad (corners CCW from outside) as two triangles
    /// sharing one flat normal and color.
    fn push_quad(&mut self, corners: [Point3; 4], normal: Point3, color: Rgba) {
        let i0 = self.push_vertex(corners[0], normal, color);
        let i1 = self.push_vertex(corners[1], normal, color);
        let i2 = self.push_vertex(corners[2], normal, color);
        let i3 = self.push_vertex(corners[3], normal, color);
        self.push_triangle(i0, i1, i2);
        self.push_triangle(i0, i2, i3);
    }
}

// ---------------------------------------------------------------------------
// Cell placement
// ---------------------------------------------------------------------------

/// Horizontal centre of a hex column (axial to cartesian, flat top).
pub fn hex_to_world(coord: HexCoord, size: f32) -> (f32, f32) {
    let q = coord.q as f32;
    let r = coord.r as f32;
    (size * (SQRT_3 * q + SQRT_3 / 2.0 * r), size * 1.5 * r)
}

/// Volumetric centre of the cell at `layer` of `column`.
///
/// Hex layers span `[layer * layer_height, (layer + 1) * layer_height]`.
/// Cubes are centred on `(x, y, layer) * size`.
pub fn cell_center(column: ColumnCoord, layer: u32, size: f32, layer_height: f32) -> Point3 {
    match column {
        ColumnCoord::Hex(hex) => {
            let (x, y) = hex_to_world(hex, size);
            Point3::new(x, y, (layer as f32 + 0.5) * layer_height)
        }
        ColumnCoord::Square(grid) => Point3::new(
            grid.x as f32 * size,
            grid.y as f32 * size,
            layer as f32 * size,
        ),
    }
}

// ---------------------------------------------------------------------------
// Hexagonal prism
// ---------------------------------------------------------------------------

/// Corner `i` of a flat-top hexagon around `(cx, cy)` at height `z`.
fn hex_corner(cx: f32, cy: f32, size: f32, z: f32, i: usize) -> Point3 {
    let angle = (60.0 * i as f32 + 30.0).to_radians();
    Point3::new(cx + size * angle.cos(), cy + size * angle.sin(), z)
}

/// Append the hexagonal prism for `layer` of `coord` to `mesh`.
pub fn push_hex_prism(
    mesh: &mut MeshData,
    coord: HexCoord,
    layer: u32,
    size: f32,
    layer_height: f32,
    color: Rgba,
) {
    let (cx, cy) = hex_to_world(coord, size);
    let base_z = layer as f32 * layer_height;
    let top_z = base_z + layer_height;
    let center = Point3::new(cx, cy, base_z + layer_height / 2.0);

    let top: [Point3; 6] = std::array::from_fn(|i| hex_corner(cx, cy, size, top_z, i));
    let bottom: [Point3; 6] = std::array::from_fn(|i| hex_corner(cx, cy, size, base_z, i));

    // Top fan.
    let up = Point3::UNIT_Z;
    let hub = mesh.push_vertex(Point3::new(cx, cy, top_z), up, color);
    let rim: [u32; 6] = std::array::from_fn(|i| mesh.push_vertex(top[i], up, color));
    for i in 0..6 {
        mesh.push_triangle(hub, rim[i], rim[(i + 1) % 6]);
    }

    // Bottom fan, mirrored.
    let down = Point3::new(0.0, 0.0, -1.0);
    let shade = color.shade(BOTTOM_SHADE);
    let hub = mesh.push_vertex(Point3::new(cx, cy, base_z), down, shade);
    let rim: [u32; 6] = std::array::from_fn(|i| mesh.push_vertex(bottom[i], down, shade));
    for i in 0..6 {
        mesh.push_triangle(hub, rim[(i + 1) % 6], rim[i]);
    }

    // Sides.
    let shade = color.shade(SIDE_SHADE);
    for i in 0..6 {
        let j = (i + 1) % 6;
        let quad = [bottom[i], bottom[j], top[j], top[i]];
        let midpoint = (quad[0] + quad[1] + quad[2] + quad[3]) * 0.25;
        let normal = (midpoint - center).normalized_or(Point3::UNIT_X);
        mesh.push_quad(quad, normal, shade);
    }
}

// ---------------------------------------------------------------------------
// Cube
// ---------------------------------------------------------------------------

/// Unit cube corners as sign triples:
/// 0(-,-,-) 1(+,-,-) 2(+,+,-) 3(-,+,-) 4(-,-,+) 5(+,-,+) 6(+,+,+) 7(-,+,+).
const CUBE_CORNERS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// A cube face: outward normal and 4 corner indices, CCW from outside.
struct CubeFace {
    normal: [f32; 3],
    corners: [usize; 4],
}

const CUBE_FACES: [CubeFace; 6] = [
    // Top (+Z)
    CubeFace {
        normal: [0.0, 0.0, 1.0],
        corners: [4, 5, 6, 7],
    },
    // Bottom (-Z)
    CubeFace {
        normal: [0.0, 0.0, -1.0],
        corners: [0, 3, 2, 1],
    },
    // Front (-Y)
    CubeFace {
        normal: [0.0, -1.0, 0.0],
        corners: [0, 1, 5, 4],
    },
    // Back (+Y)
    CubeFace {
        normal: [0.0, 1.0, 0.0],
        corners: [3, 7, 6, 2],
    },
    // Left (-X)
    CubeFace {
        normal: [-1.0, 0.0, 0.0],
        corners: [0, 4, 7, 3],
    },
    // Right (+X)
    CubeFace {
        normal: [1.0, 0.0, 0.0],
        corners: [1, 2, 6, 5],
    },
];

/// Append the cube for `layer` of `coord` to `mesh`. Edge length `size`.
pub fn push_cube(mesh: &mut MeshData, coord: GridCoord, layer: u32, size: f32, color: Rgba) {
    let center = cell_center(ColumnCoord::Square(coord), layer, size, size);
    let half = size / 2.0;
    for face in &CUBE_FACES {
        let corners: [Point3; 4] = std::array::from_fn(|ci| {
            let [sx, sy, sz] = CUBE_CORNERS[face.corners[ci]];
            center + Point3::new(sx, sy, sz) * half
        });
        let [nx, ny, nz] = face.normal;
        mesh.push_quad(corners, Point3::new(nx, ny, nz), color);
    }
}
