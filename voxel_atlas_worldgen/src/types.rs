// Core value types shared across world generation.
//
// Defines the float vector (`Point3`), RGBA color (`Rgba`), the two column
// addressing schemes (`HexCoord` axial, `GridCoord` cartesian) and the
// compact graph node identifier (`NodeId`). All types derive `Serialize`
// and `Deserialize` so generated data can be dumped as JSON or compared
// byte-for-byte in determinism tests.
//
// The coordinate system is Z-up:
// - X, Y: the horizontal plane the terrain grid and galaxy disc lie in
// - Z:    up (terrain layers stack along +Z)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A position or direction in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Unit vector in the same direction, or `fallback` when the length is
    /// zero (or too small to divide by safely).
    pub fn normalized_or(self, fallback: Self) -> Self {
        let len = self.length();
        if len <= f32::EPSILON || !len.is_finite() {
            fallback
        } else {
            self * (1.0 / len)
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Point3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Point3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X={:.1}, Y={:.1}, Z={:.1}", self.x, self.y, self.z)
    }
}

/// Axial coordinate of a hexagonal column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }
}

/// Cartesian coordinate of a square column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Which column a cell stands in. The variant also decides the prism shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColumnCoord {
    Hex(HexCoord),
    Square(GridCoord),
}

impl ColumnCoord {
    /// The two integer components, `(q, r)` or `(x, y)`. These are what the
    /// height field samples.
    pub fn components(self) -> (i32, i32) {
        match self {
            Self::Hex(h) => (h.q, h.r),
            Self::Square(g) => (g.x, g.y),
        }
    }
}

impl fmt::Display for ColumnCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex(h) => write!(f, "hex(q={}, r={})", h.q, h.r),
            Self::Square(g) => write!(f, "square(x={}, y={})", g.x, g.y),
        }
    }
}

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// Linear RGBA color, each channel nominally in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Multiply RGB by `factor`, keeping alpha.
    pub fn shade(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor, self.a)
    }

    /// Same RGB with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

// ---------------------------------------------------------------------------
// Graph IDs
// ---------------------------------------------------------------------------

/// Index of a node in a `KnnGraph` (and of the star system at that slot).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_is_symmetric() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 4.0, 12.0);
        assert_relative_eq!(a.distance(b), 13.0);
        assert_relative_eq!(b.distance(a), 13.0);
    }

    #[test]
    fn cross_follows_right_hand_rule() {
        let x = Point3::UNIT_X;
        let y = Point3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(y), Point3::UNIT_Z);
    }

    #[test]
    fn normalized_or_falls_back_on_zero() {
        assert_eq!(Point3::ZERO.normalized_or(Point3::UNIT_X), Point3::UNIT_X);
        let n = Point3::new(0.0, 2.0, 0.0).normalized_or(Point3::UNIT_X);
        assert_relative_eq!(n.y, 1.0);
    }

    #[test]
    fn shade_keeps_alpha() {
        let c = Rgba::new(0.5, 1.0, 0.2, 0.7).shade(0.8);
        assert_relative_eq!(c.r, 0.4);
        assert_relative_eq!(c.g, 0.8);
        assert_relative_eq!(c.a, 0.7);
    }

    #[test]
    fn column_components() {
        assert_eq!(ColumnCoord::Hex(HexCoord::new(2, -3)).components(), (2, -3));
        assert_eq!(ColumnCoord::Square(GridCoord::new(-1, 4)).components(), (-1, 4));
    }
}
