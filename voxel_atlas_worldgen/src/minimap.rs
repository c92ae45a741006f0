// Top-down minimap projection.
//
// Projects world positions onto a 2D map centred on a focus point: X and Y
// relative to the focus are scaled and shifted so the focus lands on
// (0.5, 0.5). Only points strictly inside the open unit square are kept.
// Lines are kept only when both endpoints are visible. Z is dropped.
//
// Both the galaxy controller and the terrain world call `build_minimap`,
// each supplying its own coloring rule.

use crate::types::{Point3, Rgba};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Alpha applied to unhighlighted minimap markers.
pub const BACKGROUND_ALPHA: f32 = 0.5;

/// A visible marker on the map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinimapPoint {
    /// Index of the source item (system id or column index).
    pub source: usize,
    pub position: [f32; 2],
    pub color: Rgba,
}

/// Visible markers plus lines between them. Line endpoints index
/// `points`, not the source items.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Minimap {
    pub points: Vec<MinimapPoint>,
    pub lines: Vec<[u32; 2]>,
}

/// Map coordinate of `position` when the map is centred on `focus`.
pub fn project(position: Point3, focus: Point3, scale: f32) -> [f32; 2] {
    let rel = position - focus;
    [rel.x * scale + 0.5, rel.y * scale + 0.5]
}

/// Whether a map coordinate lies inside the open unit square.
pub fn is_visible(p: [f32; 2]) -> bool {
    p[0] > 0.0 && p[0] < 1.0 && p[1] > 0.0 && p[1] < 1.0
}

/// Project `positions` around `focus`, coloring each visible one with
/// `color_of(index)`, and keep the `links` whose endpoints both survive.
pub fn build_minimap(
    positions: &[Point3],
    focus: Point3,
    scale: f32,
    mut color_of: impl FnMut(usize) -> Rgba,
    links: impl IntoIterator<Item = (usize, usize)>,
) -> Minimap {
    let mut map = Minimap::default();
    // Source index -> map point index.
    let mut visible = BTreeMap::new();

    for (i, &pos) in positions.iter().enumerate() {
        let p = project(pos, focus, scale);
        if !is_visible(p) {
            continue;
        }
        visible.insert(i, map.points.len() as u32);
        map.points.push(MinimapPoint {
            source: i,
            position: p,
            color: color_of(i),
        });
    }

    for (a, b) in links {
        if let (Some(&ma), Some(&mb)) = (visible.get(&a), visible.get(&b)) {
            map.lines.push([ma, mb]);
        }
    }
    map
}
