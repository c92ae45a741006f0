// Weighted point graph and k-nearest-neighbor construction.
//
// `KnnGraph` owns node positions, a per-node list of outgoing arcs
// (`GraphEdge { to, weight }`) used by A*, and a deduplicated undirected
// connection set used for drawing. Connections are stored as
// `(min, max)` index pairs in a `BTreeSet`, so they iterate in a fixed
// order and never contain `(i, i)` or a repeated pair.
//
// `build_knn_graph()` gives each point arcs to its own k nearest others.
// The arcs are directed: B being among A's nearest does not put A among
// B's. `symmetrize()` adds the missing reverse arcs when a caller wants
// every drawn connection to be travellable both ways.
//
// The nearest-neighbor scan is a brute-force O(N^2 log N) pass, run in
// parallel per source point and collected in index order. Candidates tie
// on distance by lower index.
//
// See also: `pathfinding.rs` for A* over this graph, `galaxy.rs` which
// builds one from star positions.
//
// **Critical constraint: determinism.** Node IDs are sequential; arc order
// per node is the sorted neighbor order; no hashing anywhere.

use crate::types::{NodeId, Point3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeSet;

/// A directed, weighted arc.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub to: NodeId,
    pub weight: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KnnGraph {
    positions: Vec<Point3>,
    /// Outgoing arcs per node, in insertion order.
    adjacency: Vec<SmallVec<[GraphEdge; 8]>>,
    connections: BTreeSet<(u32, u32)>,
}

impl KnnGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node at the given position. Returns its ID.
    pub fn add_node(&mut self, position: Point3) -> NodeId {
        let id = NodeId(self.positions.len() as u32);
        self.positions.push(position);
        self.adjacency.push(SmallVec::new());
        id
    }

    /// Add a one-way arc and record the undirected connection.
    pub fn add_arc(&mut self, from: NodeId, to: NodeId, weight: f32) {
        self.adjacency[from.index()].push(GraphEdge { to, weight });
        if from != to {
            self.connections
                .insert((from.0.min(to.0), from.0.max(to.0)));
        }
    }

    /// Add arcs in both directions with the same weight.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: f32) {
        self.add_arc(a, b, weight);
        self.add_arc(b, a, weight);
    }

    /// Add the reverse of every arc that lacks one. Returns the number of
    /// arcs added.
    pub fn symmetrize(&mut self) -> usize {
        let mut missing = Vec::new();
        for (from, arcs) in self.adjacency.iter().enumerate() {
            let from = NodeId(from as u32);
            for arc in arcs {
                if !self.has_arc(arc.to, from) {
                    missing.push((arc.to, from, arc.weight));
                }
            }
        }
        for &(from, to, weight) in &missing {
            // Two arcs may share a missing reverse only if the graph had
            // parallel arcs; add it once.
            if !self.has_arc(from, to) {
                self.add_arc(from, to, weight);
            }
        }
        missing.len()
    }

    /// Outgoing arcs of `node`.
    pub fn neighbors(&self, node: NodeId) -> &[GraphEdge] {
        &self.adjacency[node.index()]
    }

    pub fn has_arc(&self, from: NodeId, to: NodeId) -> bool {
        self.adjacency[from.index()].iter().any(|e| e.to == to)
    }

    pub fn position(&self, node: NodeId) -> Point3 {
        self.positions[node.index()]
    }

    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }

    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.positions.len()
    }

    pub fn node_count(&self) -> usize {
        self.positions.len()
    }

    /// Total number of directed arcs.
    pub fn arc_count(&self) -> usize {
        self.adjacency.iter().map(|a| a.len()).sum()
    }

    /// Deduplicated undirected connections as `(min, max)` pairs.
    pub fn connections(&self) -> &BTreeSet<(u32, u32)> {
        &self.connections
    }
}

/// Indices and distances of the `k` points nearest to `points[i]`,
/// nearest first. Returns every other point when `k >= points.len() - 1`.
fn nearest(points: &[Point3], i: usize, k: usize) -> Vec<(usize, f32)> {
    let origin = points[i];
    let mut candidates: Vec<(usize, f32)> = points
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != i)
        .map(|(j, &p)| (j, origin.distance(p)))
        .collect();
    candidates.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    candidates.truncate(k);
    candidates
}

/// Connect each point to its `k` nearest others with Euclidean weights.
pub fn build_knn_graph(points: &[Point3], k: usize) -> KnnGraph {
    let neighbor_lists: Vec<Vec<(usize, f32)>> = (0..points.len())
        .into_par_iter()
        .map(|i| nearest(points, i, k))
        .collect();

    let mut graph = KnnGraph::new();
    for &p in points {
        graph.add_node(p);
    }
    for (i, list) in neighbor_lists.iter().enumerate() {
        for &(j, dist) in list {
            graph.add_arc(NodeId(i as u32), NodeId(j as u32), dist);
        }
    }

    log::debug!(
        "knn graph: nodes={} k={} arcs={} connections={}",
        graph.node_count(),
        k,
        graph.arc_count(),
        graph.connections().len()
    );
    graph
}
