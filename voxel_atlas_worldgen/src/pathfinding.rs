// A* pathfinding over a `KnnGraph`.
//
// Standard A* with a `BinaryHeap` open set (min-heap via reversed
// ordering). Scores and came-from links live in `Vec`s indexed by
// `NodeId`. The heuristic is straight-line distance to the target, which
// never overestimates when arc weights are Euclidean distances.
//
// Heap entries carry the g-score they were pushed with. A node is
// re-expanded when a cheaper route to it turns up later; entries whose g
// is worse than the node's current best are stale and skipped. This keeps
// results optimal for hand-built graphs whose weights undercut the
// heuristic's consistency.
//
// Unreachable targets are a normal result, not an error: `PathResult`
// then has no nodes and infinite cost. `find_path_with_budget` caps the
// number of node expansions for callers searching very large graphs.
//
// See also: `graph.rs` for the graph being searched, `galaxy.rs` which
// runs route requests through here.
//
// **Critical constraint: determinism.** A pure function of the graph and
// the endpoints. Heap ties break on node index via `total_cmp`.

use crate::graph::KnnGraph;
use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A route through the graph, or the unreachable marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// Node IDs from start to target (inclusive). Empty when unreachable.
    pub nodes: Vec<NodeId>,
    /// Sum of arc weights along `nodes`. Infinite when unreachable.
    pub total_cost: f32,
}

impl PathResult {
    pub fn unreachable() -> Self {
        Self {
            nodes: Vec::new(),
            total_cost: f32::INFINITY,
        }
    }

    pub fn is_reachable(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Number of arcs traversed.
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }
}

/// Result of a bounded search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SearchOutcome {
    Found(PathResult),
    /// The open set emptied without reaching the target.
    Unreachable,
    /// The expansion budget ran out first. A larger budget may still
    /// succeed.
    BudgetExhausted { expanded: usize },
}

impl SearchOutcome {
    /// Collapse to a `PathResult`, treating an exhausted budget as
    /// unreachable.
    pub fn into_path(self) -> PathResult {
        match self {
            Self::Found(path) => path,
            Self::Unreachable | Self::BudgetExhausted { .. } => PathResult::unreachable(),
        }
    }
}

/// Entry in the A* open set (min-heap via reversed ordering).
struct OpenEntry {
    node: NodeId,
    f_score: f32,
    g_score: f32,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap: smallest f_score is "greatest".
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.node.0.cmp(&self.node.0))
    }
}

/// Shortest path from `start` to `target`.
///
/// `start == target` gives `[start]` at cost 0. IDs outside the graph give
/// the unreachable result.
pub fn find_path(graph: &KnnGraph, start: NodeId, target: NodeId) -> PathResult {
    search(graph, start, target, None).into_path()
}

/// Like `find_path`, but gives up after expanding `max_expansions` nodes.
pub fn find_path_with_budget(
    graph: &KnnGraph,
    start: NodeId,
    target: NodeId,
    max_expansions: usize,
) -> SearchOutcome {
    search(graph, start, target, Some(max_expansions))
}

fn search(graph: &KnnGraph, start: NodeId, target: NodeId, budget: Option<usize>) -> SearchOutcome {
    if !graph.contains(start) || !graph.contains(target) {
        log::warn!(
            "path request {start} -> {target} outside graph of {} nodes",
            graph.node_count()
        );
        return SearchOutcome::Unreachable;
    }
    if start == target {
        return SearchOutcome::Found(PathResult {
            nodes: vec![start],
            total_cost: 0.0,
        });
    }

    let n = graph.node_count();
    let target_pos = graph.position(target);
    let heuristic = |node: NodeId| graph.position(node).distance(target_pos);

    // g_score[node] = cost of cheapest known path from start to node.
    let mut g_score = vec![f32::INFINITY; n];
    let mut came_from: Vec<Option<NodeId>> = vec![None; n];
    g_score[start.index()] = 0.0;

    let mut open = BinaryHeap::new();
    open.push(OpenEntry {
        node: start,
        f_score: heuristic(start),
        g_score: 0.0,
    });
    let mut expanded = 0usize;

    while let Some(current) = open.pop() {
        let ci = current.node.index();
        if current.g_score > g_score[ci] {
            continue;
        }
        if current.node == target {
            return SearchOutcome::Found(reconstruct_path(&came_from, start, target, g_score[ci]));
        }
        if budget.is_some_and(|max| expanded >= max) {
            return SearchOutcome::BudgetExhausted { expanded };
        }
        expanded += 1;

        for edge in graph.neighbors(current.node) {
            let ni = edge.to.index();
            let tentative_g = current.g_score + edge.weight;
            if tentative_g < g_score[ni] {
                g_score[ni] = tentative_g;
                came_from[ni] = Some(current.node);
                open.push(OpenEntry {
                    node: edge.to,
                    f_score: tentative_g + heuristic(edge.to),
                    g_score: tentative_g,
                });
            }
        }
    }

    SearchOutcome::Unreachable
}

fn reconstruct_path(
    came_from: &[Option<NodeId>],
    start: NodeId,
    target: NodeId,
    total_cost: f32,
) -> PathResult {
    let mut nodes = Vec::new();
    let mut current = target;
    loop {
        nodes.push(current);
        if current == start {
            break;
        }
        match came_from[current.index()] {
            Some(prev) => current = prev,
            None => break,
        }
    }
    nodes.reverse();
    PathResult { nodes, total_cost }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point3;

    /// A=(0,0,0), B=(10,0,0), C=(10,10,0), edges A-B and B-C of weight 10.
    fn corner_graph() -> (KnnGraph, NodeId, NodeId, NodeId) {
        let mut graph = KnnGraph::new();
        let a = graph.add_node(Point3::new(0.0, 0.0, 0.0));
        let b = graph.add_node(Point3::new(10.0, 0.0, 0.0));
        let c = graph.add_node(Point3::new(10.0, 10.0, 0.0));
        graph.add_edge(a, b, 10.0);
        graph.add_edge(b, c, 10.0);
        (graph, a, b, c)
    }

    #[test]
    fn trivial_path() {
        let (graph, a, _, _) = corner_graph();
        let path = find_path(&graph, a, a);
        assert_eq!(path.nodes, vec![a]);
        assert_eq!(path.total_cost, 0.0);
        assert_eq!(path.hops(), 0);
    }

    #[test]
    fn two_hop_corner() {
        let (graph, a, b, c) = corner_graph();
        let path = find_path(&graph, a, c);
        assert_eq!(path.nodes, vec![a, b, c]);
        assert_eq!(path.total_cost, 20.0);
        assert!(path.is_reachable());
    }

    #[test]
    fn cheaper_two_hops_beat_expensive_direct_edge() {
        let (mut graph, a, b, c) = corner_graph();
        graph.add_edge(a, c, 25.0);
        let path = find_path(&graph, a, c);
        assert_eq!(path.nodes, vec![a, b, c]);
        assert_eq!(path.total_cost, 20.0);
    }

    #[test]
    fn disconnected_components_are_unreachable() {
        let mut graph = KnnGraph::new();
        let a = graph.add_node(Point3::new(0.0, 0.0, 0.0));
        let b = graph.add_node(Point3::new(1.0, 0.0, 0.0));
        let c = graph.add_node(Point3::new(50.0, 0.0, 0.0));
        let d = graph.add_node(Point3::new(51.0, 0.0, 0.0));
        graph.add_edge(a, b, 1.0);
        graph.add_edge(c, d, 1.0);
        let path = find_path(&graph, a, d);
        assert!(path.nodes.is_empty());
        assert!(path.total_cost.is_infinite());
        assert!(!path.is_reachable());
    }

    #[test]
    fn arcs_are_one_way() {
        let mut graph = KnnGraph::new();
        let a = graph.add_node(Point3::new(0.0, 0.0, 0.0));
        let b = graph.add_node(Point3::new(3.0, 4.0, 0.0));
        graph.add_arc(a, b, 5.0);
        assert_eq!(find_path(&graph, a, b).total_cost, 5.0);
        assert!(!find_path(&graph, b, a).is_reachable());
    }

    #[test]
    fn reopens_node_when_cheaper_route_appears() {
        // The A-B arc is cheaper than its straight-line length, so the
        // heuristic is admissible but not consistent: D is expanded via
        // the direct arc (g = 6) before B reveals the cost-2 route.
        let mut graph = KnnGraph::new();
        let a = graph.add_node(Point3::new(0.0, 0.0, 0.0));
        let b = graph.add_node(Point3::new(-2.0, 0.0, 0.0));
        let d = graph.add_node(Point3::new(5.0, 0.0, 0.0));
        let e = graph.add_node(Point3::new(5.0, 8.0, 0.0));
        let t = graph.add_node(Point3::new(10.0, 0.0, 0.0));
        graph.add_arc(a, d, 6.0);
        graph.add_arc(a, b, 1.0);
        graph.add_arc(b, d, 1.0);
        graph.add_arc(d, e, 8.0);
        graph.add_arc(e, t, 10.0);
        let path = find_path(&graph, a, t);
        assert_eq!(path.nodes, vec![a, b, d, e, t]);
        assert_eq!(path.total_cost, 20.0);
    }

    #[test]
    fn out_of_range_is_unreachable() {
        let (graph, a, _, _) = corner_graph();
        assert!(!find_path(&graph, a, NodeId(99)).is_reachable());
        assert!(!find_path(&graph, NodeId(99), NodeId(99)).is_reachable());
    }

    #[test]
    fn budget_limits_expansions() {
        let (graph, a, b, c) = corner_graph();
        assert_eq!(
            find_path_with_budget(&graph, a, c, 1),
            SearchOutcome::BudgetExhausted { expanded: 1 }
        );
        match find_path_with_budget(&graph, a, c, 2) {
            SearchOutcome::Found(path) => assert_eq!(path.nodes, vec![a, b, c]),
            other => panic!("expected a path, got {other:?}"),
        }
        // The trivial case needs no expansions at all.
        assert!(matches!(
            find_path_with_budget(&graph, b, b, 0),
            SearchOutcome::Found(_)
        ));
    }

    #[test]
    fn budget_search_reports_unreachable() {
        let mut graph = KnnGraph::new();
        let a = graph.add_node(Point3::ZERO);
        let b = graph.add_node(Point3::UNIT_X);
        assert_eq!(
            find_path_with_budget(&graph, a, b, 100),
            SearchOutcome::Unreachable
        );
    }
}
