// Galaxy controller: star systems, jump graph, current system and route.
//
// `GalaxyState::generate()` scatters `system_count` stars in a flattened
// box (x, y in [-extent, extent), z in [-extent * ratio, extent * ratio)),
// gives each a random color and a `"{prefix}-{id:03}"` name, and links
// them with a k-nearest-neighbor graph. All randomness comes from the
// state's own `WorldRng`, which later also picks random warp and route
// targets, so a seed plus a command list reproduces a session exactly.
//
// Mutation happens through `warp_to`, `request_path` and friends, or
// through `step()` with a batch of `GalaxyCommand`s. Each change updates a
// persistent per-system marker color buffer in place. Only systems whose
// highlight actually changed are rewritten and reported by
// `take_dirty_markers()`, so a renderer can patch its vertex colors
// instead of rebuilding the star mesh.
//
// Highlight priority, highest first: current system (yellow), route
// target (red), other route members (orange), base color.
//
// The controller holds no renderer or clock. Consumers pull geometry
// (`star_geometry`, `path_geometry`, `minimap`) and a HUD snapshot
// (`status`) when events tell them something changed.
//
// See also: `graph.rs`, `pathfinding.rs`, `minimap.rs`, `command.rs` and
// `event.rs`.
//
// **Critical constraint: determinism.** Same seed and config give the same
// systems, graph and marker buffer; same commands give the same events.

use crate::command::GalaxyCommand;
use crate::config::{GalaxyParams, RouteMode, WorldConfig};
use crate::error::{ConfigError, WorldError};
use crate::event::{GalaxyEvent, StepResult, WarpOutcome};
use crate::graph::{build_knn_graph, KnnGraph};
use crate::minimap::{self, Minimap};
use crate::pathfinding::{find_path, PathResult};
use crate::types::{NodeId, Point3, Rgba};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use voxel_atlas_prng::WorldRng;

pub const CURRENT_COLOR: Rgba = Rgba::YELLOW;
pub const TARGET_COLOR: Rgba = Rgba::new(1.0, 0.2, 0.2, 1.0);
pub const ROUTE_COLOR: Rgba = Rgba::new(1.0, 0.5, 0.0, 1.0);
pub const PATH_LINE_COLOR: Rgba = Rgba::new(1.0, 0.8, 0.4, 1.0);

/// A star system. Immutable after generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
    pub id: NodeId,
    pub name: String,
    pub position: Point3,
    pub color: Rgba,
}

/// The active route request. `path` is the unreachable result when no
/// route exists; the target stays highlighted either way.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub target: NodeId,
    pub path: PathResult,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum Highlight {
    None,
    Route,
    Target,
    Current,
}

/// Points plus line segments, as flat buffers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LineGeometry {
    /// Point positions as flat [x, y, z, ...].
    pub vertices: Vec<f32>,
    /// Per-point colors as flat [r, g, b, a, ...].
    pub colors: Vec<f32>,
    /// Segment endpoints, 2 point indices per segment.
    pub segments: Vec<u32>,
}

impl LineGeometry {
    pub fn point_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len() / 2
    }
}

/// HUD snapshot of the controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalaxyStatus {
    pub current: NodeId,
    pub name: String,
    pub position: Point3,
    pub route: Option<RouteSummary>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub target: NodeId,
    pub target_name: String,
    pub reachable: bool,
    pub hops: usize,
    pub cost: f32,
    pub nodes: Vec<NodeId>,
}

impl fmt::Display for GalaxyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current system: {} (ID: {})", self.name, self.current)?;
        writeln!(f, "Coordinates: {}", self.position)?;
        match &self.route {
            Some(r) if r.reachable => write!(
                f,
                "Route: {} ({} jumps, cost: {:.2})",
                r.target_name, r.hops, r.cost
            ),
            Some(r) => write!(f, "Route: {} unreachable", r.target_name),
            None => write!(f, "No route selected."),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GalaxyState {
    params: GalaxyParams,
    minimap_scale: f32,
    rng: WorldRng,
    systems: Vec<StarSystem>,
    graph: KnnGraph,
    current: NodeId,
    route: Option<Route>,
    highlights: Vec<Highlight>,
    /// Flat RGBA per system, kept in sync with `highlights`.
    marker_colors: Vec<f32>,
    dirty_markers: BTreeSet<u32>,
}

impl GalaxyState {
    /// Validate `config` and generate a galaxy from `seed`.
    pub fn generate(seed: u64, config: &WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let params = config.galaxy.clone();
        let mut rng = WorldRng::new(seed);

        let half_thickness = params.extent * params.thickness_ratio;
        let systems: Vec<StarSystem> = (0..params.system_count)
            .map(|i| {
                let x = rng.range_f32(-params.extent, params.extent);
                let y = rng.range_f32(-params.extent, params.extent);
                let z = rng.range_f32(-half_thickness, half_thickness);
                let color = Rgba::new(rng.next_f32(), rng.next_f32(), rng.next_f32(), 1.0);
                StarSystem {
                    id: NodeId(i as u32),
                    name: format!("{}-{:03}", params.name_prefix, i),
                    position: Point3::new(x, y, z),
                    color,
                }
            })
            .collect();

        let positions: Vec<Point3> = systems.iter().map(|s| s.position).collect();
        let mut graph = build_knn_graph(&positions, params.neighbor_count);
        if params.route_mode == RouteMode::Symmetric {
            graph.symmetrize();
        }

        log::info!(
            "galaxy generated: seed={seed} systems={} connections={} arcs={} mode={:?}",
            systems.len(),
            graph.connections().len(),
            graph.arc_count(),
            params.route_mode
        );

        let marker_colors = systems.iter().flat_map(|s| s.color.to_array()).collect();
        let mut state = Self {
            highlights: vec![Highlight::None; systems.len()],
            params,
            minimap_scale: config.minimap.galaxy_scale,
            rng,
            systems,
            graph,
            current: NodeId(0),
            route: None,
            marker_colors,
            dirty_markers: BTreeSet::new(),
        };
        state.refresh_markers();
        state.dirty_markers.clear();
        Ok(state)
    }

    pub fn params(&self) -> &GalaxyParams {
        &self.params
    }

    pub fn systems(&self) -> &[StarSystem] {
        &self.systems
    }

    pub fn system(&self, id: NodeId) -> Option<&StarSystem> {
        self.systems.get(id.index())
    }

    pub fn graph(&self) -> &KnnGraph {
        &self.graph
    }

    pub fn connections(&self) -> &BTreeSet<(u32, u32)> {
        self.graph.connections()
    }

    pub fn current_id(&self) -> NodeId {
        self.current
    }

    pub fn current(&self) -> &StarSystem {
        &self.systems[self.current.index()]
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Per-system marker colors as flat RGBA, highlights applied.
    pub fn marker_colors(&self) -> &[f32] {
        &self.marker_colors
    }

    pub fn marker_color(&self, id: NodeId) -> Rgba {
        let i = id.index() * 4;
        let c = &self.marker_colors[i..i + 4];
        Rgba::new(c[0], c[1], c[2], c[3])
    }

    /// System indices whose marker color changed since the last call.
    pub fn take_dirty_markers(&mut self) -> Vec<u32> {
        std::mem::take(&mut self.dirty_markers).into_iter().collect()
    }

    fn check_index(&self, index: usize) -> Result<NodeId, WorldError> {
        let count = self.systems.len();
        if index < count {
            Ok(NodeId(index as u32))
        } else {
            Err(WorldError::SystemOutOfRange { index, count })
        }
    }

    // -----------------------------------------------------------------------
    // Warping
    // -----------------------------------------------------------------------

    /// Make `index` the current system. Clears the active route.
    pub fn warp_to(&mut self, index: usize) -> Result<WarpOutcome, WorldError> {
        let target = self.check_index(index)?;
        if target == self.current {
            return Ok(WarpOutcome::AlreadyThere(index));
        }
        let from = self.current;
        self.current = target;
        self.route = None;
        self.refresh_markers();
        log::debug!(
            "warp {} -> {}",
            self.systems[from.index()].name,
            self.systems[target.index()].name
        );
        Ok(WarpOutcome::Warped {
            from: from.index(),
            to: index,
        })
    }

    /// Warp to a random system other than the current one. A single-system
    /// galaxy stays put.
    pub fn warp_to_random(&mut self) -> WarpOutcome {
        let current = self.current.index();
        match self.rng.index_other_than(self.systems.len(), current) {
            Some(index) => self
                .warp_to(index)
                .unwrap_or(WarpOutcome::AlreadyThere(current)),
            None => WarpOutcome::AlreadyThere(current),
        }
    }

    // -----------------------------------------------------------------------
    // Routes
    // -----------------------------------------------------------------------

    /// Search a route from the current system to `index` and make it the
    /// active route, reachable or not.
    pub fn request_path(&mut self, index: usize) -> Result<Route, WorldError> {
        let target = self.check_index(index)?;
        let path = find_path(&self.graph, self.current, target);
        if path.is_reachable() {
            log::debug!(
                "route to {}: {} jumps, cost {:.2}",
                self.systems[index].name,
                path.hops(),
                path.total_cost
            );
        } else {
            log::debug!("route to {}: unreachable", self.systems[index].name);
        }
        let route = Route { target, path };
        self.route = Some(route.clone());
        self.refresh_markers();
        Ok(route)
    }

    /// Route to a random system other than the current one. `None` for a
    /// single-system galaxy.
    pub fn request_random_path(&mut self) -> Option<Route> {
        let index = self
            .rng
            .index_other_than(self.systems.len(), self.current.index())?;
        self.request_path(index).ok()
    }

    /// Drop the active route. Returns whether one was active.
    pub fn clear_route(&mut self) -> bool {
        let had_route = self.route.take().is_some();
        if had_route {
            self.refresh_markers();
        }
        had_route
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Apply `commands` in order and report what happened.
    pub fn step(&mut self, commands: &[GalaxyCommand]) -> StepResult {
        let mut result = StepResult::default();
        for command in commands {
            self.apply_command(command, &mut result.events);
        }
        result
    }

    fn apply_command(&mut self, command: &GalaxyCommand, events: &mut Vec<GalaxyEvent>) {
        match *command {
            GalaxyCommand::WarpTo(index) => {
                let had_route = self.route.is_some();
                match self.warp_to(index) {
                    Ok(outcome) => push_warp_events(outcome, had_route, events),
                    Err(e) => events.push(GalaxyEvent::CommandRejected {
                        reason: e.to_string(),
                    }),
                }
            }
            GalaxyCommand::WarpRandom => {
                let had_route = self.route.is_some();
                let outcome = self.warp_to_random();
                push_warp_events(outcome, had_route, events);
            }
            GalaxyCommand::RequestPath(index) => match self.request_path(index) {
                Ok(route) => events.push(route_event(&route)),
                Err(e) => events.push(GalaxyEvent::CommandRejected {
                    reason: e.to_string(),
                }),
            },
            GalaxyCommand::RequestRandomPath => match self.request_random_path() {
                Some(route) => events.push(route_event(&route)),
                None => events.push(GalaxyEvent::CommandRejected {
                    reason: "no other system to route to".to_string(),
                }),
            },
            GalaxyCommand::ClearRoute => {
                if self.clear_route() {
                    events.push(GalaxyEvent::RouteCleared);
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Highlighting
    // -----------------------------------------------------------------------

    fn highlight_of(&self, id: NodeId) -> Highlight {
        if id == self.current {
            return Highlight::Current;
        }
        match &self.route {
            Some(route) if route.target == id => Highlight::Target,
            Some(route) if route.path.contains(id) => Highlight::Route,
            _ => Highlight::None,
        }
    }

    fn highlight_color(&self, id: NodeId, highlight: Highlight) -> Rgba {
        match highlight {
            Highlight::Current => CURRENT_COLOR,
            Highlight::Target => TARGET_COLOR,
            Highlight::Route => ROUTE_COLOR,
            Highlight::None => self.systems[id.index()].color,
        }
    }

    /// Rewrite the marker colors of systems whose highlight changed.
    fn refresh_markers(&mut self) {
        for i in 0..self.systems.len() {
            let id = NodeId(i as u32);
            let wanted = self.highlight_of(id);
            if self.highlights[i] == wanted {
                continue;
            }
            self.highlights[i] = wanted;
            let color = self.highlight_color(id, wanted).to_array();
            self.marker_colors[i * 4..i * 4 + 4].copy_from_slice(&color);
            self.dirty_markers.insert(id.0);
        }
    }

    // -----------------------------------------------------------------------
    // Geometry
    // -----------------------------------------------------------------------

    /// Star markers (with highlight colors) and one segment per connection.
    pub fn star_geometry(&self) -> LineGeometry {
        LineGeometry {
            vertices: self
                .systems
                .iter()
                .flat_map(|s| s.position.to_array())
                .collect(),
            colors: self.marker_colors.clone(),
            segments: self
                .graph
                .connections()
                .iter()
                .flat_map(|&(a, b)| [a, b])
                .collect(),
        }
    }

    /// Line strip along the active route. Empty without a reachable route.
    pub fn path_geometry(&self) -> LineGeometry {
        let Some(route) = self.route.as_ref().filter(|r| r.path.is_reachable()) else {
            return LineGeometry::default();
        };
        let nodes = &route.path.nodes;
        LineGeometry {
            vertices: nodes
                .iter()
                .flat_map(|&n| self.systems[n.index()].position.to_array())
                .collect(),
            colors: nodes
                .iter()
                .flat_map(|_| PATH_LINE_COLOR.to_array())
                .collect(),
            segments: (1..nodes.len() as u32).flat_map(|i| [i - 1, i]).collect(),
        }
    }

    /// Top-down map around the current system. Highlighted systems keep
    /// their full highlight color; others use their base color at half
    /// alpha.
    pub fn minimap(&self) -> Minimap {
        let positions: Vec<Point3> = self.systems.iter().map(|s| s.position).collect();
        minimap::build_minimap(
            &positions,
            self.current().position,
            self.minimap_scale,
            |i| match self.highlights[i] {
                Highlight::None => self.systems[i]
                    .color
                    .with_alpha(minimap::BACKGROUND_ALPHA),
                h => self.highlight_color(NodeId(i as u32), h),
            },
            self.graph
                .connections()
                .iter()
                .map(|&(a, b)| (a as usize, b as usize)),
        )
    }

    pub fn status(&self) -> GalaxyStatus {
        let current = self.current();
        GalaxyStatus {
            current: current.id,
            name: current.name.clone(),
            position: current.position,
            route: self.route.as_ref().map(|r| RouteSummary {
                target: r.target,
                target_name: self.systems[r.target.index()].name.clone(),
                reachable: r.path.is_reachable(),
                hops: r.path.hops(),
                cost: r.path.total_cost,
                nodes: r.path.nodes.clone(),
            }),
        }
    }
}

fn push_warp_events(outcome: WarpOutcome, had_route: bool, events: &mut Vec<GalaxyEvent>) {
    match outcome {
        WarpOutcome::Warped { from, to } => {
            events.push(GalaxyEvent::Warped {
                from: NodeId(from as u32),
                to: NodeId(to as u32),
            });
            if had_route {
                events.push(GalaxyEvent::RouteCleared);
            }
        }
        WarpOutcome::AlreadyThere(index) => {
            events.push(GalaxyEvent::AlreadyThere(NodeId(index as u32)));
        }
    }
}

fn route_event(route: &Route) -> GalaxyEvent {
    if route.path.is_reachable() {
        GalaxyEvent::RouteFound {
            target: route.target,
            hops: route.path.hops(),
            cost: route.path.total_cost,
        }
    } else {
        GalaxyEvent::RouteUnreachable {
            target: route.target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(systems: usize, k: usize) -> WorldConfig {
        let mut config = WorldConfig::default();
        config.galaxy.system_count = systems;
        config.galaxy.neighbor_count = k;
        config
    }

    fn galaxy(seed: u64) -> GalaxyState {
        GalaxyState::generate(seed, &WorldConfig::default()).unwrap()
    }

    /// Some target reachable from the current system, other than itself.
    fn reachable_target(state: &GalaxyState) -> usize {
        (0..state.systems().len())
            .find(|&i| {
                i != state.current_id().index()
                    && find_path(state.graph(), state.current_id(), NodeId(i as u32)).hops() >= 2
            })
            .unwrap()
    }

    #[test]
    fn generation_follows_params() {
        let state = galaxy(42);
        let params = state.params().clone();
        assert_eq!(state.systems().len(), 100);
        assert_eq!(state.systems()[7].name, "System-007");
        for (i, s) in state.systems().iter().enumerate() {
            assert_eq!(s.id, NodeId(i as u32));
            assert!(s.position.x >= -params.extent && s.position.x < params.extent);
            assert!(s.position.y >= -params.extent && s.position.y < params.extent);
            assert!(s.position.z.abs() <= params.extent * params.thickness_ratio);
            assert_eq!(s.color.a, 1.0);
            assert_eq!(state.graph().neighbors(s.id).len(), 3);
        }
    }

    #[test]
    fn same_seed_same_galaxy() {
        let a = galaxy(7);
        let b = galaxy(7);
        assert_eq!(a.systems(), b.systems());
        assert_eq!(a.graph(), b.graph());
        assert_eq!(a.marker_colors(), b.marker_colors());
        assert_ne!(a.systems(), galaxy(8).systems());
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(matches!(
            GalaxyState::generate(1, &config(5, 5)),
            Err(ConfigError::TooManyNeighbors { .. })
        ));
        assert!(matches!(
            GalaxyState::generate(1, &config(0, 3)),
            Err(ConfigError::NoSystems)
        ));
    }

    #[test]
    fn starts_at_system_zero_highlighted() {
        let state = galaxy(3);
        assert_eq!(state.current_id(), NodeId(0));
        assert_eq!(state.marker_color(NodeId(0)), CURRENT_COLOR);
        assert_eq!(state.marker_color(NodeId(1)), state.systems()[1].color);
    }

    #[test]
    fn warp_moves_highlight_and_clears_route() {
        let mut state = galaxy(11);
        let target = reachable_target(&state);
        state.request_path(target).unwrap();
        state.take_dirty_markers();

        let outcome = state.warp_to(5).unwrap();
        assert_eq!(outcome, WarpOutcome::Warped { from: 0, to: 5 });
        assert!(state.route().is_none());
        assert_eq!(state.marker_color(NodeId(5)), CURRENT_COLOR);
        assert_eq!(state.marker_color(NodeId(0)), state.systems()[0].color);
        let dirty = state.take_dirty_markers();
        assert!(dirty.contains(&0) && dirty.contains(&5));
        assert!(dirty.contains(&(target as u32)));
    }

    #[test]
    fn warp_to_current_is_a_no_op() {
        let mut state = galaxy(11);
        assert_eq!(state.warp_to(0), Ok(WarpOutcome::AlreadyThere(0)));
        assert!(state.take_dirty_markers().is_empty());
        assert_eq!(
            state.warp_to(100),
            Err(WorldError::SystemOutOfRange { index: 100, count: 100 })
        );
    }

    #[test]
    fn random_warp_never_stays() {
        let mut state = galaxy(5);
        for _ in 0..50 {
            let before = state.current_id().index();
            match state.warp_to_random() {
                WarpOutcome::Warped { from, to } => {
                    assert_eq!(from, before);
                    assert_ne!(to, before);
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn single_system_galaxy() {
        let mut state = GalaxyState::generate(1, &config(1, 3)).unwrap();
        assert!(state.connections().is_empty());
        assert_eq!(state.warp_to_random(), WarpOutcome::AlreadyThere(0));
        assert!(state.request_random_path().is_none());
        let events = state.step(&[GalaxyCommand::RequestRandomPath]).events;
        assert!(matches!(events[0], GalaxyEvent::CommandRejected { .. }));
    }

    #[test]
    fn route_highlight_priority() {
        let mut state = galaxy(21);
        let target = reachable_target(&state);
        let route = state.request_path(target).unwrap();
        let nodes = &route.path.nodes;
        assert_eq!(nodes.first(), Some(&NodeId(0)));
        assert_eq!(nodes.last(), Some(&NodeId(target as u32)));
        assert_eq!(state.marker_color(NodeId(0)), CURRENT_COLOR);
        assert_eq!(state.marker_color(NodeId(target as u32)), TARGET_COLOR);
        for &mid in &nodes[1..nodes.len() - 1] {
            assert_eq!(state.marker_color(mid), ROUTE_COLOR);
        }

        let geometry = state.path_geometry();
        assert_eq!(geometry.point_count(), nodes.len());
        assert_eq!(geometry.segment_count(), nodes.len() - 1);
        assert_eq!(&geometry.colors[0..4], &PATH_LINE_COLOR.to_array());

        assert!(state.clear_route());
        assert!(!state.clear_route());
        assert_eq!(
            state.marker_color(NodeId(target as u32)),
            state.systems()[target].color
        );
        assert_eq!(state.path_geometry(), LineGeometry::default());
    }

    #[test]
    fn unreachable_target_still_highlighted() {
        // Two far-apart clusters of three with k = 2 cannot reach each other.
        let mut state = GalaxyState::generate(9, &config(6, 2)).unwrap();
        let positions = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(400.0, 0.0, 0.0),
            Point3::new(401.0, 0.0, 0.0),
            Point3::new(400.0, 1.0, 0.0),
        ];
        for (s, p) in state.systems.iter_mut().zip(positions) {
            s.position = p;
        }
        state.graph = build_knn_graph(&positions, 2);

        let route = state.request_path(4).unwrap();
        assert!(!route.path.is_reachable());
        assert_eq!(state.marker_color(NodeId(4)), TARGET_COLOR);
        assert!(state.path_geometry().segments.is_empty());
        let status = state.status();
        assert!(status.to_string().contains("System-004 unreachable"));
    }

    #[test]
    fn symmetric_mode_adds_reverse_arcs() {
        let mut config = config(30, 3);
        config.galaxy.route_mode = RouteMode::Symmetric;
        let state = GalaxyState::generate(4, &config).unwrap();
        for &(a, b) in state.connections() {
            assert!(state.graph().has_arc(NodeId(a), NodeId(b)));
            assert!(state.graph().has_arc(NodeId(b), NodeId(a)));
        }
    }

    #[test]
    fn step_emits_events_in_order() {
        let mut state = galaxy(13);
        let target = reachable_target(&state);
        let result = state.step(&[
            GalaxyCommand::RequestPath(target),
            GalaxyCommand::WarpTo(0),
            GalaxyCommand::WarpTo(target),
            GalaxyCommand::ClearRoute,
            GalaxyCommand::WarpTo(1000),
        ]);
        let events = &result.events;
        assert!(matches!(events[0], GalaxyEvent::RouteFound { hops, .. } if hops >= 2));
        assert_eq!(events[1], GalaxyEvent::AlreadyThere(NodeId(0)));
        assert_eq!(
            events[2],
            GalaxyEvent::Warped {
                from: NodeId(0),
                to: NodeId(target as u32)
            }
        );
        assert_eq!(events[3], GalaxyEvent::RouteCleared);
        // The warp already cleared the route, so ClearRoute emits nothing.
        assert!(matches!(events[4], GalaxyEvent::CommandRejected { .. }));
        assert_eq!(events.len(), 5);
    }

    #[test]
    fn replayed_commands_reproduce_state() {
        let commands = [
            GalaxyCommand::WarpRandom,
            GalaxyCommand::RequestRandomPath,
            GalaxyCommand::WarpRandom,
            GalaxyCommand::RequestRandomPath,
        ];
        let mut a = galaxy(99);
        let mut b = galaxy(99);
        assert_eq!(a.step(&commands), b.step(&commands));
        assert_eq!(a.status(), b.status());
        assert_eq!(a.marker_colors(), b.marker_colors());
    }

    #[test]
    fn minimap_centres_on_current() {
        let mut state = galaxy(17);
        state.warp_to(12).unwrap();
        let map = state.minimap();
        let centre = map.points.iter().find(|p| p.source == 12).unwrap();
        assert_eq!(centre.position, [0.5, 0.5]);
        assert_eq!(centre.color, CURRENT_COLOR);
        for p in &map.points {
            if p.source != 12 {
                assert_eq!(p.color.a, minimap::BACKGROUND_ALPHA);
            }
        }
        for line in &map.lines {
            assert!((line[0] as usize) < map.points.len());
            assert!((line[1] as usize) < map.points.len());
        }
    }

    #[test]
    fn star_geometry_covers_all_systems() {
        let state = galaxy(2);
        let geometry = state.star_geometry();
        assert_eq!(geometry.point_count(), 100);
        assert_eq!(geometry.segment_count(), state.connections().len());
        assert_eq!(geometry.colors, state.marker_colors());
    }

    #[test]
    fn status_display() {
        let mut state = galaxy(1);
        assert!(state.status().to_string().contains("No route selected."));
        let target = reachable_target(&state);
        state.request_path(target).unwrap();
        let text = state.status().to_string();
        assert!(text.starts_with("Current system: System-000 (ID: 0)"));
        assert!(text.contains(&format!("Route: {}", state.systems()[target].name)));
        assert!(text.contains("jumps, cost:"));
    }
}
