// Outcomes and events emitted by world controllers.
//
// `GalaxyState::step()` returns a `StepResult` holding one or more
// `GalaxyEvent`s per applied command, in command order. Consumers (a
// renderer, HUD, or the CLI) react to events instead of polling state.
// `WarpOutcome` is the direct return of `warp_to` on either the galaxy or
// the terrain world.
//
// See also: `command.rs` for the inputs that produce these events,
// `galaxy.rs` for the controller.

use crate::types::NodeId;
use serde::{Deserialize, Serialize};

/// Result of a warp request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarpOutcome {
    /// The focus moved. Any active route was cleared.
    Warped { from: usize, to: usize },
    /// The target was already the focus; nothing changed.
    AlreadyThere(usize),
}

/// Something that happened while applying a command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GalaxyEvent {
    Warped { from: NodeId, to: NodeId },
    AlreadyThere(NodeId),
    RouteFound {
        target: NodeId,
        hops: usize,
        cost: f32,
    },
    RouteUnreachable { target: NodeId },
    RouteCleared,
    /// The command could not be applied (e.g. an index out of range).
    CommandRejected { reason: String },
}

/// Everything produced by one `step()` call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub events: Vec<GalaxyEvent>,
}
