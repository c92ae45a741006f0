// Commands accepted by the galaxy controller.
//
// All mutation of a generated `GalaxyState` from outside goes through
// `GalaxyCommand`s applied by `GalaxyState::step()`. Commands carry plain
// system indices so they can come straight from a UI, a script file or the
// CLI. Random variants draw from the controller's own PRNG, which keeps a
// recorded command list replayable.
//
// See also: `event.rs` for what each command emits.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GalaxyCommand {
    /// Move the current system. Clears the active route.
    WarpTo(usize),
    /// Move to a random system other than the current one.
    WarpRandom,
    /// Search a route from the current system to this one.
    RequestPath(usize),
    /// Search a route to a random system other than the current one.
    RequestRandomPath,
    ClearRoute,
}
