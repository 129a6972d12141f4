// Player state — position, heading, progress, and programmable card fields.
//
// Players are owned by `GameState` in a flat vector and addressed by
// `PlayerId`. A player's grid position (`space`) and the space's occupant
// handle are kept consistent by a single mutator on the game state
// (`place_player` in `sim.rs`) — nothing else touches either side.
//
// The register and hand field counts are fixed at construction and never
// resized. Rebooting is the only failure state a player can be in; there
// is no elimination.
//
// See also: `command.rs` for the cards the fields hold, `sim.rs` for the
// reboot and respawn rules.

use crate::command::CommandCard;
use crate::types::{Heading, SpaceId};
use serde::{Deserialize, Serialize};

/// Number of program registers per player. Registers execute in index
/// order across all players before the next index starts.
pub const REGISTER_COUNT: usize = 5;

/// Number of hand card fields per player.
pub const HAND_SIZE: usize = 8;

/// Heading every robot faces on spawn and respawn.
pub const SPAWN_HEADING: Heading = Heading::South;

/// One card slot — a program register or a hand field.
///
/// `visible` is presentation state (face-up vs face-down) but persists
/// with the game: a restored game must show the same card faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardField {
    pub card: Option<CommandCard>,
    pub visible: bool,
}

/// A player (robot) in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub color: String,
    /// Current position. `SpaceId::DEAD` while rebooting.
    pub space: SpaceId,
    pub heading: Heading,
    /// Where this player respawns after a reboot. Updated by checkpoints.
    pub spawn_space: SpaceId,
    /// Highest checkpoint number reached so far.
    pub checkpoints: u32,
    /// Set when the player fell off the board or into a pit; cleared at
    /// the next programming phase.
    pub rebooting: bool,
    pub program: [CardField; REGISTER_COUNT],
    pub hand: [CardField; HAND_SIZE],
}

impl Player {
    pub fn new(name: impl Into<String>, color: impl Into<String>, spawn: SpaceId) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            space: spawn,
            heading: SPAWN_HEADING,
            spawn_space: spawn,
            checkpoints: 0,
            rebooting: false,
            program: [CardField::default(); REGISTER_COUNT],
            hand: [CardField::default(); HAND_SIZE],
        }
    }
}
