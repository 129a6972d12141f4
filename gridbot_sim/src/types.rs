// Core types shared across the simulation.
//
// Defines the compass headings, the game phase enum, and the compact
// arena handles (`SpaceId`, `PlayerId`) used everywhere instead of
// reference cycles: spaces and players live in flat owned collections on
// `Board` / `GameState` and point at each other by index.
//
// See also: `board.rs` for the grid the handles index into, `sim.rs` for
// the phase state machine that drives `Phase` transitions.
//
// **Critical constraint: determinism.** All types here have a total order
// (`Ord`) so they can key `BTreeMap`s and iterate deterministically.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Headings
// ---------------------------------------------------------------------------

/// A compass heading on the grid.
///
/// The grid uses screen-space rows: `North` is toward row 0 (−y), `South`
/// toward the last row (+y). Robots face a heading and move along it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    /// The heading one quarter-turn clockwise.
    pub fn clockwise(self) -> Self {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }

    /// The heading one quarter-turn counterclockwise.
    pub fn counter_clockwise(self) -> Self {
        match self {
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
            Heading::East => Heading::North,
        }
    }

    /// The opposite heading.
    pub fn opposite(self) -> Self {
        self.clockwise().clockwise()
    }

    /// The (dx, dy) grid offset of one step in this heading.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Heading::North => (0, -1),
            Heading::East => (1, 0),
            Heading::South => (0, 1),
            Heading::West => (-1, 0),
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Heading::North => "north",
            Heading::East => "east",
            Heading::South => "south",
            Heading::West => "west",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Game phase
// ---------------------------------------------------------------------------

/// The phase the game is currently in.
///
/// `Initialisation` only exists between construction and `initialize()`.
/// The running game alternates `Programming` ↔ `Activation`, detouring
/// through `PlayerInteraction` whenever an interactive card must be
/// resolved by an external choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Initialisation,
    Programming,
    Activation,
    PlayerInteraction,
}

// ---------------------------------------------------------------------------
// Arena handles — simple integers, not pointers
// ---------------------------------------------------------------------------

/// Handle to a space on the board: an index into the board's flat space
/// vector, or the reserved dead-space sentinel.
///
/// The sentinel (`SpaceId::DEAD`) is the destination for every off-grid
/// or pit move. It resolves to a dedicated space stored outside the grid,
/// so callers can treat it uniformly (query walls, effect) without ever
/// reaching an addressable grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpaceId(pub u32);

impl SpaceId {
    /// The dead-space sentinel: out-of-bounds and pit destinations.
    pub const DEAD: SpaceId = SpaceId(u32::MAX);

    /// Whether this handle is the dead-space sentinel.
    pub fn is_dead(self) -> bool {
        self == Self::DEAD
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dead() {
            write!(f, "SpaceId(dead)")
        } else {
            write!(f, "SpaceId({})", self.0)
        }
    }
}

/// Handle to a player: an index into the game state's player vector.
/// Players are never removed, so handles stay valid for the whole game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}
