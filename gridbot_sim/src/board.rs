// The static board grid: spaces, walls, effects, and the dead-space
// sentinel.
//
// Spaces live in a flat row-major `Vec<Space>` indexed by `SpaceId`. The
// grid's shape is immutable after construction; only wall lists, effects,
// and occupant handles mutate. One dedicated dead space sits outside the
// vector and is what every out-of-bounds lookup resolves to — `space_id`
// never fails and `neighbor` never needs boundary special cases.
//
// Occupancy: each space holds at most one `PlayerId` back-reference. The
// dead space never tracks an occupant, because any number of rebooting
// players may sit on it at once. Consistency between `Space::occupant`
// and `Player::space` is maintained by `place_player` in `sim.rs` alone.
//
// See also: `layout.rs` for validated construction from already-parsed
// board data, `effect.rs` for what a space's effect can be.

use crate::effect::FieldEffect;
use crate::types::{Heading, PlayerId, SpaceId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One grid cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Space {
    /// Grid coordinates, immutable after construction. The dead space
    /// uses (-1, -1), which no grid cell can have.
    pub x: i32,
    pub y: i32,
    /// Wall directions on this cell. Unique, unordered. Walls are
    /// directional per cell — blocking both sides of a boundary takes a
    /// wall on each adjacent cell.
    pub walls: SmallVec<[Heading; 4]>,
    /// The passive effect on this cell, if any. At most one.
    pub effect: Option<FieldEffect>,
    /// The player currently on this cell, if any.
    pub occupant: Option<PlayerId>,
}

impl Space {
    fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            walls: SmallVec::new(),
            effect: None,
            occupant: None,
        }
    }

    /// Whether this cell has a wall facing `heading`.
    pub fn has_wall(&self, heading: Heading) -> bool {
        self.walls.contains(&heading)
    }

    /// Add a wall facing `heading`. Duplicates are ignored.
    pub fn add_wall(&mut self, heading: Heading) {
        if !self.walls.contains(&heading) {
            self.walls.push(heading);
        }
    }
}

/// The game board: a `width` × `height` grid plus the dead-space sentinel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub width: u32,
    pub height: u32,
    /// Row-major: index = x + y * width.
    spaces: Vec<Space>,
    /// The dead space — destination of all off-grid and pit moves.
    dead: Space,
    /// Spawn positions, in player order.
    pub spawn_spaces: Vec<SpaceId>,
    /// Number of checkpoints on this board. Reaching the checkpoint with
    /// this number wins.
    pub checkpoint_count: u32,
}

impl Board {
    /// Create an empty board with no walls, effects, or spawns.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be positive");
        let mut spaces = Vec::with_capacity((width * height) as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                spaces.push(Space::new(x, y));
            }
        }
        Self {
            width,
            height,
            spaces,
            dead: Space::new(-1, -1),
            spawn_spaces: Vec::new(),
            checkpoint_count: 0,
        }
    }

    /// Resolve a coordinate to a space handle. Any coordinate outside
    /// `[0, width) × [0, height)` resolves to the dead-space sentinel.
    pub fn space_id(&self, x: i32, y: i32) -> SpaceId {
        if x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height {
            SpaceId(x as u32 + y as u32 * self.width)
        } else {
            SpaceId::DEAD
        }
    }

    /// Look up a space by handle. The sentinel resolves to the dead space.
    pub fn space(&self, id: SpaceId) -> &Space {
        if id.is_dead() {
            &self.dead
        } else {
            &self.spaces[id.0 as usize]
        }
    }

    pub fn space_mut(&mut self, id: SpaceId) -> &mut Space {
        if id.is_dead() {
            &mut self.dead
        } else {
            &mut self.spaces[id.0 as usize]
        }
    }

    /// Convenience lookup by coordinate.
    pub fn space_at(&self, x: i32, y: i32) -> &Space {
        self.space(self.space_id(x, y))
    }

    pub fn space_at_mut(&mut self, x: i32, y: i32) -> &mut Space {
        self.space_mut(self.space_id(x, y))
    }

    /// The adjacent space handle one step in `heading`. Boundary cases
    /// resolve to the dead-space sentinel via `space_id`; neighbors of the
    /// sentinel are the sentinel itself.
    pub fn neighbor(&self, id: SpaceId, heading: Heading) -> SpaceId {
        if id.is_dead() {
            return SpaceId::DEAD;
        }
        let space = self.space(id);
        let (dx, dy) = heading.offset();
        self.space_id(space.x + dx, space.y + dy)
    }

    /// Assign default spawn spaces (column 0, one row per player) when a
    /// layout provided none.
    pub fn set_default_spawns(&mut self, player_count: usize) {
        self.spawn_spaces.clear();
        for i in 0..player_count {
            let id = self.space_id(0, i as i32);
            assert!(!id.is_dead(), "board too small for {player_count} default spawns");
            self.spawn_spaces.push(id);
        }
    }
}
