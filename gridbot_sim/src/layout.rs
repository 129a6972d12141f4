// Validated board construction from already-parsed layout data.
//
// The engine does not read files. External board loaders (whatever their
// format) parse into `BoardLayout` — plain serde-friendly data — and call
// `build()`, which validates coordinates and checkpoint numbering and
// produces a `Board`. This keeps every file-format concern outside the
// crate while still giving loaders one schema to target.
//
// Validation failures return `Err(String)`: layouts come from outside the
// engine, so a bad one is a caller error, not an internal defect.

use crate::board::Board;
use crate::effect::FieldEffect;
use crate::types::Heading;
use serde::{Deserialize, Serialize};

/// Layout data for one space that differs from the empty default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpaceLayout {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub walls: Vec<Heading>,
    #[serde(default)]
    pub effect: Option<FieldEffect>,
}

/// A complete board description, as produced by an external loader.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub width: u32,
    pub height: u32,
    /// Spaces with walls or effects. Unlisted spaces are empty.
    #[serde(default)]
    pub spaces: Vec<SpaceLayout>,
    /// Spawn coordinates in player order. May be empty; `initialize` then
    /// assigns defaults.
    #[serde(default)]
    pub spawns: Vec<(i32, i32)>,
    /// Total number of checkpoints. Reaching this number wins.
    #[serde(default)]
    pub checkpoint_count: u32,
}

impl BoardLayout {
    /// Validate the layout and build a `Board` from it.
    pub fn build(&self) -> Result<Board, String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "board dimensions must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        let mut board = Board::new(self.width, self.height);
        board.checkpoint_count = self.checkpoint_count;

        for space_layout in &self.spaces {
            let id = board.space_id(space_layout.x, space_layout.y);
            if id.is_dead() {
                return Err(format!(
                    "space ({}, {}) is outside the {}x{} grid",
                    space_layout.x, space_layout.y, self.width, self.height
                ));
            }
            if let Some(FieldEffect::Checkpoint { number }) = space_layout.effect {
                if number == 0 || number > self.checkpoint_count {
                    return Err(format!(
                        "checkpoint number {number} outside 1..={}",
                        self.checkpoint_count
                    ));
                }
            }
            let space = board.space_mut(id);
            for &wall in &space_layout.walls {
                space.add_wall(wall);
            }
            space.effect = space_layout.effect;
        }

        for &(x, y) in &self.spawns {
            let id = board.space_id(x, y);
            if id.is_dead() {
                return Err(format!("spawn ({x}, {y}) is outside the grid"));
            }
            board.spawn_spaces.push(id);
        }

        Ok(board)
    }
}
