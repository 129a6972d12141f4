// Passive field effects attached to board spaces.
//
// A space carries at most one effect. Effects fire once per register,
// after every player has executed that register's command — see
// `execute_field_effects` in `sim.rs` for the resolution rules, including
// the two-phase simultaneous conveyor resolver.
//
// Adding a new effect kind means adding a variant here; the exhaustive
// match in the resolver then fails to compile until the new kind is
// handled.

use crate::types::Heading;
use serde::{Deserialize, Serialize};

/// A passive effect on a board space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldEffect {
    /// Carries the occupant one space in `heading` during resolution.
    /// Conveyor targets are recomputed every resolution; contested targets
    /// cancel (nobody moves), off-grid targets reboot the rider.
    Conveyor { heading: Heading },
    /// Rotates the occupant a quarter-turn.
    Rotator { clockwise: bool },
    /// Numbered checkpoint. Checkpoints must be reached in numeric order;
    /// reaching the highest number wins the game. A reached checkpoint
    /// becomes the player's new respawn point.
    Checkpoint { number: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_serialization_roundtrip() {
        let effects = [
            FieldEffect::Conveyor {
                heading: Heading::South,
            },
            FieldEffect::Rotator { clockwise: false },
            FieldEffect::Checkpoint { number: 2 },
        ];
        for effect in effects {
            let json = serde_json::to_string(&effect).unwrap();
            let restored: FieldEffect = serde_json::from_str(&json).unwrap();
            assert_eq!(effect, restored);
        }
    }
}
