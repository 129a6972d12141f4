// Player-visible events emitted by engine operations.
//
// The engine never notifies observers through callbacks. Every mutating
// operation returns the events it produced in a `StepResult`, and the
// caller (UI, logger, win handler) decides what to do with them. Game-rule
// outcomes that are not errors — reboots, checkpoint progress, a win —
// surface here rather than as `Err` values.
//
// See also: `sim.rs`, where every operation builds its event list.

use crate::command::Command;
use crate::types::{Phase, PlayerId};
use serde::{Deserialize, Serialize};

/// An event produced while executing an engine operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The game phase changed.
    PhaseChanged { phase: Phase },
    /// Activation paused: the current player's card is interactive and one
    /// of `options` must be supplied via
    /// `execute_command_option_and_continue`.
    AwaitingInteraction {
        player: PlayerId,
        options: Vec<Command>,
    },
    /// A player fell off the board or into a pit and is rebooting.
    PlayerRebooted { player: PlayerId },
    /// A player reached their next sequential checkpoint.
    CheckpointReached { player: PlayerId, number: u32 },
    /// A player reached the final checkpoint. The engine keeps running;
    /// acting on the win is the caller's decision.
    PlayerWon { player: PlayerId },
}

/// The result of one engine operation: the events it emitted, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    pub events: Vec<GameEvent>,
}

impl StepResult {
    /// The winner announced during this operation, if any.
    pub fn winner(&self) -> Option<PlayerId> {
        self.events.iter().find_map(|e| match e {
            GameEvent::PlayerWon { player } => Some(*player),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winner_is_extracted_from_events() {
        let result = StepResult {
            events: vec![
                GameEvent::CheckpointReached {
                    player: PlayerId(1),
                    number: 3,
                },
                GameEvent::PlayerWon { player: PlayerId(1) },
            ],
        };
        assert_eq!(result.winner(), Some(PlayerId(1)));
        assert_eq!(StepResult::default().winner(), None);
    }
}
