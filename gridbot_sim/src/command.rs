// Movement commands and the cards that carry them.
//
// A `Command` is one programmable robot instruction. Plain commands
// (`Forward`, `Right`, ...) execute directly; interactive commands carry a
// non-empty list of sub-commands and pause the activation phase until an
// external choice arrives (see `sim.rs`, PLAYER_INTERACTION).
//
// `CommandCard` wraps one command and is immutable once created. Cards are
// dealt uniformly at random from `Command::ALL` via the injected `CardRng`.
//
// See also: `player.rs` for the register/hand fields cards sit in,
// `sim.rs` for dispatch in `execute_command`.

use crate::rng::CardRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A programmable robot instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Move one space in the current heading.
    Forward,
    /// Quarter-turn clockwise, no movement.
    Right,
    /// Quarter-turn counterclockwise, no movement.
    Left,
    /// Move two spaces in the current heading, one at a time. Each move is
    /// independently subject to walls, pushing, and pits.
    FastForward,
    /// Interactive: the player chooses `Left` or `Right` when the card
    /// comes up during activation.
    OptionLeftRight,
}

impl Command {
    /// Every dealable command. Random dealing picks uniformly from this
    /// list, interactive commands included.
    pub const ALL: [Command; 5] = [
        Command::Forward,
        Command::Right,
        Command::Left,
        Command::FastForward,
        Command::OptionLeftRight,
    ];

    /// The sub-commands an interactive command offers. Empty for plain
    /// commands.
    pub fn options(self) -> &'static [Command] {
        match self {
            Command::OptionLeftRight => &[Command::Left, Command::Right],
            _ => &[],
        }
    }

    /// A command is interactive iff it offers sub-commands.
    pub fn is_interactive(self) -> bool {
        !self.options().is_empty()
    }

    /// Short label for logs and card faces.
    pub fn display_name(self) -> &'static str {
        match self {
            Command::Forward => "Fwd",
            Command::Right => "Turn Right",
            Command::Left => "Turn Left",
            Command::FastForward => "Fast Fwd",
            Command::OptionLeftRight => "Left OR Right",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A command card. Immutable once created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandCard {
    pub command: Command,
}

impl CommandCard {
    pub fn new(command: Command) -> Self {
        Self { command }
    }

    /// Deal one card uniformly at random.
    pub fn deal(rng: &mut CardRng) -> Self {
        Self::new(Command::ALL[rng.pick(Command::ALL.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_option_cards_are_interactive() {
        for command in Command::ALL {
            assert_eq!(command.is_interactive(), !command.options().is_empty());
        }
        assert!(Command::OptionLeftRight.is_interactive());
        assert!(!Command::Forward.is_interactive());
        assert!(!Command::FastForward.is_interactive());
    }

    #[test]
    fn option_left_right_offers_left_and_right() {
        assert_eq!(
            Command::OptionLeftRight.options(),
            &[Command::Left, Command::Right]
        );
    }

    #[test]
    fn dealing_is_deterministic_per_seed() {
        let mut a = CardRng::new(42);
        let mut b = CardRng::new(42);
        for _ in 0..100 {
            assert_eq!(CommandCard::deal(&mut a), CommandCard::deal(&mut b));
        }
    }

    #[test]
    fn dealing_covers_the_whole_deck() {
        let mut rng = CardRng::new(7);
        let mut seen = [false; Command::ALL.len()];
        for _ in 0..1000 {
            let card = CommandCard::deal(&mut rng);
            let idx = Command::ALL
                .iter()
                .position(|&c| c == card.command)
                .unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s), "every command should be dealt");
    }
}
