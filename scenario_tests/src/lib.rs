// Shared helpers for the end-to-end scenario tests.
//
// The tests in `tests/` exercise the engine exactly as an external
// consumer would: build a board (directly or through `BoardLayout`),
// initialize a game, program registers, and drive the activation phase
// through the public operations. The only test-specific code here is
// setup sugar.

use gridbot_sim::{Board, Command, CommandCard, GameState, PlayerId};

/// Seed used by every scenario unless the test varies it on purpose.
pub const SEED: u64 = 42;

/// A game on an empty `width` x `height` board with one player per
/// color, initialized and left in the programming phase.
pub fn open_game(width: u32, height: u32, colors: &[&str]) -> GameState {
    let mut state = GameState::new(Board::new(width, height), SEED);
    state.initialize(colors);
    state
}

/// Put a command card into one of a player's program registers.
pub fn program_register(
    state: &mut GameState,
    player: PlayerId,
    register: usize,
    command: Command,
) {
    state.player_mut(player).program[register].card = Some(CommandCard::new(command));
}

/// Place a player on a grid coordinate (test setup only).
pub fn place(state: &mut GameState, player: PlayerId, x: i32, y: i32) {
    let id = state.board.space_id(x, y);
    state.place_player(player, id);
}

/// A player's current grid coordinates.
pub fn coords(state: &GameState, player: PlayerId) -> (i32, i32) {
    let space = state.board.space(state.player(player).space);
    (space.x, space.y)
}
