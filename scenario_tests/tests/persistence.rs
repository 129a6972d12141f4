// Save/restore round-trips.
//
// The whole `GameState` — phase, step, step mode, current player, every
// player's position/heading/progress and the contents and visibility of
// every register and hand field, plus the dealing PRNG — serializes as
// one unit. Restoring it must reproduce identical subsequent behavior,
// through both a human-readable encoding (JSON) and a compact binary one
// (bincode); the encoding choice belongs to the caller, not the engine.

use gridbot_sim::{Command, GameState, Phase, PlayerId, REGISTER_COUNT};
use scenario_tests::{coords, open_game, place, program_register};

fn json_roundtrip(state: &GameState) -> GameState {
    let json = serde_json::to_string(state).unwrap();
    serde_json::from_str(&json).unwrap()
}

fn bincode_roundtrip(state: &GameState) -> GameState {
    let bytes = bincode::serialize(state).unwrap();
    bincode::deserialize(&bytes).unwrap()
}

#[test]
fn fresh_game_roundtrips_unchanged() {
    let state = open_game(8, 8, &["red", "green", "blue"]);
    assert_eq!(state, json_roundtrip(&state));
    assert_eq!(state, bincode_roundtrip(&state));
}

#[test]
fn restored_game_plays_on_identically() {
    let mut state = open_game(8, 8, &["red", "green"]);
    place(&mut state, PlayerId(0), 4, 1);
    place(&mut state, PlayerId(1), 4, 2);
    for register in 0..REGISTER_COUNT {
        program_register(&mut state, PlayerId(0), register, Command::Forward);
        program_register(&mut state, PlayerId(1), register, Command::Left);
    }
    state.finish_programming_phase();
    // Stop partway through the round so phase, step, and current player
    // are all mid-flight.
    state.execute_step();
    state.execute_step();
    state.execute_step();

    let mut restored = json_roundtrip(&state);
    assert_eq!(state, restored);

    state.execute_programs();
    restored.execute_programs();
    assert_eq!(state, restored);
    assert_eq!(coords(&state, PlayerId(0)), coords(&restored, PlayerId(0)));
}

#[test]
fn interaction_pause_survives_a_save() {
    let mut state = open_game(8, 8, &["red", "green"]);
    program_register(&mut state, PlayerId(0), 0, Command::OptionLeftRight);
    state.finish_programming_phase();
    state.execute_programs();
    assert_eq!(state.phase, Phase::PlayerInteraction);

    let mut restored = bincode_roundtrip(&state);
    assert_eq!(
        restored.interaction_options(),
        Some(&[Command::Left, Command::Right][..])
    );

    state.execute_command_option_and_continue(PlayerId(0), Command::Right);
    restored.execute_command_option_and_continue(PlayerId(0), Command::Right);
    assert_eq!(state, restored);
}

#[test]
fn restored_game_deals_the_same_cards() {
    // The PRNG state travels with the save: the next programming phase
    // deals identical hands on both sides.
    let mut state = open_game(8, 8, &["red", "green"]);
    for player in &mut state.players {
        for field in &mut player.hand {
            field.card = None;
        }
    }
    let mut restored = json_roundtrip(&state);

    state.start_programming_phase();
    restored.start_programming_phase();
    assert_eq!(state, restored);
    assert!(
        state
            .player(PlayerId(0))
            .hand
            .iter()
            .all(|f| f.card.is_some())
    );
}
