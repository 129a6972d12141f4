// End-to-end game scenarios driven through the public engine surface.
//
// Each test plays out a small situation the way a real consumer would:
// program registers, run the activation phase, and check positions,
// headings, and events afterwards. Board setups mirror the classic
// 8x8 test arena.

use gridbot_sim::{
    BoardLayout, Command, FieldEffect, GameEvent, GameState, Heading, Phase, PlayerId,
    REGISTER_COUNT, SpaceLayout,
};
use scenario_tests::{SEED, coords, open_game, place, program_register};

#[test]
fn forward_pushes_the_player_ahead() {
    // Two robots nose to tail, both facing south. The front one is pushed
    // one space and the mover takes its place.
    let mut state = open_game(8, 8, &["red", "green"]);
    place(&mut state, PlayerId(0), 4, 1);
    place(&mut state, PlayerId(1), 4, 2);
    program_register(&mut state, PlayerId(0), 0, Command::Forward);
    state.finish_programming_phase();

    state.execute_step();

    assert_eq!(coords(&state, PlayerId(0)), (4, 2));
    assert_eq!(coords(&state, PlayerId(1)), (4, 3));
}

#[test]
fn walled_push_fails_for_the_whole_chain() {
    // Same setup, but (4,3) has a wall on its north side: the push cannot
    // complete and both robots stay where they were.
    let mut state = open_game(8, 8, &["red", "green"]);
    place(&mut state, PlayerId(0), 4, 1);
    place(&mut state, PlayerId(1), 4, 2);
    state.board.space_at_mut(4, 3).add_wall(Heading::North);
    program_register(&mut state, PlayerId(0), 0, Command::Forward);
    state.finish_programming_phase();

    state.execute_step();

    assert_eq!(coords(&state, PlayerId(0)), (4, 1));
    assert_eq!(coords(&state, PlayerId(1)), (4, 2));
}

#[test]
fn conveyor_carries_the_mover_onward_in_the_same_register() {
    // A robot steps onto a south conveyor; the end-of-register field
    // resolution carries it one space further in the same cycle.
    let mut state = open_game(8, 8, &["red"]);
    place(&mut state, PlayerId(0), 4, 1);
    state.board.space_at_mut(4, 2).effect = Some(FieldEffect::Conveyor {
        heading: Heading::South,
    });
    program_register(&mut state, PlayerId(0), 0, Command::Forward);
    state.finish_programming_phase();

    state.execute_step();

    assert_eq!(coords(&state, PlayerId(0)), (4, 3));
}

#[test]
fn long_push_chain_terminates_and_moves_everyone() {
    // Six robots in an unobstructed line: the push cascades through all
    // of them without looping and each advances exactly one space.
    let colors = ["red", "green", "blue", "orange", "purple", "grey"];
    let mut state = open_game(8, 8, &colors);
    for i in 0..6 {
        place(&mut state, PlayerId(i), 1 + i as i32, 4);
    }

    state.move_forward(PlayerId(0), Heading::East);

    for i in 0..6 {
        assert_eq!(coords(&state, PlayerId(i)), (2 + i as i32, 4));
    }
}

#[test]
fn falling_off_the_board_clears_the_rest_of_the_round() {
    let mut state = open_game(8, 8, &["red", "green"]);
    place(&mut state, PlayerId(0), 4, 7);
    for register in 0..REGISTER_COUNT {
        program_register(&mut state, PlayerId(0), register, Command::Forward);
        program_register(&mut state, PlayerId(1), register, Command::Right);
    }
    state.finish_programming_phase();

    // Register 0: player 0 drives south off the edge.
    let result = state.execute_step();
    assert!(
        result
            .events
            .contains(&GameEvent::PlayerRebooted { player: PlayerId(0) })
    );
    let player = state.player(PlayerId(0));
    assert!(player.rebooting);
    assert!(player.space.is_dead());
    // The executed register keeps its card; everything later is cleared.
    assert!(player.program[0].card.is_some());
    assert!(player.program[1..].iter().all(|f| f.card.is_none()));

    // The rest of the round runs without the rebooting player, then the
    // next programming phase respawns them.
    state.execute_programs();
    assert_eq!(state.phase, Phase::Programming);
    let player = state.player(PlayerId(0));
    assert!(!player.rebooting);
    assert_eq!(player.space, player.spawn_space);
}

#[test]
fn layout_built_game_runs_to_a_win() {
    // A one-checkpoint course straight down from the spawn: Forward twice
    // reaches the checkpoint and wins during field resolution.
    let layout = BoardLayout {
        width: 8,
        height: 8,
        spaces: vec![SpaceLayout {
            x: 0,
            y: 2,
            walls: Vec::new(),
            effect: Some(FieldEffect::Checkpoint { number: 1 }),
        }],
        spawns: vec![(0, 0)],
        checkpoint_count: 1,
    };
    let mut state = GameState::new(layout.build().unwrap(), SEED);
    state.initialize(&["red"]);
    program_register(&mut state, PlayerId(0), 0, Command::Forward);
    program_register(&mut state, PlayerId(0), 1, Command::Forward);
    state.finish_programming_phase();

    let result = state.execute_programs();

    assert_eq!(state.winner, Some(PlayerId(0)));
    assert!(result.events.contains(&GameEvent::CheckpointReached {
        player: PlayerId(0),
        number: 1,
    }));
    assert!(
        result
            .events
            .contains(&GameEvent::PlayerWon { player: PlayerId(0) })
    );
    // The engine keeps running after the win signal.
    assert_eq!(state.phase, Phase::Programming);
    // The checkpoint became the new respawn point.
    assert_eq!(
        state.player(PlayerId(0)).spawn_space,
        state.board.space_id(0, 2)
    );
}

#[test]
fn interactive_card_pauses_and_resumes_mid_program() {
    let mut state = open_game(8, 8, &["red", "green"]);
    place(&mut state, PlayerId(0), 3, 3);
    place(&mut state, PlayerId(1), 6, 6);
    program_register(&mut state, PlayerId(0), 0, Command::OptionLeftRight);
    program_register(&mut state, PlayerId(0), 1, Command::Forward);
    program_register(&mut state, PlayerId(1), 0, Command::Forward);
    state.finish_programming_phase();

    state.execute_programs();
    assert_eq!(state.phase, Phase::PlayerInteraction);
    assert_eq!(
        state.interaction_options(),
        Some(&[Command::Left, Command::Right][..])
    );

    // Turn left (now facing east), then the program resumes on its own:
    // player 1 moves, and player 0's register 1 drives them east.
    state.execute_command_option_and_continue(PlayerId(0), Command::Left);

    assert_eq!(state.player(PlayerId(0)).heading, Heading::East);
    assert_eq!(coords(&state, PlayerId(0)), (4, 3));
    assert_eq!(coords(&state, PlayerId(1)), (6, 7));
    assert_eq!(state.phase, Phase::Programming);
}

#[test]
fn same_seed_and_inputs_reproduce_the_same_game() {
    let run = || {
        let mut state = open_game(8, 8, &["red", "green"]);
        place(&mut state, PlayerId(0), 2, 2);
        place(&mut state, PlayerId(1), 2, 3);
        program_register(&mut state, PlayerId(0), 0, Command::Forward);
        program_register(&mut state, PlayerId(1), 0, Command::FastForward);
        program_register(&mut state, PlayerId(0), 1, Command::Left);
        program_register(&mut state, PlayerId(1), 1, Command::Forward);
        state.finish_programming_phase();
        state.execute_programs();
        state
    };

    assert_eq!(run(), run());
}
