// Top-level game state and the simulation engine.
//
// `GameState` is the single source of truth: it owns the board, the
// players, the phase machinery, and the card-dealing PRNG. Every public
// operation runs to completion synchronously and returns the events it
// produced (`StepResult`) — there are no observer callbacks and no
// background execution.
//
// The activation loop works through the registers in lockstep: for each
// register index, every player executes their programmed card in board
// order; when the last player finishes a register, all passive field
// effects resolve (conveyors simultaneously, rotators and checkpoints
// per player), and the next register is revealed. Interactive cards pause
// the loop in `PlayerInteraction` until the current player's choice
// arrives.
//
// Movement is the correctness-critical part. `move_to_space` recurses
// along the push chain, deepest pushed player first, so a failure at any
// depth propagates out before any position has changed at that level or
// above — a failed chain is a no-op, never a half-applied move. A
// move-count guard bounded by the player count terminates pathological
// cyclic layouts.
//
// Game-rule outcomes (blocked moves, reboots, rejected interaction input)
// are never `Err`s: they resolve locally as no-ops or events, at most
// logged. `assert!` guards genuine internal invariants only.
//
// See also: `board.rs` for the grid, `player.rs` for per-player state,
// `effect.rs` for the passive effect kinds, `event.rs` for what
// operations report back.
//
// **Critical constraint: determinism.** All iteration is in board player
// order or `BTreeMap` key order; all randomness comes from the owned
// seeded `CardRng`. Serializing `GameState` and restoring it resumes the
// exact same simulation.

use crate::board::Board;
use crate::command::{Command, CommandCard};
use crate::effect::FieldEffect;
use crate::event::{GameEvent, StepResult};
use crate::player::{CardField, Player, REGISTER_COUNT, SPAWN_HEADING};
use crate::rng::CardRng;
use crate::types::{Heading, Phase, PlayerId, SpaceId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Addresses one card field: a program register or hand slot of a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    pub player: PlayerId,
    pub slot: CardSlot,
}

/// Which kind of card field a `FieldRef` points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardSlot {
    Program(usize),
    Hand(usize),
}

/// A push chain that cannot be completed. Internal to the mover; callers
/// observe a blocked move only as "nothing happened".
struct ImpossibleMove;

/// The complete game: board, players, phase machinery, and PRNG.
///
/// Everything here serializes as a unit; restoring a serialized state
/// reproduces identical subsequent behavior for the same inputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    /// All players, in board order. Players are never removed.
    pub players: Vec<Player>,
    pub phase: Phase,
    /// The register index currently executing (during activation).
    pub step: usize,
    /// Step mode executes one register command per call; continuous mode
    /// runs until activation ends or interaction is required.
    pub step_mode: bool,
    /// The player whose turn it is within the current register.
    pub current_player: PlayerId,
    /// Card-dealing randomness. Seeded at construction, serialized with
    /// the state so a restored game deals the same cards.
    pub rng: CardRng,
    /// The first player to have reached the final checkpoint, if any.
    /// The engine keeps running after a win; this is a signal.
    pub winner: Option<PlayerId>,
}

impl GameState {
    /// Create a game over `board` in the `Initialisation` phase.
    pub fn new(board: Board, seed: u64) -> Self {
        Self {
            board,
            players: Vec::new(),
            phase: Phase::Initialisation,
            step: 0,
            step_mode: false,
            current_player: PlayerId(0),
            rng: CardRng::new(seed),
            winner: None,
        }
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    // -----------------------------------------------------------------------
    // Setup and phase transitions
    // -----------------------------------------------------------------------

    /// Create one player per color at the board's spawn spaces (assigning
    /// default spawns if the board has too few) and start the programming
    /// phase.
    pub fn initialize(&mut self, colors: &[&str]) -> StepResult {
        assert!(
            self.phase == Phase::Initialisation,
            "initialize called twice"
        );
        if self.board.spawn_spaces.len() < colors.len() {
            self.board.set_default_spawns(colors.len());
        }

        let mut events = Vec::new();
        for (i, color) in colors.iter().enumerate() {
            let spawn = self.board.spawn_spaces[i];
            let pid = PlayerId(i as u32);
            let mut player = Player::new(format!("Player {}", i + 1), *color, spawn);
            // Placed through the single occupancy mutator below.
            player.space = SpaceId::DEAD;
            self.players.push(player);
            self.place_player(pid, spawn);
        }
        self.start_programming(&mut events);
        StepResult { events }
    }

    /// Enter the programming phase: respawn rebooting players, clear all
    /// registers, and deal fresh cards into empty hand fields.
    pub fn start_programming_phase(&mut self) -> StepResult {
        let mut events = Vec::new();
        self.start_programming(&mut events);
        StepResult { events }
    }

    fn start_programming(&mut self, events: &mut Vec<GameEvent>) {
        self.set_phase(Phase::Programming, events);
        self.current_player = PlayerId(0);
        self.step = 0;

        for i in 0..self.players.len() {
            if self.players[i].rebooting {
                let pid = PlayerId(i as u32);
                let spawn = self.players[i].spawn_space;
                self.players[i].rebooting = false;
                self.place_player(pid, spawn);
                self.players[i].heading = SPAWN_HEADING;
            }
        }

        let Self { players, rng, .. } = self;
        for player in players.iter_mut() {
            for field in &mut player.program {
                field.card = None;
                field.visible = true;
            }
            for field in &mut player.hand {
                if field.card.is_none() {
                    field.card = Some(CommandCard::deal(rng));
                }
                field.visible = true;
            }
        }
    }

    /// Leave programming: hide all registers, reveal register 0, and enter
    /// the activation phase with player 0 at step 0.
    pub fn finish_programming_phase(&mut self) -> StepResult {
        let mut events = Vec::new();
        if self.phase != Phase::Programming {
            log::debug!("finish_programming_phase ignored in {:?}", self.phase);
            return StepResult { events };
        }
        for player in &mut self.players {
            for field in &mut player.program {
                field.visible = false;
            }
        }
        self.reveal_register(0);
        self.set_phase(Phase::Activation, &mut events);
        self.current_player = PlayerId(0);
        self.step = 0;
        StepResult { events }
    }

    fn reveal_register(&mut self, register: usize) {
        if register < REGISTER_COUNT {
            for player in &mut self.players {
                player.program[register].visible = true;
            }
        }
    }

    fn set_phase(&mut self, phase: Phase, events: &mut Vec<GameEvent>) {
        if self.phase != phase {
            self.phase = phase;
            events.push(GameEvent::PhaseChanged { phase });
        }
    }

    // -----------------------------------------------------------------------
    // Activation loop
    // -----------------------------------------------------------------------

    /// Execute all remaining register commands until activation ends or an
    /// interactive card pauses the game.
    pub fn execute_programs(&mut self) -> StepResult {
        let mut events = Vec::new();
        self.step_mode = false;
        if self.phase == Phase::Activation {
            self.continue_programs(&mut events);
        } else {
            log::debug!("execute_programs ignored in {:?}", self.phase);
        }
        StepResult { events }
    }

    /// Execute exactly one register command (the current player's), then
    /// stop.
    pub fn execute_step(&mut self) -> StepResult {
        let mut events = Vec::new();
        self.step_mode = true;
        if self.phase == Phase::Activation {
            self.continue_programs(&mut events);
        } else {
            log::debug!("execute_step ignored in {:?}", self.phase);
        }
        StepResult { events }
    }

    fn continue_programs(&mut self, events: &mut Vec<GameEvent>) {
        loop {
            self.execute_next_step(events);
            if self.phase != Phase::Activation || self.step_mode {
                break;
            }
        }
    }

    /// Execute the current player's card for the current register and
    /// advance the turn. Interactive cards pause in `PlayerInteraction`
    /// instead of executing.
    fn execute_next_step(&mut self, events: &mut Vec<GameEvent>) {
        assert!(
            self.phase == Phase::Activation,
            "register execution outside the activation phase"
        );
        assert!(
            self.step < REGISTER_COUNT,
            "register index {} out of range",
            self.step
        );

        let pid = self.current_player;
        if self.player(pid).rebooting {
            // Rebooting players skip their turn but still advance it.
            self.finish_command(events);
            return;
        }

        if let Some(card) = self.player(pid).program[self.step].card {
            let command = card.command;
            if command.is_interactive() {
                self.set_phase(Phase::PlayerInteraction, events);
                events.push(GameEvent::AwaitingInteraction {
                    player: pid,
                    options: command.options().to_vec(),
                });
                return;
            }
            self.execute_command(pid, command, events);
        }
        self.finish_command(events);
    }

    /// Advance to the next player; at the end of a register, resolve field
    /// effects and move to the next register, or return to programming
    /// after the last one.
    fn finish_command(&mut self, events: &mut Vec<GameEvent>) {
        let next_player = self.current_player.0 as usize + 1;
        if next_player < self.players.len() {
            self.current_player = PlayerId(next_player as u32);
            return;
        }

        let next_step = self.step + 1;
        if next_step < REGISTER_COUNT {
            self.run_field_effects(events);
            self.reveal_register(next_step);
            self.step = next_step;
            self.current_player = PlayerId(0);
        } else {
            self.start_programming(events);
        }
    }

    fn execute_command(&mut self, pid: PlayerId, command: Command, events: &mut Vec<GameEvent>) {
        match command {
            Command::Forward => {
                let heading = self.player(pid).heading;
                self.forward(pid, heading, events);
            }
            Command::Right => {
                let player = self.player_mut(pid);
                player.heading = player.heading.clockwise();
            }
            Command::Left => {
                let player = self.player_mut(pid);
                player.heading = player.heading.counter_clockwise();
            }
            Command::FastForward => {
                // Two independent moves: the second is attempted even if
                // the first was blocked (walls block, they don't abort).
                let heading = self.player(pid).heading;
                self.forward(pid, heading, events);
                let heading = self.player(pid).heading;
                self.forward(pid, heading, events);
            }
            Command::OptionLeftRight => {
                // Interactive commands never reach direct execution; their
                // chosen option does.
                log::debug!("interactive command {command} dispatched without a choice");
            }
        }
    }

    // -----------------------------------------------------------------------
    // Interactive commands
    // -----------------------------------------------------------------------

    /// The legal choices while paused in `PlayerInteraction`, if paused.
    pub fn interaction_options(&self) -> Option<&'static [Command]> {
        if self.phase != Phase::PlayerInteraction {
            return None;
        }
        let card = self.player(self.current_player).program[self.step].card?;
        Some(card.command.options())
    }

    /// Resolve an interactive card with the chosen sub-command and resume
    /// execution (continuing through further registers unless in step
    /// mode). Rejected as a no-op unless `player` is the current player,
    /// the phase is `PlayerInteraction`, and `option` is one of the active
    /// card's options.
    pub fn execute_command_option_and_continue(
        &mut self,
        player: PlayerId,
        option: Command,
    ) -> StepResult {
        let mut events = Vec::new();
        let legal = player == self.current_player
            && self
                .interaction_options()
                .is_some_and(|options| options.contains(&option));
        if !legal {
            log::debug!("rejected interaction input {option} from {player}");
            return StepResult { events };
        }

        self.set_phase(Phase::Activation, &mut events);
        self.execute_command(player, option, &mut events);
        self.finish_command(&mut events);

        if !self.step_mode && self.phase == Phase::Activation {
            self.continue_programs(&mut events);
        }
        StepResult { events }
    }

    // -----------------------------------------------------------------------
    // Movement
    // -----------------------------------------------------------------------

    /// Move a player one space in `heading`, pushing occupants along the
    /// chain. Blocked moves are silent no-ops; off-grid destinations
    /// reboot.
    pub fn move_forward(&mut self, player: PlayerId, heading: Heading) -> StepResult {
        let mut events = Vec::new();
        self.forward(player, heading, &mut events);
        StepResult { events }
    }

    fn forward(&mut self, pid: PlayerId, heading: Heading, events: &mut Vec<GameEvent>) {
        if self.player(pid).rebooting {
            return;
        }
        let source = self.player(pid).space;
        let destination = self.board.neighbor(source, heading);
        if self
            .move_to_space(pid, source, destination, heading, 1, events)
            .is_err()
        {
            log::debug!("move blocked: {pid} heading {heading}");
        }
    }

    /// Recursive push-chain mover.
    ///
    /// The occupant of `destination` (if any) is pushed to its own
    /// neighbor first; only after the entire deeper chain succeeded does
    /// this level mutate. A failure therefore leaves every position in
    /// the chain unchanged. `move_count` starts at 1 and may not exceed
    /// the player count, which bounds recursion in cyclic wall layouts.
    fn move_to_space(
        &mut self,
        pid: PlayerId,
        source: SpaceId,
        destination: SpaceId,
        heading: Heading,
        move_count: usize,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), ImpossibleMove> {
        // Off the grid or into a pit: the intended outcome is a reboot.
        if destination.is_dead() {
            self.handle_reboot(pid, events);
            return Ok(());
        }

        if self.board.space(source).has_wall(heading)
            || self.board.space(destination).has_wall(heading.opposite())
        {
            return Err(ImpossibleMove);
        }

        if let Some(occupant) = self.board.space(destination).occupant {
            let next_count = move_count + 1;
            if next_count > self.players.len() {
                return Err(ImpossibleMove);
            }
            let pushed_to = self.board.neighbor(destination, heading);
            self.move_to_space(occupant, destination, pushed_to, heading, next_count, events)?;
        }

        self.place_player(pid, destination);
        Ok(())
    }

    /// The single occupancy mutator: moves a player's position and keeps
    /// `Space::occupant` consistent on both ends. The dead space never
    /// tracks an occupant.
    pub fn place_player(&mut self, player: PlayerId, destination: SpaceId) {
        let origin = self.players[player.index()].space;
        if origin == destination {
            return;
        }
        if !origin.is_dead() {
            self.board.space_mut(origin).occupant = None;
        }
        self.players[player.index()].space = destination;
        if !destination.is_dead() {
            debug_assert!(
                self.board.space(destination).occupant.is_none(),
                "two players on one space"
            );
            self.board.space_mut(destination).occupant = Some(player);
        }
    }

    /// Reboot a player: park them on the dead space, clear the registers
    /// they have not executed this round, and discard their whole hand so
    /// the next programming phase deals fresh.
    ///
    /// The clearing index is the current step, plus one if the rebooting
    /// player is also the currently-executing player — their card for this
    /// register already ran.
    fn handle_reboot(&mut self, pid: PlayerId, events: &mut Vec<GameEvent>) {
        self.players[pid.index()].rebooting = true;
        self.place_player(pid, SpaceId::DEAD);

        let from = if pid == self.current_player {
            self.step + 1
        } else {
            self.step
        };
        let player = &mut self.players[pid.index()];
        for field in player.program.iter_mut().skip(from) {
            field.card = None;
        }
        for field in &mut player.hand {
            field.card = None;
            field.visible = true;
        }
        events.push(GameEvent::PlayerRebooted { player: pid });
    }

    // -----------------------------------------------------------------------
    // Passive field effects
    // -----------------------------------------------------------------------

    /// Resolve all passive effects for every occupied space, as happens
    /// once at the end of each register.
    pub fn execute_field_effects(&mut self) -> StepResult {
        let mut events = Vec::new();
        self.run_field_effects(&mut events);
        StepResult { events }
    }

    fn run_field_effects(&mut self, events: &mut Vec<GameEvent>) {
        // Conveyors resolve simultaneously and are collected first; the
        // other effects apply immediately in board player order.
        let mut riders = Vec::new();
        for i in 0..self.players.len() {
            let pid = PlayerId(i as u32);
            let space_id = self.players[i].space;
            if space_id.is_dead() {
                continue;
            }
            let Some(effect) = self.board.space(space_id).effect else {
                continue;
            };
            match effect {
                FieldEffect::Conveyor { .. } => riders.push(pid),
                FieldEffect::Rotator { clockwise } => {
                    let player = &mut self.players[i];
                    player.heading = if clockwise {
                        player.heading.clockwise()
                    } else {
                        player.heading.counter_clockwise()
                    };
                }
                FieldEffect::Checkpoint { number } => {
                    self.touch_checkpoint(pid, space_id, number, events);
                }
            }
        }
        if !riders.is_empty() {
            self.resolve_conveyors(&riders, events);
        }
    }

    /// Two-phase simultaneous conveyor resolution: compute every rider's
    /// intended target, then apply only targets claimed by exactly one
    /// rider. Contested targets cancel — nobody moves onto them this
    /// cycle. Off-grid targets reboot the rider.
    fn resolve_conveyors(&mut self, riders: &[PlayerId], events: &mut Vec<GameEvent>) {
        let mut intents: BTreeMap<SpaceId, Vec<PlayerId>> = BTreeMap::new();

        for &pid in riders {
            let source = self.players[pid.index()].space;
            let Some(FieldEffect::Conveyor { heading }) = self.board.space(source).effect else {
                unreachable!("conveyor rider without a conveyor under them");
            };
            let target = self.board.neighbor(source, heading);
            if target.is_dead() {
                self.handle_reboot(pid, events);
                continue;
            }
            let target_space = self.board.space(target);
            if target_space.has_wall(heading.opposite()) || target_space.occupant.is_some() {
                // Belt blocked this cycle; the rider stays put.
                continue;
            }
            intents.entry(target).or_default().push(pid);
        }

        for (target, claimants) in intents {
            if let [rider] = claimants[..] {
                self.place_player(rider, target);
            }
        }
    }

    /// Sequential checkpoint rule: the counter only advances when this
    /// space's number is the player's next expected checkpoint. Advancing
    /// moves the player's respawn point here; reaching the board's total
    /// signals a win.
    fn touch_checkpoint(
        &mut self,
        pid: PlayerId,
        space_id: SpaceId,
        number: u32,
        events: &mut Vec<GameEvent>,
    ) {
        if number != self.players[pid.index()].checkpoints + 1 {
            return;
        }
        let player = &mut self.players[pid.index()];
        player.checkpoints = number;
        player.spawn_space = space_id;
        events.push(GameEvent::CheckpointReached {
            player: pid,
            number,
        });

        if number == self.board.checkpoint_count {
            if self.winner.is_none() {
                self.winner = Some(pid);
            }
            events.push(GameEvent::PlayerWon { player: pid });
        }
    }

    // -----------------------------------------------------------------------
    // Card fields
    // -----------------------------------------------------------------------

    fn field(&self, field_ref: FieldRef) -> Option<&CardField> {
        let player = self.players.get(field_ref.player.index())?;
        match field_ref.slot {
            CardSlot::Program(i) => player.program.get(i),
            CardSlot::Hand(i) => player.hand.get(i),
        }
    }

    fn field_mut(&mut self, field_ref: FieldRef) -> Option<&mut CardField> {
        let player = self.players.get_mut(field_ref.player.index())?;
        match field_ref.slot {
            CardSlot::Program(i) => player.program.get_mut(i),
            CardSlot::Hand(i) => player.hand.get_mut(i),
        }
    }

    /// Move a card between two fields. Succeeds only if the source holds a
    /// card and the target is empty; anything else is a no-op returning
    /// `false`.
    pub fn move_card(&mut self, source: FieldRef, target: FieldRef) -> bool {
        let Some(card) = self.field(source).and_then(|f| f.card) else {
            return false;
        };
        match self.field(target) {
            Some(field) if field.card.is_none() => {}
            _ => return false,
        }
        if let Some(field) = self.field_mut(target) {
            field.card = Some(card);
        }
        if let Some(field) = self.field_mut(source) {
            field.card = None;
        }
        true
    }

    // -----------------------------------------------------------------------
    // Setup / testing helper
    // -----------------------------------------------------------------------

    /// Move the current player to a free space and pass the turn pointer
    /// on. Not part of normal play; kept for setup and tests.
    pub fn move_current_player_to(&mut self, target: SpaceId) -> bool {
        if target.is_dead() || self.board.space(target).occupant.is_some() {
            return false;
        }
        let pid = self.current_player;
        self.place_player(pid, target);
        let next = (pid.0 as usize + 1) % self.players.len();
        self.current_player = PlayerId(next as u32);
        true
    }
}
