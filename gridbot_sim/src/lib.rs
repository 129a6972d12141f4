// gridbot_sim — pure Rust simulation library.
//
// This crate contains the whole simulation engine for Gridbot, a
// turn-based robot-racing board game: players program movement cards into
// registers, the registers execute in lockstep across all players, and
// passive board effects (conveyors, rotators, checkpoints) resolve
// between registers. The crate has zero UI or I/O dependencies and runs
// headless; board loaders, persistence encodings, and any presentation
// layer live outside and talk to it through plain data and operations.
//
// Module overview:
// - `sim.rs`:     Top-level `GameState`, the phase state machine, the
//                 register execution loop, push-chain movement, reboots,
//                 and simultaneous field-effect resolution.
// - `board.rs`:   The static grid — spaces, walls, effects, occupancy,
//                 and the dead-space sentinel for off-grid moves.
// - `layout.rs`:  Validated board construction from already-parsed data.
// - `player.rs`:  Per-player state — position, heading, checkpoint
//                 progress, registers, and hand fields.
// - `command.rs`: The command enum, interactive options, command cards.
// - `effect.rs`:  The passive field effect variants.
// - `event.rs`:   Events returned from every engine operation.
// - `rng.rs`:     Seeded SplitMix64 PRNG for card dealing.
// - `types.rs`:   Headings, phases, and the compact arena handles.
//
// **Critical constraint: determinism.** The engine is a pure in-process
// function of its state and inputs: same seed, same board, same command
// sequence — same outcome, on every platform. All randomness comes from
// the owned seeded PRNG; ordered maps keep every iteration stable; the
// entire `GameState` serializes and restores without behavior drift.

pub mod board;
pub mod command;
pub mod effect;
pub mod event;
pub mod layout;
pub mod player;
pub mod rng;
pub mod sim;
pub mod types;

pub use board::{Board, Space};
pub use command::{Command, CommandCard};
pub use effect::FieldEffect;
pub use event::{GameEvent, StepResult};
pub use layout::{BoardLayout, SpaceLayout};
pub use player::{CardField, HAND_SIZE, Player, REGISTER_COUNT};
pub use sim::{CardSlot, FieldRef, GameState};
pub use types::{Heading, Phase, PlayerId, SpaceId};
