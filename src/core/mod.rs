//! Core types: seats, players, rules, RNG, and the canonical game state.
//!
//! These are the building blocks the engine transitions over. Nothing here
//! performs I/O or reads the clock.

pub mod rng;
pub mod rules;
pub mod seat;
pub mod state;

pub use rng::{GameRng, GameRngState};
pub use rules::GameRules;
pub use seat::{ControllerKind, Player, Role, Seat};
pub use state::{Basket, CommittedBy, Floor, FloorStatus, GamePhase, GameState, PlacedCard};
