//! # tower-accord
//!
//! A two-player negotiation game engine: two sides with opposed interests
//! build a tower together, one floor at a time, by proposing, countering,
//! and accepting card placements.
//!
//! ## Design Principles
//!
//! 1. **Pure Engine**: `Engine::handle_action(state, action)` is a pure
//!    transition function. No clocks, no I/O, no hidden randomness; the one
//!    shuffle is seeded by the `StartGame` action itself.
//!
//! 2. **Rejection Is Not Mutation**: an invalid action returns the input
//!    state unchanged plus exactly one `Rejected` event. Callers retry or
//!    ignore; they never repair state.
//!
//! 3. **Persistent Data Structures**: `GameState` clones in O(1) via `im`,
//!    so snapshots for AI evaluation and rollback are free.
//!
//! ## Modules
//!
//! - `catalog`: Card definitions, floor placement rules, the deck recipe
//! - `core`: Seats, roles, rules constants, floors, game state, RNG
//! - `scoring`: The building ledger and game-end evaluation
//! - `engine`: The action/event state machine and negotiation resolution
//! - `ai`: The decision procedure and pluggable strategies
//! - `orchestrator`: Timers, AI scheduling, and event fan-out

pub mod ai;
pub mod catalog;
pub mod core;
pub mod engine;
pub mod orchestrator;
pub mod scoring;

// Re-export commonly used types
pub use crate::catalog::{
    Catalog, CardCategory, CardDefinition, CardId, CardInstance, FloorRule, InstanceId,
};

pub use crate::core::{
    Basket, CommittedBy, ControllerKind, Floor, FloorStatus, GamePhase, GameRng, GameRngState,
    GameRules, GameState, PlacedCard, Player, Role, Seat,
};

pub use crate::scoring::{
    BuildingLedger, FloorEntry, GameEndReason, GameOutcome, Winner,
};

pub use crate::engine::{Action, Engine, Event, Outcome};

pub use crate::ai::{AiContext, BalancedStrategy, EagerStrategy, Intent, Strategy};

pub use crate::orchestrator::{EventSink, Orchestrator, OrchestratorConfig};
