//! Scoring: the building ledger and the game-end evaluator.
//!
//! Net score = baseline + penalties + sum of floor scores, recomputed on
//! demand so it can never drift from the ledger.

pub mod endgame;
pub mod ledger;

pub use endgame::{determine_winner, evaluate_game_end, GameEndReason, GameOutcome, Winner};
pub use ledger::{BuildingLedger, FloorEntry};
