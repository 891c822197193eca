//! Rejections and faults.
//!
//! A `Rejection` is a precondition failure: always recoverable, the engine
//! returns the prior state unchanged plus one `Rejected` event. A `Fault` is
//! a post-validation lookup failure - a defect, not a player mistake - and
//! the orchestrator treats it as non-retriable.
//!
//! Neither ever crosses the engine boundary as a Rust error; both are
//! folded into events by `handle_action`.

use thiserror::Error;

use crate::catalog::{CardId, InstanceId};
use crate::core::Seat;

/// A precondition that failed validation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no game is in progress")]
    NotPlaying,

    #[error("{seat} acted out of turn")]
    OutOfTurn { seat: Seat },

    #[error("{seat} is not the lead player for floor {floor}")]
    NotLeadPlayer { seat: Seat, floor: u8 },

    #[error("{seat} is not the responder for floor {floor}")]
    NotResponder { seat: Seat, floor: u8 },

    #[error("{seat} already has a standing proposal on floor {floor}")]
    ProposalAlreadyMade { seat: Seat, floor: u8 },

    #[error("there is no opposing proposal on floor {floor} to counter")]
    NothingToCounter { floor: u8 },

    #[error("no proposal on floor {floor} is acceptable by {seat}")]
    NothingToAccept { seat: Seat, floor: u8 },

    #[error("card {card} is not in {seat}'s hand")]
    CardNotInHand { seat: Seat, card: InstanceId },

    #[error("card {card} may not be placed on floor {floor}")]
    CardNotAllowedOnFloor { card: InstanceId, floor: u8 },

    #[error("{seat} has no recall tokens left")]
    NoRecallTokens { seat: Seat },

    #[error("floor {floor} does not exist")]
    UnknownFloor { floor: u8 },

    #[error("floor {floor} is not below the floor in play")]
    FloorNotBehind { floor: u8 },

    #[error("floor {floor} is not agreed, so it cannot be recalled")]
    FloorNotAgreed { floor: u8 },

    #[error("floor {floor} is at or above the recall cutoff {cutoff}")]
    RecallBeyondCutoff { floor: u8, cutoff: u8 },

    #[error("the deck is empty")]
    DeckEmpty,

    #[error("{seat}'s hand is full")]
    HandFull { seat: Seat },
}

impl Rejection {
    /// Stable machine-readable code, used in `Event::Rejected` and asserted
    /// on by tests.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::NotPlaying => "not_playing",
            Rejection::OutOfTurn { .. } => "out_of_turn",
            Rejection::NotLeadPlayer { .. } => "not_lead_player",
            Rejection::NotResponder { .. } => "not_responder",
            Rejection::ProposalAlreadyMade { .. } => "proposal_already_made",
            Rejection::NothingToCounter { .. } => "nothing_to_counter",
            Rejection::NothingToAccept { .. } => "nothing_to_accept",
            Rejection::CardNotInHand { .. } => "card_not_in_hand",
            Rejection::CardNotAllowedOnFloor { .. } => "card_not_allowed_on_floor",
            Rejection::NoRecallTokens { .. } => "no_recall_tokens",
            Rejection::UnknownFloor { .. } => "unknown_floor",
            Rejection::FloorNotBehind { .. } => "floor_not_behind",
            Rejection::FloorNotAgreed { .. } => "floor_not_agreed",
            Rejection::RecallBeyondCutoff { .. } => "recall_beyond_cutoff",
            Rejection::DeckEmpty => "deck_empty",
            Rejection::HandFull { .. } => "hand_full",
        }
    }
}

/// A post-validation invariant failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("floor {0} missing after validation")]
    MissingFloor(u8),

    #[error("card definition {0} missing from catalog")]
    MissingDefinition(CardId),

    #[error("agreed floor {0} has no ledger entry")]
    MissingLedgerEntry(u8),

    #[error("agreed floor {0} records no placing side")]
    MissingPlacer(u8),
}

/// Internal error type for transition helpers; `handle_action` folds both
/// arms into events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ActionError {
    Reject(Rejection),
    Fault(Fault),
}

impl From<Rejection> for ActionError {
    fn from(r: Rejection) -> Self {
        ActionError::Reject(r)
    }
}

impl From<Fault> for ActionError {
    fn from(f: Fault) -> Self {
        ActionError::Fault(f)
    }
}
