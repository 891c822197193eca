//! The closed set of inbound intents.
//!
//! Each action carries the minimal identifiers the engine needs to validate
//! it: the acting seat plus a card instance or floor number where relevant.
//! `StartGame` also carries the shuffle seed, so that the transition function
//! stays referentially pure.

use serde::{Deserialize, Serialize};

use crate::catalog::InstanceId;
use crate::core::{Role, Seat};

/// An intent submitted to the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Start (or restart) a game. Seat A is the human and takes
    /// `human_role`; seat B is the AI with the opposite role.
    StartGame { human_role: Role, seed: u64 },

    /// Discard the current game and return to the title phase.
    ResetGame,

    /// Lead player opens the current floor with a card from hand.
    ProposeCard { seat: Seat, card: InstanceId },

    /// Responder answers a standing proposal with a card from hand.
    CounterPropose { seat: Seat, card: InstanceId },

    /// Accept the other side's standing proposal.
    AcceptProposal { seat: Seat },

    /// Decline to (counter-)propose; always finalizes the floor.
    PassProposal { seat: Seat },

    /// Spend a recall token to reopen a previously agreed floor.
    UseRecall { seat: Seat, floor: u8 },

    /// Draw one card from the shared deck.
    DrawCard { seat: Seat },
}

impl Action {
    /// The acting seat, if the action names one.
    #[must_use]
    pub fn seat(&self) -> Option<Seat> {
        match self {
            Action::StartGame { .. } | Action::ResetGame => None,
            Action::ProposeCard { seat, .. }
            | Action::CounterPropose { seat, .. }
            | Action::AcceptProposal { seat }
            | Action::PassProposal { seat }
            | Action::UseRecall { seat, .. }
            | Action::DrawCard { seat } => Some(*seat),
        }
    }

    /// Stable name for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Action::StartGame { .. } => "start_game",
            Action::ResetGame => "reset_game",
            Action::ProposeCard { .. } => "propose_card",
            Action::CounterPropose { .. } => "counter_propose",
            Action::AcceptProposal { .. } => "accept_proposal",
            Action::PassProposal { .. } => "pass_proposal",
            Action::UseRecall { .. } => "use_recall",
            Action::DrawCard { .. } => "draw_card",
        }
    }
}
