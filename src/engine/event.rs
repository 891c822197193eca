//! The closed set of outbound events.
//!
//! Every transition describes its effects as events. The orchestrator reacts
//! to them (arming timers, scheduling the AI) and re-emits them to external
//! subscribers; the engine never depends on a subscriber's behavior.

use serde::Serialize;

use crate::catalog::CardId;
use crate::core::{CommittedBy, FloorStatus, Role, Seat};
use crate::scoring::{GameEndReason, Winner};

/// An event produced by one engine transition.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Event {
    GameStarted {
        human_role: Role,
        lead: Seat,
    },

    GameReset,

    /// A new turn holder, and the floor they act on.
    TurnStarted {
        seat: Seat,
        floor: u8,
    },

    ProposalMade {
        seat: Seat,
        floor: u8,
        card: CardId,
    },

    CounterMade {
        seat: Seat,
        floor: u8,
        card: CardId,
    },

    ProposalAccepted {
        seat: Seat,
        floor: u8,
    },

    ProposalPassed {
        seat: Seat,
        floor: u8,
    },

    /// A floor reached a terminal negotiation state.
    FloorFinalized {
        floor: u8,
        status: FloorStatus,
        committed_by: CommittedBy,
        score_after: i64,
    },

    CardDrawn {
        seat: Seat,
        card: CardId,
        deck_remaining: usize,
    },

    RecallUsed {
        seat: Seat,
        floor: u8,
        penalty: i64,
        score_after: i64,
    },

    GameOver {
        reason: GameEndReason,
        winner: Winner,
        final_score: i64,
    },

    /// A precondition failed; the state was returned unchanged.
    Rejected {
        code: &'static str,
        reason: String,
    },

    /// A post-validation invariant failed; non-retriable.
    Fault {
        detail: String,
    },
}

impl Event {
    /// Stable name for logging and telemetry routing.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Event::GameStarted { .. } => "game_started",
            Event::GameReset => "game_reset",
            Event::TurnStarted { .. } => "turn_started",
            Event::ProposalMade { .. } => "proposal_made",
            Event::CounterMade { .. } => "counter_made",
            Event::ProposalAccepted { .. } => "proposal_accepted",
            Event::ProposalPassed { .. } => "proposal_passed",
            Event::FloorFinalized { .. } => "floor_finalized",
            Event::CardDrawn { .. } => "card_drawn",
            Event::RecallUsed { .. } => "recall_used",
            Event::GameOver { .. } => "game_over",
            Event::Rejected { .. } => "rejected",
            Event::Fault { .. } => "fault",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind() {
        let event = Event::TurnStarted {
            seat: Seat::A,
            floor: 1,
        };
        assert_eq!(event.kind(), "turn_started");
        assert_eq!(Event::GameReset.kind(), "game_reset");
    }

    #[test]
    fn test_event_serializes_for_telemetry() {
        let event = Event::FloorFinalized {
            floor: 2,
            status: FloorStatus::Agreed,
            committed_by: CommittedBy::PlayerA,
            score_after: -8,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("FloorFinalized"));
        assert!(json.contains("-8"));
    }
}
