//! Floor resolution: the pass protocol, the mediator, and finalization.
//!
//! `PassProposal` always finalizes the floor one way or another:
//!
//! - both slots filled (lead passed on a counter): the mediator picks
//!   whichever basket leaves the score closer to zero, ties going to the
//!   lead's own basket; the floor is agreed with `CommittedBy::Auto`
//! - exactly one slot filled (responder declined to counter): the lone
//!   proposal auto-wins
//! - no slot filled: the floor is skipped with no score change
//!
//! In every case control advances to game-end evaluation and then to the
//! next floor that can still take proposals.

use smallvec::{smallvec, SmallVec};

use crate::core::{CommittedBy, FloorStatus, GamePhase, GameState, PlacedCard, Seat};
use crate::scoring::evaluate_game_end;

use super::error::{ActionError, Fault};
use super::{Engine, Event, Outcome};

impl Engine {
    pub(super) fn pass(&self, state: &GameState, seat: Seat) -> Result<Outcome, ActionError> {
        Self::require_playing(state)?;
        Self::require_turn(state, seat)?;

        let floor_no = state.current_floor;
        let lead = self.rules().lead_seat(floor_no);
        let floor = state
            .floor(floor_no)
            .ok_or(Fault::MissingFloor(floor_no))?;

        let mut next = state.clone();
        let mut events: SmallVec<[Event; 4]> = smallvec![Event::ProposalPassed {
            seat,
            floor: floor_no,
        }];

        match (floor.proposal(Seat::A).is_some(), floor.proposal(Seat::B).is_some()) {
            (true, true) => {
                let winner = self.mediate(state, floor_no, lead)?;
                self.finalize_agreed(&mut next, floor_no, winner, CommittedBy::Auto, &mut events)?;
            }
            (true, false) => {
                self.finalize_agreed(
                    &mut next,
                    floor_no,
                    Seat::A,
                    CommittedBy::from_seat(Seat::A),
                    &mut events,
                )?;
            }
            (false, true) => {
                self.finalize_agreed(
                    &mut next,
                    floor_no,
                    Seat::B,
                    CommittedBy::from_seat(Seat::B),
                    &mut events,
                )?;
            }
            (false, false) => {
                Self::finalize_skipped(&mut next, floor_no, &mut events)?;
            }
        }

        self.advance_after_finalize(&mut next, &mut events)?;

        Ok(Outcome {
            state: next,
            events,
        })
    }

    /// Pick the basket whose post-application net score is closer to zero.
    /// Ties favor the lead's own basket.
    fn mediate(&self, state: &GameState, floor_no: u8, lead: Seat) -> Result<Seat, Fault> {
        let floor = state
            .floor(floor_no)
            .ok_or(Fault::MissingFloor(floor_no))?;
        let net = state.ledger.net_score();

        let mut distance = |seat: Seat| -> Result<i64, Fault> {
            match floor.proposal(seat) {
                Some(basket) => {
                    let (_, score) = self.basket_totals(basket)?;
                    Ok((net + score).abs())
                }
                None => Ok(i64::MAX),
            }
        };

        let lead_distance = distance(lead)?;
        let responder_distance = distance(lead.other())?;

        if responder_distance < lead_distance {
            Ok(lead.other())
        } else {
            Ok(lead)
        }
    }

    /// Agree a floor on the winning seat's basket: place the cards, credit
    /// the ledger, return the losing basket to its owner's hand, and clear
    /// the proposal slots.
    pub(super) fn finalize_agreed(
        &self,
        state: &mut GameState,
        floor_no: u8,
        winner: Seat,
        committed_by: CommittedBy,
        events: &mut SmallVec<[Event; 4]>,
    ) -> Result<(), ActionError> {
        let (winner_basket, loser_basket) = {
            let floor = state
                .floor_mut(floor_no)
                .ok_or(Fault::MissingFloor(floor_no))?;
            let winner_basket = floor
                .take_proposal(winner)
                .ok_or(Fault::MissingFloor(floor_no))?;
            let loser_basket = floor.take_proposal(winner.other());
            (winner_basket, loser_basket)
        };

        if let Some(basket) = loser_basket {
            let hand = &mut state.player_mut(winner.other()).hand;
            for card in basket {
                hand.push_back(card);
            }
        }

        let (footprint, score) = self.basket_totals(&winner_basket)?;
        state.ledger.place(floor_no, footprint, score);

        let floor = state
            .floor_mut(floor_no)
            .ok_or(Fault::MissingFloor(floor_no))?;
        floor.status = FloorStatus::Agreed;
        floor.committed_by = committed_by;
        floor.placed_by = Some(winner);
        floor.placed = winner_basket
            .into_iter()
            .map(|card| {
                let units = card.count;
                PlacedCard { card, units }
            })
            .collect();

        events.push(Event::FloorFinalized {
            floor: floor_no,
            status: FloorStatus::Agreed,
            committed_by,
            score_after: state.ledger.net_score(),
        });
        Ok(())
    }

    fn finalize_skipped(
        state: &mut GameState,
        floor_no: u8,
        events: &mut SmallVec<[Event; 4]>,
    ) -> Result<(), Fault> {
        let score_after = state.ledger.net_score();
        let floor = state
            .floor_mut(floor_no)
            .ok_or(Fault::MissingFloor(floor_no))?;
        floor.status = FloorStatus::Skipped;
        floor.committed_by = CommittedBy::None;
        floor.proposal_a = None;
        floor.proposal_b = None;

        events.push(Event::FloorFinalized {
            floor: floor_no,
            status: FloorStatus::Skipped,
            committed_by: CommittedBy::None,
            score_after,
        });
        Ok(())
    }

    /// After a floor is finalized: evaluate game end, otherwise move to the
    /// next floor that can still take proposals (floors re-finalized after a
    /// recall rewind are skipped over) and start its lead's turn.
    pub(super) fn advance_after_finalize(
        &self,
        state: &mut GameState,
        events: &mut SmallVec<[Event; 4]>,
    ) -> Result<(), ActionError> {
        let max = self.rules().max_stories;
        state.current_floor += 1;
        while state.current_floor <= max {
            let floor = state
                .floor(state.current_floor)
                .ok_or(Fault::MissingFloor(state.current_floor))?;
            if floor.is_open() {
                break;
            }
            state.current_floor += 1;
        }

        if let Some(outcome) = evaluate_game_end(state, self.catalog(), self.rules()) {
            state.phase = GamePhase::GameOver;
            state.outcome = Some(outcome);
            events.push(Event::GameOver {
                reason: outcome.reason,
                winner: outcome.winner,
                final_score: outcome.final_score,
            });
        } else {
            let lead = self.rules().lead_seat(state.current_floor);
            state.turn = lead;
            events.push(Event::TurnStarted {
                seat: lead,
                floor: state.current_floor,
            });
        }
        Ok(())
    }
}
