//! The game engine: a pure state-transition function.
//!
//! `Engine::handle_action(state, action)` returns a successor state plus the
//! events describing what happened. It never panics and never returns a Rust
//! error across the boundary: invalid input yields the *unchanged* input
//! state plus exactly one `Rejected` event; a post-validation invariant
//! failure yields the unchanged state plus one `Fault` event.
//!
//! The function is referentially pure. No I/O, no clock, no randomness
//! beyond the seed carried by `StartGame` - identical `(state, action)`
//! always produces identical output.

pub mod action;
pub mod error;
pub mod event;
mod negotiation;

pub use action::Action;
pub use error::{Fault, Rejection};
pub use event::Event;

use im::Vector;
use smallvec::{smallvec, SmallVec};

use crate::catalog::{CardDefinition, CardInstance, Catalog, InstanceId};
use crate::core::{
    Basket, ControllerKind, Floor, FloorStatus, GamePhase, GameRng, GameRules, GameState, Player,
    Role, Seat,
};
use crate::scoring::BuildingLedger;
use error::ActionError;

/// Result of one transition: the successor state and its events.
#[derive(Clone, Debug)]
pub struct Outcome {
    pub state: GameState,
    pub events: SmallVec<[Event; 4]>,
}

/// The negotiation engine. Holds the immutable card catalog and rules;
/// all mutable state lives in the `GameState` values it transitions.
#[derive(Clone, Debug)]
pub struct Engine {
    catalog: Catalog,
    rules: GameRules,
}

impl Engine {
    /// Create an engine over a catalog and rule set.
    #[must_use]
    pub fn new(catalog: Catalog, rules: GameRules) -> Self {
        Self { catalog, rules }
    }

    /// The card catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The rule constants.
    #[must_use]
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Process one action against a state snapshot.
    pub fn handle_action(&self, state: &GameState, action: &Action) -> Outcome {
        let result = match action {
            Action::StartGame { human_role, seed } => Ok(self.start_game(*human_role, *seed)),
            Action::ResetGame => Ok(Self::reset_game()),
            Action::ProposeCard { seat, card } => self.propose(state, *seat, *card),
            Action::CounterPropose { seat, card } => self.counter(state, *seat, *card),
            Action::AcceptProposal { seat } => self.accept(state, *seat),
            Action::PassProposal { seat } => self.pass(state, *seat),
            Action::UseRecall { seat, floor } => self.recall(state, *seat, *floor),
            Action::DrawCard { seat } => self.draw(state, *seat),
        };

        match result {
            Ok(outcome) => outcome,
            Err(ActionError::Reject(rejection)) => Outcome {
                state: state.clone(),
                events: smallvec![Event::Rejected {
                    code: rejection.code(),
                    reason: rejection.to_string(),
                }],
            },
            Err(ActionError::Fault(fault)) => Outcome {
                state: state.clone(),
                events: smallvec![Event::Fault {
                    detail: fault.to_string(),
                }],
            },
        }
    }

    // === Transitions ===

    /// `StartGame` is valid in any phase; from Playing it acts as a
    /// reset-then-start.
    fn start_game(&self, human_role: Role, seed: u64) -> Outcome {
        let rules = &self.rules;
        let mut state = GameState::title();
        state.rng = GameRng::new(seed);
        state.ledger = BuildingLedger::new(rules.baseline_score);

        state.players = [
            Player::new(
                Seat::A,
                "Player",
                human_role,
                ControllerKind::Human,
                rules.recall_tokens,
            ),
            Player::new(
                Seat::B,
                "Opponent",
                human_role.other(),
                ControllerKind::Ai,
                rules.recall_tokens,
            ),
        ];

        // Shared deck from the catalog's recipe, shuffled once.
        let mut deck = Vec::with_capacity(self.catalog.deck_stack_count());
        for entry in self.catalog.deck_recipe() {
            for _ in 0..entry.stacks {
                let id = state.alloc_instance();
                deck.push(CardInstance::stack(id, entry.card, entry.per_stack));
            }
        }
        state.rng.shuffle(&mut deck);
        state.deck = Vector::from(deck);

        state.floors = (1..=rules.max_stories).map(Floor::new).collect();

        // Deal alternating so neither hand depends on the other's size.
        for _ in 0..rules.starting_hand {
            for seat in Seat::both() {
                if let Some(card) = state.deck.pop_back() {
                    state.player_mut(seat).hand.push_back(card);
                }
            }
        }

        state.current_floor = 1;
        let lead = rules.lead_seat(1);
        state.turn = lead;
        state.phase = GamePhase::Playing;

        Outcome {
            state,
            events: smallvec![
                Event::GameStarted { human_role, lead },
                Event::TurnStarted { seat: lead, floor: 1 },
            ],
        }
    }

    fn reset_game() -> Outcome {
        Outcome {
            state: GameState::title(),
            events: smallvec![Event::GameReset],
        }
    }

    fn propose(
        &self,
        state: &GameState,
        seat: Seat,
        card: InstanceId,
    ) -> Result<Outcome, ActionError> {
        Self::require_playing(state)?;
        Self::require_turn(state, seat)?;

        let floor_no = state.current_floor;
        if seat != self.rules.lead_seat(floor_no) {
            return Err(Rejection::NotLeadPlayer {
                seat,
                floor: floor_no,
            }
            .into());
        }

        let floor = state
            .floor(floor_no)
            .ok_or(Fault::MissingFloor(floor_no))?;
        debug_assert!(floor.is_open(), "floor in play must be open");
        if floor.proposal(seat).is_some() {
            return Err(Rejection::ProposalAlreadyMade {
                seat,
                floor: floor_no,
            }
            .into());
        }

        let pos = self.validate_hand_card(state, seat, card, floor_no)?;

        let mut next = state.clone();
        let instance = next.player_mut(seat).hand.remove(pos);
        let card_id = instance.card_id;
        let basket: Basket = smallvec![instance];
        next.floor_mut(floor_no)
            .ok_or(Fault::MissingFloor(floor_no))?
            .set_proposal(seat, basket);
        next.turn = seat.other();

        Ok(Outcome {
            state: next,
            events: smallvec![
                Event::ProposalMade {
                    seat,
                    floor: floor_no,
                    card: card_id,
                },
                Event::TurnStarted {
                    seat: seat.other(),
                    floor: floor_no,
                },
            ],
        })
    }

    fn counter(
        &self,
        state: &GameState,
        seat: Seat,
        card: InstanceId,
    ) -> Result<Outcome, ActionError> {
        Self::require_playing(state)?;
        Self::require_turn(state, seat)?;

        let floor_no = state.current_floor;
        let lead = self.rules.lead_seat(floor_no);
        if seat != lead.other() {
            return Err(Rejection::NotResponder {
                seat,
                floor: floor_no,
            }
            .into());
        }

        let floor = state
            .floor(floor_no)
            .ok_or(Fault::MissingFloor(floor_no))?;
        if floor.proposal(lead).is_none() {
            return Err(Rejection::NothingToCounter { floor: floor_no }.into());
        }
        if floor.proposal(seat).is_some() {
            return Err(Rejection::ProposalAlreadyMade {
                seat,
                floor: floor_no,
            }
            .into());
        }

        let pos = self.validate_hand_card(state, seat, card, floor_no)?;

        let mut next = state.clone();
        let instance = next.player_mut(seat).hand.remove(pos);
        let card_id = instance.card_id;
        let basket: Basket = smallvec![instance];
        next.floor_mut(floor_no)
            .ok_or(Fault::MissingFloor(floor_no))?
            .set_proposal(seat, basket);
        next.turn = lead;

        Ok(Outcome {
            state: next,
            events: smallvec![
                Event::CounterMade {
                    seat,
                    floor: floor_no,
                    card: card_id,
                },
                Event::TurnStarted {
                    seat: lead,
                    floor: floor_no,
                },
            ],
        })
    }

    fn accept(&self, state: &GameState, seat: Seat) -> Result<Outcome, ActionError> {
        Self::require_playing(state)?;
        Self::require_turn(state, seat)?;

        let floor_no = state.current_floor;
        let lead = self.rules.lead_seat(floor_no);
        let floor = state
            .floor(floor_no)
            .ok_or(Fault::MissingFloor(floor_no))?;

        // The accepted proposal is always the *other* side's basket: the
        // responder accepts the sole initial proposal, or the lead accepts
        // a counter once both slots are filled.
        let winner = if seat == lead.other()
            && floor.proposal(lead).is_some()
            && floor.proposal(seat).is_none()
        {
            lead
        } else if seat == lead && floor.proposal_count() == 2 {
            lead.other()
        } else {
            return Err(Rejection::NothingToAccept {
                seat,
                floor: floor_no,
            }
            .into());
        };

        let mut next = state.clone();
        let mut events: SmallVec<[Event; 4]> = smallvec![Event::ProposalAccepted {
            seat,
            floor: floor_no,
        }];
        self.finalize_agreed(
            &mut next,
            floor_no,
            winner,
            crate::core::CommittedBy::from_seat(winner),
            &mut events,
        )?;
        self.advance_after_finalize(&mut next, &mut events)?;

        Ok(Outcome {
            state: next,
            events,
        })
    }

    fn recall(&self, state: &GameState, seat: Seat, floor_no: u8) -> Result<Outcome, ActionError> {
        Self::require_playing(state)?;

        if state.player(seat).recall_tokens == 0 {
            return Err(Rejection::NoRecallTokens { seat }.into());
        }
        let floor = state
            .floor(floor_no)
            .ok_or(Rejection::UnknownFloor { floor: floor_no })?;
        if floor_no >= state.current_floor {
            return Err(Rejection::FloorNotBehind { floor: floor_no }.into());
        }
        if floor.status != FloorStatus::Agreed {
            return Err(Rejection::FloorNotAgreed { floor: floor_no }.into());
        }
        let cutoff = self.rules.recall_cutoff(state.current_floor);
        if floor_no >= cutoff {
            return Err(Rejection::RecallBeyondCutoff {
                floor: floor_no,
                cutoff,
            }
            .into());
        }

        let mut next = state.clone();
        next.ledger
            .retract(floor_no)
            .ok_or(Fault::MissingLedgerEntry(floor_no))?;

        // Role-signed fairness tax: the penalty carries the opponent role's
        // sign, nudging the score toward the other side.
        let penalty = self.rules.recall_penalty * state.player(seat).role.other().score_sign();
        next.ledger.add_penalty(penalty);
        next.player_mut(seat).recall_tokens -= 1;

        let placer = {
            let floor = next
                .floor_mut(floor_no)
                .ok_or(Fault::MissingFloor(floor_no))?;
            let placer = floor.placed_by.ok_or(Fault::MissingPlacer(floor_no))?;
            floor.status = FloorStatus::Reopened;
            floor.committed_by = crate::core::CommittedBy::None;
            floor.placed_by = None;
            placer
        };
        let placed = std::mem::take(
            &mut next
                .floor_mut(floor_no)
                .ok_or(Fault::MissingFloor(floor_no))?
                .placed,
        );
        for placed_card in placed {
            next.player_mut(placer).hand.push_back(placed_card.card);
        }

        next.current_floor = floor_no;
        let lead = self.rules.lead_seat(floor_no);
        next.turn = lead;

        let score_after = next.ledger.net_score();
        Ok(Outcome {
            state: next,
            events: smallvec![
                Event::RecallUsed {
                    seat,
                    floor: floor_no,
                    penalty,
                    score_after,
                },
                Event::TurnStarted {
                    seat: lead,
                    floor: floor_no,
                },
            ],
        })
    }

    fn draw(&self, state: &GameState, seat: Seat) -> Result<Outcome, ActionError> {
        Self::require_playing(state)?;

        if state.deck.is_empty() {
            return Err(Rejection::DeckEmpty.into());
        }
        if state.player(seat).hand.len() >= self.rules.max_hand_size {
            return Err(Rejection::HandFull { seat }.into());
        }

        let mut next = state.clone();
        let card = next.deck.pop_back().ok_or(Rejection::DeckEmpty)?;
        let card_id = card.card_id;
        next.player_mut(seat).hand.push_back(card);
        let deck_remaining = next.deck.len();

        Ok(Outcome {
            state: next,
            events: smallvec![Event::CardDrawn {
                seat,
                card: card_id,
                deck_remaining,
            }],
        })
    }

    // === Validation helpers ===

    fn require_playing(state: &GameState) -> Result<(), Rejection> {
        if state.phase == GamePhase::Playing {
            Ok(())
        } else {
            Err(Rejection::NotPlaying)
        }
    }

    fn require_turn(state: &GameState, seat: Seat) -> Result<(), Rejection> {
        if state.turn == seat {
            Ok(())
        } else {
            Err(Rejection::OutOfTurn { seat })
        }
    }

    /// Check a card is in hand and placeable on the floor; returns its hand
    /// position.
    fn validate_hand_card(
        &self,
        state: &GameState,
        seat: Seat,
        card: InstanceId,
        floor_no: u8,
    ) -> Result<usize, ActionError> {
        let player = state.player(seat);
        let pos = player
            .hand_position(card)
            .ok_or(Rejection::CardNotInHand { seat, card })?;
        let def = self.require_def(player.hand[pos].card_id)?;
        if !def.floor_rule.allows(floor_no, self.rules.max_stories) {
            return Err(Rejection::CardNotAllowedOnFloor {
                card,
                floor: floor_no,
            }
            .into());
        }
        Ok(pos)
    }

    pub(crate) fn require_def(
        &self,
        id: crate::catalog::CardId,
    ) -> Result<&CardDefinition, Fault> {
        self.catalog.get(id).ok_or(Fault::MissingDefinition(id))
    }

    /// Footprint and score a basket contributes if placed.
    pub(crate) fn basket_totals(&self, basket: &Basket) -> Result<(u64, i64), Fault> {
        let mut footprint = 0u64;
        let mut score = 0i64;
        for instance in basket {
            let def = self.require_def(instance.card_id)?;
            footprint += u64::from(def.footprint) * u64::from(instance.count);
            score += def.impact * i64::from(instance.count);
        }
        Ok((footprint, score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CardId;

    fn engine() -> Engine {
        Engine::new(Catalog::standard(), GameRules::default())
    }

    fn started(seed: u64) -> (Engine, GameState) {
        let engine = engine();
        let outcome = engine.handle_action(
            &GameState::title(),
            &Action::StartGame {
                human_role: Role::Community,
                seed,
            },
        );
        (engine, outcome.state)
    }

    #[test]
    fn test_start_game_shape() {
        let (engine, state) = started(42);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.current_floor, 1);
        assert_eq!(state.turn, engine.rules().lead_seat(1));
        assert_eq!(state.floors.len(), usize::from(engine.rules().max_stories));
        assert_eq!(
            state.player(Seat::A).hand.len(),
            engine.rules().starting_hand
        );
        assert_eq!(
            state.player(Seat::B).hand.len(),
            engine.rules().starting_hand
        );
        assert_eq!(state.player(Seat::A).role, Role::Community);
        assert_eq!(state.player(Seat::B).role, Role::Developer);
        assert_eq!(state.ledger.net_score(), engine.rules().baseline_score);
    }

    #[test]
    fn test_start_game_deterministic() {
        let (_, s1) = started(7);
        let (_, s2) = started(7);

        let deck1: Vec<_> = s1.deck.iter().map(|c| c.card_id).collect();
        let deck2: Vec<_> = s2.deck.iter().map(|c| c.card_id).collect();
        assert_eq!(deck1, deck2);
    }

    #[test]
    fn test_reset_returns_to_title() {
        let (engine, state) = started(42);
        let outcome = engine.handle_action(&state, &Action::ResetGame);

        assert_eq!(outcome.state.phase, GamePhase::Title);
        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.events[0], Event::GameReset);
    }

    #[test]
    fn test_rejection_leaves_state_unchanged() {
        let (engine, state) = started(42);
        let responder = state.turn.other();

        // Responder tries to act first.
        let card = state.player(responder).hand[0].instance_id;
        let outcome = engine.handle_action(
            &state,
            &Action::ProposeCard {
                seat: responder,
                card,
            },
        );

        assert_eq!(outcome.events.len(), 1);
        match &outcome.events[0] {
            Event::Rejected { code, .. } => assert_eq!(*code, "out_of_turn"),
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(outcome.state.turn, state.turn);
        assert_eq!(outcome.state.current_floor, state.current_floor);
        assert_eq!(
            outcome.state.player(responder).hand,
            state.player(responder).hand
        );
    }

    #[test]
    fn test_propose_moves_card_and_turn() {
        let (engine, state) = started(42);
        let lead = state.turn;

        // Pick a card legal on floor 1.
        let card = state
            .player(lead)
            .hand
            .iter()
            .find(|c| {
                engine
                    .catalog()
                    .get(c.card_id)
                    .is_some_and(|d| d.floor_rule.allows(1, engine.rules().max_stories))
            })
            .map(|c| c.instance_id)
            .expect("starting hand holds a playable card");

        let outcome = engine.handle_action(&state, &Action::ProposeCard { seat: lead, card });

        assert_eq!(outcome.state.turn, lead.other());
        let floor = outcome.state.floor(1).unwrap();
        assert!(floor.proposal(lead).is_some());
        assert!(!outcome.state.player(lead).has_card(card));
        assert_eq!(outcome.events[0].kind(), "proposal_made");
        assert_eq!(outcome.events[1].kind(), "turn_started");
    }

    #[test]
    fn test_draw_respects_hand_cap() {
        let (engine, mut state) = started(42);
        let seat = Seat::A;

        loop {
            let outcome = engine.handle_action(&state, &Action::DrawCard { seat });
            match &outcome.events[0] {
                Event::CardDrawn { .. } => state = outcome.state,
                Event::Rejected { code, .. } => {
                    assert_eq!(*code, "hand_full");
                    break;
                }
                other => panic!("unexpected event {other:?}"),
            }
        }

        assert_eq!(state.player(seat).hand.len(), engine.rules().max_hand_size);
    }

    #[test]
    fn test_draw_from_empty_deck_rejected() {
        let (engine, mut state) = started(42);
        state.deck = Vector::new();

        let outcome = engine.handle_action(&state, &Action::DrawCard { seat: Seat::A });
        match &outcome.events[0] {
            Event::Rejected { code, .. } => assert_eq!(*code, "deck_empty"),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_basket_totals() {
        let engine = engine();
        // Card 7 (Luxury Condos): footprint 3, impact -8.
        let basket: Basket = smallvec![CardInstance::stack(
            InstanceId::new(0),
            CardId::new(7),
            2
        )];
        let (footprint, score) = engine.basket_totals(&basket).unwrap();
        assert_eq!(footprint, 6);
        assert_eq!(score, -16);
    }
}
