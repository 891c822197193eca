//! The AI decision procedure.
//!
//! `decide` reads a state snapshot and produces an `Intent`, parameterized
//! by a pluggable `Strategy`. It is pure with respect to the snapshot; the
//! only mutation is the injected `GameRng` consumed by the probabilistic
//! acceptance gates. Any board configuration the dispatch table does not
//! recognize yields `Pass`, so the AI can never stall the game.

pub mod strategy;

pub use strategy::{BalancedStrategy, EagerStrategy, Strategy};

use smallvec::{smallvec, SmallVec};

use crate::catalog::{CardInstance, Catalog, InstanceId};
use crate::core::{GamePhase, GameRng, GameRules, GameState, Role, Seat};
use crate::engine::{Action, Engine};

/// What the AI wants to do with its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Open the floor with these cards.
    Propose(SmallVec<[InstanceId; 2]>),
    /// Answer the standing proposal with these cards.
    Counter(SmallVec<[InstanceId; 2]>),
    /// Accept the opponent's initial proposal.
    Accept,
    /// Accept the opponent's counter to our proposal.
    AcceptCounter,
    /// Decline the counter and send the floor to the mediator.
    RejectCounter,
    /// Decline to act; finalizes the floor.
    Pass,
}

/// Read-only view the strategy evaluates against.
pub struct AiContext<'a> {
    pub catalog: &'a Catalog,
    pub rules: &'a GameRules,
    pub state: &'a GameState,
    pub seat: Seat,
}

impl<'a> AiContext<'a> {
    /// Build a context from an engine and a snapshot.
    #[must_use]
    pub fn new(engine: &'a Engine, state: &'a GameState, seat: Seat) -> Self {
        Self {
            catalog: engine.catalog(),
            rules: engine.rules(),
            state,
            seat,
        }
    }

    /// Current net score.
    #[must_use]
    pub fn net_score(&self) -> i64 {
        self.state.ledger.net_score()
    }

    /// This seat's role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.state.player(self.seat).role
    }

    /// Cards in hand legally placeable on the floor in play.
    #[must_use]
    pub fn placeable_hand(&self) -> Vec<&CardInstance> {
        let floor = self.state.current_floor;
        self.state
            .player(self.seat)
            .hand
            .iter()
            .filter(|inst| {
                self.catalog
                    .get(inst.card_id)
                    .is_some_and(|def| def.floor_rule.allows(floor, self.rules.max_stories))
            })
            .collect()
    }
}

/// Decide what to do with the current board.
///
/// Dispatch: lead with an empty floor proposes; responder facing a lone
/// proposal accepts or counters; lead facing a filled counter accepts or
/// rejects (rejection routes to the mediator via pass). Everything else is
/// a pass.
#[must_use]
pub fn decide(ctx: &AiContext<'_>, strategy: &dyn Strategy, rng: &mut GameRng) -> Intent {
    if ctx.state.phase != GamePhase::Playing {
        return Intent::Pass;
    }
    let Some(floor) = ctx.state.floor_in_play() else {
        return Intent::Pass;
    };
    if !floor.is_open() {
        return Intent::Pass;
    }

    let lead = ctx.rules.lead_seat(floor.number);
    let is_lead = ctx.seat == lead;
    let own = floor.proposal(ctx.seat);
    let theirs = floor.proposal(ctx.seat.other());

    match (is_lead, own, theirs) {
        (true, None, None) => match strategy.select_initial_proposal(ctx) {
            Some(card) => Intent::Propose(smallvec![card]),
            None => Intent::Pass,
        },
        (false, None, Some(opponent)) => {
            if strategy.should_accept_proposal(ctx, opponent, rng) {
                Intent::Accept
            } else {
                match strategy.select_counter_proposal(ctx, opponent) {
                    Some(card) => Intent::Counter(smallvec![card]),
                    None => Intent::Pass,
                }
            }
        }
        (true, Some(own), Some(counter)) => {
            if strategy.should_accept_counter(ctx, own, counter) {
                Intent::AcceptCounter
            } else {
                Intent::RejectCounter
            }
        }
        _ => Intent::Pass,
    }
}

/// Lower an intent to an engine action for a seat.
///
/// An empty proposal list degrades to a pass rather than an invalid action.
#[must_use]
pub fn intent_to_action(intent: &Intent, seat: Seat) -> Action {
    match intent {
        Intent::Propose(cards) => match cards.first() {
            Some(&card) => Action::ProposeCard { seat, card },
            None => Action::PassProposal { seat },
        },
        Intent::Counter(cards) => match cards.first() {
            Some(&card) => Action::CounterPropose { seat, card },
            None => Action::PassProposal { seat },
        },
        Intent::Accept | Intent::AcceptCounter => Action::AcceptProposal { seat },
        Intent::RejectCounter | Intent::Pass => Action::PassProposal { seat },
    }
}
