//! Canonical game state.
//!
//! `GameState` is the root value owned exclusively by the engine. Every
//! transition replaces it wholesale; consumers receive read-only snapshots.
//! Collections use `im` persistent vectors so a snapshot clone is O(1) and
//! shares structure with its predecessor - `new_state != state` is then a
//! reliable signal that something changed.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::rng::GameRng;
use super::seat::{Player, Seat};
use crate::catalog::{CardInstance, InstanceId};
use crate::scoring::{BuildingLedger, GameOutcome};

/// An ordered bundle of card instances forming one proposal.
pub type Basket = SmallVec<[CardInstance; 2]>;

/// Lifecycle of one floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloorStatus {
    /// Not yet negotiated.
    Pending,
    /// Finalized with cards placed.
    Agreed,
    /// Finalized empty.
    Skipped,
    /// Previously agreed, reopened by a recall.
    Reopened,
}

/// Which side committed a finalized floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommittedBy {
    PlayerA,
    PlayerB,
    /// Resolved by the mediator after both sides passed.
    Auto,
    /// Skipped floors have no committer.
    None,
}

impl CommittedBy {
    /// The committer marker for a seat.
    #[must_use]
    pub const fn from_seat(seat: Seat) -> Self {
        match seat {
            Seat::A => CommittedBy::PlayerA,
            Seat::B => CommittedBy::PlayerB,
        }
    }
}

/// A card placed on an agreed floor, with the number of copies placed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedCard {
    pub card: CardInstance,
    pub units: u32,
}

/// One negotiation round of the build sequence.
///
/// Invariants maintained by the engine:
/// - proposal slots are occupied only while `Pending` or `Reopened`
/// - `placed` is non-empty iff the status is `Agreed`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    /// 1-based floor number.
    pub number: u8,

    pub status: FloorStatus,

    /// Seat A's standing proposal, if any.
    pub proposal_a: Option<Basket>,

    /// Seat B's standing proposal, if any.
    pub proposal_b: Option<Basket>,

    /// Cards placed when the floor was agreed.
    pub placed: Vec<PlacedCard>,

    pub committed_by: CommittedBy,

    /// Whose basket won. Needed so a recall can return the cards; `Auto`
    /// commits still have a concrete winning side.
    pub placed_by: Option<Seat>,
}

impl Floor {
    /// A fresh pending floor.
    #[must_use]
    pub fn new(number: u8) -> Self {
        Self {
            number,
            status: FloorStatus::Pending,
            proposal_a: None,
            proposal_b: None,
            placed: Vec::new(),
            committed_by: CommittedBy::None,
            placed_by: None,
        }
    }

    /// Whether this floor can still take proposals.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.status, FloorStatus::Pending | FloorStatus::Reopened)
    }

    /// A seat's proposal slot.
    #[must_use]
    pub fn proposal(&self, seat: Seat) -> Option<&Basket> {
        match seat {
            Seat::A => self.proposal_a.as_ref(),
            Seat::B => self.proposal_b.as_ref(),
        }
    }

    /// Set a seat's proposal slot.
    pub fn set_proposal(&mut self, seat: Seat, basket: Basket) {
        match seat {
            Seat::A => self.proposal_a = Some(basket),
            Seat::B => self.proposal_b = Some(basket),
        }
    }

    /// Take a seat's proposal slot, leaving it empty.
    pub fn take_proposal(&mut self, seat: Seat) -> Option<Basket> {
        match seat {
            Seat::A => self.proposal_a.take(),
            Seat::B => self.proposal_b.take(),
        }
    }

    /// Number of occupied proposal slots.
    #[must_use]
    pub fn proposal_count(&self) -> usize {
        usize::from(self.proposal_a.is_some()) + usize::from(self.proposal_b.is_some())
    }
}

/// Top-level game phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Title,
    Playing,
    GameOver,
}

/// The canonical game state.
///
/// Fields are public for snapshot consumers (presentation, AI, tests);
/// only the engine constructs successor states. Serializes as a complete
/// snapshot, RNG position included, so a saved game resumes exactly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub players: [Player; 2],
    pub floors: Vector<Floor>,
    pub deck: Vector<CardInstance>,

    /// Floor currently under negotiation. Exceeds `max_stories` once the
    /// final floor is finalized.
    pub current_floor: u8,

    /// Current turn holder.
    pub turn: Seat,

    pub phase: GamePhase,
    pub ledger: BuildingLedger,

    /// Set exactly when `phase` is `GameOver`.
    pub outcome: Option<GameOutcome>,

    /// Deterministic RNG (deck shuffle only; AI randomness is injected at
    /// the orchestrator layer).
    pub rng: GameRng,

    /// Next instance ID to allocate.
    pub next_instance: u32,
}

impl GameState {
    /// A fresh Title-phase state. Players carry placeholder identities until
    /// `StartGame` assigns roles and deals hands.
    #[must_use]
    pub fn title() -> Self {
        use super::seat::{ControllerKind, Role};

        Self {
            players: [
                Player::new(Seat::A, "Player A", Role::Community, ControllerKind::Human, 0),
                Player::new(Seat::B, "Player B", Role::Developer, ControllerKind::Ai, 0),
            ],
            floors: Vector::new(),
            deck: Vector::new(),
            current_floor: 0,
            turn: Seat::A,
            phase: GamePhase::Title,
            ledger: BuildingLedger::new(0),
            outcome: None,
            rng: GameRng::new(0),
            next_instance: 0,
        }
    }

    /// Player at a seat.
    #[must_use]
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    /// Mutable player at a seat.
    pub fn player_mut(&mut self, seat: Seat) -> &mut Player {
        &mut self.players[seat.index()]
    }

    /// Floor by 1-based number.
    #[must_use]
    pub fn floor(&self, number: u8) -> Option<&Floor> {
        if number == 0 {
            return None;
        }
        self.floors.get(usize::from(number) - 1)
    }

    /// Mutable floor by 1-based number.
    pub fn floor_mut(&mut self, number: u8) -> Option<&mut Floor> {
        if number == 0 {
            return None;
        }
        self.floors.get_mut(usize::from(number) - 1)
    }

    /// The floor currently under negotiation, if the building is not done.
    #[must_use]
    pub fn floor_in_play(&self) -> Option<&Floor> {
        self.floor(self.current_floor)
    }

    /// Allocate a fresh instance ID.
    pub fn alloc_instance(&mut self) -> InstanceId {
        let id = InstanceId::new(self.next_instance);
        self.next_instance += 1;
        id
    }

    /// Total copies of cards still outside the building: the deck, both
    /// hands, and any proposal standing on an open floor. A standing
    /// proposal can still be placed or returned to a hand, so the game-end
    /// evaluator must see it.
    pub fn remaining_instances(&self) -> impl Iterator<Item = &CardInstance> {
        self.deck
            .iter()
            .chain(self.players.iter().flat_map(|p| p.hand.iter()))
            .chain(self.floors.iter().filter(|f| f.is_open()).flat_map(|f| {
                f.proposal_a
                    .iter()
                    .chain(f.proposal_b.iter())
                    .flat_map(|basket| basket.iter())
            }))
    }
}
