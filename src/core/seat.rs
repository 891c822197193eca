//! Seats, roles, and per-player data.
//!
//! Exactly two players exist per game and their identity is stable for the
//! game's lifetime. A `Seat` names a side of the table; a `Role` names which
//! direction of the score the player wants the building to drift.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::catalog::{CardInstance, InstanceId};

/// One of the two sides of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    A,
    B,
}

impl Seat {
    /// The opposing seat.
    #[must_use]
    pub const fn other(self) -> Seat {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::A,
        }
    }

    /// Array index for this seat (A = 0, B = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Seat::A => 0,
            Seat::B => 1,
        }
    }

    /// Both seats, in index order.
    #[must_use]
    pub const fn both() -> [Seat; 2] {
        [Seat::A, Seat::B]
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seat::A => write!(f, "Seat A"),
            Seat::B => write!(f, "Seat B"),
        }
    }
}

/// Asymmetric win alignment.
///
/// The sign conventions are fixed game-design constants: the Community
/// side's interests align with positive net score, the Developer side's with
/// negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Community,
    Developer,
}

impl Role {
    /// The opposing role.
    #[must_use]
    pub const fn other(self) -> Role {
        match self {
            Role::Community => Role::Developer,
            Role::Developer => Role::Community,
        }
    }

    /// The score direction this role favors: +1 for Community, -1 for
    /// Developer.
    #[must_use]
    pub const fn score_sign(self) -> i64 {
        match self {
            Role::Community => 1,
            Role::Developer => -1,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Community => write!(f, "Community"),
            Role::Developer => write!(f, "Developer"),
        }
    }
}

/// Who drives a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerKind {
    Human,
    Ai,
}

/// One player's state.
///
/// The hand is a persistent vector so a `GameState` clone shares structure
/// with its predecessor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub seat: Seat,
    pub display_name: String,
    pub role: Role,
    pub controller: ControllerKind,
    pub hand: Vector<CardInstance>,
    pub recall_tokens: u32,
}

impl Player {
    /// Create a player with an empty hand.
    #[must_use]
    pub fn new(
        seat: Seat,
        display_name: impl Into<String>,
        role: Role,
        controller: ControllerKind,
        recall_tokens: u32,
    ) -> Self {
        Self {
            seat,
            display_name: display_name.into(),
            role,
            controller,
            hand: Vector::new(),
            recall_tokens,
        }
    }

    /// Position of an instance in the hand.
    #[must_use]
    pub fn hand_position(&self, id: InstanceId) -> Option<usize> {
        self.hand.iter().position(|c| c.instance_id == id)
    }

    /// Whether the hand holds an instance.
    #[must_use]
    pub fn has_card(&self, id: InstanceId) -> bool {
        self.hand_position(id).is_some()
    }

    /// Remove an instance from the hand, returning it if present.
    pub fn take_card(&mut self, id: InstanceId) -> Option<CardInstance> {
        let pos = self.hand_position(id)?;
        Some(self.hand.remove(pos))
    }
}
