//! Card instances - the stacks that actually move during a game.
//!
//! A hand slot may represent N copies of the same definition held together.
//! `CardInstance` wraps a definition reference with a unique per-game
//! identity and that stack count. Instances - not definitions - are what
//! move between hand, floor proposal slots, placed floors, and (on recall)
//! back to a hand.

use serde::{Deserialize, Serialize};

use super::definition::CardId;

/// Unique identifier for a card instance within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create a new instance ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}

/// A stack of identical cards with a unique per-game identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique ID for this stack.
    pub instance_id: InstanceId,

    /// Reference to the card definition.
    pub card_id: CardId,

    /// Number of identical copies held together. Always at least 1.
    pub count: u32,
}

impl CardInstance {
    /// Create a single-copy instance.
    #[must_use]
    pub fn new(instance_id: InstanceId, card_id: CardId) -> Self {
        Self::stack(instance_id, card_id, 1)
    }

    /// Create a stack of `count` copies.
    #[must_use]
    pub fn stack(instance_id: InstanceId, card_id: CardId, count: u32) -> Self {
        debug_assert!(count >= 1, "a stack holds at least one copy");
        Self {
            instance_id,
            card_id,
            count,
        }
    }
}
