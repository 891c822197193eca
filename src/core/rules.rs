//! Game rules: the tunable constants of a match.
//!
//! Everything numeric about a game lives here so tests can shrink the board
//! or widen the balance window without touching the engine.

use serde::{Deserialize, Serialize};

use super::seat::Seat;

/// Tunable constants for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRules {
    /// Building height cap: floors are numbered 1..=max_stories.
    pub max_stories: u8,

    /// Symmetric balance window. A final score within `[-t, t]` is a
    /// balanced outcome.
    pub balance_threshold: i64,

    /// Fixed score offset from mandatory costs, applied at game start.
    pub baseline_score: i64,

    /// Stacks dealt to each hand at game start.
    pub starting_hand: usize,

    /// Maximum hand slots; gates drawing only, not cards returned by a
    /// recall or a rejected proposal.
    pub max_hand_size: usize,

    /// Recall tokens per player.
    pub recall_tokens: u32,

    /// Magnitude of the recall penalty. The sign applied is the recalling
    /// player's opponent's score sign.
    pub recall_penalty: i64,

    /// Lead rotates between seats in blocks of this many floors.
    pub lead_block_size: u8,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            max_stories: 12,
            balance_threshold: 10,
            baseline_score: 0,
            starting_hand: 5,
            max_hand_size: 7,
            recall_tokens: 2,
            recall_penalty: 3,
            lead_block_size: 3,
        }
    }
}

impl GameRules {
    /// The lead seat for a floor. Seat A leads the first block; lead swaps
    /// every `lead_block_size` floors.
    #[must_use]
    pub fn lead_seat(&self, floor: u8) -> Seat {
        debug_assert!(floor >= 1, "floors are 1-based");
        let block = (u32::from(floor) - 1) / u32::from(self.lead_block_size.max(1));
        if block % 2 == 0 {
            Seat::A
        } else {
            Seat::B
        }
    }

    /// First floor of the block containing `floor`.
    #[must_use]
    pub fn block_start(&self, floor: u8) -> u8 {
        let size = self.lead_block_size.max(1);
        floor - (floor - 1) % size
    }

    /// Recall cutoff given the floor currently under negotiation: only
    /// floors strictly below the current block may be reopened.
    #[must_use]
    pub fn recall_cutoff(&self, current_floor: u8) -> u8 {
        self.block_start(current_floor.clamp(1, self.max_stories))
    }
}
