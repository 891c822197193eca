//! Game-end evaluation and winner determination.
//!
//! The game ends when the building is complete, when no cards remain
//! anywhere, or when the impossible-finish bound proves no sequence of
//! remaining plays can land the score inside the balance window. The bound
//! is conservative: it assumes every remaining card could reach the
//! building, which overestimates reachability, so it never ends a winnable
//! game early.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::core::{GameRules, GameState, Role};

/// Why the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEndReason {
    /// Every floor up to the height cap is finalized.
    BuildingComplete,
    /// No cards remain anywhere outside the building.
    NoCardsLeft,
    /// The balance window is mathematically unreachable.
    BalanceImpossible,
}

impl std::fmt::Display for GameEndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEndReason::BuildingComplete => write!(f, "Building complete"),
            GameEndReason::NoCardsLeft => write!(f, "No cards left"),
            GameEndReason::BalanceImpossible => write!(f, "Balance impossible"),
        }
    }
}

/// Who came out ahead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    /// Final score within the balance window: a shared win.
    Balanced,
    /// One role's interests prevailed.
    Role(Role),
}

/// Terminal result attached to the state when the game ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub reason: GameEndReason,
    pub winner: Winner,
    pub final_score: i64,
}

/// Winner for a final score: balanced iff `|score| <= threshold`, otherwise
/// the role whose sign matches the overshoot.
#[must_use]
pub fn determine_winner(score: i64, threshold: i64) -> Winner {
    if score.abs() <= threshold {
        Winner::Balanced
    } else if score > 0 {
        Winner::Role(Role::Community)
    } else {
        Winner::Role(Role::Developer)
    }
}

/// Evaluate the three terminal conditions against a state.
///
/// Returns `None` while the game can continue. Checked after every floor
/// finalization; the conditions are ordered so the most specific reason is
/// reported.
#[must_use]
pub fn evaluate_game_end(
    state: &GameState,
    catalog: &Catalog,
    rules: &GameRules,
) -> Option<GameOutcome> {
    let score = state.ledger.net_score();

    if state.current_floor > rules.max_stories {
        return Some(outcome(GameEndReason::BuildingComplete, score, rules));
    }

    if state.remaining_instances().next().is_none() {
        return Some(outcome(GameEndReason::NoCardsLeft, score, rules));
    }

    // Conservative bound: sum the positive and negative impact still in
    // circulation (deck, hands, and standing proposals) as if every copy
    // could land on the building.
    let mut max_positive = 0i64;
    let mut max_negative = 0i64;
    for inst in state.remaining_instances() {
        let Some(def) = catalog.get(inst.card_id) else {
            continue;
        };
        let total = def.impact * i64::from(inst.count);
        if total > 0 {
            max_positive += total;
        } else {
            max_negative += total;
        }
    }

    let t = rules.balance_threshold;
    if score + max_negative > t || score + max_positive < -t {
        return Some(outcome(GameEndReason::BalanceImpossible, score, rules));
    }

    None
}

fn outcome(reason: GameEndReason, score: i64, rules: &GameRules) -> GameOutcome {
    GameOutcome {
        reason,
        winner: determine_winner(score, rules.balance_threshold),
        final_score: score,
    }
}
