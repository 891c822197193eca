//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card type: its
//! category, how much floor area it occupies, its signed net-score impact,
//! and where in the building it may legally be placed.
//!
//! Instance-specific data (stack counts, location) is stored separately in
//! `CardInstance`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Unique identifier for a card definition.
///
/// This identifies the "type" of card (e.g., "Rooftop Garden"),
/// not a specific instance in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
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

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card category. Categories are flavor plus UI grouping; the engine only
/// reads `impact` and `floor_rule` when resolving floors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardCategory {
    Housing,
    Commerce,
    Community,
    Luxury,
    GreenSpace,
    Infrastructure,
}

/// Placement constraint for a card.
///
/// Most cards go anywhere; a few are pinned to the ground floor, the roof
/// (the height-cap floor), or an explicit list of floor numbers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloorRule {
    /// No constraint.
    Any,
    /// Only the ground floor (floor 1).
    Ground,
    /// Only the top floor of the building.
    Roof,
    /// Only the listed floor numbers.
    Exact(SmallVec<[u8; 2]>),
}

impl FloorRule {
    /// Check whether a card with this rule may be placed on `floor` in a
    /// building capped at `max_stories`.
    #[must_use]
    pub fn allows(&self, floor: u8, max_stories: u8) -> bool {
        match self {
            FloorRule::Any => true,
            FloorRule::Ground => floor == 1,
            FloorRule::Roof => floor == max_stories,
            FloorRule::Exact(floors) => floors.contains(&floor),
        }
    }
}

impl Default for FloorRule {
    fn default() -> Self {
        FloorRule::Any
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use tower_accord::catalog::{CardCategory, CardDefinition, CardId, FloorRule};
///
/// let condos = CardDefinition::new(CardId::new(1), "Luxury Condos", CardCategory::Luxury)
///     .with_footprint(3)
///     .with_impact(-8);
///
/// assert_eq!(condos.impact, -8);
/// assert!(condos.floor_rule.allows(5, 12));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name (for display/debugging).
    pub name: String,

    /// Card category.
    pub category: CardCategory,

    /// Floor area occupied when placed.
    pub footprint: u32,

    /// Signed net-score impact when placed. Positive pulls the score toward
    /// the Community side, negative toward the Developer side.
    pub impact: i64,

    /// Placement constraint.
    pub floor_rule: FloorRule,
}

impl CardDefinition {
    /// Create a new card definition with no constraint, unit footprint, and
    /// zero impact.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, category: CardCategory) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            footprint: 1,
            impact: 0,
            floor_rule: FloorRule::Any,
        }
    }

    /// Set the footprint (builder pattern).
    #[must_use]
    pub fn with_footprint(mut self, footprint: u32) -> Self {
        self.footprint = footprint;
        self
    }

    /// Set the net-score impact (builder pattern).
    #[must_use]
    pub fn with_impact(mut self, impact: i64) -> Self {
        self.impact = impact;
        self
    }

    /// Set the placement constraint (builder pattern).
    #[must_use]
    pub fn with_floor_rule(mut self, rule: FloorRule) -> Self {
        self.floor_rule = rule;
        self
    }
}
