//! Catalog: card definition lookup plus the deck recipe.
//!
//! The `Catalog` stores all card definitions for a game and records how many
//! stacks of each card seed the shared deck. It provides fast lookup by
//! `CardId` and supports iteration.

use rustc_hash::FxHashMap;
use smallvec::smallvec;

use super::definition::{CardCategory, CardDefinition, CardId, FloorRule};

/// One line of the deck recipe: how many stacks of a card enter the shared
/// deck, and how many copies each stack holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeckEntry {
    pub card: CardId,
    pub stacks: u32,
    pub per_stack: u32,
}

/// Registry of card definitions and the deck recipe.
///
/// ## Example
///
/// ```
/// use tower_accord::catalog::{Catalog, CardCategory, CardDefinition, CardId};
///
/// let mut catalog = Catalog::new();
/// let park = CardDefinition::new(CardId::new(1), "Pocket Park", CardCategory::GreenSpace)
///     .with_impact(4);
/// catalog.register(park, 3, 1);
///
/// assert_eq!(catalog.get(CardId::new(1)).unwrap().name, "Pocket Park");
/// assert_eq!(catalog.deck_recipe().len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    cards: FxHashMap<CardId, CardDefinition>,
    recipe: Vec<DeckEntry>,
}

impl Catalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition with its deck supply.
    ///
    /// `stacks` stacks of `per_stack` copies each will seed the shared deck.
    /// A card may be registered with zero stacks (obtainable only via test
    /// setup or a custom deal).
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: CardDefinition, stacks: u32, per_stack: u32) {
        let id = card.id;
        if self.cards.contains_key(&id) {
            panic!("Card with ID {:?} already registered", id);
        }
        self.cards.insert(id, card);
        if stacks > 0 {
            self.recipe.push(DeckEntry {
                card: id,
                stacks,
                per_stack: per_stack.max(1),
            });
        }
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all definitions (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// The deck recipe, in registration order.
    #[must_use]
    pub fn deck_recipe(&self) -> &[DeckEntry] {
        &self.recipe
    }

    /// Total number of instances (stacks) the recipe produces.
    #[must_use]
    pub fn deck_stack_count(&self) -> usize {
        self.recipe.iter().map(|e| e.stacks as usize).sum()
    }

    /// The standard demo catalog used by tests and examples.
    ///
    /// Community-leaning cards carry positive impact, developer-leaning cards
    /// negative; the totals roughly cancel so that a full game can stay
    /// inside the balance window.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();

        let cards = [
            (1, "Social Housing", CardCategory::Housing, 2, 5, FloorRule::Any),
            (2, "Community Clinic", CardCategory::Community, 2, 6, FloorRule::Any),
            (3, "Public Library", CardCategory::Community, 2, 3, FloorRule::Any),
            (4, "Pocket Park", CardCategory::GreenSpace, 1, 4, FloorRule::Any),
            (5, "Rooftop Garden", CardCategory::GreenSpace, 1, 5, FloorRule::Roof),
            (6, "Street Plaza", CardCategory::Community, 1, 2, FloorRule::Ground),
            (7, "Luxury Condos", CardCategory::Luxury, 3, -8, FloorRule::Any),
            (8, "Corporate Offices", CardCategory::Commerce, 3, -5, FloorRule::Any),
            (9, "Retail Arcade", CardCategory::Commerce, 2, -3, FloorRule::Ground),
            (10, "Penthouse Suite", CardCategory::Luxury, 2, -6, FloorRule::Roof),
            (11, "Parking Levels", CardCategory::Infrastructure, 3, -2, FloorRule::Exact(smallvec![1, 2])),
            (12, "Utility Core", CardCategory::Infrastructure, 1, 0, FloorRule::Any),
        ];

        for (id, name, category, footprint, impact, rule) in cards {
            let def = CardDefinition::new(CardId::new(id), name, category)
                .with_footprint(footprint)
                .with_impact(impact)
                .with_floor_rule(rule);
            catalog.register(def, 3, 1);
        }

        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn park() -> CardDefinition {
        CardDefinition::new(CardId::new(1), "Pocket Park", CardCategory::GreenSpace).with_impact(4)
    }

    #[test]
    fn test_register_and_get() {
        let mut catalog = Catalog::new();
        catalog.register(park(), 2, 1);

        assert!(catalog.contains(CardId::new(1)));
        assert_eq!(catalog.get(CardId::new(1)).unwrap().impact, 4);
        assert!(catalog.get(CardId::new(99)).is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_register_duplicate_panics() {
        let mut catalog = Catalog::new();
        catalog.register(park(), 1, 1);
        catalog.register(park(), 1, 1);
    }

    #[test]
    fn test_zero_stacks_excluded_from_recipe() {
        let mut catalog = Catalog::new();
        catalog.register(park(), 0, 1);

        assert!(catalog.contains(CardId::new(1)));
        assert!(catalog.deck_recipe().is_empty());
    }

    #[test]
    fn test_deck_stack_count() {
        let mut catalog = Catalog::new();
        catalog.register(park(), 3, 2);
        let clinic = CardDefinition::new(CardId::new(2), "Clinic", CardCategory::Community);
        catalog.register(clinic, 2, 1);

        assert_eq!(catalog.deck_stack_count(), 5);
    }

    #[test]
    fn test_standard_catalog() {
        let catalog = Catalog::standard();

        assert!(!catalog.is_empty());
        assert!(catalog.deck_stack_count() >= 30);

        // Both signs must be represented or no game can swing the score.
        assert!(catalog.iter().any(|c| c.impact > 0));
        assert!(catalog.iter().any(|c| c.impact < 0));
    }
}
