//! Pluggable negotiation strategies.
//!
//! A `Strategy` scores cards against a state snapshot and decides when to
//! accept the other side's proposals. The probabilistic acceptance gate
//! draws from an injected `GameRng`, so strategy behavior is fully
//! deterministic under a fixed seed.
//!
//! Default methods cover the selection plumbing; a strategy usually only
//! needs to define how it values a card and how eagerly it accepts.

use crate::catalog::{CardDefinition, InstanceId};
use crate::core::{Basket, GameRng};

use super::AiContext;

/// A negotiation strategy.
pub trait Strategy: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Score a card: higher is better for this strategy.
    fn evaluate_proposal(&self, ctx: &AiContext<'_>, card: &CardDefinition) -> i64;

    /// Score a whole basket. The default sums the per-card scores; baskets
    /// produced by the engine hold a single card, where the sum is exact.
    fn evaluate_basket(&self, ctx: &AiContext<'_>, basket: &Basket) -> i64 {
        basket
            .iter()
            .filter_map(|inst| ctx.catalog.get(inst.card_id))
            .map(|def| self.evaluate_proposal(ctx, def))
            .sum()
    }

    /// Minimum basket score worth accepting outright.
    fn acceptance_bar(&self, ctx: &AiContext<'_>) -> i64 {
        -(ctx.rules.balance_threshold / 2)
    }

    /// Probability the strategy follows through on an acceptable proposal.
    /// Models imperfect, varied play.
    fn accept_probability(&self) -> f64 {
        0.85
    }

    /// How much better than the opponent's basket a counter must score.
    fn counter_margin(&self) -> i64 {
        1
    }

    /// How much worse than the original proposal a counter may score and
    /// still be accepted.
    fn counter_tolerance(&self) -> i64 {
        1
    }

    /// Best legally-placeable card from hand, or `None` to pass.
    fn select_initial_proposal(&self, ctx: &AiContext<'_>) -> Option<InstanceId> {
        ctx.placeable_hand()
            .into_iter()
            .filter_map(|inst| {
                let def = ctx.catalog.get(inst.card_id)?;
                Some((inst.instance_id, self.evaluate_proposal(ctx, def)))
            })
            .max_by_key(|&(_, value)| value)
            .map(|(id, _)| id)
    }

    /// Whether to accept the opponent's standing proposal.
    fn should_accept_proposal(
        &self,
        ctx: &AiContext<'_>,
        opponent: &Basket,
        rng: &mut GameRng,
    ) -> bool {
        self.evaluate_basket(ctx, opponent) >= self.acceptance_bar(ctx)
            && rng.gen_bool(self.accept_probability())
    }

    /// A counter-candidate that strictly beats the opponent's basket by the
    /// counter margin, or `None`.
    fn select_counter_proposal(&self, ctx: &AiContext<'_>, opponent: &Basket) -> Option<InstanceId> {
        let opponent_value = self.evaluate_basket(ctx, opponent);
        ctx.placeable_hand()
            .into_iter()
            .filter_map(|inst| {
                let def = ctx.catalog.get(inst.card_id)?;
                Some((inst.instance_id, self.evaluate_proposal(ctx, def)))
            })
            .filter(|&(_, value)| value > opponent_value + self.counter_margin())
            .max_by_key(|&(_, value)| value)
            .map(|(id, _)| id)
    }

    /// Whether to accept a counter to our own proposal: yes unless the
    /// counter is meaningfully worse than what we offered.
    fn should_accept_counter(&self, ctx: &AiContext<'_>, own: &Basket, counter: &Basket) -> bool {
        self.evaluate_basket(ctx, counter)
            >= self.evaluate_basket(ctx, own) - self.counter_tolerance()
    }
}

/// Default strategy: prefers whichever card pulls the running score closest
/// to zero.
#[derive(Clone, Debug)]
pub struct BalancedStrategy {
    accept_probability: f64,
}

impl BalancedStrategy {
    #[must_use]
    pub fn new(accept_probability: f64) -> Self {
        Self { accept_probability }
    }
}

impl Default for BalancedStrategy {
    fn default() -> Self {
        Self::new(0.85)
    }
}

impl Strategy for BalancedStrategy {
    fn name(&self) -> &'static str {
        "balanced"
    }

    fn evaluate_proposal(&self, ctx: &AiContext<'_>, card: &CardDefinition) -> i64 {
        -(ctx.net_score() + card.impact).abs()
    }

    fn accept_probability(&self) -> f64 {
        self.accept_probability
    }
}

/// Partisan strategy: pushes the score toward its own role's side and only
/// accepts proposals that help it.
#[derive(Clone, Debug, Default)]
pub struct EagerStrategy;

impl Strategy for EagerStrategy {
    fn name(&self) -> &'static str {
        "eager"
    }

    fn evaluate_proposal(&self, ctx: &AiContext<'_>, card: &CardDefinition) -> i64 {
        card.impact * ctx.role().score_sign()
    }

    fn acceptance_bar(&self, _ctx: &AiContext<'_>) -> i64 {
        0
    }

    fn accept_probability(&self) -> f64 {
        0.9
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AiContext;
    use crate::catalog::{CardCategory, CardId, Catalog};
    use crate::core::{GamePhase, GameRules, GameState, Role};
    use crate::engine::Engine;

    fn context_fixture() -> (Engine, GameState) {
        let mut catalog = Catalog::new();
        catalog.register(
            CardDefinition::new(CardId::new(1), "Park", CardCategory::GreenSpace).with_impact(4),
            0,
            1,
        );
        catalog.register(
            CardDefinition::new(CardId::new(2), "Condos", CardCategory::Luxury).with_impact(-8),
            0,
            1,
        );
        let engine = Engine::new(catalog, GameRules::default());
        let mut state = GameState::title();
        state.phase = GamePhase::Playing;
        state.floors = (1..=12).map(crate::core::Floor::new).collect();
        state.current_floor = 1;
        (engine, state)
    }

    #[test]
    fn test_balanced_prefers_score_toward_zero() {
        let (engine, mut state) = context_fixture();
        state.ledger.add_penalty(6); // running score +6

        let ctx = AiContext::new(&engine, &state, crate::core::Seat::B);
        let strategy = BalancedStrategy::default();

        let park = engine.catalog().get(CardId::new(1)).unwrap();
        let condos = engine.catalog().get(CardId::new(2)).unwrap();

        // 6+4 = 10 vs 6-8 = -2: the condos land closer to zero.
        assert!(strategy.evaluate_proposal(&ctx, condos) > strategy.evaluate_proposal(&ctx, park));
    }

    #[test]
    fn test_acceptance_is_gated_by_rng() {
        let (engine, state) = context_fixture();
        let ctx = AiContext::new(&engine, &state, crate::core::Seat::B);

        let basket: Basket = smallvec::smallvec![crate::catalog::CardInstance::new(
            InstanceId::new(1),
            CardId::new(1)
        )];

        // Probability 0: never accepts even a good proposal.
        let never = BalancedStrategy::new(0.0);
        let mut rng = GameRng::new(1);
        assert!(!never.should_accept_proposal(&ctx, &basket, &mut rng));

        // Probability 1 with score 0 and impact 4: inside the bar.
        let always = BalancedStrategy::new(1.0);
        let mut rng = GameRng::new(1);
        assert!(always.should_accept_proposal(&ctx, &basket, &mut rng));
    }

    #[test]
    fn test_eager_sides_with_its_role() {
        let (engine, mut state) = context_fixture();
        state.players[1].role = Role::Developer;

        let ctx = AiContext::new(&engine, &state, crate::core::Seat::B);
        let strategy = EagerStrategy;

        let park = engine.catalog().get(CardId::new(1)).unwrap();
        let condos = engine.catalog().get(CardId::new(2)).unwrap();

        assert!(strategy.evaluate_proposal(&ctx, condos) > 0);
        assert!(strategy.evaluate_proposal(&ctx, park) < 0);
    }
}
