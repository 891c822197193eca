//! AI integration tests: the decision procedure driving the engine.

use tower_accord::{
    Action, AiContext, BalancedStrategy, Catalog, EagerStrategy, Engine, Event, GamePhase,
    GameRng, GameRules, GameState, Intent, Role, Strategy,
};

fn started(seed: u64) -> (Engine, GameState) {
    let engine = Engine::new(Catalog::standard(), GameRules::default());
    let outcome = engine.handle_action(
        &GameState::title(),
        &Action::StartGame {
            human_role: Role::Community,
            seed,
        },
    );
    (engine, outcome.state)
}

/// Run a whole game with the AI playing both seats.
fn selfplay(strategy: &dyn Strategy, game_seed: u64, ai_seed: u64) -> GameState {
    let (engine, mut state) = started(game_seed);
    let mut rng = GameRng::new(ai_seed);

    let mut steps = 0;
    while state.phase == GamePhase::Playing {
        steps += 1;
        assert!(steps < 1000, "selfplay failed to terminate");

        let seat = state.turn;
        let intent = {
            let ctx = AiContext::new(&engine, &state, seat);
            tower_accord::ai::decide(&ctx, strategy, &mut rng)
        };
        let action = tower_accord::ai::intent_to_action(&intent, seat);

        let outcome = engine.handle_action(&state, &action);
        assert!(
            !outcome
                .events
                .iter()
                .any(|e| matches!(e, Event::Rejected { .. } | Event::Fault { .. })),
            "ai produced an invalid action {action:?}: {:?}",
            outcome.events
        );
        state = outcome.state;
    }
    state
}

#[test]
fn test_balanced_selfplay_terminates_without_rejections() {
    let state = selfplay(&BalancedStrategy::default(), 11, 17);
    assert_eq!(state.phase, GamePhase::GameOver);
    assert!(state.outcome.is_some());
}

#[test]
fn test_eager_selfplay_terminates_without_rejections() {
    let state = selfplay(&EagerStrategy, 23, 29);
    assert_eq!(state.phase, GamePhase::GameOver);
    assert!(state.outcome.is_some());
}

#[test]
fn test_selfplay_is_deterministic() {
    let a = selfplay(&BalancedStrategy::default(), 7, 13);
    let b = selfplay(&BalancedStrategy::default(), 7, 13);

    let oa = a.outcome.unwrap();
    let ob = b.outcome.unwrap();
    assert_eq!(oa.final_score, ob.final_score);
    assert_eq!(oa.reason, ob.reason);
    assert_eq!(oa.winner, ob.winner);
    assert_eq!(a.ledger.entries().count(), b.ledger.entries().count());
}

#[test]
fn test_decide_is_pure_given_identical_rng() {
    let (engine, state) = started(3);
    let seat = state.turn;
    let strategy = BalancedStrategy::default();

    let ctx = AiContext::new(&engine, &state, seat);
    let first = tower_accord::ai::decide(&ctx, &strategy, &mut GameRng::new(42));
    let second = tower_accord::ai::decide(&ctx, &strategy, &mut GameRng::new(42));

    assert_eq!(first, second);
}

#[test]
fn test_lead_opens_with_a_proposal_on_a_fresh_floor() {
    let (engine, state) = started(3);
    let seat = state.turn;

    let ctx = AiContext::new(&engine, &state, seat);
    let intent = tower_accord::ai::decide(
        &ctx,
        &BalancedStrategy::default(),
        &mut GameRng::new(0),
    );

    assert!(
        matches!(intent, Intent::Propose(ref cards) if !cards.is_empty()),
        "expected an opening proposal, got {intent:?}"
    );
}
