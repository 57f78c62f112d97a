mod common;

use std::sync::Arc;

use hiker_core::{
    DialogueError, Effect, EffectError, EffectTarget, EndReason, FoodKind, GameConfig,
    GameOverCause, GameState, RunStatus, Step,
};
use hiker_runtime::{GameRng, SessionError, StateStore};
use rand::SeedableRng;

use common::{player, session};

#[test]
fn same_seed_same_first_event() {
    let first: Vec<String> = (0..5)
        .map(|_| session(12345).explore_step(0).unwrap().event_id)
        .collect();
    assert!(first.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn seeded_runs_are_reproducible() {
    let run = |seed| {
        let mut session = session(seed);
        (0..30)
            .map(|step| session.explore_step(step % 12).unwrap().event_id)
            .collect::<Vec<_>>()
    };
    assert_eq!(run(12345), run(12345));
}

#[test]
fn step_records_event_and_spends_stamina() {
    let mut session = session(7);
    let cap = session.effective_stamina_cap();

    let outcome = session.explore_step(0).unwrap();

    let state = session.state();
    assert!(state.recent_events.contains(&outcome.event_id));
    assert!(state.stamina.current <= cap);
    assert!(!outcome.text.contains("{player}"));
}

#[test]
fn forage_safety_net_bounds_the_drought() {
    let mut session = session(99);
    let limit = session.config().events.forage_safety_net;

    for _ in 0..200 {
        session.explore_step(3).unwrap();
        assert!(session.state().steps_since_forage <= limit);
    }
}

#[test]
fn hunger_caps_stamina_then_starves() {
    let config = GameConfig::default();
    let mut state = GameState::new(player(), &config);
    state.days_without_meal = 3;

    let mut store = StateStore::new(state, Arc::new(config), GameRng::seed_from_u64(1));
    let cap = store.effective_stamina_cap();
    assert!((cap - 10.0 * 0.30).abs() < 1e-9);

    store.apply(&Effect::EndDay { ate_meal: false }).unwrap();
    assert_eq!(store.effective_stamina_cap(), 0.0);
    assert_eq!(
        store.state().status,
        RunStatus::GameOver(GameOverCause::Starvation)
    );
}

#[test]
fn finished_run_rejects_further_steps() {
    let mut session = session(5);
    for _ in 0..3 {
        assert_eq!(session.end_day().unwrap(), RunStatus::Active);
    }
    assert_eq!(
        session.end_day().unwrap(),
        RunStatus::GameOver(GameOverCause::Starvation)
    );

    let err = session.explore_step(0).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Effect(EffectError::RunEnded)
    ));
}

#[test]
fn a_meal_resets_hunger() {
    let mut session = session(5);
    session.end_day().unwrap();
    assert_eq!(session.state().days_without_meal, 1);

    session
        .apply_effects(&[Effect::add_item("trail_bread", 1)])
        .unwrap();
    session.eat("trail_bread", FoodKind::Meal).unwrap();
    session.end_day().unwrap();

    assert_eq!(session.state().days_without_meal, 0);
    assert_eq!(session.state().inventory.count("trail_bread"), 0);
    assert_eq!(session.state().day, 3);
}

#[test]
fn eating_missing_food_changes_nothing() {
    let mut session = session(5);
    let before = session.state().clone();

    assert!(session.eat("trail_bread", FoodKind::Meal).is_err());
    assert_eq!(session.state(), &before);
}

#[test]
fn hermit_conversation() {
    let mut session = session(11);

    let view = session.talk("hermit").unwrap();
    assert_eq!(view.node_id, "hermit.greet");
    assert!(view.text.contains("Wren"));

    let Step::Node(hub) = session.choose(0).unwrap() else {
        panic!("expected the hub node");
    };
    assert_eq!(hub.node_id, "hermit.hub");
    assert_eq!(session.state().rapport.get("hermit"), Some(&1));
    assert!(session.state().flags.get("hermit.met"));

    let before = session.state().clone();
    let pan = hub
        .options
        .iter()
        .find(|option| option.text.contains("pan"))
        .map(|option| option.index)
        .unwrap();
    let err = session.choose(pan).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Dialogue(DialogueError::UnmetRequirement { .. })
    ));
    assert_eq!(session.state(), &before);
    assert_eq!(session.dialogue_view().unwrap().node_id, "hermit.hub");

    let goodbye = hub.options.last().unwrap().index;
    let step = session.choose(goodbye).unwrap();
    assert!(matches!(
        step,
        Step::Ended {
            reason: EndReason::Exit,
            ..
        }
    ));
    assert!(session.conversation().is_none());

    let view = session.talk("hermit").unwrap();
    assert_eq!(view.node_id, "hermit.welcome_back");
}

#[test]
fn gated_start_falls_back() {
    let mut session = session(11);
    session.apply_effects(&[Effect::AdvanceTime(3)]).unwrap();

    let view = session.talk("peddler").unwrap();
    assert_eq!(view.node_id, "peddler.closed");
    assert!(view.is_terminal());
}

#[test]
fn choosing_without_conversation_fails() {
    let mut session = session(11);
    assert!(matches!(
        session.choose(0).unwrap_err(),
        SessionError::NoConversation
    ));
}
