mod common;

use std::fs;

use hiker_core::{FoodKind, RunStatus, SCHEMA_VERSION, Season, TimeOfDay};
use hiker_runtime::{
    FileSaveRepository, GameRng, GameSession, InMemorySaveRepository, MigrationError,
    MigrationPipeline, RepositoryError, SavePayload, SaveRepository, SessionError, StateStore,
};
use rand::{Rng, SeedableRng};
use serde_json::json;
use tempfile::TempDir;

use common::{content, session, session_with};

fn decode(payload: SavePayload) -> hiker_core::GameState {
    StateStore::<GameRng>::load(payload).unwrap()
}

#[test]
fn save_load_round_trips_varied_states() {
    for seed in 0..12 {
        let mut session = session(seed);
        let mut driver = GameRng::seed_from_u64(seed ^ 0xfeed);

        for step in 0..40 {
            if session.state().status != RunStatus::Active {
                break;
            }
            match driver.random_range(0..10) {
                0 => {
                    session.end_day().unwrap();
                }
                1 => {
                    let _ = session.eat("berries", FoodKind::Snack);
                }
                _ => {
                    session.explore_step(driver.random_range(0..40)).unwrap();
                }
            }

            let payload = SavePayload::from_state(session.state()).unwrap();
            let text = payload.to_json().unwrap();
            let reparsed = SavePayload::from_json(&text).unwrap();
            assert_eq!(
                &decode(reparsed),
                session.state(),
                "seed {seed} step {step}"
            );
        }
    }
}

#[test]
fn migrating_current_payload_is_a_no_op() {
    let mut session = session(3);
    for _ in 0..5 {
        session.explore_step(4).unwrap();
    }
    let payload = SavePayload::from_state(session.state()).unwrap();

    let migrated = MigrationPipeline::new().migrate(payload.clone()).unwrap();
    assert_eq!(migrated, payload);
}

#[test]
fn unversioned_legacy_save_migrates_to_current() {
    let legacy = json!({
        "player": { "name": "Wren", "race": "elf" },
        "day": 20,
        "season_index": 1,
        "season_day": 5,
        "stamina": { "current": 7.5, "base_cap": 10.0 },
        "meals": 1,
        "inventory": { "berries": 2 },
        "rapport": { "hermit": 4 },
        "flags": {},
        "npc_flags": { "hermit": { "met": true } },
        "discovered_landmarks": ["trailhead", "old_mill"],
        "current_landmark": "old_mill",
        "act1_quest_stage": 1,
        "act1_repaired_runestones": 2,
        "recent_events": ["forage.berries"],
    });
    let serde_json::Value::Object(fields) = legacy else {
        unreachable!()
    };

    let state = decode(SavePayload::from_fields(fields));

    assert_eq!(state.season, Season::Summer);
    assert_eq!(state.day_in_season, 6);
    assert_eq!(state.time_of_day, TimeOfDay::Dawn);
    assert_eq!(state.days_without_meal, 0);
    assert!(state.ate_meal_today);
    assert_eq!(state.inventory.count("berries"), 2);
    assert!(state.flags.get("hermit.met"));
    assert_eq!(state.quests.get("act1"), Some(&1));
    assert_eq!(state.quests.get("runestones"), Some(&2));
    assert_eq!(state.landmark_stability.get("trailhead"), Some(&1));
    assert_eq!(state.landmark_stability.get("old_mill"), Some(&1));
    assert!(state.recent_events.contains("forage.berries"));
    assert_eq!(state.status, RunStatus::Active);
    assert!(state.timed_modifiers.is_empty());
}

#[test]
fn current_payload_missing_a_field_is_corrupt() {
    let mut fields = SavePayload::from_state(session(1).state())
        .unwrap()
        .into_fields();
    fields.remove("inventory");

    let err = StateStore::<GameRng>::load(SavePayload::from_fields(fields)).unwrap_err();
    assert_eq!(
        err,
        MigrationError::CorruptLegacyPayload {
            version: SCHEMA_VERSION,
            field: "inventory".into(),
        }
    );
}

#[test]
fn future_schema_is_refused_on_load() {
    let repository = InMemorySaveRepository::new();
    let mut fields = SavePayload::from_state(session(1).state())
        .unwrap()
        .into_fields();
    fields.insert("schema_version".into(), json!(SCHEMA_VERSION + 1));
    repository
        .save("save", &SavePayload::from_fields(fields))
        .unwrap();

    let mut session = session_with(1, Box::new(repository));
    let before = session.state().clone();
    let err = session.load().unwrap_err();

    assert!(matches!(
        err,
        SessionError::Migration(MigrationError::UnsupportedFutureSchema { .. })
    ));
    assert_eq!(session.state(), &before);
}

#[test]
fn file_repository_resumes_a_run() {
    let dir = TempDir::new().unwrap();

    let mut first = session_with(21, Box::new(FileSaveRepository::new(dir.path()).unwrap()));
    for depth in 0..6 {
        first.explore_step(depth).unwrap();
    }
    first.end_day().unwrap();
    first.save().unwrap();
    assert!(dir.path().join("save.json").exists());

    let (catalog, config) = content();
    let resumed = GameSession::resume(
        catalog,
        config,
        GameRng::seed_from_u64(0),
        Box::new(FileSaveRepository::new(dir.path()).unwrap()),
        "save",
    )
    .unwrap()
    .expect("slot was written");

    assert_eq!(resumed.state(), first.state());
}

#[test]
fn empty_slot_resumes_nothing() {
    let dir = TempDir::new().unwrap();
    let (catalog, config) = content();

    let resumed = GameSession::resume(
        catalog,
        config,
        GameRng::seed_from_u64(0),
        Box::new(FileSaveRepository::new(dir.path()).unwrap()),
        "save",
    )
    .unwrap();
    assert!(resumed.is_none());
}

#[test]
fn corrupt_save_is_distinct_from_missing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("save.json"), "{ truncated").unwrap();

    let mut session = session_with(2, Box::new(FileSaveRepository::new(dir.path()).unwrap()));
    let err = session.load().unwrap_err();
    assert!(matches!(
        err,
        SessionError::Repository(RepositoryError::Corrupt { .. })
    ));
}
