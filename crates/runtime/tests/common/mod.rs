#![allow(dead_code)]

use std::path::PathBuf;

use hiker_content::ContentFactory;
use hiker_core::{ContentCatalog, GameConfig, PlayerProfile};
use hiker_runtime::{GameRng, GameSession, InMemorySaveRepository, SaveRepository};
use rand::SeedableRng;

pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../game/content/data")
}

pub fn content() -> (ContentCatalog, GameConfig) {
    ContentFactory::new(data_dir())
        .load()
        .expect("sample content loads")
}

pub fn player() -> PlayerProfile {
    PlayerProfile {
        name: "Wren".into(),
        race: "human".into(),
    }
}

pub fn session_with(seed: u64, repository: Box<dyn SaveRepository>) -> GameSession {
    let (catalog, config) = content();
    GameSession::new_game(
        catalog,
        config,
        player(),
        GameRng::seed_from_u64(seed),
        repository,
        "save",
    )
}

pub fn session(seed: u64) -> GameSession {
    session_with(seed, Box::new(InMemorySaveRepository::new()))
}
