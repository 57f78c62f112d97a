//! Process configuration read from the environment.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_SAVE_SLOT: &str = "save";
pub const DEFAULT_DATA_DIR: &str = "crates/game/content/data";

/// Where content and saves live and how the RNG is seeded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub data_dir: PathBuf,
    pub save_dir: PathBuf,
    pub save_slot: String,
    pub session_id: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            save_dir: default_save_dir(),
            save_slot: DEFAULT_SAVE_SLOT.to_owned(),
            session_id: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `HIKER_SEED` - RNG seed (default: entropy)
    /// - `HIKER_DATA_DIR` - Content directory (default: `crates/game/content/data`)
    /// - `HIKER_SAVE_DIR` - Save directory (default: platform data dir)
    /// - `HIKER_SAVE_SLOT` - Save slot name (default: `save`)
    /// - `HIKER_SESSION_ID` - Session identifier for log files
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.seed = read_env::<u64>("HIKER_SEED");

        if let Some(dir) = read_env::<PathBuf>("HIKER_DATA_DIR") {
            config.data_dir = dir;
        }
        if let Some(dir) = read_env::<PathBuf>("HIKER_SAVE_DIR") {
            config.save_dir = dir;
        }
        if let Some(slot) = read_env::<String>("HIKER_SAVE_SLOT").filter(|slot| !slot.is_empty()) {
            config.save_slot = slot;
        }

        config.session_id = env::var("HIKER_SESSION_ID").ok();

        config
    }
}

/// Platform data directory for saves.
///
/// - macOS: `~/Library/Application Support/lost-hiker/saves`
/// - Linux: `~/.local/share/lost-hiker/saves`
/// - Windows: `%APPDATA%\lost-hiker\saves`
/// - Fallback: `./save_data`
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "lost-hiker")
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

/// Platform cache directory for logs.
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "lost-hiker")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("/tmp/lost-hiker/logs"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
