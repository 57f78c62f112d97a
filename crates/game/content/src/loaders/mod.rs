//! Content loaders for reading game data from files.
//!
//! Each loader reads one document family. RON documents wrap their records in
//! a named list (`(events: [...])`), TOML is used for engine tuning only.

pub mod config;
pub mod dialogue;
pub mod events;
pub mod factory;
pub mod npcs;
pub mod world;

pub use config::ConfigLoader;
pub use dialogue::DialogueLoader;
pub use events::EventLoader;
pub use factory::ContentFactory;
pub use npcs::NpcLoader;
pub use world::WorldLoader;

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::ContentLoadError;

/// Common result type for loaders.
pub type LoadResult<T> = Result<T, ContentLoadError>;

pub(crate) fn document_name(path: &Path) -> String {
    path.display().to_string()
}

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).map_err(|source| ContentLoadError::Io {
        document: document_name(path),
        source,
    })
}

/// Reads and deserializes a RON document.
pub(crate) fn parse_ron<T: DeserializeOwned>(path: &Path) -> LoadResult<T> {
    let content = read_file(path)?;
    ron::from_str(&content).map_err(|error| ContentLoadError::Parse {
        document: document_name(path),
        field: ron_field(&error.code),
        message: error.to_string(),
    })
}

fn ron_field(code: &ron::Error) -> Option<String> {
    match code {
        ron::Error::MissingStructField { field, .. }
        | ron::Error::DuplicateStructField { field, .. } => Some((*field).to_owned()),
        ron::Error::NoSuchStructField { found, .. } => Some(found.clone()),
        _ => None,
    }
}
