//! Data-driven content documents and loaders.
//!
//! This crate reads the content directory into a validated
//! [`hiker_core::ContentCatalog`] and the tuning [`hiker_core::GameConfig`]:
//! - Events, NPCs, per-NPC dialogue (RON)
//! - Landmarks, items, recipes, races, seasons (RON)
//! - Engine tuning (TOML)
//!
//! Loading is all-or-nothing per document. Any failure aborts catalog
//! construction with a [`ContentLoadError`] naming the document and field.

mod error;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use error::ContentLoadError;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, DialogueLoader, EventLoader, LoadResult, NpcLoader, WorldLoader,
};
