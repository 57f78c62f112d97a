//! Content factory for building the catalog from data files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use hiker_core::{CatalogError, ContentCatalog, ContentKind, GameConfig};

use crate::ContentLoadError;
use crate::loaders::dialogue::DialogueSet;
use crate::loaders::{
    ConfigLoader, DialogueLoader, EventLoader, LoadResult, NpcLoader, WorldLoader, document_name,
};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional)
/// ├── events.ron
/// ├── npcs.ron
/// ├── landmarks.ron
/// ├── items.ron
/// ├── recipes.ron      (optional)
/// ├── races.ron        (optional)
/// ├── seasons.ron      (optional)
/// └── dialogue/
///     ├── hermit.ron
///     └── peddler.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine tuning from `config.toml`, or defaults when it is absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.document(ContentFile::Config);
        if !path.exists() {
            tracing::debug!(document = %path.display(), "no config document, using defaults");
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load and validate every content document.
    pub fn load_catalog(&self) -> LoadResult<ContentCatalog> {
        let events = EventLoader::load(&self.document(ContentFile::Events))?;
        let npcs = NpcLoader::load(&self.document(ContentFile::Npcs))?;
        let landmarks = WorldLoader::load_landmarks(&self.document(ContentFile::Landmarks))?;
        let items = WorldLoader::load_items(&self.document(ContentFile::Items))?;
        let recipes = self.optional(ContentFile::Recipes, WorldLoader::load_recipes)?;
        let races = self.optional(ContentFile::Races, WorldLoader::load_races)?;
        let seasons = self.optional(ContentFile::Seasons, WorldLoader::load_seasons)?;
        let DialogueSet { nodes, sources } = DialogueLoader::load_dir(&self.dialogue_dir())?;

        ContentCatalog::builder()
            .events(events)
            .npcs(npcs)
            .landmarks(landmarks)
            .items(items)
            .recipes(recipes)
            .races(races)
            .seasons(seasons)
            .dialogue(nodes)
            .build()
            .map_err(|error| self.attribute(&error, &sources))
    }

    /// Load the catalog and the tuning it runs under.
    ///
    /// A seasons document overrides the calendar from `config.toml`.
    pub fn load(&self) -> LoadResult<(ContentCatalog, GameConfig)> {
        let mut config = self.load_config()?;
        let catalog = self.load_catalog()?;
        if let Some(calendar) = catalog.calendar() {
            config.calendar = calendar;
        }

        tracing::info!(
            data_dir = %self.data_dir.display(),
            events = catalog.events().len(),
            npcs = catalog.npcs().len(),
            nodes = catalog.nodes().len(),
            landmarks = catalog.landmarks().len(),
            "content loaded"
        );
        Ok((catalog, config))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn dialogue_dir(&self) -> PathBuf {
        self.data_dir.join("dialogue")
    }

    fn document(&self, file: ContentFile) -> PathBuf {
        self.data_dir.join(file.file_name())
    }

    fn optional<T>(
        &self,
        file: ContentFile,
        load: impl FnOnce(&Path) -> LoadResult<Vec<T>>,
    ) -> LoadResult<Vec<T>> {
        let path = self.document(file);
        if path.exists() { load(&path) } else { Ok(Vec::new()) }
    }

    /// Names the document responsible for a catalog violation.
    fn attribute(
        &self,
        error: &CatalogError,
        dialogue_sources: &BTreeMap<String, PathBuf>,
    ) -> ContentLoadError {
        let path = match error.kind() {
            ContentKind::Events => self.document(ContentFile::Events),
            ContentKind::Npcs => self.document(ContentFile::Npcs),
            ContentKind::Landmarks => self.document(ContentFile::Landmarks),
            ContentKind::Items => self.document(ContentFile::Items),
            ContentKind::Recipes => self.document(ContentFile::Recipes),
            ContentKind::Races => self.document(ContentFile::Races),
            ContentKind::Seasons => self.document(ContentFile::Seasons),
            ContentKind::Dialogue => dialogue_sources
                .get(error.record_id())
                .cloned()
                .unwrap_or_else(|| self.dialogue_dir()),
        };
        ContentLoadError::from_catalog(document_name(&path), error)
    }
}

#[derive(Clone, Copy)]
enum ContentFile {
    Config,
    Events,
    Npcs,
    Landmarks,
    Items,
    Recipes,
    Races,
    Seasons,
}

impl ContentFile {
    const fn file_name(self) -> &'static str {
        match self {
            Self::Config => "config.toml",
            Self::Events => "events.ron",
            Self::Npcs => "npcs.ron",
            Self::Landmarks => "landmarks.ron",
            Self::Items => "items.ron",
            Self::Recipes => "recipes.ron",
            Self::Races => "races.ron",
            Self::Seasons => "seasons.ron",
        }
    }
}
