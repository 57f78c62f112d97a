//! Landmark, item, recipe, race and season loaders.

use std::path::Path;

use hiker_core::{
    ItemDefinition, LandmarkDefinition, RaceDefinition, RecipeDefinition, SeasonDefinition,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandmarkTable {
    pub landmarks: Vec<LandmarkDefinition>,
}

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeBook {
    pub recipes: Vec<RecipeDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceTable {
    pub races: Vec<RaceDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonTable {
    pub seasons: Vec<SeasonDefinition>,
}

/// Loader for the static world documents.
pub struct WorldLoader;

impl WorldLoader {
    pub fn load_landmarks(path: &Path) -> LoadResult<Vec<LandmarkDefinition>> {
        parse_ron::<LandmarkTable>(path).map(|table| table.landmarks)
    }

    pub fn load_items(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        parse_ron::<ItemCatalog>(path).map(|catalog| catalog.items)
    }

    pub fn load_recipes(path: &Path) -> LoadResult<Vec<RecipeDefinition>> {
        parse_ron::<RecipeBook>(path).map(|book| book.recipes)
    }

    pub fn load_races(path: &Path) -> LoadResult<Vec<RaceDefinition>> {
        parse_ron::<RaceTable>(path).map(|table| table.races)
    }

    /// Season order in the document is calendar order.
    pub fn load_seasons(path: &Path) -> LoadResult<Vec<SeasonDefinition>> {
        parse_ron::<SeasonTable>(path).map(|table| table.seasons)
    }
}
