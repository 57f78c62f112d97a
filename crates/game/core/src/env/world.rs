//! Landmarks, races, seasons, items and recipes.
//!
//! The engine only reads a few fields from these (landmark depth ranges,
//! season lengths, item names for rendering); the rest is carried for
//! front ends.

use std::collections::BTreeMap;

use crate::state::Season;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LandmarkDefinition {
    pub id: String,
    pub name: String,
    pub depth_min: u32,
    pub depth_max: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub features: BTreeMap<String, bool>,
}

impl LandmarkDefinition {
    pub fn contains_depth(&self, depth: u32) -> bool {
        (self.depth_min..=self.depth_max).contains(&depth)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ItemCategory {
    Food,
    Tea,
    Tool,
    Material,
    Misc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: String,
    pub name: String,
    pub category: ItemCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecipeDefinition {
    pub id: String,
    pub name: String,
    pub ingredients: BTreeMap<String, u32>,
    pub output: String,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub output_count: u32,
}

#[cfg(feature = "serde")]
fn one() -> u32 {
    1
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RaceDefinition {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeasonDefinition {
    pub season: Season,
    pub length: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}
