//! Immutable content catalog.
//!
//! The catalog aggregates every content document (events, dialogue nodes,
//! NPCs, landmarks, items, recipes, races, seasons) behind identifier lookups.
//! It is built once through [`CatalogBuilder`], which rejects duplicates and
//! dangling references, and is read-only afterwards.
mod dialogue;
mod error;
mod events;
mod npc;
mod registry;
mod validate;
mod world;

pub use dialogue::{DialogueNode, DialogueOption};
pub use error::{CatalogError, ContentKind};
pub use events::{EventCategory, EventDefinition};
pub use npc::NpcDefinition;
pub use registry::{Keyed, Registry};
pub use world::{
    ItemCategory, ItemDefinition, LandmarkDefinition, RaceDefinition, RecipeDefinition,
    SeasonDefinition,
};

use crate::config::{Calendar, SeasonSpan};

#[derive(Clone, Debug, Default)]
pub struct ContentCatalog {
    events: Registry<EventDefinition>,
    nodes: Registry<DialogueNode>,
    npcs: Registry<NpcDefinition>,
    landmarks: Registry<LandmarkDefinition>,
    items: Registry<ItemDefinition>,
    recipes: Registry<RecipeDefinition>,
    races: Registry<RaceDefinition>,
    seasons: Vec<SeasonDefinition>,
}

impl ContentCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn events(&self) -> &[EventDefinition] {
        self.events.as_slice()
    }

    pub fn event(&self, id: &str) -> Option<&EventDefinition> {
        self.events.get(id)
    }

    pub fn nodes(&self) -> &[DialogueNode] {
        self.nodes.as_slice()
    }

    pub fn node(&self, id: &str) -> Option<&DialogueNode> {
        self.nodes.get(id)
    }

    pub fn nodes_for<'a>(&'a self, npc_id: &'a str) -> impl Iterator<Item = &'a DialogueNode> {
        self.nodes().iter().filter(move |node| node.npc_id == npc_id)
    }

    pub fn npcs(&self) -> &[NpcDefinition] {
        self.npcs.as_slice()
    }

    pub fn npc(&self, id: &str) -> Option<&NpcDefinition> {
        self.npcs.get(id)
    }

    /// NPCs that can be met at a landmark, in document order.
    pub fn npcs_at<'a>(&'a self, landmark_id: &'a str) -> impl Iterator<Item = &'a NpcDefinition> {
        self.npcs()
            .iter()
            .filter(move |npc| npc.landmark_ids.iter().any(|id| id == landmark_id))
    }

    pub fn landmarks(&self) -> &[LandmarkDefinition] {
        self.landmarks.as_slice()
    }

    pub fn landmark(&self, id: &str) -> Option<&LandmarkDefinition> {
        self.landmarks.get(id)
    }

    pub fn landmarks_at_depth(&self, depth: u32) -> impl Iterator<Item = &LandmarkDefinition> {
        self.landmarks()
            .iter()
            .filter(move |landmark| landmark.contains_depth(depth))
    }

    pub fn items(&self) -> &[ItemDefinition] {
        self.items.as_slice()
    }

    pub fn item(&self, id: &str) -> Option<&ItemDefinition> {
        self.items.get(id)
    }

    pub fn recipes(&self) -> &[RecipeDefinition] {
        self.recipes.as_slice()
    }

    pub fn recipe(&self, id: &str) -> Option<&RecipeDefinition> {
        self.recipes.get(id)
    }

    pub fn races(&self) -> &[RaceDefinition] {
        self.races.as_slice()
    }

    pub fn race(&self, id: &str) -> Option<&RaceDefinition> {
        self.races.get(id)
    }

    pub fn seasons(&self) -> &[SeasonDefinition] {
        &self.seasons
    }

    /// Calendar described by the seasons document, if one was loaded.
    pub fn calendar(&self) -> Option<Calendar> {
        if self.seasons.is_empty() {
            return None;
        }
        Some(Calendar::new(
            self.seasons
                .iter()
                .map(|season| SeasonSpan {
                    season: season.season,
                    length: season.length,
                })
                .collect(),
        ))
    }
}

/// Collects documents, then validates them as a whole in [`CatalogBuilder::build`].
#[derive(Clone, Debug, Default)]
pub struct CatalogBuilder {
    events: Vec<EventDefinition>,
    nodes: Vec<DialogueNode>,
    npcs: Vec<NpcDefinition>,
    landmarks: Vec<LandmarkDefinition>,
    items: Vec<ItemDefinition>,
    recipes: Vec<RecipeDefinition>,
    races: Vec<RaceDefinition>,
    seasons: Vec<SeasonDefinition>,
}

impl CatalogBuilder {
    pub fn events(mut self, events: Vec<EventDefinition>) -> Self {
        self.events = events;
        self
    }

    /// Appends dialogue nodes; called once per NPC dialogue document.
    pub fn dialogue(mut self, nodes: Vec<DialogueNode>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    pub fn npcs(mut self, npcs: Vec<NpcDefinition>) -> Self {
        self.npcs = npcs;
        self
    }

    pub fn landmarks(mut self, landmarks: Vec<LandmarkDefinition>) -> Self {
        self.landmarks = landmarks;
        self
    }

    pub fn items(mut self, items: Vec<ItemDefinition>) -> Self {
        self.items = items;
        self
    }

    pub fn recipes(mut self, recipes: Vec<RecipeDefinition>) -> Self {
        self.recipes = recipes;
        self
    }

    pub fn races(mut self, races: Vec<RaceDefinition>) -> Self {
        self.races = races;
        self
    }

    pub fn seasons(mut self, seasons: Vec<SeasonDefinition>) -> Self {
        self.seasons = seasons;
        self
    }

    pub fn build(self) -> Result<ContentCatalog, CatalogError> {
        let catalog = ContentCatalog {
            events: Registry::from_vec(ContentKind::Events, self.events)?,
            nodes: Registry::from_vec(ContentKind::Dialogue, self.nodes)?,
            npcs: Registry::from_vec(ContentKind::Npcs, self.npcs)?,
            landmarks: Registry::from_vec(ContentKind::Landmarks, self.landmarks)?,
            items: Registry::from_vec(ContentKind::Items, self.items)?,
            recipes: Registry::from_vec(ContentKind::Recipes, self.recipes)?,
            races: Registry::from_vec(ContentKind::Races, self.races)?,
            seasons: self.seasons,
        };

        validate::validate(&catalog)?;

        tracing::debug!(
            events = catalog.events.len(),
            nodes = catalog.nodes.len(),
            npcs = catalog.npcs.len(),
            landmarks = catalog.landmarks.len(),
            "content catalog built"
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{CountRange, Effect, ItemGrant};

    fn node(id: &str, npc: &str, next: Option<&str>) -> DialogueNode {
        DialogueNode {
            id: id.into(),
            npc_id: npc.into(),
            text: String::new(),
            condition: None,
            options: vec![DialogueOption {
                text: "...".into(),
                next_node_id: next.map(Into::into),
                ..DialogueOption::default()
            }],
        }
    }

    fn npc(id: &str, start: &str) -> NpcDefinition {
        NpcDefinition {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            landmark_ids: Vec::new(),
            tags: Vec::new(),
            start_nodes: vec![start.into()],
            fallback_node: start.into(),
        }
    }

    fn event(id: &str) -> EventDefinition {
        EventDefinition {
            id: id.into(),
            category: EventCategory::Flavor,
            text: String::new(),
            effects: Vec::new(),
            base_weight: 1.0,
            depth_weight: 0.0,
            min_depth: 0,
            max_depth: None,
            season_weights: Default::default(),
            condition: None,
            landmark: None,
        }
    }

    #[test]
    fn duplicate_event_ids_are_rejected() {
        let err = ContentCatalog::builder()
            .events(vec![event("a"), event("a")])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateId {
                kind: ContentKind::Events,
                id: "a".into()
            }
        );
    }

    #[test]
    fn dangling_next_node_is_rejected() {
        let err = ContentCatalog::builder()
            .npcs(vec![npc("hermit", "hermit_start")])
            .dialogue(vec![node("hermit_start", "hermit", Some("missing"))])
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ContentKind::Dialogue);
        assert_eq!(err.field(), "options[0].next_node_id");
    }

    #[test]
    fn start_node_must_belong_to_npc() {
        let err = ContentCatalog::builder()
            .npcs(vec![npc("hermit", "hermit_start"), npc("kirin", "kirin_start")])
            .dialogue(vec![
                node("hermit_start", "kirin", None),
                node("kirin_start", "kirin", None),
            ])
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ContentKind::Npcs);
        assert_eq!(err.record_id(), "hermit");
    }

    #[test]
    fn invalid_weights_and_ranges_are_rejected() {
        let mut negative = event("negative");
        negative.base_weight = -1.0;
        let err = ContentCatalog::builder()
            .events(vec![negative])
            .build()
            .unwrap_err();
        assert_eq!(err.field(), "base_weight");

        let mut bad_range = event("bad_range");
        bad_range.effects = vec![Effect::AddItems(vec![ItemGrant::new(
            "berries",
            CountRange { min: 3, max: 1 },
        )])];
        let err = ContentCatalog::builder()
            .events(vec![bad_range])
            .build()
            .unwrap_err();
        assert_eq!(err.field(), "effects");

        let mut inverted = event("inverted");
        inverted.min_depth = 10;
        inverted.max_depth = Some(5);
        assert!(ContentCatalog::builder().events(vec![inverted]).build().is_err());
    }

    #[test]
    fn lookups_preserve_document_order() {
        let catalog = ContentCatalog::builder()
            .events(vec![event("b"), event("a"), event("c")])
            .build()
            .unwrap();
        let ids: Vec<_> = catalog.events().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert!(catalog.event("a").is_some());
        assert!(catalog.calendar().is_none());
    }
}
