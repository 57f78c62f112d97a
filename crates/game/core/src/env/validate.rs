//! Cross-document integrity checks run once at catalog construction.

use std::collections::HashSet;

use crate::effect::Effect;

use super::error::CatalogError;
use super::{ContentCatalog, ContentKind};

pub(super) fn validate(catalog: &ContentCatalog) -> Result<(), CatalogError> {
    validate_landmarks(catalog)?;
    validate_events(catalog)?;
    validate_npcs(catalog)?;
    validate_dialogue(catalog)?;
    validate_recipes(catalog)?;
    validate_seasons(catalog)
}

fn validate_landmarks(catalog: &ContentCatalog) -> Result<(), CatalogError> {
    for landmark in catalog.landmarks() {
        if landmark.depth_min > landmark.depth_max {
            return Err(CatalogError::invalid(
                ContentKind::Landmarks,
                &landmark.id,
                "depth_max",
                format!(
                    "depth_max {} is below depth_min {}",
                    landmark.depth_max, landmark.depth_min
                ),
            ));
        }
    }
    Ok(())
}

fn validate_events(catalog: &ContentCatalog) -> Result<(), CatalogError> {
    const KIND: ContentKind = ContentKind::Events;

    for event in catalog.events() {
        if !event.base_weight.is_finite() || event.base_weight < 0.0 {
            return Err(CatalogError::invalid(
                KIND,
                &event.id,
                "base_weight",
                "must be finite and non-negative",
            ));
        }
        if !event.depth_weight.is_finite() {
            return Err(CatalogError::invalid(
                KIND,
                &event.id,
                "depth_weight",
                "must be finite",
            ));
        }
        if let Some(max) = event.max_depth
            && max < event.min_depth
        {
            return Err(CatalogError::invalid(
                KIND,
                &event.id,
                "max_depth",
                format!("max_depth {max} is below min_depth {}", event.min_depth),
            ));
        }
        for (season, weight) in &event.season_weights {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(CatalogError::invalid(
                    KIND,
                    &event.id,
                    format!("season_weights.{season}"),
                    "must be finite and non-negative",
                ));
            }
        }
        if let Some(landmark) = &event.landmark
            && catalog.landmark(landmark).is_none()
        {
            return Err(CatalogError::dangling(
                KIND,
                &event.id,
                "landmark",
                ContentKind::Landmarks,
                landmark,
            ));
        }
        validate_effects(KIND, &event.id, "effects", &event.effects)?;
    }
    Ok(())
}

fn validate_npcs(catalog: &ContentCatalog) -> Result<(), CatalogError> {
    const KIND: ContentKind = ContentKind::Npcs;

    for npc in catalog.npcs() {
        let entries = npc
            .start_nodes
            .iter()
            .map(|id| ("start_nodes", id))
            .chain(std::iter::once(("fallback_node", &npc.fallback_node)));

        for (field, node_id) in entries {
            let Some(node) = catalog.node(node_id) else {
                return Err(CatalogError::dangling(
                    KIND,
                    &npc.id,
                    field,
                    ContentKind::Dialogue,
                    node_id,
                ));
            };
            if node.npc_id != npc.id {
                return Err(CatalogError::invalid(
                    KIND,
                    &npc.id,
                    field,
                    format!("node `{node_id}` belongs to `{}`", node.npc_id),
                ));
            }
        }

        if catalog
            .node(&npc.fallback_node)
            .is_some_and(|node| node.condition.as_ref().is_some_and(|c| !c.is_empty()))
        {
            return Err(CatalogError::invalid(
                KIND,
                &npc.id,
                "fallback_node",
                "fallback node must not be gated",
            ));
        }

        for landmark in &npc.landmark_ids {
            if catalog.landmark(landmark).is_none() {
                return Err(CatalogError::dangling(
                    KIND,
                    &npc.id,
                    "landmark_ids",
                    ContentKind::Landmarks,
                    landmark,
                ));
            }
        }
    }
    Ok(())
}

fn validate_dialogue(catalog: &ContentCatalog) -> Result<(), CatalogError> {
    const KIND: ContentKind = ContentKind::Dialogue;

    for node in catalog.nodes() {
        if catalog.npc(&node.npc_id).is_none() {
            return Err(CatalogError::dangling(
                KIND,
                &node.id,
                "npc_id",
                ContentKind::Npcs,
                &node.npc_id,
            ));
        }

        for (index, option) in node.options.iter().enumerate() {
            if let Some(next) = &option.next_node_id
                && catalog.node(next).is_none()
            {
                return Err(CatalogError::dangling(
                    KIND,
                    &node.id,
                    format!("options[{index}].next_node_id"),
                    ContentKind::Dialogue,
                    next,
                ));
            }
            validate_effects(
                KIND,
                &node.id,
                &format!("options[{index}].effects"),
                &option.effects,
            )?;
        }
    }
    Ok(())
}

fn validate_recipes(catalog: &ContentCatalog) -> Result<(), CatalogError> {
    const KIND: ContentKind = ContentKind::Recipes;

    for recipe in catalog.recipes() {
        for item in recipe.ingredients.keys() {
            if catalog.item(item).is_none() {
                return Err(CatalogError::dangling(
                    KIND,
                    &recipe.id,
                    "ingredients",
                    ContentKind::Items,
                    item,
                ));
            }
        }
        if catalog.item(&recipe.output).is_none() {
            return Err(CatalogError::dangling(
                KIND,
                &recipe.id,
                "output",
                ContentKind::Items,
                &recipe.output,
            ));
        }
        if recipe.output_count == 0 {
            return Err(CatalogError::invalid(
                KIND,
                &recipe.id,
                "output_count",
                "must be at least 1",
            ));
        }
    }
    Ok(())
}

fn validate_seasons(catalog: &ContentCatalog) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for season in catalog.seasons() {
        let id = season.season.to_string();
        if !seen.insert(season.season) {
            return Err(CatalogError::DuplicateId {
                kind: ContentKind::Seasons,
                id,
            });
        }
        if season.length == 0 {
            return Err(CatalogError::invalid(
                ContentKind::Seasons,
                &id,
                "length",
                "must be at least 1",
            ));
        }
    }
    Ok(())
}

fn validate_effects(
    kind: ContentKind,
    id: &str,
    field: &str,
    effects: &[Effect],
) -> Result<(), CatalogError> {
    for effect in effects {
        match effect {
            Effect::AddItems(grants) => {
                if let Some(grant) = grants.iter().find(|grant| !grant.count.is_valid()) {
                    return Err(CatalogError::invalid(
                        kind,
                        id,
                        field,
                        format!(
                            "count range {}..={} for `{}` has min above max",
                            grant.count.min, grant.count.max, grant.item
                        ),
                    ));
                }
            }
            Effect::Stamina(delta) if !delta.is_finite() => {
                return Err(CatalogError::invalid(
                    kind,
                    id,
                    field,
                    "stamina delta must be finite",
                ));
            }
            _ => {}
        }
    }
    Ok(())
}
