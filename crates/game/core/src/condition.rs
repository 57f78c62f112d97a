//! Conjunctive predicates over a [`StateSnapshot`].
//!
//! A [`Condition`] is a set of optional predicates; every populated predicate
//! must hold. The default condition has no predicates and is always satisfied.
//! Content documents deserialize directly into this type, so every field
//! defaults to "no constraint".

use std::collections::BTreeMap;

use crate::rapport::RapportTier;
use crate::state::{Season, StateSnapshot, TimeOfDay};

/// Rapport constraint. `npc: None` refers to the NPC of the surrounding
/// context (the dialogue partner); outside such a context it never holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RapportRequirement {
    pub npc: Option<String>,
    pub min_tier: Option<RapportTier>,
    pub max_tier: Option<RapportTier>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Condition {
    pub rapport: Option<RapportRequirement>,
    pub require_flags: Vec<String>,
    pub forbid_flags: Vec<String>,
    pub min_day: Option<u32>,
    pub max_day: Option<u32>,
    /// Empty means any season.
    pub seasons: Vec<Season>,
    /// Empty means any time of day.
    pub times_of_day: Vec<TimeOfDay>,
    pub required_items: BTreeMap<String, u32>,
    /// Landmark identifier to minimum path stability.
    pub min_path_stability: BTreeMap<String, u32>,
    /// Quest identifier to minimum stage.
    pub min_quest_stage: BTreeMap<String, u32>,
    /// Empty means any race.
    pub races: Vec<String>,
}

impl Condition {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Evaluates every predicate against `snapshot`.
    ///
    /// `npc` is the contextual NPC used by a rapport requirement that does not
    /// name one explicitly.
    pub fn evaluate(&self, snapshot: StateSnapshot<'_>, npc: Option<&str>) -> bool {
        self.rapport_holds(snapshot, npc)
            && self.require_flags.iter().all(|flag| snapshot.flag(flag))
            && !self.forbid_flags.iter().any(|flag| snapshot.flag(flag))
            && self.min_day.is_none_or(|min| snapshot.day() >= min)
            && self.max_day.is_none_or(|max| snapshot.day() <= max)
            && (self.seasons.is_empty() || self.seasons.contains(&snapshot.season()))
            && (self.times_of_day.is_empty() || self.times_of_day.contains(&snapshot.time_of_day()))
            && self
                .required_items
                .iter()
                .all(|(item, count)| snapshot.item_count(item) >= *count)
            && self
                .min_path_stability
                .iter()
                .all(|(landmark, min)| snapshot.path_stability(landmark) >= *min)
            && self
                .min_quest_stage
                .iter()
                .all(|(quest, stage)| snapshot.quest_stage(quest) >= *stage)
            && (self.races.is_empty() || self.races.iter().any(|race| race == snapshot.race()))
    }

    fn rapport_holds(&self, snapshot: StateSnapshot<'_>, npc: Option<&str>) -> bool {
        let Some(requirement) = &self.rapport else {
            return true;
        };
        let Some(npc) = requirement.npc.as_deref().or(npc) else {
            return false;
        };

        let tier = snapshot.rapport_tier(npc);
        requirement.min_tier.is_none_or(|min| tier >= min)
            && requirement.max_tier.is_none_or(|max| tier <= max)
    }
}

/// Evaluates an optional condition; absent conditions hold.
pub fn evaluate(condition: Option<&Condition>, snapshot: StateSnapshot<'_>, npc: Option<&str>) -> bool {
    condition.is_none_or(|condition| condition.evaluate(snapshot, npc))
}
