use std::collections::BTreeMap;

use crate::condition::Condition;
use crate::effect::Effect;
use crate::state::Season;

/// Closed set of exploration event categories.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum EventCategory {
    Forage,
    Flavor,
    Hazard,
    Encounter,
    Boon,
}

/// An exploration event as authored in `events.ron`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventDefinition {
    pub id: String,
    pub category: EventCategory,
    pub text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
    pub base_weight: f64,
    /// Additive slope per depth unit; may be negative.
    #[cfg_attr(feature = "serde", serde(default))]
    pub depth_weight: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_depth: u32,
    /// Unbounded when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_depth: Option<u32>,
    /// Missing seasons weigh 1.0.
    #[cfg_attr(feature = "serde", serde(default))]
    pub season_weights: BTreeMap<Season, f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: Option<Condition>,
    /// Landmark the event belongs to; drives the stability multiplier.
    #[cfg_attr(feature = "serde", serde(default))]
    pub landmark: Option<String>,
}

impl EventDefinition {
    pub fn allows_depth(&self, depth: u32) -> bool {
        depth >= self.min_depth && self.max_depth.is_none_or(|max| depth <= max)
    }

    pub fn season_weight(&self, season: Season) -> f64 {
        self.season_weights.get(&season).copied().unwrap_or(1.0)
    }

    /// `max(0, base + slope * depth)`.
    pub fn depth_adjusted_weight(&self, depth: u32) -> f64 {
        (self.base_weight + self.depth_weight * f64::from(depth)).max(0.0)
    }
}
