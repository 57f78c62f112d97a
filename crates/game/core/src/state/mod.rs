//! Authoritative game state representation.
//!
//! [`GameState`] is the single mutable aggregate of a run. Readers borrow it
//! through [`StateSnapshot`]; every mutation flows through
//! [`crate::engine::GameEngine`].
mod calendar;
mod error;
mod flags;
mod history;
mod inventory;
mod modifiers;
mod snapshot;

use std::collections::{BTreeMap, BTreeSet};

pub use calendar::{Season, TimeOfDay};
pub use error::EffectError;
pub use flags::FlagSet;
pub use history::RecentEvents;
pub use inventory::Inventory;
pub use modifiers::{StatKind, StatModifier, TimedModifier, active_total};
pub use snapshot::StateSnapshot;

use crate::config::GameConfig;

/// Current save schema. Bump together with a new migration step.
pub const SCHEMA_VERSION: u32 = 5;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerProfile {
    pub name: String,
    /// Race identifier from the races catalog.
    pub race: String,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stamina {
    pub current: f64,
    pub base_cap: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameOverCause {
    Starvation,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunStatus {
    #[default]
    Active,
    GameOver(GameOverCause),
}

/// Canonical state of a single run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub player: PlayerProfile,

    /// Absolute day, 1-indexed.
    pub day: u32,
    pub season: Season,
    /// Day within `season`, 1-indexed.
    pub day_in_season: u32,
    pub time_of_day: TimeOfDay,

    pub stamina: Stamina,
    pub days_without_meal: u32,
    pub ate_meal_today: bool,
    pub ate_snack_today: bool,

    pub inventory: Inventory,
    /// Signed rapport score per NPC identifier.
    pub rapport: BTreeMap<String, i64>,
    pub flags: FlagSet,
    /// Quest identifier to stage. Stages only move forward.
    pub quests: BTreeMap<String, u32>,

    pub discovered_landmarks: BTreeSet<String>,
    pub current_landmark: Option<String>,
    pub landmark_stability: BTreeMap<String, u32>,

    pub recent_events: RecentEvents,
    pub steps_since_forage: u32,

    pub timed_modifiers: Vec<TimedModifier>,
    pub status: RunStatus,
}

impl GameState {
    /// Fresh run on day 1 with full stamina.
    pub fn new(player: PlayerProfile, config: &GameConfig) -> Self {
        let (season, day_in_season) = config.calendar.locate(1);
        let base_cap = config.hunger.base_stamina_cap;

        Self {
            player,
            day: 1,
            season,
            day_in_season,
            time_of_day: TimeOfDay::Dawn,
            stamina: Stamina {
                current: base_cap,
                base_cap,
            },
            days_without_meal: 0,
            ate_meal_today: false,
            ate_snack_today: false,
            inventory: Inventory::new(),
            rapport: BTreeMap::new(),
            flags: FlagSet::default(),
            quests: BTreeMap::new(),
            discovered_landmarks: BTreeSet::new(),
            current_landmark: None,
            landmark_stability: BTreeMap::new(),
            recent_events: RecentEvents::with_capacity(config.events.history_capacity),
            steps_since_forage: 0,
            timed_modifiers: Vec::new(),
            status: RunStatus::Active,
        }
    }

    pub fn snapshot(&self) -> StateSnapshot<'_> {
        StateSnapshot::new(self)
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, RunStatus::GameOver(_))
    }
}
