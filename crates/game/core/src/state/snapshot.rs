use crate::rapport::RapportTier;

use super::{GameState, RecentEvents, RunStatus, Season, StatKind, TimeOfDay, active_total};

/// Immutable read view over [`GameState`].
///
/// Conditions, the event selector and the dialogue engine only ever see the
/// state through this type, so a borrowed snapshot cannot outlive or race a
/// mutation.
#[derive(Clone, Copy, Debug)]
pub struct StateSnapshot<'a> {
    state: &'a GameState,
}

impl<'a> StateSnapshot<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self { state }
    }

    /// Escape hatch for callers that need a field without a dedicated reader.
    pub fn state(&self) -> &'a GameState {
        self.state
    }

    pub fn day(&self) -> u32 {
        self.state.day
    }

    pub fn season(&self) -> Season {
        self.state.season
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        self.state.time_of_day
    }

    pub fn race(&self) -> &'a str {
        &self.state.player.race
    }

    pub fn player_name(&self) -> &'a str {
        &self.state.player.name
    }

    pub fn flag(&self, name: &str) -> bool {
        self.state.flags.get(name)
    }

    pub fn item_count(&self, item: &str) -> u32 {
        self.state.inventory.count(item)
    }

    pub fn rapport(&self, npc: &str) -> i64 {
        self.state.rapport.get(npc).copied().unwrap_or(0)
    }

    /// Derived on every call; tiers are never stored.
    pub fn rapport_tier(&self, npc: &str) -> RapportTier {
        RapportTier::from_score(self.rapport(npc))
    }

    pub fn path_stability(&self, landmark: &str) -> u32 {
        self.state
            .landmark_stability
            .get(landmark)
            .copied()
            .unwrap_or(0)
    }

    pub fn quest_stage(&self, quest: &str) -> u32 {
        self.state.quests.get(quest).copied().unwrap_or(0)
    }

    pub fn recent_events(&self) -> &'a RecentEvents {
        &self.state.recent_events
    }

    pub fn steps_since_forage(&self) -> u32 {
        self.state.steps_since_forage
    }

    pub fn stamina(&self) -> f64 {
        self.state.stamina.current
    }

    pub fn days_without_meal(&self) -> u32 {
        self.state.days_without_meal
    }

    pub fn status(&self) -> RunStatus {
        self.state.status
    }

    pub fn stat_bonus(&self, stat: StatKind) -> f64 {
        active_total(&self.state.timed_modifiers, stat, self.state.day)
    }
}
