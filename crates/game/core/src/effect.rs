//! The effect channel: the only way outcomes mutate [`crate::state::GameState`].
//!
//! Events and dialogue options carry effect lists authored in content. The
//! engine adds a few of its own (recording a drawn event, spending stamina on
//! a step). All of them are applied by [`crate::engine::GameEngine`].

use std::collections::BTreeMap;

use rand::Rng;

use crate::env::EventCategory;
use crate::state::StatModifier;

/// Inclusive random count range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn exact(count: u32) -> Self {
        Self {
            min: count,
            max: count,
        }
    }

    pub const fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    /// Draws from the RNG only when the range is not a single value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if self.min >= self.max {
            self.min
        } else {
            rng.random_range(self.min..=self.max)
        }
    }
}

impl Default for CountRange {
    fn default() -> Self {
        Self::exact(1)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemGrant {
    pub item: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub count: CountRange,
}

impl ItemGrant {
    pub fn new(item: impl Into<String>, count: CountRange) -> Self {
        Self {
            item: item.into(),
            count,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FoodKind {
    /// Resets the hunger counter at day end.
    Meal,
    /// Holds the hunger counter steady for one day.
    Snack,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierGrant {
    pub source: String,
    pub modifiers: Vec<StatModifier>,
    /// Days the modifier stays active, counting the current one. `None` is
    /// permanent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration_days: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    /// Adds items, each with a count drawn from its range.
    AddItems(Vec<ItemGrant>),
    /// Consumes items; fails as a whole if any count is short.
    RemoveItems(BTreeMap<String, u32>),
    /// Adjusts stamina, clamped to `[0, effective cap]`.
    Stamina(f64),
    Rapport { npc: String, delta: i64 },
    SetFlags(BTreeMap<String, bool>),
    ClearFlags(Vec<String>),
    AddTimedModifier(ModifierGrant),
    /// Pushes a drawn event into the recent history and updates the forage
    /// counter.
    RecordEvent {
        event_id: String,
        category: EventCategory,
    },
    /// Marks a landmark as visited again and makes it current.
    BumpPathStability(String),
    DiscoverLandmark(String),
    /// Raises a quest stage. Lower stages are ignored.
    AdvanceQuest { quest: String, stage: u32 },
    AdvanceTime(u32),
    Eat(FoodKind),
    /// Day rollover: hunger, calendar, modifiers, wake stamina.
    EndDay { ate_meal: bool },
}

impl Effect {
    pub fn add_item(item: impl Into<String>, count: u32) -> Self {
        Self::AddItems(vec![ItemGrant::new(item, CountRange::exact(count))])
    }

    pub fn remove_item(item: impl Into<String>, count: u32) -> Self {
        Self::RemoveItems([(item.into(), count)].into_iter().collect())
    }

    pub fn set_flag(name: impl Into<String>, value: bool) -> Self {
        Self::SetFlags([(name.into(), value)].into_iter().collect())
    }

    /// Variant name for logging.
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}
