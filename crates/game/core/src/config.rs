//! Tunable engine parameters.
//!
//! Everything here is balance data rather than engine logic. Defaults mirror
//! the shipped tuning notes; `config.toml` in the content directory can
//! override any subset of fields.

use crate::env::EventCategory;
use crate::state::Season;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GameConfig {
    /// Event selection tuning.
    pub events: EventTuning,
    /// Hunger and stamina rules.
    pub hunger: HungerRules,
    /// Path stability multipliers and ceiling.
    pub stability: StabilityRules,
    /// Season spans used to derive the calendar from the absolute day.
    pub calendar: Calendar,
}

impl GameConfig {
    pub const DEFAULT_HISTORY_CAPACITY: usize = 3;
    pub const DEFAULT_DAMPING: f64 = 0.1;
    pub const DEFAULT_FORAGE_SAFETY_NET: u32 = 7;
    pub const DEFAULT_BASE_STAMINA_CAP: f64 = 10.0;
    pub const DEFAULT_WAKE_RESTORE: f64 = 6.0;
    pub const DEFAULT_STARVATION_THRESHOLD: u32 = 4;
    pub const DEFAULT_SEASON_LENGTH: u32 = 14;

    pub fn new() -> Self {
        Self {
            events: EventTuning::default(),
            hunger: HungerRules::default(),
            stability: StabilityRules::default(),
            calendar: Calendar::default(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters consumed by the event selector.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EventTuning {
    /// Capacity N of the recent-event ring buffer.
    pub history_capacity: usize,
    /// Multiplier applied to events present in the recent history (0.0..=1.0).
    pub damping: f64,
    /// Steps without a forage draw after which a forage event is forced.
    pub forage_safety_net: u32,
    /// Depth thresholds separating edge, mid and deep bands.
    pub bands: DepthBands,
    /// Category multipliers per depth band.
    pub category_weights: BandMultipliers,
}

impl Default for EventTuning {
    fn default() -> Self {
        Self {
            history_capacity: GameConfig::DEFAULT_HISTORY_CAPACITY,
            damping: GameConfig::DEFAULT_DAMPING,
            forage_safety_net: GameConfig::DEFAULT_FORAGE_SAFETY_NET,
            bands: DepthBands::default(),
            category_weights: BandMultipliers::default(),
        }
    }
}

/// Coarse depth bucket used to look up category multipliers.
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
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum DepthBand {
    Edge,
    Mid,
    Deep,
}

/// Inclusive upper bounds of the edge and mid bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DepthBands {
    pub edge_max: u32,
    pub mid_max: u32,
}

impl DepthBands {
    pub fn band_for(&self, depth: u32) -> DepthBand {
        if depth <= self.edge_max {
            DepthBand::Edge
        } else if depth <= self.mid_max {
            DepthBand::Mid
        } else {
            DepthBand::Deep
        }
    }
}

impl Default for DepthBands {
    fn default() -> Self {
        Self {
            edge_max: 9,
            mid_max: 24,
        }
    }
}

/// Multiplier per event category.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryMultipliers {
    pub forage: f64,
    pub flavor: f64,
    pub hazard: f64,
    pub encounter: f64,
    pub boon: f64,
}

impl CategoryMultipliers {
    pub const fn uniform(value: f64) -> Self {
        Self {
            forage: value,
            flavor: value,
            hazard: value,
            encounter: value,
            boon: value,
        }
    }

    pub fn get(&self, category: EventCategory) -> f64 {
        match category {
            EventCategory::Forage => self.forage,
            EventCategory::Flavor => self.flavor,
            EventCategory::Hazard => self.hazard,
            EventCategory::Encounter => self.encounter,
            EventCategory::Boon => self.boon,
        }
    }
}

impl Default for CategoryMultipliers {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

/// Policy table keyed by (depth band, category).
///
/// When deserialized, every omitted band or category keeps its built-in
/// value from [`BandMultipliers::default`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "BandOverrides")
)]
pub struct BandMultipliers {
    pub edge: CategoryMultipliers,
    pub mid: CategoryMultipliers,
    pub deep: CategoryMultipliers,
}

impl BandMultipliers {
    pub fn get(&self, band: DepthBand, category: EventCategory) -> f64 {
        self.band(band).get(category)
    }

    pub fn band(&self, band: DepthBand) -> &CategoryMultipliers {
        match band {
            DepthBand::Edge => &self.edge,
            DepthBand::Mid => &self.mid,
            DepthBand::Deep => &self.deep,
        }
    }

    /// Every `(band, category, multiplier)` cell of the table.
    pub fn cells(&self) -> impl Iterator<Item = (DepthBand, EventCategory, f64)> + '_ {
        use strum::IntoEnumIterator;

        DepthBand::iter().flat_map(move |band| {
            EventCategory::iter().map(move |category| (band, category, self.get(band, category)))
        })
    }
}

/// Sparse band table as written in `config.toml`.
#[cfg(feature = "serde")]
#[derive(Default, serde::Deserialize)]
#[serde(default)]
struct BandOverrides {
    edge: CategoryOverrides,
    mid: CategoryOverrides,
    deep: CategoryOverrides,
}

#[cfg(feature = "serde")]
#[derive(Default, serde::Deserialize)]
#[serde(default)]
struct CategoryOverrides {
    forage: Option<f64>,
    flavor: Option<f64>,
    hazard: Option<f64>,
    encounter: Option<f64>,
    boon: Option<f64>,
}

#[cfg(feature = "serde")]
impl CategoryOverrides {
    fn over(self, base: CategoryMultipliers) -> CategoryMultipliers {
        CategoryMultipliers {
            forage: self.forage.unwrap_or(base.forage),
            flavor: self.flavor.unwrap_or(base.flavor),
            hazard: self.hazard.unwrap_or(base.hazard),
            encounter: self.encounter.unwrap_or(base.encounter),
            boon: self.boon.unwrap_or(base.boon),
        }
    }
}

#[cfg(feature = "serde")]
impl From<BandOverrides> for BandMultipliers {
    fn from(overrides: BandOverrides) -> Self {
        let base = Self::default();
        Self {
            edge: overrides.edge.over(base.edge),
            mid: overrides.mid.over(base.mid),
            deep: overrides.deep.over(base.deep),
        }
    }
}

impl Default for BandMultipliers {
    fn default() -> Self {
        Self {
            edge: CategoryMultipliers {
                forage: 0.8,
                flavor: 1.3,
                hazard: 0.5,
                encounter: 0.5,
                boon: 1.2,
            },
            mid: CategoryMultipliers {
                forage: 0.7,
                flavor: 1.0,
                hazard: 1.1,
                encounter: 1.15,
                boon: 1.0,
            },
            deep: CategoryMultipliers {
                forage: 0.5,
                flavor: 0.75,
                hazard: 1.3,
                encounter: 1.4,
                boon: 1.15,
            },
        }
    }
}

/// Hunger-driven stamina cap and starvation rules.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct HungerRules {
    /// Cap multiplier indexed by days without a meal. Days past the end use
    /// the last entry.
    pub cap_multipliers: Vec<f64>,
    /// Days without a meal that end the run.
    pub starvation_threshold: u32,
    /// Stamina cap before hunger and modifiers.
    pub base_stamina_cap: f64,
    /// Stamina regained when a new day starts, before clamping to the cap.
    pub wake_restore: f64,
}

impl Default for HungerRules {
    fn default() -> Self {
        Self {
            cap_multipliers: vec![1.0, 0.8, 0.55, 0.30, 0.0],
            starvation_threshold: GameConfig::DEFAULT_STARVATION_THRESHOLD,
            base_stamina_cap: GameConfig::DEFAULT_BASE_STAMINA_CAP,
            wake_restore: GameConfig::DEFAULT_WAKE_RESTORE,
        }
    }
}

/// Path stability rules.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct StabilityRules {
    /// Weight multiplier indexed by stability. Values past the end use the
    /// last entry.
    pub multipliers: Vec<f64>,
    /// Ceiling for per-landmark stability counters.
    pub max: u32,
}

impl StabilityRules {
    pub fn multiplier(&self, stability: u32) -> f64 {
        let stability = stability.min(self.max);
        let index = stability as usize;
        self.multipliers
            .get(index)
            .or_else(|| self.multipliers.last())
            .copied()
            .unwrap_or(1.0)
    }

    /// Player-facing familiarity label.
    pub fn label(stability: u32) -> &'static str {
        match stability {
            0 => "unknown",
            1 => "faint path",
            2 => "familiar path",
            _ => "well-worn path",
        }
    }
}

impl Default for StabilityRules {
    fn default() -> Self {
        Self {
            multipliers: vec![1.0, 1.2, 1.5, 2.0],
            max: 3,
        }
    }
}

/// One contiguous run of days belonging to a season.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeasonSpan {
    pub season: Season,
    pub length: u32,
}

/// Ordered season spans forming one in-game year.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Calendar {
    pub spans: Vec<SeasonSpan>,
}

impl Calendar {
    pub fn new(spans: Vec<SeasonSpan>) -> Self {
        Self { spans }
    }

    /// Total days in one year.
    pub fn year_length(&self) -> u32 {
        self.spans.iter().map(|span| span.length).sum()
    }

    /// Returns `(season, day_in_season)` for a 1-indexed absolute day.
    pub fn locate(&self, day: u32) -> (Season, u32) {
        let year = self.year_length();
        if year == 0 {
            return (Season::Spring, 1);
        }

        let mut offset = day.saturating_sub(1) % year;
        for span in &self.spans {
            if offset < span.length {
                return (span.season, offset + 1);
            }
            offset -= span.length;
        }

        (Season::Spring, 1)
    }
}

impl Default for Calendar {
    fn default() -> Self {
        use strum::IntoEnumIterator;

        Self {
            spans: Season::iter()
                .map(|season| SeasonSpan {
                    season,
                    length: GameConfig::DEFAULT_SEASON_LENGTH,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_bands_follow_thresholds() {
        let bands = DepthBands::default();
        assert_eq!(bands.band_for(0), DepthBand::Edge);
        assert_eq!(bands.band_for(9), DepthBand::Edge);
        assert_eq!(bands.band_for(10), DepthBand::Mid);
        assert_eq!(bands.band_for(24), DepthBand::Mid);
        assert_eq!(bands.band_for(25), DepthBand::Deep);
    }

    #[test]
    fn calendar_wraps_years() {
        let calendar = Calendar::default();
        assert_eq!(calendar.locate(1), (Season::Spring, 1));
        assert_eq!(calendar.locate(14), (Season::Spring, 14));
        assert_eq!(calendar.locate(15), (Season::Summer, 1));
        assert_eq!(calendar.locate(56), (Season::Winter, 14));
        assert_eq!(calendar.locate(57), (Season::Spring, 1));
    }

    #[test]
    fn empty_calendar_is_always_spring() {
        let calendar = Calendar::new(Vec::new());
        assert_eq!(calendar.locate(40), (Season::Spring, 1));
    }

    #[test]
    fn stability_multiplier_saturates() {
        let rules = StabilityRules::default();
        assert_eq!(rules.multiplier(0), 1.0);
        assert_eq!(rules.multiplier(2), 1.5);
        assert_eq!(rules.multiplier(9), 2.0);
    }

    #[test]
    fn band_multipliers_lookup() {
        let table = BandMultipliers::default();
        assert_eq!(table.get(DepthBand::Edge, EventCategory::Flavor), 1.3);
        assert_eq!(table.get(DepthBand::Deep, EventCategory::Encounter), 1.4);
    }

    #[test]
    fn band_cells_cover_the_table() {
        let table = BandMultipliers::default();
        assert_eq!(table.cells().count(), 15);
        assert!(
            table
                .cells()
                .any(|cell| cell == (DepthBand::Mid, EventCategory::Hazard, 1.1))
        );
    }
}
