//! Season and time-of-day primitives.

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum Season {
    #[default]
    Spring,
    Summer,
    Fall,
    Winter,
}

/// Coarse clock within a single day.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum TimeOfDay {
    Dawn,
    #[default]
    Day,
    Dusk,
    Night,
}

impl TimeOfDay {
    /// Next slot, saturating at `Night`. Rolling over to dawn is the job of
    /// the day-end transition.
    pub const fn next(self) -> Self {
        match self {
            Self::Dawn => Self::Day,
            Self::Day => Self::Dusk,
            Self::Dusk | Self::Night => Self::Night,
        }
    }

    pub fn advance(self, slots: u32) -> Self {
        (0..slots).fold(self, |slot, _| slot.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_of_day_saturates_at_night() {
        assert_eq!(TimeOfDay::Dawn.advance(2), TimeOfDay::Dusk);
        assert_eq!(TimeOfDay::Day.advance(10), TimeOfDay::Night);
    }

    #[test]
    fn season_parses_lowercase() {
        assert_eq!("fall".parse::<Season>().ok(), Some(Season::Fall));
        assert_eq!(Season::Winter.to_string(), "winter");
    }
}
