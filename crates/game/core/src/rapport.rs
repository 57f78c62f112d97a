//! Rapport tiers derived from raw NPC rapport scores.

/// Relationship level, ordered from worst to best.
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
pub enum RapportTier {
    Hostile,
    Neutral,
    Friendly,
    Close,
}

impl RapportTier {
    pub const NEUTRAL_FLOOR: i64 = 0;
    pub const FRIENDLY_FLOOR: i64 = 5;
    pub const CLOSE_FLOOR: i64 = 10;

    /// Total over every score.
    pub const fn from_score(score: i64) -> Self {
        if score < Self::NEUTRAL_FLOOR {
            Self::Hostile
        } else if score < Self::FRIENDLY_FLOOR {
            Self::Neutral
        } else if score < Self::CLOSE_FLOOR {
            Self::Friendly
        } else {
            Self::Close
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoints() {
        assert_eq!(RapportTier::from_score(-1), RapportTier::Hostile);
        assert_eq!(RapportTier::from_score(0), RapportTier::Neutral);
        assert_eq!(RapportTier::from_score(4), RapportTier::Neutral);
        assert_eq!(RapportTier::from_score(5), RapportTier::Friendly);
        assert_eq!(RapportTier::from_score(9), RapportTier::Friendly);
        assert_eq!(RapportTier::from_score(10), RapportTier::Close);
    }

    #[test]
    fn total_and_monotonic_at_extremes() {
        assert_eq!(RapportTier::from_score(i64::MIN), RapportTier::Hostile);
        assert_eq!(RapportTier::from_score(i64::MAX), RapportTier::Close);

        let mut previous = RapportTier::from_score(-50);
        for score in -49..50 {
            let tier = RapportTier::from_score(score);
            assert!(tier >= previous);
            previous = tier;
        }
    }
}
