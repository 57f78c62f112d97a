//! Timed stat modifiers granted by events, teas and dialogue.

/// Stat keys understood by the engine.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum StatKind {
    /// Adds to the base stamina cap before the hunger multiplier.
    StaminaMax,
    /// Added to positive rapport changes, rounded to the nearest point.
    RapportBonus,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub stat: StatKind,
    pub amount: f64,
}

/// A bundle of stat modifiers active until the end of `expires_on_day`.
/// `None` means the modifier lasts until explicitly removed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedModifier {
    pub source: String,
    pub modifiers: Vec<StatModifier>,
    pub expires_on_day: Option<u32>,
}

impl TimedModifier {
    pub fn is_active(&self, day: u32) -> bool {
        self.expires_on_day.is_none_or(|last| day <= last)
    }

    pub fn total(&self, stat: StatKind) -> f64 {
        self.modifiers
            .iter()
            .filter(|modifier| modifier.stat == stat)
            .map(|modifier| modifier.amount)
            .sum()
    }
}

/// Sum of a stat across all modifiers active on `day`.
pub fn active_total(modifiers: &[TimedModifier], stat: StatKind, day: u32) -> f64 {
    modifiers
        .iter()
        .filter(|modifier| modifier.is_active(day))
        .map(|modifier| modifier.total(stat))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_modifiers_do_not_count() {
        let modifiers = vec![
            TimedModifier {
                source: "mint_tea".into(),
                modifiers: vec![StatModifier {
                    stat: StatKind::StaminaMax,
                    amount: 2.0,
                }],
                expires_on_day: Some(3),
            },
            TimedModifier {
                source: "blessing".into(),
                modifiers: vec![StatModifier {
                    stat: StatKind::StaminaMax,
                    amount: 1.0,
                }],
                expires_on_day: None,
            },
        ];

        assert_eq!(active_total(&modifiers, StatKind::StaminaMax, 3), 3.0);
        assert_eq!(active_total(&modifiers, StatKind::StaminaMax, 4), 1.0);
        assert_eq!(active_total(&modifiers, StatKind::RapportBonus, 1), 0.0);
    }
}
