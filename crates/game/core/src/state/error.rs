//! Effect application errors.
//!
//! Raised by the reducer when an effect cannot be applied to the current
//! state. A failing effect list leaves the state untouched.

use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectError {
    /// Not enough units of an item to remove.
    #[error("cannot remove {requested} x {item}: only {held} held")]
    InsufficientItems {
        item: String,
        requested: u32,
        held: u32,
    },

    /// Count range with `min > max`.
    #[error("invalid count range {min}..={max} for item {item}")]
    InvalidCountRange { item: String, min: u32, max: u32 },

    /// NaN or infinite numeric amount.
    #[error("non-finite amount for {field}")]
    NonFiniteAmount { field: String },

    /// The run is over; no further effects are accepted.
    #[error("the run has ended")]
    RunEnded,
}

impl GameError for EffectError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientItems { .. } => ErrorSeverity::Recoverable,
            Self::InvalidCountRange { .. } | Self::NonFiniteAmount { .. } => {
                ErrorSeverity::Validation
            }
            Self::RunEnded => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientItems { .. } => "EFFECT_INSUFFICIENT_ITEMS",
            Self::InvalidCountRange { .. } => "EFFECT_INVALID_COUNT_RANGE",
            Self::NonFiniteAmount { .. } => "EFFECT_NON_FINITE_AMOUNT",
            Self::RunEnded => "EFFECT_RUN_ENDED",
        }
    }
}
