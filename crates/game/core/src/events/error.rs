use crate::error::{ErrorSeverity, GameError};
use crate::state::{EffectError, Season};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SelectError {
    /// No event passes the depth and condition filters. Content gap; the
    /// caller supplies its own fallback text.
    #[error("no eligible event at depth {depth} in {season}")]
    NoEligibleEvent { depth: u32, season: Season },

    /// The drawn event could not be recorded in the history.
    #[error("failed to record drawn event: {0}")]
    Record(#[from] EffectError),
}

impl GameError for SelectError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoEligibleEvent { .. } => ErrorSeverity::Recoverable,
            Self::Record(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoEligibleEvent { .. } => "EVENT_NO_ELIGIBLE",
            Self::Record(error) => error.error_code(),
        }
    }
}
