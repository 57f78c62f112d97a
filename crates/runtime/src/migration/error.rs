use hiker_core::{ErrorSeverity, GameError};
use thiserror::Error;

/// Failure to bring a save payload up to the current schema.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MigrationError {
    #[error("save schema {found} is newer than supported schema {supported}")]
    UnsupportedFutureSchema { found: u32, supported: u32 },

    #[error("schema {version} save is missing required field `{field}`")]
    CorruptLegacyPayload { version: u32, field: String },

    #[error("schema {version} save is malformed: {reason}")]
    Malformed { version: u32, reason: String },
}

impl MigrationError {
    pub(crate) fn missing(version: u32, field: impl Into<String>) -> Self {
        Self::CorruptLegacyPayload {
            version,
            field: field.into(),
        }
    }

    pub(crate) fn malformed(version: u32, reason: impl Into<String>) -> Self {
        Self::Malformed {
            version,
            reason: reason.into(),
        }
    }
}

impl GameError for MigrationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedFutureSchema { .. } => "MIGRATION_FUTURE_SCHEMA",
            Self::CorruptLegacyPayload { .. } => "MIGRATION_CORRUPT_LEGACY",
            Self::Malformed { .. } => "MIGRATION_MALFORMED",
        }
    }
}
