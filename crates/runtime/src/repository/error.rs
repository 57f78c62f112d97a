//! Error types raised by save repository implementations.

use hiker_core::{ErrorSeverity, GameError};
use thiserror::Error;

/// Errors surfaced by save repository implementations.
///
/// A missing slot is not an error; repositories return `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("save repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("save slot `{slot}` is corrupt: {reason}")]
    Corrupt { slot: String, reason: String },

    #[error("save slot `{slot}` is locked by another writer")]
    Locked { slot: String },

    #[error("invalid save slot name `{0}`")]
    InvalidSlot(String),
}

impl GameError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Locked { .. } => ErrorSeverity::Recoverable,
            Self::InvalidSlot(_) => ErrorSeverity::Validation,
            Self::Corrupt { .. } => ErrorSeverity::Fatal,
            Self::LockPoisoned | Self::Io(_) | Self::Serialization(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned => "SAVE_LOCK_POISONED",
            Self::Io(_) => "SAVE_IO",
            Self::Serialization(_) => "SAVE_SERIALIZATION",
            Self::Corrupt { .. } => "SAVE_CORRUPT",
            Self::Locked { .. } => "SAVE_LOCKED",
            Self::InvalidSlot(_) => "SAVE_INVALID_SLOT",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
