//! Errors surfaced by the game session.

use hiker_content::ContentLoadError;
use hiker_core::{DialogueError, EffectError, ErrorSeverity, GameError, SelectError};
use thiserror::Error;

use crate::migration::MigrationError;
use crate::repository::RepositoryError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Content(#[from] ContentLoadError),

    #[error(transparent)]
    Select(#[from] SelectError),

    #[error(transparent)]
    Dialogue(#[from] DialogueError),

    #[error(transparent)]
    Effect(#[from] EffectError),

    #[error(transparent)]
    Migration(#[from] MigrationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("no dialogue in progress")]
    NoConversation,
}

impl GameError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Content(error) => error.severity(),
            Self::Select(error) => error.severity(),
            Self::Dialogue(error) => error.severity(),
            Self::Effect(error) => error.severity(),
            Self::Migration(error) => error.severity(),
            Self::Repository(error) => error.severity(),
            Self::NoConversation => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Content(error) => error.error_code(),
            Self::Select(error) => error.error_code(),
            Self::Dialogue(error) => error.error_code(),
            Self::Effect(error) => error.error_code(),
            Self::Migration(error) => error.error_code(),
            Self::Repository(error) => error.error_code(),
            Self::NoConversation => "SESSION_NO_CONVERSATION",
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
