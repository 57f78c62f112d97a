//! Runtime orchestration for Lost Hiker runs.
//!
//! This crate owns everything around the pure engine in `hiker-core`: the
//! live state, save persistence and schema migration, process configuration
//! and the seeded RNG. Front ends embed [`GameSession`].
//!
//! Modules are organized by responsibility:
//! - [`store`] owns the live state and applies effects to it
//! - [`migration`] upgrades older save payloads to the current schema
//! - [`repository`] persists payloads by slot
//! - [`session`] drives exploration, dialogue and day transitions
//! - [`config`] and [`rng`] read process configuration and seed the RNG
pub mod config;
pub mod error;
pub mod migration;
pub mod payload;
pub mod repository;
pub mod rng;
pub mod session;
pub mod store;

pub use config::RuntimeConfig;
pub use error::{Result, SessionError};
pub use migration::{MigrationError, MigrationPipeline};
pub use payload::SavePayload;
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveRepository,
};
pub use rng::GameRng;
pub use session::{GameSession, STEP_COST, StepOutcome};
pub use store::StateStore;
