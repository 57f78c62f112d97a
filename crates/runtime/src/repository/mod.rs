//! Save persistence.
//!
//! Repositories store [`crate::SavePayload`]s by slot name:
//! - [`FileSaveRepository`] writes one JSON document per slot
//! - [`InMemorySaveRepository`] keeps payloads in memory for tests and
//!   throwaway runs
mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use traits::{SaveRepository, validate_slot};
