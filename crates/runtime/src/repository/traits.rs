//! Repository contract for saving and loading runs.

use crate::payload::SavePayload;

use super::Result;

/// Repository for save payloads keyed by slot name.
///
/// Payloads are stored as-is; schema migration happens after loading.
pub trait SaveRepository: Send + Sync {
    /// Save a payload into a slot, replacing any previous one.
    fn save(&self, slot: &str, payload: &SavePayload) -> Result<()>;

    /// Load a slot. A slot that was never written returns `Ok(None)`.
    fn load(&self, slot: &str) -> Result<Option<SavePayload>>;

    fn exists(&self, slot: &str) -> bool;

    /// Delete a slot. Deleting a missing slot is not an error.
    fn delete(&self, slot: &str) -> Result<()>;

    /// List all slot names, sorted.
    fn list_slots(&self) -> Result<Vec<String>>;
}

/// Slot names become file names, so they are restricted to a safe alphabet.
pub fn validate_slot(slot: &str) -> Result<()> {
    let valid = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(super::RepositoryError::InvalidSlot(slot.to_owned()))
    }
}
