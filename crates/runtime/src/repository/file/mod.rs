//! File-based SaveRepository implementation.
//!
//! Each slot is a pretty-printed JSON document `{slot}.json` in the base
//! directory. Writes take an exclusive `{slot}.lock` file, write to
//! `{slot}.json.tmp`, fsync, then rename over the previous save.
//!
//! A lock older than [`FileSaveRepository::STALE_LOCK_AGE`] was left by a
//! writer that died mid-save and is reclaimed.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::payload::SavePayload;
use crate::repository::{RepositoryError, Result, SaveRepository, validate_slot};

const EXTENSION: &str = "json";

#[derive(Debug)]
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    /// Lock files older than this are treated as abandoned.
    pub const STALE_LOCK_AGE: Duration = Duration::from_secs(30);

    /// Create a repository rooted at `base_dir`, creating it if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("{slot}.{EXTENSION}"))
    }

    fn temp_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("{slot}.{EXTENSION}.tmp"))
    }

    fn lock_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("{slot}.lock"))
    }

    fn lock(&self, slot: &str) -> Result<SlotLock> {
        let path = self.lock_path(slot);
        match SlotLock::acquire(&path)? {
            Some(lock) => return Ok(lock),
            None if Self::is_stale(&path) => {
                tracing::warn!(slot, path = %path.display(), "reclaiming stale save lock");
                match fs::remove_file(&path) {
                    Ok(()) => {}
                    Err(error) if error.kind() == ErrorKind::NotFound => {}
                    Err(error) => return Err(RepositoryError::Io(error)),
                }
            }
            None => {}
        }

        SlotLock::acquire(&path)?.ok_or_else(|| RepositoryError::Locked {
            slot: slot.to_owned(),
        })
    }

    /// A lock whose age cannot be read is assumed live.
    fn is_stale(path: &Path) -> bool {
        fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .ok()
            .and_then(|modified| modified.elapsed().ok())
            .is_some_and(|age| age >= Self::STALE_LOCK_AGE)
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: &str, payload: &SavePayload) -> Result<()> {
        validate_slot(slot)?;
        let text = payload.to_json()?;

        let _lock = self.lock(slot)?;
        let path = self.slot_path(slot);
        let temp_path = self.temp_path(slot);

        let written = write_synced(&temp_path, text.as_bytes())
            .and_then(|()| fs::rename(&temp_path, &path));
        if let Err(error) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(RepositoryError::Io(error));
        }

        tracing::info!(slot, path = %path.display(), "save written");
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SavePayload>> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(RepositoryError::Io(error)),
        };

        let corrupt = |reason: String| RepositoryError::Corrupt {
            slot: slot.to_owned(),
            reason,
        };
        let text = String::from_utf8(bytes).map_err(|error| corrupt(error.to_string()))?;
        let payload = SavePayload::from_json(&text).map_err(|error| corrupt(error.to_string()))?;

        tracing::debug!(slot, path = %path.display(), "save loaded");
        Ok(Some(payload))
    }

    fn exists(&self, slot: &str) -> bool {
        validate_slot(slot).is_ok() && self.slot_path(slot).exists()
    }

    fn delete(&self, slot: &str) -> Result<()> {
        validate_slot(slot)?;
        let _lock = self.lock(slot)?;
        match fs::remove_file(self.slot_path(slot)) {
            Ok(()) => {
                tracing::debug!(slot, "save deleted");
                Ok(())
            }
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(RepositoryError::Io(error)),
        }
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == EXTENSION)
                && let Some(slot) = path.file_stem().and_then(|stem| stem.to_str())
                && validate_slot(slot).is_ok()
            {
                slots.push(slot.to_owned());
            }
        }

        slots.sort_unstable();
        Ok(slots)
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// Exclusive claim on a slot, released on drop.
#[derive(Debug)]
struct SlotLock {
    path: PathBuf,
}

impl SlotLock {
    /// Returns `None` if another writer holds the lock.
    fn acquire(path: &Path) -> Result<Option<Self>> {
        match OpenOptions::new().create_new(true).write(true).open(path) {
            Ok(mut file) => {
                let lock = Self {
                    path: path.to_path_buf(),
                };
                writeln!(file, "{}", std::process::id())?;
                Ok(Some(lock))
            }
            Err(error) if error.kind() == ErrorKind::AlreadyExists => Ok(None),
            Err(error) => Err(RepositoryError::Io(error)),
        }
    }
}

impl Drop for SlotLock {
    fn drop(&mut self) {
        if let Err(error) = fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), %error, "failed to release save lock");
        }
    }
}
