//! File-backed record store
//!
//! The whole collection is kept as one JSON document on disk and mirrored
//! in memory. Every mutation is applied to a staged copy, written to a
//! temporary file, fsynced and renamed over the data file. The in-memory
//! copy is only replaced once that succeeded, so a failed write leaves the
//! store as it was.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::collection::Collection;
use super::errors::{StoreError, StoreResult};
use super::SchemeStore;
use crate::scheme::{Scheme, SchemeDraft, SchemeId, SchemePatch};

/// JSON-document scheme store
#[derive(Debug)]
pub struct FileSchemeStore {
    path: PathBuf,
    collection: RwLock<Collection>,
}

impl FileSchemeStore {
    /// Opens the store at `path`, creating an empty data file (and parent
    /// directories) if none exists yet.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the file cannot be created, read
    /// or parsed.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::unavailable(format!(
                    "Failed to create data directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let collection = if path.exists() {
            Self::load(&path)?
        } else {
            let empty = Collection::new();
            Self::persist(&path, &empty)?;
            empty
        };

        tracing::debug!(path = %path.display(), records = collection.len(), "scheme file loaded");

        Ok(Self {
            path,
            collection: RwLock::new(collection),
        })
    }

    fn load(path: &Path) -> StoreResult<Collection> {
        let bytes = fs::read(path).map_err(|e| {
            StoreError::unavailable(format!("Failed to read {}: {}", path.display(), e))
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Collection::new());
        }

        let schemes: Vec<Scheme> = serde_json::from_slice(&bytes).map_err(|e| {
            StoreError::unavailable(format!("Corrupt data file {}: {}", path.display(), e))
        })?;
        Collection::from_schemes(schemes)
    }

    fn persist(path: &Path, collection: &Collection) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(collection)
            .map_err(|e| StoreError::unavailable(format!("Failed to encode schemes: {}", e)))?;

        let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);

        let write_failed = |e: std::io::Error| {
            StoreError::unavailable(format!("Failed to write {}: {}", path.display(), e))
        };

        let mut file = File::create(&tmp_path).map_err(write_failed)?;
        file.write_all(&bytes).map_err(write_failed)?;
        file.sync_all().map_err(write_failed)?;
        drop(file);

        fs::rename(&tmp_path, path).map_err(write_failed)?;

        // Make the rename itself durable. Not every platform can open or
        // sync a directory; the data file itself is already synced.
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = sync_dir(parent) {
                tracing::warn!(dir = %parent.display(), error = %e, "directory fsync failed");
            }
        }

        Ok(())
    }

    /// Apply `op` to a staged copy and commit it only if it persists
    fn mutate<T>(&self, op: impl FnOnce(&mut Collection) -> StoreResult<T>) -> StoreResult<T> {
        let mut collection = self
            .collection
            .write()
            .map_err(|_| StoreError::unavailable("Lock poisoned"))?;

        let mut staged = collection.clone();
        let out = op(&mut staged)?;
        Self::persist(&self.path, &staged)?;
        *collection = staged;

        Ok(out)
    }
}

fn sync_dir(dir: &Path) -> std::io::Result<()> {
    File::open(dir)?.sync_all()
}

impl SchemeStore for FileSchemeStore {
    fn create(&self, draft: SchemeDraft) -> StoreResult<Scheme> {
        self.mutate(|c| c.insert(draft))
    }

    fn list(&self) -> StoreResult<Vec<Scheme>> {
        let collection = self
            .collection
            .read()
            .map_err(|_| StoreError::unavailable("Lock poisoned"))?;
        Ok(collection.schemes().to_vec())
    }

    fn get_by_id(&self, id: &SchemeId) -> StoreResult<Scheme> {
        let collection = self
            .collection
            .read()
            .map_err(|_| StoreError::unavailable("Lock poisoned"))?;
        collection.get(id)
    }

    fn update_by_id(&self, id: &SchemeId, patch: &SchemePatch) -> StoreResult<Scheme> {
        self.mutate(|c| c.update(id, patch))
    }

    fn delete_by_id(&self, id: &SchemeId) -> StoreResult<Scheme> {
        self.mutate(|c| c.remove(id))
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}
