//! # Record Store
//!
//! Durable persistence of scheme records with id-based addressing.
//!
//! [`SchemeStore`] is the seam between the HTTP layer and storage. Two
//! backends implement it:
//!
//! - [`MemorySchemeStore`]: process-lifetime only
//! - [`FileSchemeStore`]: one JSON document on disk, fsynced on every write
//!
//! The process opens exactly one store at startup with [`open`] and hands
//! the resulting handle to the server.

mod collection;
mod errors;
mod file;
mod memory;
mod uri;

use std::sync::Arc;

pub use errors::{StoreError, StoreResult};
pub use file::FileSchemeStore;
pub use memory::MemorySchemeStore;
pub use uri::StoreUri;

use crate::scheme::{Scheme, SchemeDraft, SchemeId, SchemePatch};

/// Shared handle to the process-wide store
pub type SharedStore = Arc<dyn SchemeStore>;

/// Trait for scheme record storage.
///
/// Implementations serialize their own access; every successful mutating
/// call is durable before it returns.
pub trait SchemeStore: Send + Sync {
    /// Validate and insert a new record with a fresh id and timestamp
    fn create(&self, draft: SchemeDraft) -> StoreResult<Scheme>;

    /// All records in storage order
    fn list(&self) -> StoreResult<Vec<Scheme>>;

    /// Fetch one record
    fn get_by_id(&self, id: &SchemeId) -> StoreResult<Scheme>;

    /// Merge `patch` into an existing record and return the result
    fn update_by_id(&self, id: &SchemeId, patch: &SchemePatch) -> StoreResult<Scheme>;

    /// Remove a record and return its last state
    fn delete_by_id(&self, id: &SchemeId) -> StoreResult<Scheme>;

    /// Short backend name for logs
    fn backend(&self) -> &'static str;
}

/// Open the store named by a connection string
pub fn open(uri: &str) -> StoreResult<SharedStore> {
    let uri: StoreUri = uri.parse()?;

    let store: SharedStore = match &uri {
        StoreUri::Memory => Arc::new(MemorySchemeStore::new()),
        StoreUri::File(path) => Arc::new(FileSchemeStore::open(path)?),
    };

    tracing::info!(uri = %uri, backend = store.backend(), "record store opened");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_memory() {
        let store = open("memory://").unwrap();
        assert_eq!(store.backend(), "memory");
    }

    #[test]
    fn test_open_file() {
        let tmp = TempDir::new().unwrap();
        let uri = format!("file://{}", tmp.path().join("schemes.json").display());

        let store = open(&uri).unwrap();
        assert_eq!(store.backend(), "file");
    }

    #[test]
    fn test_open_unsupported() {
        let err = open("postgres://localhost/schemes").err().unwrap();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
