//! In-memory record store
//!
//! Records live for the lifetime of the process. Used by tests and by
//! `memory://` deployments.

use std::sync::RwLock;

use super::collection::Collection;
use super::errors::{StoreError, StoreResult};
use super::SchemeStore;
use crate::scheme::{Scheme, SchemeDraft, SchemeId, SchemePatch};

/// In-memory scheme store
#[derive(Debug, Default)]
pub struct MemorySchemeStore {
    collection: RwLock<Collection>,
}

impl MemorySchemeStore {
    pub fn new() -> Self {
        Self {
            collection: RwLock::new(Collection::new()),
        }
    }
}

impl SchemeStore for MemorySchemeStore {
    fn create(&self, draft: SchemeDraft) -> StoreResult<Scheme> {
        let mut collection = self
            .collection
            .write()
            .map_err(|_| StoreError::unavailable("Lock poisoned"))?;
        collection.insert(draft)
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
        let mut collection = self
            .collection
            .write()
            .map_err(|_| StoreError::unavailable("Lock poisoned"))?;
        collection.update(id, patch)
    }

    fn delete_by_id(&self, id: &SchemeId) -> StoreResult<Scheme> {
        let mut collection = self
            .collection
            .write()
            .map_err(|_| StoreError::unavailable("Lock poisoned"))?;
        collection.remove(id)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
