//! Ordered scheme collection shared by the store backends.
//!
//! Holds records in insertion order and implements the record lifecycle.
//! Locking and persistence are the backend's job.

use std::collections::HashSet;

use chrono::Utc;
use serde::Serialize;

use super::errors::{StoreError, StoreResult};
use crate::scheme::{Scheme, SchemeDraft, SchemeId, SchemePatch};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct Collection {
    schemes: Vec<Scheme>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from previously stored records, rejecting duplicate ids
    pub fn from_schemes(schemes: Vec<Scheme>) -> StoreResult<Self> {
        let mut seen = HashSet::with_capacity(schemes.len());
        for scheme in &schemes {
            if !seen.insert(scheme.id) {
                return Err(StoreError::unavailable(format!(
                    "duplicate scheme id in stored data: {}",
                    scheme.id
                )));
            }
        }
        Ok(Self { schemes })
    }

    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn insert(&mut self, draft: SchemeDraft) -> StoreResult<Scheme> {
        let scheme = draft.into_scheme(self.fresh_id(), Utc::now())?;
        self.schemes.push(scheme.clone());
        Ok(scheme)
    }

    pub fn get(&self, id: &SchemeId) -> StoreResult<Scheme> {
        self.schemes
            .iter()
            .find(|s| s.id == *id)
            .cloned()
            .ok_or(StoreError::NotFound(*id))
    }

    /// Merge the patch into the record. The record is only replaced if the
    /// merged result is valid.
    pub fn update(&mut self, id: &SchemeId, patch: &SchemePatch) -> StoreResult<Scheme> {
        let slot = self
            .schemes
            .iter_mut()
            .find(|s| s.id == *id)
            .ok_or(StoreError::NotFound(*id))?;

        let updated = slot.merged(patch)?;
        *slot = updated.clone();
        Ok(updated)
    }

    pub fn remove(&mut self, id: &SchemeId) -> StoreResult<Scheme> {
        let index = self
            .schemes
            .iter()
            .position(|s| s.id == *id)
            .ok_or(StoreError::NotFound(*id))?;
        Ok(self.schemes.remove(index))
    }

    fn fresh_id(&self) -> SchemeId {
        loop {
            let id = SchemeId::new();
            if !self.schemes.iter().any(|s| s.id == id) {
                return id;
            }
        }
    }
}
