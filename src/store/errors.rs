//! # Record Store Errors

use thiserror::Error;

use crate::scheme::{SchemeId, ValidationError};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The record (or the merged record) failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No record with this id
    #[error("Scheme not found: {0}")]
    NotFound(SchemeId),

    /// The persistence layer could not be reached or failed
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}
