//! # Scheme Records
//!
//! The scheme document shape and the rules applied when one is written.
//!
//! A scheme enters the system as a [`SchemeDraft`] (create) or a
//! [`SchemePatch`] (update). Both are turned into a [`Scheme`] only after
//! the required fields have been checked, so a stored scheme always has a
//! non-empty title and description.

mod model;
mod validate;

pub use model::{Scheme, SchemeDraft, SchemeId, SchemePatch};
pub use validate::{FieldViolation, ValidationError};
