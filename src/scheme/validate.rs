//! Field-level validation errors for scheme writes

use serde::Serialize;
use thiserror::Error;

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A write was rejected because the resulting record would be invalid.
///
/// Carries every violation found, not only the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", summarize(.violations))]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Build from a list of violations
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// A required field was absent, null or blank
    pub fn required(field: &str) -> Self {
        Self::new(vec![FieldViolation::new(field, format!("{} is required", field))])
    }

    /// The document could not be read as a scheme (wrong JSON types)
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(vec![FieldViolation::new("body", message)])
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Names of the offending fields, in the order they were found
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
