//! Store connection strings
//!
//! - `memory://` selects the in-memory store
//! - `file://<path>` or a bare path selects the JSON file store

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::errors::StoreError;

/// Parsed store connection string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUri {
    Memory,
    File(PathBuf),
}

impl FromStr for StoreUri {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(StoreError::unavailable("empty store URI"));
        }

        if s == "memory://" || s == "memory:" {
            return Ok(StoreUri::Memory);
        }

        if let Some(path) = s.strip_prefix("file://") {
            if path.is_empty() {
                return Err(StoreError::unavailable("file store URI has no path"));
            }
            return Ok(StoreUri::File(PathBuf::from(path)));
        }

        if let Some((scheme, _)) = s.split_once("://") {
            return Err(StoreError::unavailable(format!(
                "unsupported store scheme '{}'",
                scheme
            )));
        }

        Ok(StoreUri::File(PathBuf::from(s)))
    }
}

impl fmt::Display for StoreUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreUri::Memory => write!(f, "memory://"),
            StoreUri::File(path) => write!(f, "file://{}", path.display()),
        }
    }
}
