//! Error types for catalog and asset operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during catalog and asset operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A required field is empty or has an invalid value
    #[error("Validation failed: {message}")]
    Validation {
        /// Description of what failed validation
        message: String,
    },

    /// An index or id does not refer to an existing entry
    #[error("Not found: {what}")]
    NotFound {
        /// Description of what was looked up
        what: String,
    },

    /// I/O error during asset copy or delete
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A source file to copy from does not exist
    #[error("Source file not found: {path:?}")]
    SourceMissing {
        /// Path that was expected to exist
        path: PathBuf,
    },
}

impl CatalogError {
    /// Create a validation error with a message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not-found error for a project index.
    pub fn project_index(index: usize) -> Self {
        Self::NotFound {
            what: format!("project index {index}"),
        }
    }

    /// Create a not-found error for a gallery index.
    pub fn gallery_index(index: usize) -> Self {
        Self::NotFound {
            what: format!("gallery index {index}"),
        }
    }
}

/// Convenience alias for results in this crate.
pub type Result<T> = std::result::Result<T, CatalogError>;
