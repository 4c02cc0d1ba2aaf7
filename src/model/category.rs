//! Category data model for catalog sections.

use serde::{Deserialize, Serialize};

/// A catalog category.
///
/// Categories are declared once in the persisted document, in display
/// order, and are never created or deleted by the core. Projects refer to
/// them by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Unique identifier, also used as the display key
    pub id: String,
}

impl Category {
    /// Create a new category with the given id.
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}
