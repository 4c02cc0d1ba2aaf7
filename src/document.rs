//! The persisted catalog document.
//!
//! The whole catalog lives in one JSON file (`data/projects.json` in the
//! site tree): the declared categories in display order, then
//! every project record. Saving is a full-document overwrite; there is no
//! journaling and no partial write recovery.
//!
//! ```json
//! {
//!   "categories": [{ "id": "video" }, { "id": "colour-grading" }],
//!   "projects": [{ "id": "launch-trailer", "title": "...", ... }]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Category, Project};

/// The full catalog as persisted on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Document {
    /// Declared categories, in display order
    #[serde(default)]
    pub categories: Vec<Category>,
    /// All projects, in catalog order
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON. Absent sections default to empty; records may
    /// carry dangling asset references, which stay untouched here and
    /// degrade to "missing" when resolved.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the document to a file, overwriting it.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!(
            "Saved {} projects to {:?}",
            self.projects.len(),
            path
        );
        Ok(())
    }

    /// Load a document from a file.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let document = Self::from_json(&json)?;
        log::info!(
            "Loaded {} projects in {} categories from {:?}",
            document.projects.len(),
            document.categories.len(),
            path
        );
        Ok(document)
    }
}
