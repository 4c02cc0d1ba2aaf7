//! Edit session: the catalog wired to its undo history.
//!
//! This is the surface the (external) interaction layer calls. Every
//! mutating operation runs the catalog op and, when it succeeds, pushes a
//! fresh snapshot onto the undo history. Undo and redo bypass the
//! operation layer entirely: they restore the catalog's project list from
//! a stored snapshot. The history is seeded with the initial load state so
//! the very first edit can be undone back to it.

use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::model::{Direction, Field};
use crate::undo::{UndoConfig, UndoManager};

/// One logical editing session over a single catalog.
#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    undo: UndoManager,
}

impl Session {
    /// Start a session, seeding the undo history with the current state.
    pub fn new(catalog: Catalog) -> Self {
        Self::with_undo_config(catalog, UndoConfig::default())
    }

    /// Start a session with a custom undo history bound.
    pub fn with_undo_config(catalog: Catalog, config: UndoConfig) -> Self {
        let mut undo = UndoManager::with_config(config);
        undo.push(&catalog.snapshot());
        Self { catalog, undo }
    }

    /// Read access to the catalog, for view projection.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run a mutating catalog operation and record the resulting state.
    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        if result.is_ok() {
            self.undo.push(&self.catalog.snapshot());
        }
        result
    }

    // ========================================================================
    // Catalog operations
    // ========================================================================

    /// Create a project; returns its index.
    pub fn create(&mut self, title: &str, category: &str) -> Result<usize> {
        let result = self.catalog.create(title, category).map(|(index, _)| index);
        self.record(result)
    }

    /// Duplicate the project at `index`; returns the copy's index.
    pub fn duplicate(&mut self, index: usize) -> Result<usize> {
        let result = self
            .catalog
            .duplicate(index)
            .map(|(new_index, _)| new_index);
        self.record(result)
    }

    /// Move a project one step within its category; returns its new index.
    pub fn move_within_category(&mut self, index: usize, direction: Direction) -> Result<usize> {
        let result = self.catalog.move_within_category(index, direction);
        self.record(result)
    }

    /// Overwrite a project's editable fields and category.
    pub fn update(
        &mut self,
        index: usize,
        values: &[(Field, String)],
        category: &str,
    ) -> Result<()> {
        let result = self.catalog.update(index, values, category);
        self.record(result)
    }

    /// Delete a project with cascading asset removal.
    pub fn delete(&mut self, index: usize) -> Result<()> {
        let result = self.catalog.delete(index).map(|_| ());
        self.record(result)
    }

    /// Set a project's thumbnail from a source file.
    pub fn set_thumbnail(&mut self, index: usize, source: &Path) -> Result<String> {
        let result = self.catalog.set_thumbnail(index, source);
        self.record(result)
    }

    /// Clear a project's thumbnail reference.
    pub fn remove_thumbnail(&mut self, index: usize) -> Result<()> {
        let result = self.catalog.remove_thumbnail(index);
        self.record(result)
    }

    /// Add a batch of gallery images to a project.
    pub fn add_gallery_images(&mut self, index: usize, sources: &[PathBuf]) -> Result<Vec<String>> {
        let result = self.catalog.add_gallery_images(index, sources);
        self.record(result)
    }

    /// Reorder one gallery image of a project.
    pub fn move_gallery_image(
        &mut self,
        index: usize,
        image_index: usize,
        direction: Direction,
    ) -> Result<()> {
        let result = self.catalog.move_gallery_image(index, image_index, direction);
        self.record(result)
    }

    /// Remove one gallery image of a project.
    pub fn remove_gallery_image(&mut self, index: usize, image_index: usize) -> Result<()> {
        let result = self.catalog.remove_gallery_image(index, image_index);
        self.record(result)
    }

    // ========================================================================
    // Undo / redo / persistence
    // ========================================================================

    /// Whether an older state exists to step back to.
    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    /// Whether an undone state exists to step forward to.
    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    /// Restore the previous state. Returns false when there is none.
    pub fn undo(&mut self) -> bool {
        match self.undo.undo() {
            Some(state) => {
                self.catalog.restore(state);
                true
            }
            None => false,
        }
    }

    /// Restore the next state. Returns false when there is none.
    pub fn redo(&mut self) -> bool {
        match self.undo.redo() {
            Some(state) => {
                self.catalog.restore(state);
                true
            }
            None => false,
        }
    }

    /// Whether the catalog has mutations not yet persisted.
    pub fn is_dirty(&self) -> bool {
        self.catalog.is_dirty()
    }

    /// Persist the full catalog document to `path` and mark it clean.
    pub fn save_to_file(&mut self, path: &Path) -> Result<()> {
        self.catalog.to_document().save_to_file(path)?;
        self.catalog.mark_saved();
        Ok(())
    }
}
