//! Undo/Redo system for catalog edits.
//!
//! This module keeps a bounded, linear history of full project-list
//! snapshots with a single cursor. Every mutating catalog operation pushes
//! a fresh snapshot; undo and redo move the cursor and hand back an
//! independent copy of the state recorded there. Full-copy-per-action is a
//! deliberate simplicity trade-off; the history bound caps memory.

use crate::model::Project;

/// Configuration for the undo history.
#[derive(Debug, Clone)]
pub struct UndoConfig {
    /// Maximum number of snapshots to keep in history
    pub max_history: usize,
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self { max_history: 50 }
    }
}

/// Bounded linear history of project-list snapshots.
///
/// The cursor always points at the snapshot matching the live catalog.
/// Pushing after an undo truncates the redo branch; pushing past the bound
/// evicts the oldest snapshot instead of advancing the cursor.
#[derive(Debug, Clone, Default)]
pub struct UndoManager {
    /// Snapshots in chronological order
    history: Vec<Vec<Project>>,
    /// Index of the snapshot matching the current state
    cursor: usize,
    /// Configuration
    config: UndoConfig,
}

impl UndoManager {
    /// Create a new empty history with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration.
    pub fn with_config(config: UndoConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Record a new state.
    ///
    /// Discards any snapshots after the cursor (the redo branch is gone for
    /// good once a new edit lands), then appends an independent copy of
    /// `state`. When the history is full the oldest snapshot is evicted and
    /// the cursor stays put, still pointing at the newest entry.
    pub fn push(&mut self, state: &[Project]) {
        if !self.history.is_empty() {
            self.history.truncate(self.cursor + 1);
        }
        self.history.push(state.to_vec());

        if self.history.len() > self.config.max_history {
            self.history.remove(0);
        } else {
            self.cursor = self.history.len() - 1;
        }
        log::debug!(
            "Undo: pushed snapshot {}/{}",
            self.cursor + 1,
            self.history.len()
        );
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.history.is_empty() && self.cursor < self.history.len() - 1
    }

    /// Step back one snapshot.
    ///
    /// Returns an independent copy of the previous state, or `None` (with
    /// no cursor movement) when already at the oldest snapshot. Callers may
    /// freely mutate the returned list.
    pub fn undo(&mut self) -> Option<Vec<Project>> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        log::debug!("Undo: cursor now {}/{}", self.cursor + 1, self.history.len());
        Some(self.history[self.cursor].clone())
    }

    /// Step forward one snapshot.
    ///
    /// Returns an independent copy of the next state, or `None` (with no
    /// cursor movement) when already at the newest snapshot.
    pub fn redo(&mut self) -> Option<Vec<Project>> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        log::debug!("Redo: cursor now {}/{}", self.cursor + 1, self.history.len());
        Some(self.history[self.cursor].clone())
    }

    /// Number of snapshots currently held.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// True when no snapshot has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Drop all history.
    pub fn clear(&mut self) {
        self.history.clear();
        self.cursor = 0;
        log::debug!("Undo history cleared");
    }
}
