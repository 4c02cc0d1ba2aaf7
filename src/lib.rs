//! folio — catalog and asset consistency core for a portfolio CMS.
//!
//! The catalog is a small ordered collection of creative projects, each
//! with metadata, an optional thumbnail, and an optional ordered image
//! gallery, persisted as a single JSON document plus a mirrored on-disk
//! asset tree. This crate is the consistency layer underneath the editing
//! UI: the data model, the catalog operations (create, duplicate, reorder,
//! update, delete, filter), the snapshot-based undo history, and the asset
//! store that keeps thumbnail and gallery files in sync with the records
//! referencing them. Presentation is an external collaborator that calls
//! [`Session`] and renders the resulting state.

mod assets;
mod catalog;
mod config;
mod document;
mod error;
mod model;
mod session;
mod undo;

pub use assets::AssetStore;
pub use catalog::Catalog;
pub use config::{AppConfig, ConfigError, LogLevel, PathsConfig, UserPreferences};
pub use document::Document;
pub use error::{CatalogError, Result};
pub use model::{Category, Direction, Field, Project};
pub use session::Session;
pub use undo::{UndoConfig, UndoManager};
