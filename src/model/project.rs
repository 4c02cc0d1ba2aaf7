//! Project record and field access for the portfolio catalog.

use serde::{Deserialize, Serialize};

/// A single portfolio project.
///
/// Field names on the wire match the persisted `projects.json` document;
/// the two video identifiers are camelCase there. Optional text fields
/// default to the empty string and are omitted from serialization when
/// empty, keeping records sparse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Project {
    /// Globally unique slug, immutable once assigned
    pub id: String,
    /// Display title, required non-empty
    pub title: String,
    /// Id of the category this project belongs to
    pub category: String,
    /// Client name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client: String,
    /// Role credit
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role: String,
    /// Production year
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub year: String,
    /// Vimeo video identifier
    #[serde(rename = "vimeoId", default, skip_serializing_if = "String::is_empty")]
    pub vimeo_id: String,
    /// YouTube video identifier
    #[serde(rename = "youtubeId", default, skip_serializing_if = "String::is_empty")]
    pub youtube_id: String,
    /// Long-form description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Production notes
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub production: String,
    /// Thumbnail path relative to the thumbnails root, or empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub thumbnail: String,
    /// Gallery image paths relative to the gallery root, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<String>,
    /// ISO-8601 creation timestamp, or empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created: String,
    /// ISO-8601 last-update timestamp, or empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub updated: String,
}

impl Project {
    /// Create a new project with the given id, title and category.
    /// All optional fields start empty; the caller stamps `created`.
    pub fn new(id: &str, title: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            category: category.to_string(),
            ..Self::default()
        }
    }

    /// Lower-cased concatenation of the fields the search box matches
    /// against: title, client and role.
    pub fn searchable_text(&self) -> String {
        format!("{} {} {}", self.title, self.client, self.role).to_lowercase()
    }
}

/// The editable scalar fields of a project.
///
/// Each form input in the (external) edit view binds to one of these.
/// `get`/`set` give uniform access per field kind without the view layer
/// knowing the project's structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Client,
    Role,
    Year,
    VimeoId,
    YoutubeId,
    Description,
    Production,
}

impl Field {
    /// All editable fields in form display order.
    pub fn all() -> &'static [Field] {
        &[
            Field::Title,
            Field::Client,
            Field::Role,
            Field::Year,
            Field::VimeoId,
            Field::YoutubeId,
            Field::Description,
            Field::Production,
        ]
    }

    /// Human-readable form label for this field.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Client => "Client",
            Field::Role => "Role",
            Field::Year => "Year",
            Field::VimeoId => "Vimeo ID",
            Field::YoutubeId => "Youtube ID",
            Field::Description => "Description",
            Field::Production => "Production",
        }
    }

    /// Read this field's current value from a project.
    pub fn get<'a>(&self, project: &'a Project) -> &'a str {
        match self {
            Field::Title => &project.title,
            Field::Client => &project.client,
            Field::Role => &project.role,
            Field::Year => &project.year,
            Field::VimeoId => &project.vimeo_id,
            Field::YoutubeId => &project.youtube_id,
            Field::Description => &project.description,
            Field::Production => &project.production,
        }
    }

    /// Write a value into this field of a project.
    pub fn set(&self, project: &mut Project, value: impl Into<String>) {
        let value = value.into();
        match self {
            Field::Title => project.title = value,
            Field::Client => project.client = value,
            Field::Role => project.role = value,
            Field::Year => project.year = value,
            Field::VimeoId => project.vimeo_id = value,
            Field::YoutubeId => project.youtube_id = value,
            Field::Description => project.description = value,
            Field::Production => project.production = value,
        }
    }
}
