//! Asset storage for project thumbnails and gallery images.
//!
//! The store maps a project's identity and category to deterministic
//! locations under two directory trees:
//!
//! - thumbnails: `<thumbnails-root>/<category>/<id><ext>`
//! - gallery:    `<gallery-root>/<id>/<id>-<n><ext>`
//!
//! Projects record these locations as `/`-separated paths relative to the
//! respective root, so the persisted document stays portable. Gallery file
//! numbering is a storage detail only; display order is the order of the
//! project's `gallery` list, never the numeric suffix.
//!
//! Every operation copies or deletes files before the project fields that
//! reference them are committed, so a mid-operation failure never leaves
//! the catalog pointing at a file that was never written.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CatalogError, Result};
use crate::model::{Direction, Project};

/// File placement and lifecycle for project assets.
#[derive(Debug, Clone)]
pub struct AssetStore {
    /// Root of the thumbnail tree (one subdirectory per category)
    thumbnails_root: PathBuf,
    /// Root of the gallery tree (one subdirectory per project id)
    gallery_root: PathBuf,
}

impl AssetStore {
    /// Create a store rooted at the given thumbnail and gallery trees.
    /// The roots are not created until something is written under them.
    pub fn new(thumbnails_root: impl Into<PathBuf>, gallery_root: impl Into<PathBuf>) -> Self {
        Self {
            thumbnails_root: thumbnails_root.into(),
            gallery_root: gallery_root.into(),
        }
    }

    /// Absolute path of a thumbnail stored relative to the thumbnails root.
    pub fn thumbnail_file(&self, relative: &str) -> PathBuf {
        self.thumbnails_root.join(relative)
    }

    /// Absolute path of a gallery image stored relative to the gallery root.
    pub fn gallery_file(&self, relative: &str) -> PathBuf {
        self.gallery_root.join(relative)
    }

    /// Resolve a project's thumbnail to an on-disk file.
    ///
    /// Returns `None` when the project has no thumbnail or the referenced
    /// file is missing. A dangling reference in pre-existing data degrades
    /// to "missing" here rather than erroring.
    pub fn resolve_thumbnail(&self, project: &Project) -> Option<PathBuf> {
        if project.thumbnail.is_empty() {
            return None;
        }
        let path = self.thumbnail_file(&project.thumbnail);
        path.exists().then_some(path)
    }

    /// Copy `source` in as the project's thumbnail and record it.
    ///
    /// Creates the category subdirectory on demand and overwrites any prior
    /// thumbnail of the same project. The copy must succeed before the
    /// project field is touched. Returns the recorded relative path.
    pub fn set_thumbnail(&self, project: &mut Project, source: &Path) -> Result<String> {
        if !source.is_file() {
            return Err(CatalogError::SourceMissing {
                path: source.to_path_buf(),
            });
        }

        let category_dir = self.thumbnails_root.join(&project.category);
        fs::create_dir_all(&category_dir)?;

        let file_name = with_extension(&project.id, source);
        fs::copy(source, category_dir.join(&file_name))?;

        let relative = format!("{}/{}", project.category, file_name);
        log::debug!("Thumbnail for '{}' stored at {}", project.id, relative);
        project.thumbnail = relative.clone();
        Ok(relative)
    }

    /// Clear the project's thumbnail reference.
    ///
    /// The file itself stays on disk; only full project deletion cascades
    /// file removal. Until then the orphaned file is simply unreferenced.
    pub fn remove_thumbnail(&self, project: &mut Project) {
        if !project.thumbnail.is_empty() {
            log::debug!(
                "Thumbnail reference cleared for '{}' (file kept: {})",
                project.id,
                project.thumbnail
            );
            project.thumbnail.clear();
        }
    }

    /// Copy a batch of images into the project's gallery, in input order.
    ///
    /// Files are numbered from `existing-count + 1`; numbers are never
    /// reused or compacted after removals. All copies must succeed before
    /// any path is appended to the project, so a failure mid-batch commits
    /// nothing (already-copied files of the failed batch are orphaned, not
    /// referenced). Returns the appended relative paths.
    pub fn add_gallery_images(
        &self,
        project: &mut Project,
        sources: &[PathBuf],
    ) -> Result<Vec<String>> {
        let project_dir = self.gallery_root.join(&project.id);
        fs::create_dir_all(&project_dir)?;

        let existing = project.gallery.len();
        let mut added = Vec::with_capacity(sources.len());
        for (i, source) in sources.iter().enumerate() {
            if !source.is_file() {
                return Err(CatalogError::SourceMissing {
                    path: source.clone(),
                });
            }
            let file_name = with_extension(&format!("{}-{}", project.id, existing + i + 1), source);
            fs::copy(source, project_dir.join(&file_name))?;
            added.push(format!("{}/{}", project.id, file_name));
        }

        log::debug!("Added {} gallery images to '{}'", added.len(), project.id);
        project.gallery.extend(added.iter().cloned());
        Ok(added)
    }

    /// Swap a gallery entry with its neighbour in the given direction.
    ///
    /// Pure in-memory reorder; filenames are not order-bearing, so no file
    /// is renamed. A swap whose target falls outside the list is a no-op.
    pub fn move_gallery_image(&self, project: &mut Project, index: usize, direction: Direction) {
        let target = index as isize + direction.offset();
        if index < project.gallery.len() && target >= 0 && (target as usize) < project.gallery.len()
        {
            project.gallery.swap(index, target as usize);
        }
    }

    /// Remove one gallery entry and delete its backing file.
    ///
    /// File deletion is best-effort (an orphaned file is recoverable; a
    /// catalog entry pointing nowhere is not, so the entry always goes).
    /// The project's gallery directory is removed when it becomes empty.
    pub fn remove_gallery_image(&self, project: &mut Project, index: usize) -> Result<()> {
        if index >= project.gallery.len() {
            return Err(CatalogError::gallery_index(index));
        }

        let relative = project.gallery.remove(index);
        let path = self.gallery_file(&relative);
        if let Err(e) = fs::remove_file(&path) {
            log::warn!("Failed to delete gallery image {:?}: {}", path, e);
        }

        self.remove_dir_if_empty(&self.gallery_root.join(&project.id));
        Ok(())
    }

    /// Delete every file belonging to a project: thumbnail, all gallery
    /// images, and the project's gallery directory.
    ///
    /// Best-effort throughout; failures are logged and swallowed so that
    /// catalog-level deletion can still proceed. Used only by the cascade
    /// in [`Catalog::delete`](crate::catalog::Catalog::delete).
    pub fn delete_project_assets(&self, project: &Project) {
        if !project.thumbnail.is_empty() {
            let path = self.thumbnail_file(&project.thumbnail);
            if path.exists() {
                if let Err(e) = fs::remove_file(&path) {
                    log::warn!("Failed to delete thumbnail {:?}: {}", path, e);
                }
            }
        }

        for relative in &project.gallery {
            let path = self.gallery_file(relative);
            if path.exists() {
                if let Err(e) = fs::remove_file(&path) {
                    log::warn!("Failed to delete gallery image {:?}: {}", path, e);
                }
            }
        }

        self.remove_dir_if_empty(&self.gallery_root.join(&project.id));
    }

    /// Remove a directory if it exists and holds nothing.
    fn remove_dir_if_empty(&self, dir: &Path) {
        let is_empty = fs::read_dir(dir)
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false);
        if is_empty {
            if let Err(e) = fs::remove_dir(dir) {
                log::warn!("Failed to remove empty directory {:?}: {}", dir, e);
            }
        }
    }
}

/// Append the source file's extension (if any) to a file stem.
fn with_extension(stem: &str, source: &Path) -> String {
    match source.extension() {
        Some(ext) => format!("{}.{}", stem, ext.to_string_lossy()),
        None => stem.to_string(),
    }
}
