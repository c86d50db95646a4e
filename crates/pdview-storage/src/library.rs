//! Video library — catalog listing plus the active-video lifecycle.
//!
//! A video name moves through: nonexistent → (upload) → present/inactive →
//! (select) → present/active → (select other) → present/inactive →
//! (delete) → nonexistent. Deleting the active selection or the base video
//! is always refused; the operator must switch away first.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::RwLock;
use tracing::info;

use pdview_core::error::AppError;
use pdview_core::result::AppResult;
use pdview_entity::video::model::has_video_extension;
use pdview_entity::video::VideoEntry;

use crate::catalog::VideoCatalog;

/// Manages the video catalog and the single active selection.
///
/// The active pointer is process-wide state, initialized to the base video
/// at startup and mutated only through [`VideoLibrary::select`]. Reads and
/// writes go through the lock, so a reader never observes a torn value;
/// concurrent selects resolve as last-writer-wins.
#[derive(Debug)]
pub struct VideoLibrary {
    /// Backing catalog (the filesystem, in production).
    catalog: Arc<dyn VideoCatalog>,
    /// The permanent fallback video. Never deletable.
    base_video: String,
    /// Name of the currently active video.
    active: RwLock<String>,
}

impl VideoLibrary {
    /// Create a new library with the active pointer on the base video.
    pub fn new(catalog: Arc<dyn VideoCatalog>, base_video: impl Into<String>) -> Self {
        let base_video = base_video.into();
        Self {
            catalog,
            active: RwLock::new(base_video.clone()),
            base_video,
        }
    }

    /// The base video name.
    pub fn base_video(&self) -> &str {
        &self.base_video
    }

    /// The current active video name.
    pub async fn active_name(&self) -> String {
        self.active.read().await.clone()
    }

    /// List playable videos with their active flag.
    ///
    /// Non-video files and subdirectories are excluded.
    pub async fn list(&self) -> AppResult<Vec<VideoEntry>> {
        let active = self.active_name().await;
        let files = self.catalog.list().await?;

        Ok(files
            .into_iter()
            .filter(|f| has_video_extension(&f.name))
            .map(|f| VideoEntry {
                path: VideoEntry::public_path(&f.name),
                is_active: f.name == active,
                size: f.size,
                name: f.name,
            })
            .collect())
    }

    /// Store an uploaded video, replacing any existing file of the same
    /// name.
    ///
    /// The name must be a bare file name with a recognized video
    /// extension. Overwriting the active video's content is allowed.
    pub async fn upload(&self, filename: &str, data: Bytes) -> AppResult<()> {
        validate_filename(filename)?;

        self.catalog.write(filename, data).await?;
        info!(filename, "Video uploaded");
        Ok(())
    }

    /// Make the named video the active selection.
    ///
    /// The file must exist on disk at selection time. Existence is not
    /// reverified afterwards; an externally removed file leaves the
    /// pointer stale.
    pub async fn select(&self, name: &str) -> AppResult<String> {
        if !self.catalog.exists(name).await? {
            return Err(AppError::not_found(format!("Video not found: {name}")));
        }

        let mut active = self.active.write().await;
        *active = name.to_string();
        info!(name, "Active video changed");
        Ok(active.clone())
    }

    /// Delete the named video from the catalog.
    ///
    /// Refused for the base video and for the current active selection,
    /// checked before touching the filesystem.
    pub async fn delete(&self, name: &str) -> AppResult<()> {
        if name == self.base_video {
            return Err(AppError::forbidden("The base video cannot be deleted"));
        }
        if name == *self.active.read().await {
            return Err(AppError::forbidden(
                "The active video cannot be deleted; select another video first",
            ));
        }

        self.catalog.remove(name).await?;
        info!(name, "Video deleted");
        Ok(())
    }
}

/// Reject names that are empty, contain path separators, or lack a
/// recognized video extension.
fn validate_filename(name: &str) -> AppResult<()> {
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(AppError::validation(format!("Invalid video name: {name}")));
    }
    if !has_video_extension(name) {
        return Err(AppError::validation(format!(
            "Unsupported video format: {name}"
        )));
    }
    Ok(())
}
