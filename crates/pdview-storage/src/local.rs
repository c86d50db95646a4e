//! Local filesystem catalog implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::{debug, warn};

use pdview_core::error::{AppError, ErrorKind};
use pdview_core::result::AppResult;

use crate::catalog::{VideoCatalog, VideoFile};

/// Video catalog backed by a single local directory.
#[derive(Debug, Clone)]
pub struct LocalVideoCatalog {
    /// Directory holding the video files.
    root: PathBuf,
}

impl LocalVideoCatalog {
    /// Create a new catalog rooted at the given directory, creating it if
    /// missing.
    pub async fn new(root_path: impl AsRef<Path>) -> AppResult<Self> {
        let root = root_path.as_ref().to_path_buf();
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create video directory: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[async_trait]
impl VideoCatalog for LocalVideoCatalog {
    async fn list(&self) -> AppResult<Vec<VideoFile>> {
        let mut entries = Vec::new();
        let mut dir = fs::read_dir(&self.root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to list video directory: {}", self.root.display()),
                e,
            )
        })?;

        while let Some(entry) = dir.next_entry().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to read directory entry", e)
        })? {
            let name = entry.file_name().to_string_lossy().to_string();
            let meta = match entry.metadata().await {
                Ok(meta) => meta,
                Err(e) => {
                    warn!(name, error = %e, "Skipping unreadable catalog entry");
                    continue;
                }
            };
            if !meta.is_file() {
                continue;
            }
            entries.push(VideoFile {
                name,
                size: meta.len(),
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn exists(&self, name: &str) -> AppResult<bool> {
        Ok(self.resolve(name).exists())
    }

    async fn write(&self, name: &str, data: Bytes) -> AppResult<()> {
        let path = self.resolve(name);

        if let Err(e) = fs::write(&path, &data).await {
            // A failed write must not leave a truncated file behind.
            let _ = fs::remove_file(&path).await;
            return Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write video file: {name}"),
                e,
            ));
        }

        debug!(name, bytes = data.len(), "Wrote video file");
        Ok(())
    }

    async fn remove(&self, name: &str) -> AppResult<()> {
        let path = self.resolve(name);
        fs::remove_file(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Video not found: {name}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to remove video file: {name}"),
                    e,
                )
            }
        })?;

        debug!(name, "Removed video file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_list_remove() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = LocalVideoCatalog::new(dir.path()).await.unwrap();

        catalog
            .write("promo.mp4", Bytes::from(vec![0u8; 200]))
            .await
            .unwrap();

        assert!(catalog.exists("promo.mp4").await.unwrap());

        let entries = catalog.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "promo.mp4");
        assert_eq!(entries[0].size, 200);

        catalog.remove("promo.mp4").await.unwrap();
        assert!(!catalog.exists("promo.mp4").await.unwrap());
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = LocalVideoCatalog::new(dir.path()).await.unwrap();

        catalog
            .write("promo.mp4", Bytes::from(vec![0u8; 100]))
            .await
            .unwrap();
        catalog
            .write("promo.mp4", Bytes::from(vec![1u8; 50]))
            .await
            .unwrap();

        let entries = catalog.list().await.unwrap();
        assert_eq!(entries[0].size, 50);
    }

    #[tokio::test]
    async fn test_list_skips_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = LocalVideoCatalog::new(dir.path()).await.unwrap();

        fs::create_dir(dir.path().join("nested")).await.unwrap();
        catalog
            .write("base.mp4", Bytes::from_static(b"x"))
            .await
            .unwrap();

        let entries = catalog.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "base.mp4");
    }

    #[tokio::test]
    async fn test_remove_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = LocalVideoCatalog::new(dir.path()).await.unwrap();

        let err = catalog.remove("ghost.mp4").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
