//! Video catalog trait.
//!
//! The filesystem is the catalog: there is no separate index, and an entry
//! exists exactly as long as its backing file does. The trait isolates that
//! choice so a real metadata table could be substituted without touching
//! the lifecycle logic in [`crate::library`].

use async_trait::async_trait;
use bytes::Bytes;

use pdview_core::result::AppResult;

/// A raw catalog entry: a file name and its size on disk.
#[derive(Debug, Clone)]
pub struct VideoFile {
    /// File name within the catalog directory.
    pub name: String,
    /// Size in bytes at listing time.
    pub size: u64,
}

/// Backing store for the video library.
#[async_trait]
pub trait VideoCatalog: Send + Sync + std::fmt::Debug + 'static {
    /// List all regular files in the catalog. Subdirectories and entries
    /// whose metadata cannot be read are skipped.
    async fn list(&self) -> AppResult<Vec<VideoFile>>;

    /// Check whether a file with the given name exists.
    async fn exists(&self, name: &str) -> AppResult<bool>;

    /// Write a file, replacing any existing file of the same name. A
    /// partially written file is removed on failure.
    async fn write(&self, name: &str, data: Bytes) -> AppResult<()>;

    /// Remove a file.
    async fn remove(&self, name: &str) -> AppResult<()>;
}
