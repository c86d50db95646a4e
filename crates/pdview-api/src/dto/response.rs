//! Response DTOs.
//!
//! The shapes here are the wire contract of the display and control
//! clients; field names must stay stable.

use serde::{Deserialize, Serialize};

/// Response to a successful price update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceUpdateResponse {
    /// Always true on success.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// Id of the newly appended record.
    pub id: i64,
}

/// Response to a successful video selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSelectResponse {
    /// Always true on success.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// The new active video name.
    pub active_video: String,
}

/// Response to a successful video upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoUploadResponse {
    /// Always true on success.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// Name the video was stored under.
    pub filename: String,
}

/// Response to a successful video deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoDeleteResponse {
    /// Always true on success.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
}

/// The current active video and its public serving path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveVideoResponse {
    /// Active video name.
    pub active_video: String,
    /// Public path (`/videos/{name}`).
    pub video_path: String,
}
