//! Video library configuration.

use serde::{Deserialize, Serialize};

/// Video library settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Directory holding the video files. The directory listing is the
    /// catalog; no separate index is kept.
    #[serde(default = "default_directory")]
    pub directory: String,
    /// The permanent fallback video. It can never be deleted and is the
    /// active selection after startup.
    #[serde(default = "default_base_video")]
    pub base_video: String,
    /// Maximum upload size in bytes (default 100 MiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            base_video: default_base_video(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_directory() -> String {
    "./videos".to_string()
}

fn default_base_video() -> String {
    "base.mp4".to_string()
}

fn default_max_upload() -> u64 {
    104_857_600 // 100 MiB
}
