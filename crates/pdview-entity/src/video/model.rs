//! Video entry entity model.
//!
//! A [`VideoEntry`] is derived from filesystem state at listing time, not
//! persisted anywhere. The file name is the entry's identity.

use serde::{Deserialize, Serialize};

/// File extensions recognized as playable video, compared
/// case-insensitively.
pub const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "avi", "mov", "webm"];

/// One playable video in the library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoEntry {
    /// File name, unique within the video directory.
    pub name: String,
    /// Public serving path (`/videos/{name}`).
    pub path: String,
    /// File size in bytes, read from the filesystem at listing time.
    pub size: u64,
    /// Whether this entry is the current active selection.
    pub is_active: bool,
}

impl VideoEntry {
    /// Derive the public serving path for a video name.
    pub fn public_path(name: &str) -> String {
        format!("/videos/{name}")
    }
}

/// Whether a file name carries one of the recognized video extensions.
pub fn has_video_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| {
            let ext = ext.to_lowercase();
            VIDEO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_recognition() {
        assert!(has_video_extension("promo.mp4"));
        assert!(has_video_extension("PROMO.MP4"));
        assert!(has_video_extension("clip.webm"));
        assert!(!has_video_extension("notes.txt"));
        assert!(!has_video_extension("noext"));
        assert!(!has_video_extension(".mp4.bak"));
    }

    #[test]
    fn test_public_path() {
        assert_eq!(VideoEntry::public_path("base.mp4"), "/videos/base.mp4");
    }
}
