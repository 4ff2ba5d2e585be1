//! Media Item Model

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Kind of media stored in an album
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Media entity (one photo or clip inside an album)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: i64,
    pub album_id: i64,
    pub url: String,
    /// Caption shown in the gallery; also the "name" sort key
    pub label: String,
    #[serde(default)]
    pub kind: MediaKind,
    /// Capture time (Unix millis), when the upload carried EXIF data
    #[serde(default)]
    pub captured_at: Option<Timestamp>,
    #[serde(default)]
    pub byte_size: Option<u64>,
    /// 1-based display ordinal persisted by the server
    #[serde(default)]
    pub sort_order: i32,
}

impl MediaItem {
    pub fn new(id: i64, album_id: i64, url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id,
            album_id,
            url: url.into(),
            label: label.into(),
            kind: MediaKind::Image,
            captured_at: None,
            byte_size: None,
            sort_order: 0,
        }
    }

    pub fn with_captured_at(mut self, captured_at: Timestamp) -> Self {
        self.captured_at = Some(captured_at);
        self
    }

    pub fn with_byte_size(mut self, byte_size: u64) -> Self {
        self.byte_size = Some(byte_size);
        self
    }
}
