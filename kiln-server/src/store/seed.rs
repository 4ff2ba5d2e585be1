//! 种子文件格式
//!
//! ```json
//! {
//!   "albums": [
//!     {
//!       "id": 1,
//!       "title": "Studio",
//!       "media": [
//!         { "id": 10, "url": "/m/10.jpg", "label": "Kiln", "captured_at": 1700000000000 }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! 媒体按 `sort_order` 排序 (缺省时保持文件顺序)，加载后重新编号为 1..n

use serde::Deserialize;
use shared::models::{MediaItem, MediaKind};
use shared::types::Timestamp;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub albums: Vec<SeedAlbum>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedAlbum {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub media: Vec<SeedMedia>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedMedia {
    pub id: i64,
    pub url: String,
    pub label: String,
    #[serde(default)]
    pub kind: MediaKind,
    #[serde(default)]
    pub captured_at: Option<Timestamp>,
    #[serde(default)]
    pub byte_size: Option<u64>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl SeedMedia {
    pub fn into_media(self, album_id: i64) -> MediaItem {
        MediaItem {
            id: self.id,
            album_id,
            url: self.url,
            label: self.label,
            kind: self.kind,
            captured_at: self.captured_at,
            byte_size: self.byte_size,
            sort_order: self.sort_order.unwrap_or_default(),
        }
    }
}
