//! Album Model

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Album entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Last time the album or its media order changed (Unix millis)
    #[serde(default)]
    pub updated_at: Timestamp,
}

/// Album with its media count, as listed by the admin API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumSummary {
    #[serde(flatten)]
    pub album: Album,
    pub media_count: usize,
}
