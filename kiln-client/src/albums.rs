//! Album API
//!
//! | 方法 | 路径 |
//! |------|------|
//! | GET | api/albums |
//! | GET | api/albums/{id} |
//! | GET | api/albums/{id}/media |
//! | PUT | api/albums/{id}/media/sort-order |

use std::sync::Arc;

use kiln_reorder::MediaOrderManager;
use shared::models::{Album, AlbumSummary, BatchUpdateResponse, MediaItem, MediaOrderEntry};

use crate::commit::HttpOrderCommitter;
use crate::{ClientResult, HttpClient};

/// Typed access to the album endpoints
#[derive(Debug)]
pub struct AlbumClient<C> {
    http: Arc<C>,
}

impl<C> Clone for AlbumClient<C> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
        }
    }
}

impl<C: HttpClient + 'static> AlbumClient<C> {
    pub fn new(http: C) -> Self {
        Self {
            http: Arc::new(http),
        }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub async fn list_albums(&self) -> ClientResult<Vec<AlbumSummary>> {
        self.http.get("api/albums").await
    }

    pub async fn album(&self, album_id: i64) -> ClientResult<Album> {
        self.http.get(&format!("api/albums/{album_id}")).await
    }

    /// Media in persisted display order
    pub async fn album_media(&self, album_id: i64) -> ClientResult<Vec<MediaItem>> {
        self.http.get(&format!("api/albums/{album_id}/media")).await
    }

    /// Replace the album's media order; `entries` must cover every item
    pub async fn update_sort_order(
        &self,
        album_id: i64,
        entries: &[MediaOrderEntry],
    ) -> ClientResult<BatchUpdateResponse> {
        update_sort_order(self.http.as_ref(), album_id, entries).await
    }

    /// Committer that persists orders for `album_id` through this client
    pub fn committer(&self, album_id: i64) -> HttpOrderCommitter<C> {
        HttpOrderCommitter::new(self.http.clone(), album_id)
    }

    /// Fetch the album's media and wrap it in a manager that commits here
    pub async fn open_album(&self, album_id: i64) -> ClientResult<MediaOrderManager> {
        let media = self.album_media(album_id).await?;
        tracing::info!(album_id, count = media.len(), "Album opened for reordering");
        Ok(MediaOrderManager::new(
            media,
            Arc::new(self.committer(album_id)),
        ))
    }

    /// Re-fetch the album and replace the manager's collection
    pub async fn refresh(&self, manager: &MediaOrderManager, album_id: i64) -> ClientResult<()> {
        let media = self.album_media(album_id).await?;
        manager.replace(media);
        Ok(())
    }
}

pub(crate) async fn update_sort_order<C: HttpClient>(
    http: &C,
    album_id: i64,
    entries: &[MediaOrderEntry],
) -> ClientResult<BatchUpdateResponse> {
    http.put(&format!("api/albums/{album_id}/media/sort-order"), &entries)
        .await
}
