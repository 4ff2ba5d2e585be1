//! Commits media orders to the album server

use std::sync::Arc;

use async_trait::async_trait;
use kiln_reorder::{CommitOutcome, OrderCommitter};
use shared::models::MediaOrderEntry;

use crate::albums::update_sort_order;
use crate::{ClientError, HttpClient};

/// [`OrderCommitter`] backed by `PUT api/albums/{id}/media/sort-order`.
///
/// The server validates the whole batch, so a business refusal (missing ids,
/// gaps, unknown album) comes back as [`CommitOutcome::Rejected`]. Transport
/// failures are errors. Both roll the manager back.
pub struct HttpOrderCommitter<C> {
    http: Arc<C>,
    album_id: i64,
}

impl<C> HttpOrderCommitter<C> {
    pub fn new(http: Arc<C>, album_id: i64) -> Self {
        Self { http, album_id }
    }

    pub fn album_id(&self) -> i64 {
        self.album_id
    }
}

#[async_trait]
impl<C: HttpClient + 'static> OrderCommitter<i64> for HttpOrderCommitter<C> {
    async fn commit(&self, entries: Vec<MediaOrderEntry>) -> anyhow::Result<CommitOutcome> {
        let expected = entries.len();
        match update_sort_order(self.http.as_ref(), self.album_id, &entries).await {
            Ok(resp) if resp.updated == expected => Ok(CommitOutcome::Accepted),
            Ok(resp) => {
                tracing::warn!(
                    album_id = self.album_id,
                    updated = resp.updated,
                    expected,
                    "Server applied a partial sort order"
                );
                Ok(CommitOutcome::rejected(format!(
                    "server updated {} of {} items",
                    resp.updated, expected
                )))
            }
            Err(ClientError::Api { code, message, .. }) => {
                tracing::warn!(album_id = self.album_id, code, %message, "Sort order rejected");
                Ok(CommitOutcome::Rejected { reason: message })
            }
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("failed to save media order for album {}", self.album_id))),
        }
    }
}
