//! Items the manager can order

use std::fmt::Debug;
use std::hash::Hash;

use shared::models::MediaItem;

/// An identity-bearing record held by [`crate::OrderManager`].
///
/// Only [`Sortable::id`] is required. The sort keys feed the auto-sort
/// criteria; an item without a key sorts after items that have one.
pub trait Sortable: Clone + Send + Sync + 'static {
    type Id: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    fn id(&self) -> &Self::Id;

    fn sort_label(&self) -> Option<&str> {
        None
    }

    /// Capture/creation time in Unix millis
    fn sort_timestamp(&self) -> Option<i64> {
        None
    }

    fn sort_size(&self) -> Option<u64> {
        None
    }
}

impl Sortable for MediaItem {
    type Id = i64;

    fn id(&self) -> &i64 {
        &self.id
    }

    fn sort_label(&self) -> Option<&str> {
        Some(self.label.as_str())
    }

    fn sort_timestamp(&self) -> Option<i64> {
        self.captured_at
    }

    fn sort_size(&self) -> Option<u64> {
        self.byte_size
    }
}
