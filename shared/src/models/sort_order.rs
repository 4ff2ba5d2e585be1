//! Sort order wire types
//!
//! A reorder is committed as the full ordered list of entries. Each entry
//! carries both numbering conventions so the persistence side can use
//! whichever its storage expects.

use serde::{Deserialize, Serialize};

/// One entry of a committed order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderEntry<Id> {
    pub id: Id,
    /// 1-based ordinal for display numbering
    pub order_index: u32,
    /// 0-based index for array-style consumers
    pub position: u32,
}

/// Media sort order entry, as sent to `PUT /api/albums/{id}/media/sort-order`
pub type MediaOrderEntry = OrderEntry<i64>;

impl<Id> OrderEntry<Id> {
    pub fn new(id: Id, position: u32) -> Self {
        Self {
            id,
            order_index: position + 1,
            position,
        }
    }

    /// Number a sequence of ids in order: positions `0..n`, order indexes `1..=n`
    pub fn sequence<I>(ids: I) -> Vec<Self>
    where
        I: IntoIterator<Item = Id>,
    {
        ids.into_iter()
            .enumerate()
            .map(|(position, id)| Self::new(id, position as u32))
            .collect()
    }
}

/// Response for batch update operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchUpdateResponse {
    pub updated: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_numbers_without_gaps() {
        let entries = OrderEntry::sequence(["b", "c", "a"]);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], OrderEntry { id: "b", order_index: 1, position: 0 });
        assert_eq!(entries[2], OrderEntry { id: "a", order_index: 3, position: 2 });
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = MediaOrderEntry::new(17, 4);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, serde_json::json!({"id": 17, "order_index": 5, "position": 4}));
    }
}
