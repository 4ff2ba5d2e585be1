//! Auto-sort criteria

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::item::Sortable;

/// Fixed set of whole-collection orderings offered by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortCriterion {
    /// Label, A to Z
    Name,
    /// Label, Z to A
    NameDesc,
    /// Capture time, newest first
    Newest,
    /// Capture time, oldest first
    Oldest,
    /// Byte size, largest first
    Largest,
    /// Byte size, smallest first
    Smallest,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort criterion: {0}")]
pub struct UnknownCriterion(pub String);

impl SortCriterion {
    pub const ALL: [SortCriterion; 6] = [
        SortCriterion::Name,
        SortCriterion::NameDesc,
        SortCriterion::Newest,
        SortCriterion::Oldest,
        SortCriterion::Largest,
        SortCriterion::Smallest,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SortCriterion::Name => "name",
            SortCriterion::NameDesc => "name_desc",
            SortCriterion::Newest => "newest",
            SortCriterion::Oldest => "oldest",
            SortCriterion::Largest => "largest",
            SortCriterion::Smallest => "smallest",
        }
    }

    /// Human-readable label used in outcome notifications
    pub fn label(&self) -> &'static str {
        match self {
            SortCriterion::Name => "auto-sort by name",
            SortCriterion::NameDesc => "auto-sort by name (Z-A)",
            SortCriterion::Newest => "auto-sort by date",
            SortCriterion::Oldest => "auto-sort by date (oldest first)",
            SortCriterion::Largest => "auto-sort by size",
            SortCriterion::Smallest => "auto-sort by size (smallest first)",
        }
    }

    pub fn compare<T: Sortable>(&self, a: &T, b: &T) -> Ordering {
        match self {
            SortCriterion::Name => present_first(a.sort_label(), b.sort_label(), compare_labels),
            SortCriterion::NameDesc => {
                present_first(a.sort_label(), b.sort_label(), |x, y| compare_labels(y, x))
            }
            SortCriterion::Newest => {
                present_first(a.sort_timestamp(), b.sort_timestamp(), |x, y| y.cmp(&x))
            }
            SortCriterion::Oldest => {
                present_first(a.sort_timestamp(), b.sort_timestamp(), |x, y| x.cmp(&y))
            }
            SortCriterion::Largest => present_first(a.sort_size(), b.sort_size(), |x, y| y.cmp(&x)),
            SortCriterion::Smallest => {
                present_first(a.sort_size(), b.sort_size(), |x, y| x.cmp(&y))
            }
        }
    }

    /// Stable sort of `items`; equal keys keep their current relative order
    pub fn sort<T: Sortable>(&self, items: &mut [T]) {
        items.sort_by(|a, b| self.compare(a, b));
    }
}

/// Items without the key go last regardless of direction
fn present_first<K>(a: Option<K>, b: Option<K>, cmp: impl Fn(K, K) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-insensitive, falling back to byte order so distinct labels never tie
fn compare_labels(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SortCriterion {
    type Err = UnknownCriterion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" | "name_asc" | "label" => Ok(SortCriterion::Name),
            "name_desc" | "label_desc" => Ok(SortCriterion::NameDesc),
            "newest" | "date" | "date_desc" => Ok(SortCriterion::Newest),
            "oldest" | "date_asc" => Ok(SortCriterion::Oldest),
            "largest" | "size" | "size_desc" => Ok(SortCriterion::Largest),
            "smallest" | "size_asc" => Ok(SortCriterion::Smallest),
            _ => Err(UnknownCriterion(s.to_string())),
        }
    }
}
