//! Manager events and operation labels

use std::fmt;

use crate::criterion::SortCriterion;

/// The movement a caller requested, used to label outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderOperation {
    /// Drag gesture (source index to destination index)
    Reorder,
    MoveToPosition,
    MoveForward,
    MoveBackward,
    MoveToStart,
    MoveToEnd,
    AutoSort(SortCriterion),
}

impl ReorderOperation {
    /// Human-readable label for notifications ("reorder", "auto-sort by date", ...)
    pub fn label(&self) -> &'static str {
        match self {
            ReorderOperation::Reorder => "reorder",
            ReorderOperation::MoveToPosition => "move to position",
            ReorderOperation::MoveForward => "move forward",
            ReorderOperation::MoveBackward => "move backward",
            ReorderOperation::MoveToStart => "move to start",
            ReorderOperation::MoveToEnd => "move to end",
            ReorderOperation::AutoSort(criterion) => criterion.label(),
        }
    }
}

impl fmt::Display for ReorderOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Observable state transitions, delivered through [`crate::OrderManager::subscribe`].
///
/// Every event that changes the visible order carries the full new order, so
/// a view can re-render from the event alone.
#[derive(Debug, Clone)]
pub enum ReorderEvent<T> {
    /// Collection was (re)initialized
    Replaced { order: Vec<T> },
    /// Optimistic order applied, commit dispatched
    Applied {
        operation: ReorderOperation,
        order: Vec<T>,
    },
    /// Commit accepted; the applied order is now the checkpoint
    Committed { operation: ReorderOperation },
    /// Commit failed; `order` is the restored checkpoint
    RolledBack {
        operation: ReorderOperation,
        reason: String,
        order: Vec<T>,
    },
    /// Local reset to the checkpoint
    Reset { order: Vec<T> },
}

impl<T> ReorderEvent<T> {
    /// The order to render after this event, if it changed
    pub fn order(&self) -> Option<&[T]> {
        match self {
            ReorderEvent::Replaced { order }
            | ReorderEvent::Applied { order, .. }
            | ReorderEvent::RolledBack { order, .. }
            | ReorderEvent::Reset { order } => Some(order),
            ReorderEvent::Committed { .. } => None,
        }
    }
}
