//! Reorder outcomes and errors

use thiserror::Error;

use crate::event::ReorderOperation;

/// Why a request was dropped before touching the collection.
///
/// These are wiring problems (a stale id, a bad index), not runtime faults,
/// so they are returned as [`ReorderOutcome::Ignored`] and never notified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRequest {
    #[error("item {0} is not in the collection")]
    UnknownItem(String),

    #[error("index {index} is out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("unknown sort criterion: {0}")]
    UnknownCriterion(String),

    #[error("no drag in progress")]
    NoActiveDrag,
}

/// Successful end state of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// The new order was applied and accepted by the committer
    Committed,
    /// Valid request that would not change the order; nothing was committed
    Unchanged,
    /// Invalid request, dropped without any state change
    Ignored(InvalidRequest),
}

impl ReorderOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, ReorderOutcome::Committed)
    }
}

/// Failures surfaced to the caller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderError {
    /// Commit failed; the visible order was restored to the checkpoint
    #[error("{operation} failed: {reason}")]
    CommitFailed {
        operation: ReorderOperation,
        reason: String,
    },

    /// A computed order was not a permutation of the current one; nothing applied
    #[error("{operation} produced an inconsistent order")]
    Inconsistent { operation: ReorderOperation },

    /// The collection was reset or replaced while the commit was in flight.
    /// Whether the authority stored the order is unknown.
    #[error("{operation} was discarded before its commit settled")]
    Discarded { operation: ReorderOperation },
}

impl ReorderError {
    pub fn operation(&self) -> ReorderOperation {
        match self {
            ReorderError::CommitFailed { operation, .. }
            | ReorderError::Inconsistent { operation }
            | ReorderError::Discarded { operation } => *operation,
        }
    }
}

pub type ReorderResult = Result<ReorderOutcome, ReorderError>;
