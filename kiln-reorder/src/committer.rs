//! Persistence seam for committed orders

use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;
use shared::models::OrderEntry;

/// Explicit answer from the ordering authority.
///
/// A `Rejected` answer, an `Err` and a panic inside the commit future are
/// all treated the same way by the manager: the optimistic order is rolled
/// back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Accepted,
    Rejected { reason: String },
}

impl CommitOutcome {
    pub fn rejected(reason: impl Into<String>) -> Self {
        CommitOutcome::Rejected {
            reason: reason.into(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, CommitOutcome::Accepted)
    }
}

/// Persists a new order for a collection.
///
/// `entries` lists every item in its new order, numbered without gaps. The
/// manager imposes no timeout; an implementation that may hang must bound
/// itself.
#[async_trait]
pub trait OrderCommitter<Id>: Send + Sync
where
    Id: Send + Sync + 'static,
{
    async fn commit(&self, entries: Vec<OrderEntry<Id>>) -> anyhow::Result<CommitOutcome>;
}

/// Adapts an async closure into an [`OrderCommitter`]
///
/// ```
/// use kiln_reorder::{CommitOutcome, FnCommitter, OrderEntry};
///
/// let committer = FnCommitter::<i64, _>::new(|entries: Vec<OrderEntry<i64>>| async move {
///     anyhow::ensure!(!entries.is_empty(), "nothing to commit");
///     Ok(CommitOutcome::Accepted)
/// });
/// # let _ = committer;
/// ```
pub struct FnCommitter<Id, F> {
    commit_fn: F,
    _id: PhantomData<fn(Id)>,
}

impl<Id, F> FnCommitter<Id, F> {
    pub fn new(commit_fn: F) -> Self {
        Self {
            commit_fn,
            _id: PhantomData,
        }
    }
}

#[async_trait]
impl<Id, F, Fut> OrderCommitter<Id> for FnCommitter<Id, F>
where
    Id: Send + Sync + 'static,
    F: Fn(Vec<OrderEntry<Id>>) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<CommitOutcome>> + Send + 'static,
{
    async fn commit(&self, entries: Vec<OrderEntry<Id>>) -> anyhow::Result<CommitOutcome> {
        (self.commit_fn)(entries).await
    }
}
