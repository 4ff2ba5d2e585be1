//! OrderManager - optimistic reorder with checkpoint rollback
//!
//! # Protocol
//!
//! Every mutation runs the same sequence while holding the commit gate:
//!
//! 1. Plan the new order against the latest collection
//! 2. Save the current order as checkpoint, apply the new order, mark syncing
//! 3. Await the committer (state lock released)
//! 4. Accepted: new order becomes the checkpoint
//!    Anything else: restore the checkpoint
//!
//! The gate is a FIFO mutex, so concurrent requests are served in arrival
//! order and never observe each other's half-finished state.
//!
//! A reset or replace while a commit is in flight bumps the generation. The
//! pending commit is dropped and its caller gets [`ReorderError::Discarded`].

mod state;


use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use parking_lot::Mutex;
use tokio::sync::{broadcast, watch};

use crate::committer::{CommitOutcome, OrderCommitter};
use crate::criterion::SortCriterion;
use crate::error::{InvalidRequest, ReorderError, ReorderOutcome, ReorderResult};
use crate::event::{ReorderEvent, ReorderOperation};
use crate::item::Sortable;
use shared::models::OrderEntry;

use state::{
    CollectionState, DragState, Plan, index_of, is_permutation, plan_move, plan_move_item,
    plan_sort, plan_step, same_identity_order,
};

/// Manager tuning
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Broadcast buffer; slow subscribers lag past this many events
    pub event_capacity: usize,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self { event_capacity: 64 }
    }
}

/// Owns one ordered collection and keeps it in step with the ordering authority
pub struct OrderManager<T: Sortable> {
    state: Mutex<CollectionState<T>>,
    /// Serializes mutations; held from planning until the commit settles
    commit_gate: tokio::sync::Mutex<()>,
    /// Mirrors `CollectionState::generation` so an in-flight commit can be abandoned
    epoch_tx: watch::Sender<u64>,
    committer: Arc<dyn OrderCommitter<T::Id>>,
    event_tx: broadcast::Sender<ReorderEvent<T>>,
}

impl<T: Sortable> fmt::Debug for OrderManager<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("OrderManager")
            .field("items", &state.items.len())
            .field("syncing", &state.syncing)
            .field("generation", &state.generation)
            .finish()
    }
}

impl<T: Sortable> OrderManager<T> {
    pub fn new(items: Vec<T>, committer: Arc<dyn OrderCommitter<T::Id>>) -> Self {
        Self::with_config(items, committer, ManagerConfig::default())
    }

    pub fn with_config(
        items: Vec<T>,
        committer: Arc<dyn OrderCommitter<T::Id>>,
        config: ManagerConfig,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(config.event_capacity.max(1));
        let (epoch_tx, _) = watch::channel(0);
        Self {
            state: Mutex::new(CollectionState::new(items)),
            commit_gate: tokio::sync::Mutex::new(()),
            epoch_tx,
            committer,
            event_tx,
        }
    }

    /// Subscribe to order changes and commit outcomes
    pub fn subscribe(&self) -> broadcast::Receiver<ReorderEvent<T>> {
        self.event_tx.subscribe()
    }

    // ========== Read ==========

    pub fn current_order(&self) -> Vec<T> {
        self.state.lock().items.clone()
    }

    pub fn current_ids(&self) -> Vec<T::Id> {
        self.state
            .lock()
            .items
            .iter()
            .map(|item| item.id().clone())
            .collect()
    }

    pub fn is_syncing(&self) -> bool {
        self.state.lock().syncing
    }

    pub fn total_items(&self) -> usize {
        self.state.lock().items.len()
    }

    /// 1-based display position
    pub fn position_of(&self, id: &T::Id) -> Option<usize> {
        index_of(&self.state.lock().items, id).map(|index| index + 1)
    }

    pub fn can_move_forward(&self, id: &T::Id) -> bool {
        let state = self.state.lock();
        index_of(&state.items, id).is_some_and(|index| index + 1 < state.items.len())
    }

    pub fn can_move_backward(&self, id: &T::Id) -> bool {
        index_of(&self.state.lock().items, id).is_some_and(|index| index > 0)
    }

    /// Current order differs from the last committed one
    pub fn has_pending_changes(&self) -> bool {
        let state = self.state.lock();
        match &state.checkpoint {
            Some(checkpoint) => !same_identity_order(&state.items, checkpoint),
            None => false,
        }
    }

    /// Id captured by [`Self::on_drag_start`], if a drag is in progress
    pub fn dragged_item(&self) -> Option<T::Id> {
        self.state.lock().drag.as_ref().map(|drag| drag.id.clone())
    }

    // ========== Local-only ==========

    /// Take a fresh collection from the data source.
    ///
    /// Checkpoint, drag and syncing state are cleared. A commit still in
    /// flight is abandoned and its result is never applied.
    pub fn replace(&self, items: Vec<T>) {
        let mut state = self.state.lock();
        if state.syncing {
            tracing::warn!("Collection replaced while a commit is in flight; abandoning it");
        }
        state.reinitialize(items);
        self.epoch_tx.send_replace(state.generation);
        tracing::debug!(
            count = state.items.len(),
            generation = state.generation,
            "Collection replaced"
        );
        self.emit(ReorderEvent::Replaced {
            order: state.items.clone(),
        });
    }

    /// Restore the checkpoint without committing.
    ///
    /// While a commit is in flight this abandons it: the optimistic order is
    /// dropped and the waiting caller receives [`ReorderError::Discarded`].
    /// Returns whether the visible order changed.
    pub fn reset_order(&self) -> bool {
        let mut state = self.state.lock();
        let Some(checkpoint) = state.checkpoint.clone() else {
            return false;
        };

        if state.syncing {
            state.syncing = false;
            state.generation += 1;
            self.epoch_tx.send_replace(state.generation);
            tracing::warn!("Order reset while a commit is in flight; abandoning it");
        } else if same_identity_order(&state.items, &checkpoint) {
            return false;
        }

        state.items = checkpoint;
        tracing::info!(count = state.items.len(), "Order reset to checkpoint");
        self.emit(ReorderEvent::Reset {
            order: state.items.clone(),
        });
        true
    }

    // ========== Drag ==========

    /// Record the item picked up at `index`. Returns its id, or `None` when
    /// the index is out of range.
    pub fn on_drag_start(&self, index: usize) -> Option<T::Id> {
        let mut state = self.state.lock();
        let Some(item) = state.items.get(index) else {
            state.drag = None;
            return None;
        };
        let id = item.id().clone();
        state.drag = Some(DragState {
            id: id.clone(),
            origin: index,
            snapshot: state.items.clone(),
        });
        tracing::debug!(index, "Drag started");
        Some(id)
    }

    /// Drop the dragged item at `destination` (`None` = gesture cancelled).
    ///
    /// The drag is cleared whatever the outcome. The source is resolved by
    /// the dragged item's id, so a collection changed mid-drag still moves
    /// the right item.
    pub async fn on_drag_end(&self, destination: Option<usize>) -> ReorderResult {
        let drag = self.state.lock().drag.take();
        let Some(drag) = drag else {
            tracing::debug!("Drag end without a drag in progress");
            return Ok(ReorderOutcome::Ignored(InvalidRequest::NoActiveDrag));
        };
        let Some(destination) = destination else {
            tracing::debug!(origin = drag.origin, "Drag cancelled");
            return Ok(ReorderOutcome::Unchanged);
        };

        self.run(ReorderOperation::Reorder, move |items| {
            let Some(source) = index_of(items, &drag.id) else {
                return Plan::Invalid(InvalidRequest::UnknownItem(format!("{:?}", drag.id)));
            };
            if source != drag.origin || !same_identity_order(items, &drag.snapshot) {
                tracing::debug!(
                    origin = drag.origin,
                    source,
                    "Collection changed during drag, using current position"
                );
            }
            plan_move(items, source, destination)
        })
        .await
    }

    // ========== Mutations ==========

    /// Drag gesture by index; `None` destination means the drop was cancelled
    pub async fn move_by_drag(&self, source: usize, destination: Option<usize>) -> ReorderResult {
        let Some(destination) = destination else {
            return Ok(ReorderOutcome::Unchanged);
        };
        self.run(ReorderOperation::Reorder, move |items| {
            plan_move(items, source, destination)
        })
        .await
    }

    /// Move `id` to the 0-based `new_index`
    pub async fn move_item_to_position(&self, id: &T::Id, new_index: usize) -> ReorderResult {
        let id = id.clone();
        self.run(ReorderOperation::MoveToPosition, move |items| {
            plan_move_item(items, &id, new_index)
        })
        .await
    }

    /// One step toward the end
    pub async fn move_item_forward(&self, id: &T::Id) -> ReorderResult {
        let id = id.clone();
        self.run(ReorderOperation::MoveForward, move |items| {
            plan_step(items, &id, true)
        })
        .await
    }

    /// One step toward the start
    pub async fn move_item_backward(&self, id: &T::Id) -> ReorderResult {
        let id = id.clone();
        self.run(ReorderOperation::MoveBackward, move |items| {
            plan_step(items, &id, false)
        })
        .await
    }

    pub async fn move_to_start(&self, id: &T::Id) -> ReorderResult {
        let id = id.clone();
        self.run(ReorderOperation::MoveToStart, move |items| {
            plan_move_item(items, &id, 0)
        })
        .await
    }

    pub async fn move_to_end(&self, id: &T::Id) -> ReorderResult {
        let id = id.clone();
        self.run(ReorderOperation::MoveToEnd, move |items| {
            plan_move_item(items, &id, items.len().saturating_sub(1))
        })
        .await
    }

    /// Reorder the whole collection; already sorted means nothing to commit
    pub async fn auto_sort(&self, criterion: SortCriterion) -> ReorderResult {
        self.run(ReorderOperation::AutoSort(criterion), move |items| {
            plan_sort(items, criterion)
        })
        .await
    }

    /// [`Self::auto_sort`] from a criterion key such as `"name"` or `"date"`
    pub async fn auto_sort_by_key(&self, key: &str) -> ReorderResult {
        match key.parse::<SortCriterion>() {
            Ok(criterion) => self.auto_sort(criterion).await,
            Err(e) => {
                tracing::debug!(key, "Ignoring auto-sort with unknown criterion");
                Ok(ReorderOutcome::Ignored(InvalidRequest::UnknownCriterion(e.0)))
            }
        }
    }

    // ========== Protocol ==========

    async fn run<P>(&self, operation: ReorderOperation, plan: P) -> ReorderResult
    where
        P: FnOnce(&[T]) -> Plan<T> + Send,
    {
        let _turn = self.commit_gate.lock().await;

        let (entries, generation, mut epoch_rx) = {
            let mut state = self.state.lock();
            let next = match plan(&state.items) {
                Plan::Apply(next) => next,
                Plan::Unchanged => {
                    tracing::debug!(%operation, "Order unchanged, nothing to commit");
                    return Ok(ReorderOutcome::Unchanged);
                }
                Plan::Invalid(reason) => {
                    tracing::debug!(%operation, %reason, "Ignoring invalid reorder request");
                    return Ok(ReorderOutcome::Ignored(reason));
                }
            };
            if !is_permutation(&state.items, &next) {
                tracing::error!(%operation, "Planned order is not a permutation of the collection");
                return Err(ReorderError::Inconsistent { operation });
            }

            let previous = std::mem::replace(&mut state.items, next);
            state.checkpoint = Some(previous);
            state.syncing = true;

            let entries = OrderEntry::sequence(state.items.iter().map(|item| item.id().clone()));
            self.emit(ReorderEvent::Applied {
                operation,
                order: state.items.clone(),
            });
            (entries, state.generation, self.epoch_tx.subscribe())
        };

        tracing::debug!(%operation, count = entries.len(), "Committing order");
        let in_flight = InFlight {
            manager: self,
            operation,
            generation,
            settled: false,
        };

        let commit = AssertUnwindSafe(self.committer.commit(entries)).catch_unwind();
        tokio::select! {
            outcome = commit => {
                let failure = match outcome {
                    Ok(Ok(CommitOutcome::Accepted)) => None,
                    Ok(Ok(CommitOutcome::Rejected { reason })) => Some(reason),
                    Ok(Err(e)) => Some(format!("{e:#}")),
                    Err(panic) => Some(panic_reason(panic.as_ref())),
                };
                in_flight.settle(failure)
            }
            _ = epoch_rx.changed() => in_flight.abandon(),
        }
    }

    /// Terminal transition for the commit of `generation`
    fn finish(
        &self,
        operation: ReorderOperation,
        generation: u64,
        failure: Option<String>,
    ) -> ReorderResult {
        let mut state = self.state.lock();
        if state.generation != generation {
            tracing::warn!(%operation, "Commit settled after the collection moved on; ignoring");
            return Err(ReorderError::Discarded { operation });
        }
        state.syncing = false;

        let Some(reason) = failure else {
            state.checkpoint = Some(state.items.clone());
            tracing::info!(%operation, count = state.items.len(), "Order committed");
            self.emit(ReorderEvent::Committed { operation });
            return Ok(ReorderOutcome::Committed);
        };

        match state.checkpoint.clone() {
            Some(checkpoint) => state.items = checkpoint,
            None => {
                tracing::error!(%operation, "No checkpoint to roll back to; keeping current order");
                state.checkpoint = Some(state.items.clone());
            }
        }
        tracing::warn!(%operation, %reason, "Commit failed, order rolled back");
        self.emit(ReorderEvent::RolledBack {
            operation,
            reason: reason.clone(),
            order: state.items.clone(),
        });
        Err(ReorderError::CommitFailed { operation, reason })
    }

    fn emit(&self, event: ReorderEvent<T>) {
        // 没有订阅者时发送失败，忽略
        let _ = self.event_tx.send(event);
    }
}

/// Rolls back if the caller drops the request future mid-commit
struct InFlight<'a, T: Sortable> {
    manager: &'a OrderManager<T>,
    operation: ReorderOperation,
    generation: u64,
    settled: bool,
}

impl<T: Sortable> InFlight<'_, T> {
    fn settle(mut self, failure: Option<String>) -> ReorderResult {
        self.settled = true;
        self.manager.finish(self.operation, self.generation, failure)
    }

    fn abandon(mut self) -> ReorderResult {
        self.settled = true;
        tracing::warn!(operation = %self.operation, "Commit abandoned after reset or replace");
        Err(ReorderError::Discarded {
            operation: self.operation,
        })
    }
}

impl<T: Sortable> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if !self.settled {
            let _ = self.manager.finish(
                self.operation,
                self.generation,
                Some("commit cancelled by caller".to_string()),
            );
        }
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("commit panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("commit panicked: {message}")
    } else {
        "commit panicked".to_string()
    }
}
