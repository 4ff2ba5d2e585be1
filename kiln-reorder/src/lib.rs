//! Kiln Reorder - optimistic ordering for album media
//!
//! [`OrderManager`] owns the ordered collection for one album view. Every
//! movement request is applied locally at once, committed through an
//! injected [`OrderCommitter`], and rolled back to the checkpoint when the
//! commit fails.
//!
//! # Flow
//!
//! ```text
//! request ──► validate ──► checkpoint ──► apply (visible) ──► commit
//!                                                              │
//!                         IDLE ◄── keep ◄──────── accepted ────┤
//!                         IDLE ◄── restore checkpoint ◄─ failed┘
//! ```
//!
//! Requests against one manager are queued: a move issued while a commit is
//! in flight waits for it to settle before it is validated.

pub mod committer;
pub mod criterion;
pub mod error;
pub mod event;
pub mod item;
pub mod manager;

pub use committer::{CommitOutcome, FnCommitter, OrderCommitter};
pub use criterion::{SortCriterion, UnknownCriterion};
pub use error::{InvalidRequest, ReorderError, ReorderOutcome, ReorderResult};
pub use event::{ReorderEvent, ReorderOperation};
pub use item::Sortable;
pub use manager::{ManagerConfig, OrderManager};

pub use shared::models::OrderEntry;

/// Manager over album media, the collection the admin dashboard reorders
pub type MediaOrderManager = OrderManager<shared::models::MediaItem>;
