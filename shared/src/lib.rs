//! Shared types for the Kiln workspace
//!
//! Wire and domain types used by the order manager, the admin client and
//! the album server: media/album models, the sort-order wire entries,
//! the unified error system and the API response envelope.

pub mod error;
pub mod models;
pub mod types;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{Album, AlbumSummary, BatchUpdateResponse, MediaItem, MediaOrderEntry, OrderEntry};
