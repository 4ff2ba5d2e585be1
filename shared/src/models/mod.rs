//! Data models
//!
//! Shared between the album server, the admin client and the frontend (via API).
//! All IDs are `i64`.

pub mod album;
pub mod media;
pub mod sort_order;

// Re-exports
pub use album::*;
pub use media::*;
pub use sort_order::*;
