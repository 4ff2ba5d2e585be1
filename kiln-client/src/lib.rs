//! Kiln Client - HTTP client for the album server
//!
//! Fetches albums and media, and persists media orders on behalf of a
//! [`kiln_reorder::MediaOrderManager`] through [`HttpOrderCommitter`].

pub mod albums;
pub mod commit;
pub mod config;
pub mod error;
pub mod http;

pub use albums::AlbumClient;
pub use commit::HttpOrderCommitter;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};

// Re-export shared types for convenience
pub use shared::models::{Album, AlbumSummary, BatchUpdateResponse, MediaItem, MediaOrderEntry};
