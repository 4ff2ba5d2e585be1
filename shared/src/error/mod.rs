//! Unified error system for Kiln
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified API response format
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Album errors
//! - 5xxx: Media errors (including sort-order validation)
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::with_message(ErrorCode::SortOrderGap, "Entry 2 has position 3")
//!     .with_detail("album_id", 7);
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(ErrorCode::SortOrderGap.code()));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
