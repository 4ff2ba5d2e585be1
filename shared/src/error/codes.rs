//! Unified error codes for Kiln
//!
//! Error codes are shared by the album server, the admin client and the
//! dashboard frontend. They are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Album errors
//! - 5xxx: Media errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 4xxx: Album ====================
    /// Album not found
    AlbumNotFound = 4001,
    /// Album is empty
    AlbumEmpty = 4002,

    // ==================== 5xxx: Media ====================
    /// Media item not found in the album
    MediaNotFound = 5001,
    /// Sort order payload does not cover every media item of the album
    SortOrderIncomplete = 5002,
    /// Sort order payload lists a media item more than once
    SortOrderDuplicate = 5003,
    /// Sort order positions are not contiguous from zero
    SortOrderGap = 5004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::InvalidFormat => "Invalid format",

            // Album
            ErrorCode::AlbumNotFound => "Album not found",
            ErrorCode::AlbumEmpty => "Album has no media",

            // Media
            ErrorCode::MediaNotFound => "Media item not found",
            ErrorCode::SortOrderIncomplete => "Sort order does not cover every media item",
            ErrorCode::SortOrderDuplicate => "Sort order lists a media item more than once",
            ErrorCode::SortOrderGap => "Sort order positions are not contiguous",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            6 => Ok(ErrorCode::InvalidFormat),

            // Album
            4001 => Ok(ErrorCode::AlbumNotFound),
            4002 => Ok(ErrorCode::AlbumEmpty),

            // Media
            5001 => Ok(ErrorCode::MediaNotFound),
            5002 => Ok(ErrorCode::SortOrderIncomplete),
            5003 => Ok(ErrorCode::SortOrderDuplicate),
            5004 => Ok(ErrorCode::SortOrderGap),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
