//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::AlbumNotFound | Self::MediaNotFound => StatusCode::NOT_FOUND,

            Self::Unknown => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 (malformed body and sort-order rejections)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
