//! Client error types

use std::collections::HashMap;

use serde_json::Value;
use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 服务端返回的业务错误
    #[error("API error {code}: {message}")]
    Api {
        code: u16,
        message: String,
        details: Option<HashMap<String, Value>>,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Known error code for API errors
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Api { code, .. } => ErrorCode::try_from(*code).ok(),
            _ => None,
        }
    }

    /// The server understood the request and refused it
    pub fn is_api(&self) -> bool {
        matches!(self, ClientError::Api { .. })
    }
}

impl From<AppError> for ClientError {
    fn from(err: AppError) -> Self {
        ClientError::Api {
            code: err.code.code(),
            message: err.message,
            details: err.details,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
