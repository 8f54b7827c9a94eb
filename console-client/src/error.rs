//! Client error types

use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// The server answered with an error envelope
    #[error("API error: {0}")]
    Api(AppError),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        match self {
            ClientError::NotFound(_) => true,
            ClientError::Api(err) => matches!(
                err.code,
                ErrorCode::NotFound
                    | ErrorCode::ProductNotFound
                    | ErrorCode::PriceNotFound
                    | ErrorCode::PriceListNotFound
                    | ErrorCode::SubscriptionNotFound
            ),
            _ => false,
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) if e.is_timeout() => {
                AppError::with_message(ErrorCode::TimeoutError, e.to_string())
            }
            ClientError::Http(e) if e.is_decode() => AppError::invalid_response(e.to_string()),
            ClientError::Http(e) => AppError::network(e.to_string()),
            ClientError::InvalidResponse(msg) => AppError::invalid_response(msg),
            ClientError::Unauthorized => AppError::new(ErrorCode::NotAuthenticated),
            ClientError::Forbidden(msg) => AppError::with_message(ErrorCode::PermissionDenied, msg),
            ClientError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            ClientError::Validation(msg) => AppError::validation(msg),
            ClientError::Internal(msg) => AppError::internal(msg),
            ClientError::Api(err) => err,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
