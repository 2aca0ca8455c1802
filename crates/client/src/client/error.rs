//! Client error types

use fittrack_core::CoreError;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Token storage failed
    #[error("Token storage error: {0}")]
    Storage(#[from] CoreError),

    /// Token refresh failed; carries the shared outcome of the refresh
    #[error("Token refresh failed: {0}")]
    Refresh(#[from] RefreshError),
}

impl ClientError {
    /// Create error from HTTP status code
    #[must_use]
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }
}

/// Errors from the refresh path.
///
/// One refresh settles every request waiting on it, so this error fans out to
/// all of them; it is `Clone` for that reason, unlike [`ClientError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    /// Refresh attempted with no stored refresh token
    #[error("no refresh token available")]
    NoRefreshToken,

    /// Network failure or unreadable response during refresh
    #[error("refresh request failed: {0}")]
    Transport(String),

    /// Refresh endpoint rejected the call
    #[error("refresh rejected with status {status}: {message}")]
    Server { status: u16, message: String },

    /// Token storage failed while reading or writing credentials
    #[error("token storage failed: {0}")]
    Storage(String),

    /// The refresh worker task is no longer running
    #[error("refresh worker is gone")]
    Canceled,
}
