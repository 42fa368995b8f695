//! Client errors
//!
//! Error types for admin API calls, mapped from HTTP status codes.

use reqwest::StatusCode;
use thiserror::Error;

/// Client errors for admin API operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection error - the request never got an answer.
    #[error("connection error: {0}")]
    Connection(String),

    /// Authentication required - token missing or wrong.
    #[error("authentication required: {0}")]
    Unauthenticated(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid argument - rejected locally or by the server.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Server-side error.
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message from the response body
        message: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ClientError {
    /// Map a failed response to an error
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Self::InvalidArgument(message)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthenticated(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            _ => Self::Server {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true if this is an invalid argument error.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Serialization(err.to_string())
        } else {
            Self::Connection(err.to_string())
        }
    }
}
