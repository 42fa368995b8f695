//! Core errors

use thiserror::Error;

/// Errors raised by the back-office services
#[derive(Error, Debug)]
pub enum CoreError {
    /// Bad input, rejected before any remote call
    #[error("{0}")]
    Validation(String),

    /// Requested record does not exist
    #[error("{0}")]
    NotFound(String),

    /// An external service answered with an error
    #[error("{0}")]
    Upstream(String),

    /// The PDF renderer answered with a non-success status
    #[error("PDF renderer returned {status}: {message}")]
    Renderer {
        /// Status code returned by the renderer
        status: u16,
        /// Body or error message returned by the renderer
        message: String,
    },

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] orderdesk_db::DbError),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
