//! Error types for the admin API service.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use orderdesk_core::CoreError;
use orderdesk_types::api::ErrorBody;

/// Message sent in place of internal error details
const INTERNAL_MESSAGE: &str = "Internal server error";

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Upstream(String),

    /// The PDF renderer failed; its status is passed through
    #[error("PDF generation failed")]
    Renderer { status: u16, message: String },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error")]
    Database(#[from] orderdesk_db::DbError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Renderer { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Upstream(_) | Self::Internal(_) | Self::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Internal(_) | Self::Database(_) => INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::BadRequest(msg),
            CoreError::NotFound(msg) => Self::NotFound(msg),
            CoreError::Upstream(msg) => Self::Upstream(msg),
            CoreError::Renderer { status, message } => Self::Renderer { status, message },
            CoreError::Database(e) => Self::Database(e),
            CoreError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            Self::Internal(_) | Self::Database(_) => {
                tracing::error!(error = ?self, "Internal API error");
            }
            Self::Upstream(msg) => tracing::error!(error = %msg, "Upstream service error"),
            Self::Renderer { status, message } => {
                tracing::error!(status, error = %message, "PDF renderer error");
            }
            _ => {}
        }

        (status, Json(ErrorBody::new(self.message()))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
