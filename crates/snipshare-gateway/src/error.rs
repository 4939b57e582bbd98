use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use snipshare_core::ShareError;
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Errors surfaced to HTTP clients.
#[derive(Debug)]
pub enum AppError {
    InvalidInput(String),
    InvalidCode(String),
    /// Absent or expired; the response never says which.
    NotFound,
    CapacityExhausted,
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl From<ShareError> for AppError {
    fn from(value: ShareError) -> Self {
        match value {
            ShareError::InvalidInput(message) => Self::InvalidInput(message),
            ShareError::InvalidCode(message) => Self::InvalidCode(message),
            ShareError::CapacityExhausted => Self::CapacityExhausted,
            ShareError::Storage(message) => Self::Internal(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message),
            AppError::InvalidCode(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                "snippet not found or expired".to_string(),
            ),
            AppError::CapacityExhausted => (
                StatusCode::SERVICE_UNAVAILABLE,
                "no share codes available".to_string(),
            ),
            AppError::Internal(message) => {
                error!(error = %message, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
