use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use matchday_core::AnalysisError;

/// Error types for the analytics API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No games available for analysis")]
    NoGames,

    #[error("Game not found")]
    GameNotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Mutex lock error")]
    Lock,

    #[error("Internal server error")]
    Internal,
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::EmptyFrame => ApiError::NoGames,
            AnalysisError::InvalidScenario { .. } => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for ApiError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        ApiError::Lock
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::NoGames | ApiError::GameNotFound => {
                (StatusCode::NOT_FOUND, self.to_string())
            }

            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),

            ApiError::Database(_) => {
                tracing::error!("database error: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal database error".to_string(),
                )
            }

            ApiError::Lock | ApiError::Internal => {
                tracing::error!("internal error: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Helper type for handler results
pub type ApiResult<T> = Result<T, ApiError>;
