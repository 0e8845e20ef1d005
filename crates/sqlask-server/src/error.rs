use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures of the HTTP layer itself. Query failures never use this type:
/// they travel inside a 200 response as an error payload.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("front page unavailable: {0}")]
    IndexUnavailable(#[source] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::IndexUnavailable(e) if e.kind() == std::io::ErrorKind::NotFound => {
                StatusCode::NOT_FOUND
            }
            ApiError::IndexUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!(event = "api_error", status = status.as_u16(), error = %self);
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
