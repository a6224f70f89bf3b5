//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use questforge_types::error::StoreError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Game store failures.
    Store(StoreError),
    /// No stored game under the requested title.
    NotFound(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(title) => (
                StatusCode::NOT_FOUND,
                "GAME_NOT_FOUND",
                format!("Game '{title}' not found"),
            ),
            AppError::Store(StoreError::MissingTitle) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                StoreError::MissingTitle.to_string(),
            ),
            AppError::Store(e @ StoreError::Corrupt(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORE_CORRUPT", e.to_string())
            }
            AppError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR", e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!(code, error = %message, "Request failed");
        }

        let body = json!({
            "data": null,
            "meta": {
                "request_id": uuid::Uuid::now_v7().to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
