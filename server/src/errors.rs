//! API errors mapped to HTTP status codes with a `{"error": "message"}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use search_core::SearchError;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    /// Malformed query, document or id (400).
    BadRequest(String),
    /// Unknown document or position (404).
    NotFound(String),
    /// Missing or wrong admin token (401).
    Unauthorized(String),
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::InvalidArgument(_) => ApiError::BadRequest(err.to_string()),
            SearchError::NotFound(_) | SearchError::OutOfRange { .. } => {
                ApiError::NotFound(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
