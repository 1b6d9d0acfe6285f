use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::engine::EngineError;

/// API-layer error type
#[derive(Debug)]
pub enum ApiError {
    /// 400 - Bad request (invalid input)
    BadRequest(String),

    /// 404 - Resource not found
    NotFound(String),

    /// 500 - Internal error. The message is shown to clients as-is.
    Internal(String),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl ApiError {
    /// Map an engine failure to a response. Anything other than bad input is
    /// logged here and replaced by `public_message`.
    pub fn from_engine(err: EngineError, public_message: &str) -> Self {
        match err {
            EngineError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            other if other.is_external() => {
                tracing::error!(error = %other, "language model call failed");
                ApiError::Internal(public_message.into())
            }
            other => {
                tracing::error!(error = %other, "request failed");
                ApiError::Internal(public_message.into())
            }
        }
    }
}
