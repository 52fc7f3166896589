//! Failures at the HTTP boundary and their JSON form
//!
//! Every error body is `{"error": <message>}`. Internal causes are logged and
//! never written to the response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bloomwatch_core::BloomError;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Public message for failures that have no route-specific wording
pub const SERVER_ERROR: &str = "server error";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Unusable request input (400)
    #[error("{0}")]
    BadRequest(String),

    /// No route matched (404)
    #[error("not found")]
    NotFound,

    /// Evaluation failed (500). Only `public` reaches the caller.
    #[error("{public}")]
    Internal { public: &'static str, detail: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal(public: &'static str, detail: impl Into<String>) -> Self {
        Self::Internal {
            public,
            detail: detail.into(),
        }
    }

    /// Client errors pass through; anything else becomes a 500 with `public`
    pub fn from_core(err: &BloomError, public: &'static str) -> Self {
        if err.is_client_error() {
            Self::BadRequest(err.to_string())
        } else {
            Self::internal(public, err.to_string())
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BloomError> for ApiError {
    fn from(err: BloomError) -> Self {
        Self::from_core(&err, SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::BadRequest(message) => warn!("Rejected request: {}", message),
            Self::NotFound => debug!("No route matched"),
            Self::Internal { public, detail } => error!("{}: {}", public, detail),
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_split_by_origin() {
        let client = ApiError::from(BloomError::invalid_argument("end before start"));
        assert_eq!(client.status(), StatusCode::BAD_REQUEST);
        assert_eq!(client.to_string(), "invalid argument: end before start");

        let server = ApiError::from_core(
            &BloomError::computation_failure("phase evaluated to NaN"),
            "failed to compute lunar phase",
        );
        assert_eq!(server.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(server.to_string(), "failed to compute lunar phase");
    }

    #[test]
    fn test_internal_detail_stays_private() {
        let err = ApiError::internal(SERVER_ERROR, "stack trace here");
        assert_eq!(err.to_string(), "server error");
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
    }
}
