//! Mapping from store and extraction failures to HTTP responses.
//!
//! Every error renders as `{"error": "<message>"}` with the matching status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unknown or non-numeric todo id.
    #[error("{0}")]
    NotFound(String),

    /// The request body could not be decoded.
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(error = %self, "lookup missed");
        } else {
            tracing::warn!(error = %self, "rejected request");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
