//! HTTP error responses.
//!
//! Every pipeline failure maps to its own status and machine-readable code
//! so callers can tell an upstream outage from a storage fault.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use vacancies::PipelineError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

impl ApiError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Pipeline(err) => match err {
                PipelineError::InvalidQuery { .. } => (StatusCode::BAD_REQUEST, "invalid_query"),
                PipelineError::Detail { .. } => (StatusCode::BAD_GATEWAY, "upstream_detail_failed"),
                PipelineError::Storage(_) | PipelineError::Json(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "storage_failed")
                }
                PipelineError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code, "Request failed");
        } else {
            tracing::warn!(error = %self, code, "Request rejected");
        }

        let body = ErrorBody {
            error: self.to_string(),
            code,
        };
        (status, Json(body)).into_response()
    }
}
