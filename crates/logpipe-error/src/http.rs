//! `IntoResponse` mapping for [`crate::PipelineError`].
//!
//! Resolves the §9 open question explicitly: validation failures stay
//! 4xx, only genuinely unexpected faults become 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::{PipelineError, ValidationError};

/// Error response body shared by every endpoint in the workspace.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Stable machine-readable error code.
    pub error: String,
    /// Human-readable detail, safe to show to a caller.
    pub detail: String,
    /// Emitting instance, when known (populated by the server crate).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ErrorResponse {
    /// Build a response body from an error code and detail string.
    #[must_use]
    pub fn new(error: impl Into<String>, detail: impl Into<String>) -> Self {
        Self { error: error.into(), detail: detail.into(), instance: None }
    }
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let code = self.error_code();
        match &self {
            Self::Validation(e) => {
                let detail = match e {
                    ValidationError::Field { field, message } => format!("{field}: {message}"),
                    ValidationError::BatchSize { min, max, actual } => {
                        format!("batch must contain between {min} and {max} records, got {actual}")
                    },
                };
                (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorResponse::new(code, detail))).into_response()
            },
            Self::Stream(e) => {
                tracing::error!(error = %e, "stream operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(code, e.to_string())))
                    .into_response()
            },
            Self::Store(e) => {
                tracing::error!(error = %e, "store operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(code, e.to_string())))
                    .into_response()
            },
            Self::Internal { message } => {
                tracing::error!(error = %message, "unexpected internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(code, message.clone())))
                    .into_response()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn validation_error_maps_to_422() {
        let err = PipelineError::Validation(ValidationError::Field {
            field: "message".to_string(),
            message: "must be 1..5000 bytes".to_string(),
        });
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn stream_error_maps_to_500() {
        let err = PipelineError::Stream(crate::StreamError::Unavailable("conn refused".into()));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
