//! Application error type mapping to HTTP status codes and the envelope.

use std::time::Instant;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use lessonline_infra::line::SignatureError;
use lessonline_types::error::CollaboratorError;

use super::response::{ApiMeta, ApiResponse};

#[derive(Debug)]
pub enum AppError {
    /// Webhook signature missing or wrong.
    Unauthorized(String),
    /// Request body could not be understood.
    Validation(String),
    /// A collaborator call made on behalf of the request failed.
    Upstream(CollaboratorError),
    Internal(String),
}

impl From<SignatureError> for AppError {
    fn from(e: SignatureError) -> Self {
        match e {
            SignatureError::InvalidKey(msg) => AppError::Internal(msg),
            other => AppError::Unauthorized(other.to_string()),
        }
    }
}

impl From<CollaboratorError> for AppError {
    fn from(e: CollaboratorError) -> Self {
        match e {
            CollaboratorError::InvalidIdentifier(_) => AppError::Validation(e.to_string()),
            other => AppError::Upstream(other),
        }
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Upstream(e) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", e.to_string()),
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        if status.is_server_error() {
            tracing::error!(%status, code, %message, "request failed");
        } else {
            tracing::debug!(%status, code, %message, "request rejected");
        }
        ApiResponse::error(code, &message, ApiMeta::since(Instant::now())).into_response_with(status)
    }
}
