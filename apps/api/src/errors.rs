#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::llm_client::GenerationError;
use crate::storage::StoreError;

/// User-facing message for retryable generation failures.
pub const MSG_SERVICE_BUSY: &str =
    "The AI service is currently overloaded. Please try again in a moment.";
/// User-facing message when the model returned nothing usable.
pub const MSG_EMPTY_READING: &str = "The cosmos is quiet... No insights were generated.";
/// Generic user-facing message for non-retryable generation failures.
pub const MSG_GENERATION_FAILED: &str = "Failed to connect with the cosmos. Please try again.";
/// Generic user-facing message for everything else.
pub const MSG_INTERNAL: &str = "Something went wrong. Please try again.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Store(StoreError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone())
            }
            AppError::Store(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Generation(e) if e.is_retryable() => {
                tracing::warn!("Generation service overloaded: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "GENERATION_OVERLOADED",
                    MSG_SERVICE_BUSY.to_string(),
                )
            }
            AppError::Generation(e) => {
                tracing::error!("Generation error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_ERROR",
                    MSG_GENERATION_FAILED.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// Uniform result envelope returned from generation-facing endpoints.
/// Mirrors the `{success, data?, error?}` contract the UI consumes: errors
/// never escape these boundaries as raw HTTP faults.
#[derive(Debug, Clone, Serialize)]
pub struct ActionResult<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ActionResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Converts an `AppError` into the envelope, picking the user-facing
    /// message. Retryable generation failures get the distinct busy message
    /// so the UI can advise the user to retry.
    pub fn from_error(err: &AppError) -> Self {
        let message = match err {
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Unauthorized => "Authentication required".to_string(),
            AppError::Store(StoreError::NotFound(msg)) => msg.clone(),
            AppError::Generation(e) if e.is_retryable() => MSG_SERVICE_BUSY.to_string(),
            AppError::Generation(GenerationError::EmptyContent) => MSG_EMPTY_READING.to_string(),
            AppError::Generation(_) => MSG_GENERATION_FAILED.to_string(),
            AppError::Store(_) | AppError::Internal(_) => MSG_INTERNAL.to_string(),
        };
        Self::err(message)
    }
}
