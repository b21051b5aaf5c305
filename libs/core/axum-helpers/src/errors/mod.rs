pub mod codes;
pub mod handlers;
pub mod messages;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// Returned for all error responses:
/// - `code`: integer error code for logging/monitoring (e.g., 1004)
/// - `error`: machine-readable error identifier (e.g., "NOT_FOUND")
/// - `message`: human-readable error message
/// - `details`: optional structured details (e.g., validation field errors)
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Build a response from an [`ErrorCode`] with its default message
    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: code.default_message().to_string(),
            details: None,
        }
    }

    /// Build a response from an [`ErrorCode`] with a specific message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }
}

/// Application error type convertible into HTTP responses.
///
/// Integrates with common error types from dependencies and renders
/// structured [`ErrorResponse`] bodies with stable error codes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Invalid Id: {0}")]
    InvalidId(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Database(e) => {
                let (status, code) = match &e {
                    DbErr::RecordNotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::DatabaseNotFound),
                    _ => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseError),
                };
                tracing::error!(error_code = code.code(), "Database error: {:?}", e);
                (status, ErrorResponse::from_code(code))
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::JsonExtraction.code(),
                    "JSON extraction error: {:?}",
                    e
                );
                (
                    e.status(),
                    ErrorResponse::with_message(ErrorCode::JsonExtraction, e.body_text()),
                )
            }
            AppError::ValidationError(e) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {:?}",
                    e
                );
                let mut body = ErrorResponse::from_code(ErrorCode::ValidationError);
                body.details = serde_json::to_value(&e).ok();
                (StatusCode::BAD_REQUEST, body)
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_message(ErrorCode::ValidationError, msg),
                )
            }
            AppError::InvalidId(msg) => {
                tracing::info!("Invalid id: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_message(ErrorCode::InvalidId, msg),
                )
            }
            AppError::NotFound(msg) => {
                tracing::info!("Not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::with_message(ErrorCode::NotFound, msg),
                )
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::from_code(ErrorCode::InternalError),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
