use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::MemberId;

/// Domain errors for the members core.
///
/// `InvalidId` and `NotFound` are distinct by contract: the first means the
/// argument itself was unusable and is raised before any storage access, the
/// second means a well-formed id matched no record.
#[derive(Debug, Error)]
pub enum MemberError {
    #[error("Invalid member id")]
    InvalidId,

    #[error("Member not found: {0}")]
    NotFound(MemberId),

    #[error("Cash amount cannot be negative: {0}")]
    NegativeCash(Decimal),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type MemberResult<T> = Result<T, MemberError>;

/// Convert MemberError to AppError for standardized error responses
impl From<MemberError> for AppError {
    fn from(err: MemberError) -> Self {
        match err {
            MemberError::InvalidId => AppError::InvalidId("Invalid member id".to_string()),
            MemberError::NotFound(id) => AppError::NotFound(format!("Member {} not found", id)),
            MemberError::NegativeCash(amount) => {
                AppError::BadRequest(format!("Cash amount cannot be negative: {}", amount))
            }
            MemberError::Validation(msg) => AppError::BadRequest(msg),
            MemberError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for MemberError {
    fn into_response(self) -> Response {
        // Convert to AppError for standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
