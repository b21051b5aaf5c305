//! Numeric id path parameter extractor with automatic validation.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};

/// Extractor for numeric id path parameters.
///
/// Automatically parses and validates an `i64` id from path parameters,
/// returning a proper error response if the segment is not a valid number.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_member(IdPath(id): IdPath) -> String {
///     format!("Member ID: {}", id)
/// }
///
/// let app = Router::new().route("/members/{id}", get(get_member));
/// ```
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        match raw.parse::<i64>() {
            Ok(id) => Ok(IdPath(id)),
            Err(_) => Err(AppError::InvalidId(format!("Invalid id: {}", raw)).into_response()),
        }
    }
}
