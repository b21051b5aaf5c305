use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{ErrorCode, ErrorResponse};

/// Handler for 404 Not Found errors.
///
/// Can be used as a fallback handler in your router.
pub async fn not_found() -> Response {
    let body = Json(ErrorResponse::with_message(
        ErrorCode::NotFound,
        "The requested resource was not found",
    ));

    (StatusCode::NOT_FOUND, body).into_response()
}

/// Handler for 405 Method Not Allowed errors.
pub async fn method_not_allowed() -> Response {
    let body = Json(ErrorResponse::with_message(
        ErrorCode::ValidationError,
        "The HTTP method is not allowed for this resource",
    ));

    (StatusCode::METHOD_NOT_ALLOWED, body).into_response()
}
