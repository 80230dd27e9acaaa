use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use rollcall_core::DomainError;

/// Map a domain error to its canonical HTTP response.
///
/// Raw storage detail goes to the log only; clients get a generic message.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(violations) => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "error": "validation_error",
                "message": "one or more fields are invalid",
                "violations": violations,
            })),
        )
            .into_response(),
        DomainError::DuplicateEmail(_) => {
            json_error(StatusCode::CONFLICT, "duplicate_email", "email is already registered")
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "member not found"),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::Storage(msg) => {
            tracing::error!(error = %msg, "storage failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_error",
                "internal storage failure",
            )
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
