use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use bizauth_auth::TokenError;
use bizauth_core::DomainError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::RequiredField(field) => {
            let message = DomainError::RequiredField(field.clone()).to_string();
            (
                StatusCode::BAD_REQUEST,
                axum::Json(json!({
                    "error": "validation_error",
                    "field": field,
                    "message": message,
                })),
            )
                .into_response()
        }
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::ConstraintViolation(msg) => {
            json_error(StatusCode::CONFLICT, "constraint_violation", msg)
        }
        e @ DomainError::NotFound { .. } => json_error(StatusCode::NOT_FOUND, "not_found", e.to_string()),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::Unauthorized => json_error(StatusCode::FORBIDDEN, "unauthorized", "unauthorized"),
    }
}

pub fn token_error_to_response(err: TokenError) -> axum::response::Response {
    match err {
        TokenError::Authentication(e) => json_error(StatusCode::BAD_REQUEST, "authentication", e.to_string()),
        TokenError::Store(e) => domain_error_to_response(e),
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

pub fn internal_error(message: impl Into<String>) -> axum::response::Response {
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
}
