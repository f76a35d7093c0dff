//! API-side access guard for object routes.
//!
//! Runs the decision engine before a handler loads and returns the object,
//! while keeping the auth core HTTP-agnostic.

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;

use bizauth_auth::{AccessTarget, explain_access};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

/// Check object-level access for the current request principal.
///
/// Denials become 403 with the decision explanation; a missing target becomes
/// the lookup error's response (404), never a silent 403.
pub fn authorize_target(
    services: &AppServices,
    principal: &PrincipalContext,
    target: AccessTarget,
) -> Result<(), Response> {
    let explanation = explain_access(&*services.directory, principal.principal(), target)
        .map_err(errors::domain_error_to_response)?;

    if explanation.granted {
        return Ok(());
    }

    Err((
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "forbidden",
            "message": explanation.reason,
            "explanation": explanation,
        })),
    )
        .into_response())
}
