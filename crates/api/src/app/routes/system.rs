use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> impl IntoResponse {
    let principal = principal.principal();
    Json(serde_json::json!({
        "user_id": principal.user_id().to_string(),
        "email": principal.user.email,
        "full_name": principal.user.full_name(),
        "roles": principal.roles().iter().map(|r| r.as_str()).collect::<Vec<_>>(),
        "business_id": principal.owned_business_id().map(|id| id.to_string()),
        "employee_type_id": principal.employee_type_id().map(|id| id.to_string()),
    }))
}
