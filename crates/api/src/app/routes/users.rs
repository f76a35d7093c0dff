use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use bizauth_auth::issue_token;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub async fn sign_up(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::SignUpRequest>,
) -> axum::response::Response {
    let input = match body.into_new_user() {
        Ok(input) => input,
        Err(e) => return errors::domain_error_to_response(e),
    };

    // Password hashing is CPU-bound.
    let result = tokio::task::spawn_blocking(move || services.registrar.create_user(input)).await;

    match result {
        Ok(Ok(user)) => (StatusCode::CREATED, Json(dto::UserResponse::from(user))).into_response(),
        Ok(Err(e)) => errors::domain_error_to_response(e),
        Err(e) => errors::internal_error(format!("sign-up task failed: {e}")),
    }
}

pub async fn get_token(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::TokenRequest>,
) -> axum::response::Response {
    let result = tokio::task::spawn_blocking(move || {
        issue_token(
            &services.authenticator,
            &*services.tokens,
            &body.email,
            &body.password,
        )
    })
    .await;

    match result {
        Ok(Ok(issued)) => Json(issued).into_response(),
        Ok(Err(e)) => errors::token_error_to_response(e),
        Err(e) => errors::internal_error(format!("token task failed: {e}")),
    }
}
