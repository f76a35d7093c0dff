use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use bizauth_infra::authenticate_token;

use crate::app::services::AppServices;
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub services: Arc<AppServices>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let key = extract_token(req.headers())?;

    let principal = authenticate_token(&state.services.directory, &*state.services.tokens, key)
        .map_err(|e| {
            tracing::error!("token lookup failed: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    req.extensions_mut().insert(PrincipalContext::new(principal));

    Ok(next.run(req).await)
}

/// Accepts `Authorization: Token <key>` and `Authorization: Bearer <key>`;
/// the scheme keyword is matched case-insensitively.
fn extract_token(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let (scheme, token) = header
        .trim_start()
        .split_once(' ')
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let known = ["Token", "Bearer"]
        .iter()
        .any(|k| scheme.eq_ignore_ascii_case(k));
    if !known {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let token = token.trim();

    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}
