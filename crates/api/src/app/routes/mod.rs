use axum::{
    routing::{get, post},
    Router,
};

pub mod hierarchy;
pub mod system;
pub mod users;

/// Router for unauthenticated endpoints (sign-up and token exchange).
pub fn public_router() -> Router {
    Router::new()
        .route("/users/sign_up", post(users::sign_up))
        .route("/users/get_token", post(users::get_token))
}

/// Router for all authenticated endpoints.
pub fn protected_router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/employee-groups/:id", get(hierarchy::get_employee_group))
        .route("/employee-types/:id", get(hierarchy::get_employee_type))
        .route(
            "/employee-type-permissions/:id",
            get(hierarchy::get_employee_type_permission),
        )
        .route("/employees/:id", get(hierarchy::get_employee))
}
