//! Read endpoints for business-scoped records, each behind the access check.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use bizauth_auth::{AccessTarget, HierarchyReader};
use bizauth_core::{
    DomainError, DomainResult, EmployeeGroupId, EmployeeId, EmployeeTypeId,
    EmployeeTypePermissionId,
};
use bizauth_infra::InMemoryDirectory;

use crate::app::errors;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;

/// Parse the id, run the access decision, then load and return the record.
fn guarded_read<I, T>(
    services: &AppServices,
    principal: &PrincipalContext,
    raw_id: &str,
    target: fn(I) -> AccessTarget,
    load: fn(&InMemoryDirectory, I) -> DomainResult<T>,
) -> axum::response::Response
where
    I: FromStr<Err = DomainError> + Copy,
    T: Serialize,
{
    let id = match I::from_str(raw_id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(denied) = authz::authorize_target(services, principal, target(id)) {
        return denied;
    }

    match load(&services.directory, id) {
        Ok(record) => Json(record).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_employee_group(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    guarded_read(
        &services,
        &principal,
        &id,
        AccessTarget::EmployeeGroup,
        |d, id: EmployeeGroupId| d.employee_group(id),
    )
}

pub async fn get_employee_type(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    guarded_read(
        &services,
        &principal,
        &id,
        AccessTarget::EmployeeType,
        |d, id: EmployeeTypeId| d.employee_type(id),
    )
}

pub async fn get_employee_type_permission(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    guarded_read(
        &services,
        &principal,
        &id,
        AccessTarget::EmployeeTypePermission,
        |d, id: EmployeeTypePermissionId| d.employee_type_permission(id),
    )
}

pub async fn get_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    guarded_read(
        &services,
        &principal,
        &id,
        AccessTarget::Employee,
        |d, id: EmployeeId| d.employee(id),
    )
}
