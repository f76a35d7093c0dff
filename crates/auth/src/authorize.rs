use serde::Serialize;
use thiserror::Error;

use bizauth_core::{
    BusinessId, DomainError, DomainResult, EmployeeGroupId, EmployeeId, EmployeeTypeId,
    EmployeeTypePermissionId, UserId,
};

use crate::{HierarchyReader, OwnedByBusiness, Principal, Role};

/// An object-level access check target, anywhere in the hierarchy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum AccessTarget {
    EmployeeGroup(EmployeeGroupId),
    EmployeeType(EmployeeTypeId),
    EmployeeTypePermission(EmployeeTypePermissionId),
    Employee(EmployeeId),
}

impl AccessTarget {
    /// Walk the target up to the business that owns it.
    pub fn owning_business<R>(&self, reader: &R) -> DomainResult<BusinessId>
    where
        R: HierarchyReader + ?Sized,
    {
        match *self {
            AccessTarget::EmployeeGroup(id) => reader.employee_group(id)?.owning_business(reader),
            AccessTarget::EmployeeType(id) => reader.employee_type(id)?.owning_business(reader),
            AccessTarget::EmployeeTypePermission(id) => {
                reader.employee_type_permission(id)?.owning_business(reader)
            }
            AccessTarget::Employee(id) => reader.employee(id)?.owning_business(reader),
        }
    }
}

impl core::fmt::Display for AccessTarget {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AccessTarget::EmployeeGroup(id) => write!(f, "employee group {id}"),
            AccessTarget::EmployeeType(id) => write!(f, "employee type {id}"),
            AccessTarget::EmployeeTypePermission(id) => write!(f, "employee type permission {id}"),
            AccessTarget::Employee(id) => write!(f, "employee {id}"),
        }
    }
}

/// Which rule granted access.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessPath {
    Superuser,
    BusinessOwner,
    Employee,
}

/// Why access was denied.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    /// The principal belongs to a business, just not the one owning the target.
    ForeignBusiness,
    /// The principal is an employee with no employee type assigned.
    MissingEmployeeType,
    /// The principal neither owns a business nor has an employment record.
    NoBusinessRole,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "via", rename_all = "snake_case")]
pub enum AccessDecision {
    Granted(AccessPath),
    Denied(DenialKind),
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted(_))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Lookup(#[from] DomainError),
}

/// Decide whether `principal` may act on `target`.
///
/// Rules, in order:
/// 1. superuser: unconditional allow;
/// 2. owner of the target's business (flag set and business matches);
/// 3. employee whose type's group belongs to the target's business.
///
/// The per-resource levels of the permission matrix are not consulted here.
///
/// - No writes, no caching: the hierarchy is re-walked on every call.
/// - A missing target (or a broken chain) is an error, never a plain deny.
pub fn decide<R>(reader: &R, principal: &Principal, target: AccessTarget) -> DomainResult<AccessDecision>
where
    R: HierarchyReader + ?Sized,
{
    resolve(reader, principal, target).map(|(_, decision)| decision)
}

fn resolve<R>(
    reader: &R,
    principal: &Principal,
    target: AccessTarget,
) -> DomainResult<(BusinessId, AccessDecision)>
where
    R: HierarchyReader + ?Sized,
{
    let owning = target.owning_business(reader)?;
    let decision = decide_for_business(reader, principal, owning)?;

    tracing::debug!(
        user_id = %principal.user_id(),
        target = %target,
        business_id = %owning,
        decision = ?decision,
        "access decision"
    );

    Ok((owning, decision))
}

fn decide_for_business<R>(
    reader: &R,
    principal: &Principal,
    owning: BusinessId,
) -> DomainResult<AccessDecision>
where
    R: HierarchyReader + ?Sized,
{
    if principal.is_superuser() {
        return Ok(AccessDecision::Granted(AccessPath::Superuser));
    }

    let mut denial = DenialKind::NoBusinessRole;

    if principal.is_business_owner() {
        if let Some(business_id) = principal.owned_business_id() {
            if business_id == owning {
                return Ok(AccessDecision::Granted(AccessPath::BusinessOwner));
            }
            denial = DenialKind::ForeignBusiness;
        }
    }

    if principal.is_employee() {
        if let Some(employee) = &principal.employee {
            match employee.employee_type {
                Some(type_id) => {
                    let employer = reader.employee_type(type_id)?.owning_business(reader)?;
                    if employer == owning {
                        return Ok(AccessDecision::Granted(AccessPath::Employee));
                    }
                    denial = DenialKind::ForeignBusiness;
                }
                None if denial == DenialKind::NoBusinessRole => {
                    denial = DenialKind::MissingEmployeeType;
                }
                None => {}
            }
        }
    }

    Ok(AccessDecision::Denied(denial))
}

/// Boolean form of [`decide`].
pub fn can_access<R>(reader: &R, principal: &Principal, target: AccessTarget) -> DomainResult<bool>
where
    R: HierarchyReader + ?Sized,
{
    decide(reader, principal, target).map(|d| d.is_granted())
}

/// Guard form of [`decide`] for request handlers.
pub fn require_access<R>(reader: &R, principal: &Principal, target: AccessTarget) -> Result<(), AuthzError>
where
    R: HierarchyReader + ?Sized,
{
    let explanation = explain_access(reader, principal, target)?;
    if explanation.granted {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(explanation.reason))
    }
}

/// Coarse request-level role gate ("is superadmin", "is business owner", "is employee").
pub fn require_role(principal: &Principal, role: Role) -> Result<(), AuthzError> {
    if principal.has_role(role) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(format!("requires role '{role}'")))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Access Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an access decision.
#[derive(Debug, Clone, Serialize)]
pub struct AccessExplanation {
    pub target: AccessTarget,
    pub owning_business: BusinessId,
    pub granted: bool,
    pub decision: AccessDecision,
    /// Human-readable reason for the decision.
    pub reason: String,
    pub principal: PrincipalState,
}

/// The parts of the principal that the decision looked at.
#[derive(Debug, Clone, Serialize)]
pub struct PrincipalState {
    pub user_id: UserId,
    pub roles: Vec<Role>,
    pub owned_business_id: Option<BusinessId>,
    pub employee_type_id: Option<EmployeeTypeId>,
}

/// Explain why access to `target` is (or would be) granted or denied.
pub fn explain_access<R>(
    reader: &R,
    principal: &Principal,
    target: AccessTarget,
) -> DomainResult<AccessExplanation>
where
    R: HierarchyReader + ?Sized,
{
    let (owning, decision) = resolve(reader, principal, target)?;

    let reason = match decision {
        AccessDecision::Granted(AccessPath::Superuser) => {
            "principal is a superuser".to_string()
        }
        AccessDecision::Granted(AccessPath::BusinessOwner) => {
            format!("principal owns business {owning}")
        }
        AccessDecision::Granted(AccessPath::Employee) => {
            format!("principal is employed by business {owning}")
        }
        AccessDecision::Denied(DenialKind::ForeignBusiness) => {
            format!("{target} belongs to business {owning}, which the principal neither owns nor works for")
        }
        AccessDecision::Denied(DenialKind::MissingEmployeeType) => {
            "principal is an employee without an employee type".to_string()
        }
        AccessDecision::Denied(DenialKind::NoBusinessRole) => {
            "principal has no business owner or employee role".to_string()
        }
    };

    Ok(AccessExplanation {
        target,
        owning_business: owning,
        granted: decision.is_granted(),
        decision,
        reason,
        principal: PrincipalState {
            user_id: principal.user_id(),
            roles: principal.roles(),
            owned_business_id: principal.owned_business_id(),
            employee_type_id: principal.employee_type_id(),
        },
    })
}
