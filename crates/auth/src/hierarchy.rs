//! Organizational hierarchy: Business → EmployeeGroup → EmployeeType → Employee.
//!
//! These are plain relational records (parents referenced by id). Every access
//! decision is scoped by walking a target up to the business that owns it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bizauth_core::{
    BusinessId, DomainError, DomainResult, EmployeeGroupId, EmployeeId, EmployeeTypeId,
    EmployeeTypePermissionId, Entity, SubscriptionId, UserId,
};

use crate::EmployeeTypePermission;

// ─────────────────────────────────────────────────────────────────────────────
// Records
// ─────────────────────────────────────────────────────────────────────────────

/// A plan a business subscribes to. Shared by many businesses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub name: String,
    /// Price in minor currency units (cents).
    pub price: i64,
    pub description: Option<String>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

/// The tenant: a company owning the account, its employees and resources.
///
/// # Invariants
/// - Exactly one owner; a user owns at most one business.
/// - Decisions only succeed for the owner while its `is_business_owner` flag is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Business {
    pub id: BusinessId,
    pub name: String,
    pub owner: UserId,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub description: Option<String>,
    pub subscription: SubscriptionId,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeGroup {
    pub id: EmployeeGroupId,
    pub name: String,
    pub business: BusinessId,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

/// A job classification inside a group (the `label` is free text, e.g. "Rep").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeType {
    pub id: EmployeeTypeId,
    pub label: String,
    pub description: Option<String>,
    pub group: EmployeeGroupId,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

/// A user's employment record.
///
/// `business` is the source of truth for which business the employee belongs
/// to. When `employee_type` is set it must resolve to the same business; see
/// [`ensure_employee_placement`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub user: UserId,
    pub business: BusinessId,
    pub employee_type: Option<EmployeeTypeId>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

macro_rules! impl_entity {
    ($t:ty, $id:ty, $kind:literal) => {
        impl Entity for $t {
            type Id = $id;
            const KIND: &'static str = $kind;

            fn id(&self) -> &Self::Id {
                &self.id
            }
        }
    };
}

impl_entity!(Subscription, SubscriptionId, "subscription");
impl_entity!(Business, BusinessId, "business");
impl_entity!(EmployeeGroup, EmployeeGroupId, "employee group");
impl_entity!(EmployeeType, EmployeeTypeId, "employee type");
impl_entity!(Employee, EmployeeId, "employee");

// ─────────────────────────────────────────────────────────────────────────────
// Reader
// ─────────────────────────────────────────────────────────────────────────────

/// Read access to the hierarchy, as needed by the decision engine.
///
/// Lookups of missing records must return [`DomainError::NotFound`].
pub trait HierarchyReader: Send + Sync {
    fn business(&self, id: BusinessId) -> DomainResult<Business>;
    fn employee_group(&self, id: EmployeeGroupId) -> DomainResult<EmployeeGroup>;
    fn employee_type(&self, id: EmployeeTypeId) -> DomainResult<EmployeeType>;
    fn employee_type_permission(
        &self,
        id: EmployeeTypePermissionId,
    ) -> DomainResult<EmployeeTypePermission>;
    fn employee(&self, id: EmployeeId) -> DomainResult<Employee>;
}

impl<S> HierarchyReader for Arc<S>
where
    S: HierarchyReader + ?Sized,
{
    fn business(&self, id: BusinessId) -> DomainResult<Business> {
        (**self).business(id)
    }

    fn employee_group(&self, id: EmployeeGroupId) -> DomainResult<EmployeeGroup> {
        (**self).employee_group(id)
    }

    fn employee_type(&self, id: EmployeeTypeId) -> DomainResult<EmployeeType> {
        (**self).employee_type(id)
    }

    fn employee_type_permission(
        &self,
        id: EmployeeTypePermissionId,
    ) -> DomainResult<EmployeeTypePermission> {
        (**self).employee_type_permission(id)
    }

    fn employee(&self, id: EmployeeId) -> DomainResult<Employee> {
        (**self).employee(id)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Traversal
// ─────────────────────────────────────────────────────────────────────────────

/// Anything that resolves to exactly one owning business.
pub trait OwnedByBusiness {
    fn owning_business<R>(&self, reader: &R) -> DomainResult<BusinessId>
    where
        R: HierarchyReader + ?Sized;
}

impl OwnedByBusiness for EmployeeGroup {
    fn owning_business<R>(&self, _reader: &R) -> DomainResult<BusinessId>
    where
        R: HierarchyReader + ?Sized,
    {
        Ok(self.business)
    }
}

impl OwnedByBusiness for EmployeeType {
    fn owning_business<R>(&self, reader: &R) -> DomainResult<BusinessId>
    where
        R: HierarchyReader + ?Sized,
    {
        reader.employee_group(self.group)?.owning_business(reader)
    }
}

impl OwnedByBusiness for EmployeeTypePermission {
    fn owning_business<R>(&self, reader: &R) -> DomainResult<BusinessId>
    where
        R: HierarchyReader + ?Sized,
    {
        reader.employee_type(self.employee_type)?.owning_business(reader)
    }
}

impl OwnedByBusiness for Employee {
    /// The direct field, never the type chain.
    fn owning_business<R>(&self, _reader: &R) -> DomainResult<BusinessId>
    where
        R: HierarchyReader + ?Sized,
    {
        Ok(self.business)
    }
}

/// Load the business owning `record`.
pub fn business_of<T, R>(reader: &R, record: &T) -> DomainResult<Business>
where
    T: OwnedByBusiness,
    R: HierarchyReader + ?Sized,
{
    reader.business(record.owning_business(reader)?)
}

/// Write-time check that an employee's direct business agrees with the
/// business its employee type belongs to.
pub fn ensure_employee_placement<R>(reader: &R, employee: &Employee) -> DomainResult<()>
where
    R: HierarchyReader + ?Sized,
{
    let Some(type_id) = employee.employee_type else {
        return Ok(());
    };

    let via_type = reader.employee_type(type_id)?.owning_business(reader)?;
    if via_type != employee.business {
        return Err(DomainError::invariant(format!(
            "employee {} belongs to business {} but employee type {} belongs to business {}",
            employee.id, employee.business, type_id, via_type
        )));
    }
    Ok(())
}
