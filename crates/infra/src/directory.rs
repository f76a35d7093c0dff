//! In-memory relational directory: users, subscriptions and the business
//! hierarchy, with the store-level constraints enforced on every save.
//!
//! Saves are upserts keyed by entity id. Nothing is hard-deleted.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use bizauth_auth::{
    Business, Employee, EmployeeGroup, EmployeeType, EmployeeTypePermission, HierarchyReader,
    Subscription, User, ensure_employee_placement, normalize_email,
};
use bizauth_core::{
    BusinessId, DomainError, DomainResult, EmployeeGroupId, EmployeeId, EmployeeTypeId,
    EmployeeTypePermissionId, Entity, SubscriptionId, UserId,
};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    subscriptions: HashMap<SubscriptionId, Subscription>,
    businesses: HashMap<BusinessId, Business>,
    groups: HashMap<EmployeeGroupId, EmployeeGroup>,
    types: HashMap<EmployeeTypeId, EmployeeType>,
    permissions: HashMap<EmployeeTypePermissionId, EmployeeTypePermission>,
    employees: HashMap<EmployeeId, Employee>,
}

fn fetch<T: Entity + Clone>(table: &HashMap<T::Id, T>, id: T::Id) -> DomainResult<T> {
    table
        .get(&id)
        .cloned()
        .ok_or_else(|| DomainError::not_found(T::KIND, id))
}

fn require<T: Entity>(table: &HashMap<T::Id, T>, id: T::Id) -> DomainResult<()> {
    if table.contains_key(&id) {
        Ok(())
    } else {
        Err(DomainError::not_found(T::KIND, id))
    }
}

/// Every typed employee must still resolve to its own business.
fn placements_hold(tables: &Tables) -> DomainResult<()> {
    for employee in tables.employees.values() {
        if let Err(e) = ensure_employee_placement(tables, employee) {
            tracing::warn!(employee_id = %employee.id, error = %e, "placement check rejected hierarchy write");
            return Err(e);
        }
    }
    Ok(())
}

fn violation(msg: String) -> DomainError {
    tracing::warn!(reason = %msg, "constraint violation");
    DomainError::constraint(msg)
}

impl HierarchyReader for Tables {
    fn business(&self, id: BusinessId) -> DomainResult<Business> {
        fetch(&self.businesses, id)
    }

    fn employee_group(&self, id: EmployeeGroupId) -> DomainResult<EmployeeGroup> {
        fetch(&self.groups, id)
    }

    fn employee_type(&self, id: EmployeeTypeId) -> DomainResult<EmployeeType> {
        fetch(&self.types, id)
    }

    fn employee_type_permission(
        &self,
        id: EmployeeTypePermissionId,
    ) -> DomainResult<EmployeeTypePermission> {
        fetch(&self.permissions, id)
    }

    fn employee(&self, id: EmployeeId) -> DomainResult<Employee> {
        fetch(&self.employees, id)
    }
}

/// Thread-safe in-memory directory for dev/tests.
///
/// A single `RwLock` guards all tables, so each save (constraint checks plus
/// insert) is atomic with respect to every other save and read.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    inner: RwLock<Tables>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, Tables>> {
        self.inner
            .read()
            .map_err(|_| DomainError::invariant("directory lock poisoned"))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, Tables>> {
        self.inner
            .write()
            .map_err(|_| DomainError::invariant("directory lock poisoned"))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert or update a user. Email and phone must be unique.
    pub fn save_user(&self, user: User) -> DomainResult<User> {
        let mut tables = self.write()?;

        for other in tables.users.values().filter(|u| u.id != user.id) {
            if other.email == user.email {
                return Err(violation(format!("user with email {} already exists", user.email)));
            }
            if other.phone == user.phone {
                return Err(violation(format!("user with phone {} already exists", user.phone)));
            }
        }

        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    pub fn user(&self, id: UserId) -> DomainResult<User> {
        fetch(&self.read()?.users, id)
    }

    pub fn user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let email = normalize_email(email);
        let tables = self.read()?;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    pub fn record_login(&self, id: UserId, at: DateTime<Utc>) -> DomainResult<()> {
        let mut tables = self.write()?;
        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(User::KIND, id))?;
        user.last_login = Some(at);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Subscriptions & businesses
    // ─────────────────────────────────────────────────────────────────────────

    pub fn save_subscription(&self, subscription: Subscription) -> DomainResult<Subscription> {
        let mut tables = self.write()?;
        tables
            .subscriptions
            .insert(subscription.id, subscription.clone());
        Ok(subscription)
    }

    pub fn subscription(&self, id: SubscriptionId) -> DomainResult<Subscription> {
        fetch(&self.read()?.subscriptions, id)
    }

    /// Insert or update a business. A user owns at most one business.
    pub fn save_business(&self, business: Business) -> DomainResult<Business> {
        let mut tables = self.write()?;
        require(&tables.users, business.owner)?;
        require(&tables.subscriptions, business.subscription)?;

        let owner_taken = tables
            .businesses
            .values()
            .any(|b| b.owner == business.owner && b.id != business.id);
        if owner_taken {
            return Err(violation(format!(
                "user {} already owns a business",
                business.owner
            )));
        }

        tables.businesses.insert(business.id, business.clone());
        Ok(business)
    }

    pub fn business_owned_by(&self, owner: UserId) -> DomainResult<Option<Business>> {
        let tables = self.read()?;
        Ok(tables.businesses.values().find(|b| b.owner == owner).cloned())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Hierarchy
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert or update a group. Moving a group to another business is
    /// rejected while typed employees of the old business sit under it.
    pub fn save_employee_group(&self, group: EmployeeGroup) -> DomainResult<EmployeeGroup> {
        let mut tables = self.write()?;
        require(&tables.businesses, group.business)?;

        let previous = tables.groups.insert(group.id, group.clone());
        if let Err(e) = placements_hold(&tables) {
            match previous {
                Some(previous) => tables.groups.insert(group.id, previous),
                None => tables.groups.remove(&group.id),
            };
            return Err(e);
        }
        Ok(group)
    }

    /// Insert or update a type. Re-parenting must keep every employee of the
    /// type inside their own business.
    pub fn save_employee_type(&self, employee_type: EmployeeType) -> DomainResult<EmployeeType> {
        let mut tables = self.write()?;
        require(&tables.groups, employee_type.group)?;

        let previous = tables.types.insert(employee_type.id, employee_type.clone());
        if let Err(e) = placements_hold(&tables) {
            match previous {
                Some(previous) => tables.types.insert(employee_type.id, previous),
                None => tables.types.remove(&employee_type.id),
            };
            return Err(e);
        }
        Ok(employee_type)
    }

    /// Insert or update a permission record. One record per employee type.
    pub fn save_employee_type_permission(
        &self,
        permission: EmployeeTypePermission,
    ) -> DomainResult<EmployeeTypePermission> {
        let mut tables = self.write()?;
        require(&tables.types, permission.employee_type)?;

        let type_taken = tables
            .permissions
            .values()
            .any(|p| p.employee_type == permission.employee_type && p.id != permission.id);
        if type_taken {
            return Err(violation(format!(
                "employee type {} already has a permission record",
                permission.employee_type
            )));
        }

        tables.permissions.insert(permission.id, permission.clone());
        Ok(permission)
    }

    pub fn permission_for_type(
        &self,
        employee_type: EmployeeTypeId,
    ) -> DomainResult<Option<EmployeeTypePermission>> {
        let tables = self.read()?;
        Ok(tables
            .permissions
            .values()
            .find(|p| p.employee_type == employee_type)
            .cloned())
    }

    /// Insert or update an employee record.
    ///
    /// One record per user, and a typed employee's business must match the
    /// business its type belongs to.
    pub fn save_employee(&self, employee: Employee) -> DomainResult<Employee> {
        let mut tables = self.write()?;
        require(&tables.users, employee.user)?;
        require(&tables.businesses, employee.business)?;

        let user_taken = tables
            .employees
            .values()
            .any(|e| e.user == employee.user && e.id != employee.id);
        if user_taken {
            return Err(violation(format!(
                "user {} already has an employee record",
                employee.user
            )));
        }

        ensure_employee_placement(&*tables, &employee)?;

        tables.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    pub fn employee_for_user(&self, user: UserId) -> DomainResult<Option<Employee>> {
        let tables = self.read()?;
        Ok(tables.employees.values().find(|e| e.user == user).cloned())
    }
}

impl HierarchyReader for InMemoryDirectory {
    fn business(&self, id: BusinessId) -> DomainResult<Business> {
        self.read()?.business(id)
    }

    fn employee_group(&self, id: EmployeeGroupId) -> DomainResult<EmployeeGroup> {
        self.read()?.employee_group(id)
    }

    fn employee_type(&self, id: EmployeeTypeId) -> DomainResult<EmployeeType> {
        self.read()?.employee_type(id)
    }

    fn employee_type_permission(
        &self,
        id: EmployeeTypePermissionId,
    ) -> DomainResult<EmployeeTypePermission> {
        self.read()?.employee_type_permission(id)
    }

    fn employee(&self, id: EmployeeId) -> DomainResult<Employee> {
        self.read()?.employee(id)
    }
}
