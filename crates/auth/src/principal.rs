use serde::Serialize;

use bizauth_core::{BusinessId, EmployeeTypeId, UserId};

use crate::{Business, Employee, Role, User};

/// A fully resolved principal for authorization decisions.
///
/// Construction is decoupled from storage and transport: the API resolves the
/// bearer token, loads the user's owned business and employee record, and passes
/// the result explicitly to every decision. Capability flags stay independent,
/// so one principal may be superuser, owner and employee at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub user: User,
    /// The business this user owns, if any.
    pub business: Option<Business>,
    /// The user's employment record, if any.
    pub employee: Option<Employee>,
}

impl Principal {
    pub fn new(user: User) -> Self {
        Self {
            user,
            business: None,
            employee: None,
        }
    }

    pub fn with_business(mut self, business: Business) -> Self {
        self.business = Some(business);
        self
    }

    pub fn with_employee(mut self, employee: Employee) -> Self {
        self.employee = Some(employee);
        self
    }

    pub fn user_id(&self) -> UserId {
        self.user.id
    }

    pub fn is_superuser(&self) -> bool {
        self.user.is_superuser
    }

    pub fn is_business_owner(&self) -> bool {
        self.user.is_business_owner
    }

    pub fn is_employee(&self) -> bool {
        self.user.is_employee
    }

    pub fn has_role(&self, role: Role) -> bool {
        match role {
            Role::Superuser => self.is_superuser(),
            Role::BusinessOwner => self.is_business_owner(),
            Role::Employee => self.is_employee(),
        }
    }

    pub fn roles(&self) -> Vec<Role> {
        self.user.roles()
    }

    pub fn owned_business_id(&self) -> Option<BusinessId> {
        self.business.as_ref().map(|b| b.id)
    }

    pub fn employee_type_id(&self) -> Option<EmployeeTypeId> {
        self.employee.as_ref().and_then(|e| e.employee_type)
    }
}
