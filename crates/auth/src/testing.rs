//! Shared fixture for unit tests: two unrelated businesses, Acme and Globex.

use std::collections::HashMap;

use chrono::Utc;

use bizauth_core::{
    BusinessId, DomainError, DomainResult, EmployeeGroupId, EmployeeId, EmployeeTypeId,
    EmployeeTypePermissionId, Entity, SubscriptionId, UserId,
};

use crate::{
    AccessLevel, Business, Employee, EmployeeGroup, EmployeeType, EmployeeTypePermission,
    HierarchyReader, Principal, User,
};

#[derive(Default)]
pub struct MapReader {
    pub businesses: HashMap<BusinessId, Business>,
    pub groups: HashMap<EmployeeGroupId, EmployeeGroup>,
    pub types: HashMap<EmployeeTypeId, EmployeeType>,
    pub perms: HashMap<EmployeeTypePermissionId, EmployeeTypePermission>,
    pub employees: HashMap<EmployeeId, Employee>,
}

fn lookup<T: Entity + Clone>(map: &HashMap<T::Id, T>, id: T::Id) -> DomainResult<T> {
    map.get(&id)
        .cloned()
        .ok_or_else(|| DomainError::not_found(T::KIND, id))
}

impl HierarchyReader for MapReader {
    fn business(&self, id: BusinessId) -> DomainResult<Business> {
        lookup(&self.businesses, id)
    }

    fn employee_group(&self, id: EmployeeGroupId) -> DomainResult<EmployeeGroup> {
        lookup(&self.groups, id)
    }

    fn employee_type(&self, id: EmployeeTypeId) -> DomainResult<EmployeeType> {
        lookup(&self.types, id)
    }

    fn employee_type_permission(
        &self,
        id: EmployeeTypePermissionId,
    ) -> DomainResult<EmployeeTypePermission> {
        lookup(&self.perms, id)
    }

    fn employee(&self, id: EmployeeId) -> DomainResult<Employee> {
        lookup(&self.employees, id)
    }
}

pub struct Fixture {
    pub reader: MapReader,
    pub acme: BusinessId,
    pub acme_sales: EmployeeGroupId,
    pub acme_rep: EmployeeTypeId,
    pub acme_rep_perm: EmployeeTypePermissionId,
    pub acme_employee: EmployeeId,
    pub globex: BusinessId,
    users: HashMap<&'static str, User>,
}

pub fn user(email: &str, first_name: &str) -> User {
    User {
        id: UserId::new(),
        email: email.to_string(),
        first_name: first_name.to_string(),
        last_name: None,
        phone: format!("+1555{}", email.len()),
        is_business_owner: false,
        is_employee: false,
        is_verified: false,
        is_staff: false,
        is_superuser: false,
        is_active: true,
        date_joined: Utc::now(),
        last_login: None,
    }
}

fn business(name: &str, owner: UserId) -> Business {
    let now = Utc::now();
    Business {
        id: BusinessId::new(),
        name: name.to_string(),
        owner,
        address: "1 Main St".to_string(),
        phone: "+15550100".to_string(),
        email: None,
        description: None,
        subscription: SubscriptionId::new(),
        date_created: now,
        date_updated: now,
    }
}

impl Fixture {
    /// Acme (owned by U1) has group "Sales" → type "Rep" (sales_access=edit)
    /// → employee U2. Globex is owned by the unrelated U3.
    pub fn acme_and_globex() -> Self {
        let now = Utc::now();
        let mut reader = MapReader::default();
        let mut users = HashMap::new();

        let u1 = User { is_business_owner: true, ..user("u1@acme.test", "U1") };
        let u2 = User { is_employee: true, ..user("u2@acme.test", "U2") };
        let u3 = User { is_business_owner: true, ..user("u3@globex.test", "U3") };

        let acme = business("Acme", u1.id);
        let globex = business("Globex", u3.id);

        let sales = EmployeeGroup {
            id: EmployeeGroupId::new(),
            name: "Sales".to_string(),
            business: acme.id,
            date_created: now,
            date_updated: now,
        };
        let rep = EmployeeType {
            id: EmployeeTypeId::new(),
            label: "Rep".to_string(),
            description: None,
            group: sales.id,
            date_created: now,
            date_updated: now,
        };
        let rep_perm = EmployeeTypePermission {
            sales_access: AccessLevel::Edit,
            ..EmployeeTypePermission::view_only(rep.id, now)
        };
        let employee = Employee {
            id: EmployeeId::new(),
            user: u2.id,
            business: acme.id,
            employee_type: Some(rep.id),
            date_created: now,
            date_updated: now,
        };

        let fixture_ids = Self {
            reader: MapReader::default(),
            acme: acme.id,
            acme_sales: sales.id,
            acme_rep: rep.id,
            acme_rep_perm: rep_perm.id,
            acme_employee: employee.id,
            globex: globex.id,
            users: HashMap::new(),
        };

        reader.businesses.insert(acme.id, acme);
        reader.businesses.insert(globex.id, globex);
        reader.groups.insert(sales.id, sales);
        reader.types.insert(rep.id, rep);
        reader.perms.insert(rep_perm.id, rep_perm);
        reader.employees.insert(employee.id, employee);

        users.insert("u1", u1);
        users.insert("u2", u2);
        users.insert("u3", u3);

        Self {
            reader,
            users,
            ..fixture_ids
        }
    }

    pub fn acme_owner(&self) -> Principal {
        Principal::new(self.users["u1"].clone())
            .with_business(self.reader.businesses[&self.acme].clone())
    }

    pub fn acme_rep_principal(&self) -> Principal {
        Principal::new(self.users["u2"].clone())
            .with_employee(self.reader.employees[&self.acme_employee].clone())
    }

    pub fn globex_owner(&self) -> Principal {
        Principal::new(self.users["u3"].clone())
            .with_business(self.reader.businesses[&self.globex].clone())
    }

    pub fn untyped_acme_employee(&self) -> Principal {
        let user = User { is_employee: true, ..user("u4@acme.test", "U4") };
        let employee = Employee {
            id: EmployeeId::new(),
            user: user.id,
            business: self.acme,
            employee_type: None,
            date_created: Utc::now(),
            date_updated: Utc::now(),
        };
        Principal::new(user).with_employee(employee)
    }

    pub fn plain_user(&self) -> Principal {
        Principal::new(user("plain@example.test", "Plain"))
    }

    pub fn superuser(&self) -> Principal {
        Principal::new(User {
            is_staff: true,
            is_superuser: true,
            ..user("root@example.test", "Root")
        })
    }
}
