//! Seed data for infra unit tests.

use chrono::Utc;

use bizauth_auth::{
    AccessLevel, Business, Employee, EmployeeGroup, EmployeeType, EmployeeTypePermission,
    Subscription, User,
};
use bizauth_core::{
    BusinessId, EmployeeGroupId, EmployeeId, EmployeeTypeId, SubscriptionId, UserId,
};

use crate::directory::InMemoryDirectory;

pub fn user(email: &str, phone: &str) -> User {
    User {
        id: UserId::new(),
        email: email.to_string(),
        first_name: "Test".to_string(),
        last_name: None,
        phone: phone.to_string(),
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

/// Acme, owned by `owner`, with "Sales" → "Rep" → `rep_user`.
pub struct Seed {
    pub directory: InMemoryDirectory,
    pub subscription: SubscriptionId,
    pub owner: User,
    pub acme: BusinessId,
    pub sales: EmployeeGroupId,
    pub rep: EmployeeTypeId,
    pub rep_user: User,
    pub rep_employee: EmployeeId,
}

impl Seed {
    pub fn acme() -> Self {
        let now = Utc::now();
        let directory = InMemoryDirectory::new();

        let subscription = directory
            .save_subscription(Subscription {
                id: SubscriptionId::new(),
                name: "Starter".into(),
                price: 1_000,
                description: None,
                date_created: now,
                date_updated: now,
            })
            .unwrap();

        let owner = directory
            .save_user(User {
                is_business_owner: true,
                ..user("owner@acme.test", "+1000")
            })
            .unwrap();

        let acme = directory
            .save_business(Business {
                id: BusinessId::new(),
                name: "Acme".into(),
                owner: owner.id,
                address: "1 Road Runner Way".into(),
                phone: "+1001".into(),
                email: None,
                description: None,
                subscription: subscription.id,
                date_created: now,
                date_updated: now,
            })
            .unwrap();

        let sales = directory
            .save_employee_group(EmployeeGroup {
                id: EmployeeGroupId::new(),
                name: "Sales".into(),
                business: acme.id,
                date_created: now,
                date_updated: now,
            })
            .unwrap();

        let rep = directory
            .save_employee_type(EmployeeType {
                id: EmployeeTypeId::new(),
                label: "Rep".into(),
                description: None,
                group: sales.id,
                date_created: now,
                date_updated: now,
            })
            .unwrap();

        directory
            .save_employee_type_permission(EmployeeTypePermission {
                sales_access: AccessLevel::Edit,
                ..EmployeeTypePermission::view_only(rep.id, now)
            })
            .unwrap();

        let rep_user = directory
            .save_user(User {
                is_employee: true,
                ..user("rep@acme.test", "+1002")
            })
            .unwrap();

        let rep_employee = directory
            .save_employee(Employee {
                id: EmployeeId::new(),
                user: rep_user.id,
                business: acme.id,
                employee_type: Some(rep.id),
                date_created: now,
                date_updated: now,
            })
            .unwrap();

        Self {
            directory,
            subscription: subscription.id,
            owner,
            acme: acme.id,
            sales: sales.id,
            rep: rep.id,
            rep_user,
            rep_employee: rep_employee.id,
        }
    }

    /// Another business under a fresh owner; returns its id.
    pub fn add_business(&self, name: &str, owner_email: &str, phone: &str) -> BusinessId {
        let now = Utc::now();
        let owner = self
            .directory
            .save_user(User {
                is_business_owner: true,
                ..user(owner_email, phone)
            })
            .unwrap();

        self.directory
            .save_business(Business {
                id: BusinessId::new(),
                name: name.into(),
                owner: owner.id,
                address: "2 Elm St".into(),
                phone: phone.into(),
                email: None,
                description: None,
                subscription: self.subscription,
                date_created: now,
                date_updated: now,
            })
            .unwrap()
            .id
    }
}
