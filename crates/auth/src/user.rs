//! User accounts and the registration rules that create them.
//!
//! Accounts are never hard-deleted; `is_active` is the soft lifecycle switch.
//! Password hashing and storage live outside this crate: a [`Registration`]
//! hands the raw password to whichever credential store persists the user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bizauth_core::{DomainError, DomainResult, Entity, UserId};

use crate::Role;

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

/// An account that can authenticate and act as a principal.
///
/// # Invariants
/// - `email` and `phone` are unique across all users (enforced by the store).
/// - `email` is stored normalised (see [`normalize_email`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: String,
    pub is_business_owner: bool,
    pub is_employee: bool,
    pub is_verified: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// `"first last"` when a last name is present, otherwise just the first name.
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }

    pub fn short_name(&self) -> &str {
        &self.first_name
    }

    /// Roles implied by the account's capability flags.
    pub fn roles(&self) -> Vec<Role> {
        let mut roles = Vec::new();
        if self.is_superuser {
            roles.push(Role::Superuser);
        }
        if self.is_business_owner {
            roles.push(Role::BusinessOwner);
        }
        if self.is_employee {
            roles.push(Role::Employee);
        }
        roles
    }
}

impl Entity for User {
    type Id = UserId;
    const KIND: &'static str = "user";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for User {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.full_name())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registration
// ─────────────────────────────────────────────────────────────────────────────

/// Which account-creation flow is running.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountKind {
    /// Self-service sign-up: staff and superuser flags default to `false`.
    Regular,
    /// Operator bootstrap: staff and superuser flags default to `true` and may
    /// not be switched off.
    Superuser,
}

/// Registration input.
///
/// `is_staff`/`is_superuser` are optional so the chosen [`AccountKind`] can
/// supply its defaults; an explicit value always wins for regular accounts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    pub phone: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub is_business_owner: bool,
    #[serde(default)]
    pub is_employee: bool,
    #[serde(default)]
    pub is_staff: Option<bool>,
    #[serde(default)]
    pub is_superuser: Option<bool>,
}

/// A validated user plus the raw password its credential record needs.
///
/// `password == None` means the account gets an unusable password.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: User,
    pub password: Option<String>,
}

impl NewUser {
    /// Fields that must be present and non-blank, checked in this order.
    pub const REQUIRED_FIELDS: [&'static str; 3] = ["email", "first_name", "phone"];

    /// Fail with [`DomainError::RequiredField`] naming the first missing field.
    pub fn check_required(&self) -> DomainResult<()> {
        let values = [&self.email, &self.first_name, &self.phone];
        for (field, value) in Self::REQUIRED_FIELDS.iter().zip(values) {
            if value.trim().is_empty() {
                return Err(DomainError::required(*field));
            }
        }
        Ok(())
    }

    /// Validate the input and build the user record for `kind`.
    pub fn register(self, kind: AccountKind, now: DateTime<Utc>) -> DomainResult<Registration> {
        let (is_staff, is_superuser) = match kind {
            AccountKind::Regular => (
                self.is_staff.unwrap_or(false),
                self.is_superuser.unwrap_or(false),
            ),
            AccountKind::Superuser => {
                if self.is_staff == Some(false) {
                    return Err(DomainError::validation("superuser must have is_staff=true"));
                }
                if self.is_superuser == Some(false) {
                    return Err(DomainError::validation(
                        "superuser must have is_superuser=true",
                    ));
                }
                (true, true)
            }
        };

        self.check_required()?;

        let email = normalize_email(&self.email);
        if !email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }

        let last_name = self
            .last_name
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let user = User {
            id: UserId::new(),
            email,
            first_name: self.first_name.trim().to_string(),
            last_name,
            phone: self.phone.trim().to_string(),
            is_business_owner: self.is_business_owner,
            is_employee: self.is_employee,
            is_verified: false,
            is_staff,
            is_superuser,
            is_active: true,
            date_joined: now,
            last_login: None,
        };

        Ok(Registration {
            user,
            password: self.password,
        })
    }
}

/// Normalise an email address by lower-casing its domain part.
///
/// The local part is case-sensitive per RFC 5321 and is left untouched.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}
