use serde::{Deserialize, Serialize};

use bizauth_auth::{NewUser, User};
use bizauth_core::{DomainError, UserId};

// -------------------------
// Request DTOs
// -------------------------

/// Self-service sign-up. Missing fields arrive empty and are reported by
/// registration with the field name.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: String,
}

impl SignUpRequest {
    /// Sign-up always sets a password. Role and staff flags are never taken
    /// from the caller; they are granted by whoever sets up the business.
    pub fn into_new_user(self) -> Result<NewUser, DomainError> {
        let input = NewUser {
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            password: None,
            is_business_owner: false,
            is_employee: false,
            is_staff: None,
            is_superuser: None,
        };
        input.check_required()?;

        if self.password.is_empty() {
            return Err(DomainError::required("password"));
        }

        Ok(NewUser {
            password: Some(self.password),
            ..input
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}
