use serde::{Deserialize, Serialize};

/// Coarse account role derived from a user's capability flags.
///
/// Flags are independent on the account, so a principal may hold several roles
/// at once (e.g. a business owner who is also a superuser).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Superuser,
    BusinessOwner,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Superuser => "superuser",
            Role::BusinessOwner => "business_owner",
            Role::Employee => "employee",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
