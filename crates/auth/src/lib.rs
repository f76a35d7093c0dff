//! `bizauth-auth`: pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: everything that
//! needs persisted state reads it through [`HierarchyReader`], [`Authenticator`]
//! and [`TokenStore`], and every decision takes the resolved [`Principal`] as an
//! explicit argument.

pub mod authorize;
pub mod hierarchy;
pub mod permissions;
pub mod principal;
pub mod roles;
pub mod token;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use authorize::{
    AccessDecision, AccessExplanation, AccessPath, AccessTarget, AuthzError, DenialKind,
    can_access, decide, explain_access, require_access, require_role,
};
pub use hierarchy::{
    Business, Employee, EmployeeGroup, EmployeeType, HierarchyReader, OwnedByBusiness,
    Subscription, business_of, ensure_employee_placement,
};
pub use permissions::{
    AccessLevel, ClaimAccessLevel, EmployeeTypePermission, ResourceCategory, ResourceRequirement,
};
pub use principal::Principal;
pub use roles::Role;
pub use token::{
    AuthenticationError, Authenticator, IssuedToken, Token, TokenError, TokenKey, TokenStore,
    issue_token,
};
pub use user::{AccountKind, NewUser, Registration, User, normalize_email};
