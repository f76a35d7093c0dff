//! `bizauth-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers for every entity in the business hierarchy, the `Entity` trait,
//! and the shared error model.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{
    BusinessId, EmployeeGroupId, EmployeeId, EmployeeTypeId, EmployeeTypePermissionId,
    SubscriptionId, UserId,
};
