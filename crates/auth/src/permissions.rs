//! Permission matrix: per-employee-type access levels across resource categories.
//!
//! Levels are ordered by declaration (`view` is always the weakest), so the
//! derived `Ord` is the comparison callers use.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bizauth_core::{EmployeeTypeId, EmployeeTypePermissionId, Entity};

/// Access scale shared by project, sales, POS, inventory and customer resources.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    #[default]
    View,
    Comment,
    Edit,
    FullAccess,
}

/// Access scale for claims.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ClaimAccessLevel {
    #[default]
    View,
    Change,
}

impl AccessLevel {
    pub const ALL: [AccessLevel; 4] = [
        AccessLevel::View,
        AccessLevel::Comment,
        AccessLevel::Edit,
        AccessLevel::FullAccess,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::View => "view",
            AccessLevel::Comment => "comment",
            AccessLevel::Edit => "edit",
            AccessLevel::FullAccess => "full_access",
        }
    }
}

impl ClaimAccessLevel {
    pub const ALL: [ClaimAccessLevel; 2] = [ClaimAccessLevel::View, ClaimAccessLevel::Change];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimAccessLevel::View => "view",
            ClaimAccessLevel::Change => "change",
        }
    }
}

impl core::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::fmt::Display for ClaimAccessLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource categories rated on the default [`AccessLevel`] scale.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    Project,
    Sales,
    Pos,
    Inventory,
    Customer,
}

/// One access-level field per resource category, exactly one record per
/// employee type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTypePermission {
    pub id: EmployeeTypePermissionId,
    pub employee_type: EmployeeTypeId,
    pub project_access: AccessLevel,
    pub sales_access: AccessLevel,
    pub pos_access: AccessLevel,
    pub inventory_access: AccessLevel,
    pub customer_access: AccessLevel,
    pub claim_access: ClaimAccessLevel,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

impl EmployeeTypePermission {
    /// A record granting `view` on everything.
    pub fn view_only(employee_type: EmployeeTypeId, now: DateTime<Utc>) -> Self {
        Self {
            id: EmployeeTypePermissionId::new(),
            employee_type,
            project_access: AccessLevel::default(),
            sales_access: AccessLevel::default(),
            pos_access: AccessLevel::default(),
            inventory_access: AccessLevel::default(),
            customer_access: AccessLevel::default(),
            claim_access: ClaimAccessLevel::default(),
            date_created: now,
            date_updated: now,
        }
    }

    pub fn level_for(&self, category: ResourceCategory) -> AccessLevel {
        match category {
            ResourceCategory::Project => self.project_access,
            ResourceCategory::Sales => self.sales_access,
            ResourceCategory::Pos => self.pos_access,
            ResourceCategory::Inventory => self.inventory_access,
            ResourceCategory::Customer => self.customer_access,
        }
    }

    /// Resource-level check: does the stored level cover `requirement`?
    ///
    /// The access decision engine never calls this; operations needing a
    /// specific level combine it with [`crate::can_access`].
    pub fn permits(&self, requirement: ResourceRequirement) -> bool {
        match requirement {
            ResourceRequirement::Resource(category, required) => {
                self.level_for(category) >= required
            }
            ResourceRequirement::Claims(required) => self.claim_access >= required,
        }
    }
}

impl Entity for EmployeeTypePermission {
    type Id = EmployeeTypePermissionId;
    const KIND: &'static str = "employee type permission";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// The level an operation needs on one resource category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceRequirement {
    Resource(ResourceCategory, AccessLevel),
    Claims(ClaimAccessLevel),
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn access_level() -> impl Strategy<Value = AccessLevel> {
        (0..AccessLevel::ALL.len()).prop_map(|i| AccessLevel::ALL[i])
    }

    #[test]
    fn default_scale_is_strictly_ordered() {
        assert!(AccessLevel::View < AccessLevel::Comment);
        assert!(AccessLevel::Comment < AccessLevel::Edit);
        assert!(AccessLevel::Edit < AccessLevel::FullAccess);
    }

    #[test]
    fn claim_scale_is_strictly_ordered() {
        assert!(ClaimAccessLevel::View < ClaimAccessLevel::Change);
        assert_eq!(ClaimAccessLevel::default(), ClaimAccessLevel::View);
    }

    #[test]
    fn wire_names_match_stored_choices() {
        assert_eq!(
            serde_json::to_string(&AccessLevel::FullAccess).unwrap(),
            "\"full_access\""
        );
        let level: ClaimAccessLevel = serde_json::from_str("\"change\"").unwrap();
        assert_eq!(level, ClaimAccessLevel::Change);
        assert_eq!(AccessLevel::Comment.to_string(), "comment");
    }

    #[test]
    fn new_record_is_view_only() {
        let perm = EmployeeTypePermission::view_only(EmployeeTypeId::new(), Utc::now());
        assert!(perm.permits(ResourceRequirement::Resource(
            ResourceCategory::Inventory,
            AccessLevel::View
        )));
        assert!(!perm.permits(ResourceRequirement::Resource(
            ResourceCategory::Inventory,
            AccessLevel::Comment
        )));
        assert!(!perm.permits(ResourceRequirement::Claims(ClaimAccessLevel::Change)));
    }

    #[test]
    fn permits_reads_the_matching_field() {
        let perm = EmployeeTypePermission {
            sales_access: AccessLevel::Edit,
            claim_access: ClaimAccessLevel::Change,
            ..EmployeeTypePermission::view_only(EmployeeTypeId::new(), Utc::now())
        };

        assert!(perm.permits(ResourceRequirement::Resource(ResourceCategory::Sales, AccessLevel::Edit)));
        assert!(!perm.permits(ResourceRequirement::Resource(
            ResourceCategory::Sales,
            AccessLevel::FullAccess
        )));
        assert!(!perm.permits(ResourceRequirement::Resource(ResourceCategory::Pos, AccessLevel::Edit)));
        assert!(perm.permits(ResourceRequirement::Claims(ClaimAccessLevel::Change)));
    }

    proptest! {
        #[test]
        fn ordering_follows_declaration_index(a in 0usize..4, b in 0usize..4) {
            let (la, lb) = (AccessLevel::ALL[a], AccessLevel::ALL[b]);
            prop_assert_eq!(la < lb, a < b);
            prop_assert_eq!(la <= lb, a <= b);
        }

        #[test]
        fn view_is_weakest(level in access_level()) {
            prop_assert!(AccessLevel::View <= level);
        }

        #[test]
        fn permits_is_monotonic(stored in access_level(), required in access_level()) {
            let perm = EmployeeTypePermission {
                project_access: stored,
                ..EmployeeTypePermission::view_only(EmployeeTypeId::new(), Utc::now())
            };
            let req = ResourceRequirement::Resource(ResourceCategory::Project, required);
            prop_assert_eq!(perm.permits(req), stored >= required);
        }
    }
}
