//! The role → module → action permission matrix.
//!
//! The matrix is a read-mostly table loaded once at session start and
//! replaced wholesale when an administrator edits roles and the client
//! refetches. Built-in roles are keyed by the closed [`Role`] enum so every
//! one of them always has an entry; custom roles live in a separate
//! name-keyed map and deny by default when absent.

use std::collections::BTreeMap;

use caregate_types::{Action, CustomRoleName, PermissionModule, Role, RoleId};
use thiserror::Error;

use crate::permissions::RoleGrants;

/// Error mutating the permission matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// The named custom role does not exist.
    #[error("custom role '{0}' not found")]
    RoleNotFound(String),
}

/// The full permission table: one [`RoleGrants`] per role.
///
/// Lookups are total and fail-closed: an unknown custom role, an absent
/// module, or an absent action all answer `false`, never panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionMatrix {
    builtin: BTreeMap<Role, RoleGrants>,
    custom: BTreeMap<CustomRoleName, RoleGrants>,
}

impl PermissionMatrix {
    /// Creates a matrix where every built-in role denies everything.
    pub fn empty() -> Self {
        let builtin = Role::ALL
            .into_iter()
            .map(|role| (role, RoleGrants::new()))
            .collect();
        Self {
            builtin,
            custom: BTreeMap::new(),
        }
    }

    /// The canonical default grants for the eight built-in roles.
    pub fn defaults() -> Self {
        let mut matrix = Self::empty();
        for role in Role::ALL {
            matrix
                .builtin
                .insert(role, crate::defaults::builtin_grants(role));
        }
        matrix
    }

    /// Returns whether the role holds the action on the module.
    ///
    /// Total and fail-closed: unknown custom roles deny.
    pub fn permits(&self, role: &RoleId, module: PermissionModule, action: Action) -> bool {
        self.grants_for(role)
            .is_some_and(|grants| grants.allows(module, action))
    }

    /// The grants for a role, if the role is known.
    ///
    /// Every built-in role is always known; custom roles only after
    /// [`set_custom_role`](Self::set_custom_role).
    pub fn grants_for(&self, role: &RoleId) -> Option<&RoleGrants> {
        match role {
            RoleId::Builtin(role) => self.builtin.get(role),
            RoleId::Custom(name) => self.custom.get(name),
        }
    }

    /// Creates or replaces a custom role's grants wholesale.
    ///
    /// [`CustomRoleName`] construction already rejects names that collide
    /// with a built-in role, so a custom entry can never shadow a built-in
    /// one.
    pub fn set_custom_role(&mut self, name: CustomRoleName, grants: RoleGrants) {
        self.custom.insert(name, grants);
    }

    /// Removes a custom role.
    pub fn remove_custom_role(&mut self, name: &CustomRoleName) -> Result<RoleGrants, MatrixError> {
        self.custom
            .remove(name)
            .ok_or_else(|| MatrixError::RoleNotFound(name.as_str().to_string()))
    }

    /// Replaces a built-in role's grants wholesale.
    ///
    /// Administrators may re-tune built-in roles; the entry itself can never
    /// be removed.
    pub fn replace_builtin_grants(&mut self, role: Role, grants: RoleGrants) {
        self.builtin.insert(role, grants);
    }

    /// All role names in the table, built-in first in listing order, then
    /// custom roles alphabetically.
    pub fn role_names(&self) -> Vec<String> {
        Role::ALL
            .into_iter()
            .map(|r| r.wire_name().to_string())
            .chain(self.custom.keys().map(|n| n.as_str().to_string()))
            .collect()
    }

    /// The custom roles currently defined.
    pub fn custom_roles(&self) -> impl Iterator<Item = (&CustomRoleName, &RoleGrants)> {
        self.custom.iter()
    }
}

impl Default for PermissionMatrix {
    fn default() -> Self {
        Self::defaults()
    }
}
