//! Per-role permission grants.
//!
//! A [`RoleGrants`] is one row of the permission table: for each permission
//! module, the set of action flags the role holds. Absent modules and absent
//! actions are denied.

use std::collections::{BTreeMap, BTreeSet};

use caregate_types::{Action, PermissionModule};
use serde::{Deserialize, Serialize};

/// Grants held by a single role.
///
/// Absence always means "denied": a module with no entry grants nothing, and
/// an action missing from a module's set is denied. An incompletely
/// configured custom role therefore denies by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGrants {
    grants: BTreeMap<PermissionModule, BTreeSet<Action>>,
}

impl RoleGrants {
    /// Creates an empty grant set (denies everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the given actions for a module.
    #[must_use]
    pub fn allow(mut self, module: PermissionModule, actions: impl IntoIterator<Item = Action>) -> Self {
        self.grants.entry(module).or_default().extend(actions);
        self
    }

    /// Adds every action flag the module carries.
    #[must_use]
    pub fn allow_all(self, module: PermissionModule) -> Self {
        self.allow(module, module.actions().iter().copied())
    }

    /// Returns whether this role holds the given action on the given module.
    pub fn allows(&self, module: PermissionModule, action: Action) -> bool {
        self.grants
            .get(&module)
            .is_some_and(|actions| actions.contains(&action))
    }

    /// Grants a single action.
    pub fn grant(&mut self, module: PermissionModule, action: Action) {
        self.grants.entry(module).or_default().insert(action);
    }

    /// Revokes a single action. Revoking an absent grant is a no-op.
    pub fn revoke(&mut self, module: PermissionModule, action: Action) {
        if let Some(actions) = self.grants.get_mut(&module) {
            actions.remove(&action);
            if actions.is_empty() {
                self.grants.remove(&module);
            }
        }
    }

    /// Returns whether this role holds no grants at all.
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    /// Iterates over the granted (module, action) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PermissionModule, Action)> + '_ {
        self.grants
            .iter()
            .flat_map(|(module, actions)| actions.iter().map(move |action| (*module, *action)))
    }

    /// The modules this role has at least one grant on.
    pub fn modules(&self) -> impl Iterator<Item = PermissionModule> + '_ {
        self.grants.keys().copied()
    }
}
