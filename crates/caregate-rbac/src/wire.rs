//! Wire form of the permission table.
//!
//! The persistence layer delivers the table as nested string maps of boolean
//! flags: `{ role: { module: { action: bool } } }`. Ingestion keeps only
//! `true` flags, routes built-in role names to the typed side of the matrix,
//! and skips keys it does not recognize. Skipping rather than erroring keeps
//! table replacement total; unknown grants can only ever deny.

use std::collections::BTreeMap;

use caregate_types::{Action, PermissionModule, RoleId};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::matrix::PermissionMatrix;
use crate::permissions::RoleGrants;

/// The permission table as delivered by the persistence layer.
pub type RawPermissionTable = BTreeMap<String, BTreeMap<String, BTreeMap<String, bool>>>;

/// One role entry in wire form, for single-role admin updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRoleGrants(pub BTreeMap<String, BTreeMap<String, bool>>);

impl RawRoleGrants {
    /// Converts the wire entry into typed grants.
    ///
    /// `false` flags, unknown modules, unknown actions, and flags a module
    /// does not carry are all dropped (with a warning for the unknowns).
    pub fn into_grants(self) -> RoleGrants {
        let mut grants = RoleGrants::new();
        for (module_name, actions) in self.0 {
            let Some(module) = PermissionModule::from_wire_name(&module_name) else {
                warn!(module = %module_name, "skipping unknown permission module");
                continue;
            };
            for (action_name, granted) in actions {
                if !granted {
                    continue;
                }
                let Some(action) = Action::from_wire_name(&action_name) else {
                    warn!(module = %module_name, action = %action_name, "skipping unknown action");
                    continue;
                };
                if !action.applies_to(module) {
                    warn!(module = %module_name, action = %action_name, "skipping action not carried by module");
                    continue;
                }
                grants.grant(module, action);
            }
        }
        grants
    }
}

impl PermissionMatrix {
    /// Builds a matrix from the wire table.
    ///
    /// Roles absent from the table keep empty grants (built-in entries always
    /// exist and deny). Role names that are neither built-in nor valid custom
    /// names are skipped with a warning.
    pub fn from_raw(raw: RawPermissionTable) -> Self {
        let mut matrix = Self::empty();
        matrix.apply_raw(raw);
        matrix
    }

    /// Merges a wire table into this matrix.
    ///
    /// Each role entry present in the table replaces that role's grants
    /// wholesale; roles not mentioned are untouched. This is the shape of a
    /// post-admin-edit refetch.
    pub fn apply_raw(&mut self, raw: RawPermissionTable) {
        for (role_name, entry) in raw {
            let grants = RawRoleGrants(entry).into_grants();
            match RoleId::from_name(&role_name) {
                Ok(RoleId::Builtin(role)) => self.replace_builtin_grants(role, grants),
                Ok(RoleId::Custom(name)) => self.set_custom_role(name, grants),
                Err(err) => {
                    warn!(role = %role_name, %err, "skipping invalid role name in permission table");
                }
            }
        }
    }

    /// Renders the matrix back into wire form.
    ///
    /// Built-in roles with empty grants are included (their entries always
    /// exist); only `true` flags are emitted.
    pub fn to_raw(&self) -> RawPermissionTable {
        let mut raw = RawPermissionTable::new();
        for name in self.role_names() {
            let Ok(role_id) = RoleId::from_name(&name) else {
                continue;
            };
            let Some(grants) = self.grants_for(&role_id) else {
                continue;
            };
            let mut entry: BTreeMap<String, BTreeMap<String, bool>> = BTreeMap::new();
            for (module, action) in grants.iter() {
                entry
                    .entry(module.wire_name().to_string())
                    .or_default()
                    .insert(action.wire_name().to_string(), true);
            }
            raw.insert(name, entry);
        }
        raw
    }
}
