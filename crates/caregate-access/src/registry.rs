//! The feature-module registry.
//!
//! Maps each top-level feature module to the permission module whose `view`
//! grant it requires. The mapping is build-time configuration, many-to-one,
//! and not user-editable.

use std::collections::BTreeMap;

use caregate_types::{ModuleId, PermissionModule};

/// Required-permission lookup for feature modules.
///
/// A module registered with no required permission is open to any
/// authenticated user. This open default is the inverse of the fail-closed
/// defaults elsewhere in the table stack; it is deliberate and applies only
/// to modules the registry explicitly declares requirement-free (dashboard,
/// patientPortal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRegistry {
    required: BTreeMap<ModuleId, Option<PermissionModule>>,
}

impl ModuleRegistry {
    /// Builds a registry from an explicit mapping.
    pub fn new(required: BTreeMap<ModuleId, Option<PermissionModule>>) -> Self {
        Self { required }
    }

    /// The product's shipped module registry.
    ///
    /// The match is exhaustive: a new feature module cannot ship without a
    /// gating decision.
    pub fn defaults() -> Self {
        let required = ModuleId::ALL
            .into_iter()
            .map(|module| {
                let permission = match module {
                    ModuleId::Dashboard | ModuleId::PatientPortal => None,
                    ModuleId::PracticeManagement | ModuleId::Telehealth => {
                        Some(PermissionModule::Appointments)
                    }
                    ModuleId::ProviderManagement => Some(PermissionModule::Patients),
                    ModuleId::Ehr | ModuleId::ClinicalServices => Some(PermissionModule::Ehr),
                    ModuleId::Rcm => Some(PermissionModule::Billing),
                    ModuleId::Crm => Some(PermissionModule::Crm),
                    ModuleId::Reports => Some(PermissionModule::Reports),
                    ModuleId::Integrations | ModuleId::AdminPanel | ModuleId::OfferingManagement => {
                        Some(PermissionModule::Admin)
                    }
                };
                (module, permission)
            })
            .collect();
        Self { required }
    }

    /// The permission module whose `view` grant the feature module requires.
    ///
    /// `None` — whether from an explicit requirement-free registration or a
    /// module absent from the registry — means no permission is required.
    pub fn required_permission(&self, module: ModuleId) -> Option<PermissionModule> {
        self.required.get(&module).copied().flatten()
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::defaults()
    }
}
