//! The access evaluator.
//!
//! Pure, synchronous decision functions over injected tables. Every function
//! here is total: it never panics, never errors, never logs, never blocks.
//! A missing or malformed subject resolves to the most restrictive answer.

use caregate_rbac::PermissionMatrix;
use caregate_types::{Action, ModuleId, PermissionModule, Role, RoleId, User};

use crate::registry::ModuleRegistry;

/// Anything that carries a feature-module id.
///
/// Lets [`AccessEvaluator::accessible_modules`] filter caller-owned module
/// descriptors (cards, nav entries) without caring about their shape.
pub trait ModuleRef {
    /// The feature module this value represents.
    fn module_id(&self) -> ModuleId;
}

impl ModuleRef for ModuleId {
    fn module_id(&self) -> ModuleId {
        *self
    }
}

impl<T: ModuleRef> ModuleRef for &T {
    fn module_id(&self) -> ModuleId {
        (*self).module_id()
    }
}

/// The single decision point UI surfaces consult before rendering or
/// enabling an affordance.
///
/// Borrows its tables so callers can swap a freshly fetched matrix in by
/// constructing a new evaluator; decisions are cheap enough to recompute on
/// every render and are never cached.
#[derive(Debug, Clone, Copy)]
pub struct AccessEvaluator<'a> {
    matrix: &'a PermissionMatrix,
    registry: &'a ModuleRegistry,
}

impl<'a> AccessEvaluator<'a> {
    /// Creates an evaluator over the given tables.
    pub fn new(matrix: &'a PermissionMatrix, registry: &'a ModuleRegistry) -> Self {
        Self { matrix, registry }
    }

    /// Returns whether the user holds the action on the permission module.
    ///
    /// No admin bypass: this is the fine-grained check, and admins hold
    /// their grants through the table like everyone else.
    pub fn has_permission(
        &self,
        user: Option<&User>,
        module: PermissionModule,
        action: Action,
    ) -> bool {
        match user {
            None => false,
            Some(user) => self.matrix.permits(&user.role, module, action),
        }
    }

    /// Returns whether the user can open the feature module.
    ///
    /// Special-case rules run before any table lookup, in order: admin
    /// bypass, the patient-only portal, the admin-only surfaces, the
    /// universally open dashboard. Everything else requires the `view` grant
    /// on the module's registered permission module, if it has one.
    pub fn can_access_module(&self, user: Option<&User>, module: ModuleId) -> bool {
        let Some(user) = user else {
            return false;
        };

        if user.role == RoleId::Builtin(Role::Admin) {
            return true;
        }

        match module {
            ModuleId::PatientPortal => return user.role == RoleId::Builtin(Role::Patient),
            // Non-admins only; the bypass above already admitted admins
            ModuleId::AdminPanel | ModuleId::OfferingManagement => return false,
            ModuleId::Dashboard => return true,
            _ => {}
        }

        match self.registry.required_permission(module) {
            None => true,
            Some(required) => self.has_permission(Some(user), required, Action::View),
        }
    }

    /// Alias of [`has_permission`](Self::has_permission) for call sites that
    /// gate a mutating control rather than a read-only panel.
    pub fn can_perform_action(
        &self,
        user: Option<&User>,
        module: PermissionModule,
        action: Action,
    ) -> bool {
        self.has_permission(user, module, action)
    }

    /// Filters module descriptors down to the ones the user can open.
    ///
    /// Order-preserving: the result is a subsequence of the input, never
    /// re-sorted, never extended.
    pub fn accessible_modules<'m, T: ModuleRef>(
        &self,
        user: Option<&User>,
        all_modules: &'m [T],
    ) -> Vec<&'m T> {
        all_modules
            .iter()
            .filter(|m| self.can_access_module(user, m.module_id()))
            .collect()
    }
}

/// Returns whether the user is an administrator.
pub fn is_admin(user: Option<&User>) -> bool {
    user.is_some_and(|u| u.role == RoleId::Builtin(Role::Admin))
}

/// Returns whether the user is a medical provider (doctor or nurse).
pub fn is_provider(user: Option<&User>) -> bool {
    user.is_some_and(|u| u.role.builtin().is_some_and(Role::is_provider))
}

/// Returns whether the user is a patient.
pub fn is_patient(user: Option<&User>) -> bool {
    user.is_some_and(|u| u.role == RoleId::Builtin(Role::Patient))
}

#[cfg(test)]
mod tests {
    use super::*;
    use caregate_types::CustomRoleName;
    use proptest::prelude::*;
    use proptest::sample::select;

    fn user(role: Role) -> User {
        User::with_role(role)
    }

    fn tables() -> (PermissionMatrix, ModuleRegistry) {
        (PermissionMatrix::defaults(), ModuleRegistry::defaults())
    }

    #[test]
    fn absent_user_denies_everything() {
        let (matrix, registry) = tables();
        let eval = AccessEvaluator::new(&matrix, &registry);

        assert!(!eval.has_permission(None, PermissionModule::Patients, Action::View));
        for module in ModuleId::ALL {
            assert!(!eval.can_access_module(None, module));
        }
        assert!(eval.accessible_modules(None, &ModuleId::ALL).is_empty());
    }

    #[test]
    fn unknown_custom_role_denies_permissions() {
        let (matrix, registry) = tables();
        let eval = AccessEvaluator::new(&matrix, &registry);
        let ghost = User {
            id: None,
            role: RoleId::Custom(CustomRoleName::new("ghost").unwrap()),
            plan_tier: None,
        };

        for module in PermissionModule::ALL {
            for action in module.actions() {
                assert!(!eval.has_permission(Some(&ghost), module, *action));
            }
        }
        // Special-case modules still apply their role tests, not the table
        assert!(eval.can_access_module(Some(&ghost), ModuleId::Dashboard));
        assert!(!eval.can_access_module(Some(&ghost), ModuleId::PatientPortal));
        assert!(!eval.can_access_module(Some(&ghost), ModuleId::Ehr));
    }

    #[test]
    fn admin_bypass_is_total_for_module_access() {
        let (matrix, registry) = tables();
        let eval = AccessEvaluator::new(&matrix, &registry);
        let admin = user(Role::Admin);

        for module in ModuleId::ALL {
            assert!(eval.can_access_module(Some(&admin), module), "{module}");
        }
    }

    #[test]
    fn admin_bypass_does_not_extend_to_fine_grained_checks() {
        let (mut matrix, registry) = tables();
        // Strip a grant from admin's table entry; has_permission must honor it
        matrix.replace_builtin_grants(Role::Admin, caregate_rbac::RoleGrants::new());
        let eval = AccessEvaluator::new(&matrix, &registry);
        let admin = user(Role::Admin);

        assert!(!eval.has_permission(Some(&admin), PermissionModule::Billing, Action::Process));
        // Module access still bypasses
        assert!(eval.can_access_module(Some(&admin), ModuleId::Rcm));
    }

    #[test]
    fn patient_portal_is_patient_only() {
        let (matrix, registry) = tables();
        let eval = AccessEvaluator::new(&matrix, &registry);

        for role in Role::ALL {
            let u = user(role);
            let expected = role == Role::Patient || role == Role::Admin;
            assert_eq!(
                eval.can_access_module(Some(&u), ModuleId::PatientPortal),
                expected,
                "{role}"
            );
        }
    }

    #[test]
    fn admin_surfaces_are_admin_only() {
        let (matrix, registry) = tables();
        let eval = AccessEvaluator::new(&matrix, &registry);

        for module in [ModuleId::AdminPanel, ModuleId::OfferingManagement] {
            for role in Role::ALL {
                let u = user(role);
                assert_eq!(
                    eval.can_access_module(Some(&u), module),
                    role == Role::Admin,
                    "{role} {module}"
                );
            }
        }
    }

    #[test]
    fn dashboard_is_open_to_every_role() {
        let (matrix, registry) = tables();
        let eval = AccessEvaluator::new(&matrix, &registry);

        for role in Role::ALL {
            let u = user(role);
            assert!(eval.can_access_module(Some(&u), ModuleId::Dashboard), "{role}");
        }
    }

    #[test]
    fn module_access_follows_view_grants() {
        let (matrix, registry) = tables();
        let eval = AccessEvaluator::new(&matrix, &registry);

        let doctor = user(Role::Doctor);
        assert!(eval.can_access_module(Some(&doctor), ModuleId::Ehr));
        assert!(!eval.can_access_module(Some(&doctor), ModuleId::Rcm));
        assert!(!eval.can_access_module(Some(&doctor), ModuleId::Crm));

        let billing = user(Role::BillingManager);
        assert!(eval.can_access_module(Some(&billing), ModuleId::Rcm));
        assert!(!eval.can_access_module(Some(&billing), ModuleId::Ehr));
        assert!(!eval.can_access_module(Some(&billing), ModuleId::PracticeManagement));

        let receptionist = user(Role::Receptionist);
        assert!(eval.can_access_module(Some(&receptionist), ModuleId::PracticeManagement));
        assert!(eval.can_access_module(Some(&receptionist), ModuleId::Telehealth));
        assert!(!eval.can_access_module(Some(&receptionist), ModuleId::Reports));
    }

    #[test]
    fn doctor_billing_scenario() {
        let (matrix, registry) = tables();
        let eval = AccessEvaluator::new(&matrix, &registry);

        let doctor = user(Role::Doctor);
        assert!(!eval.has_permission(Some(&doctor), PermissionModule::Billing, Action::View));
        assert!(!eval.has_permission(Some(&doctor), PermissionModule::Billing, Action::Process));

        let billing = user(Role::BillingManager);
        assert!(eval.has_permission(Some(&billing), PermissionModule::Billing, Action::Process));
    }

    #[test]
    fn can_perform_action_matches_has_permission() {
        let (matrix, registry) = tables();
        let eval = AccessEvaluator::new(&matrix, &registry);

        for role in Role::ALL {
            let u = user(role);
            for module in PermissionModule::ALL {
                for action in module.actions() {
                    assert_eq!(
                        eval.can_perform_action(Some(&u), module, *action),
                        eval.has_permission(Some(&u), module, *action)
                    );
                }
            }
        }
    }

    #[test]
    fn accessible_modules_preserves_order() {
        let (matrix, registry) = tables();
        let eval = AccessEvaluator::new(&matrix, &registry);
        let nurse = user(Role::Nurse);

        let all = ModuleId::ALL;
        let visible = eval.accessible_modules(Some(&nurse), &all);

        // Subsequence of the input: relative order preserved
        let mut cursor = all.iter();
        for module in &visible {
            assert!(cursor.any(|m| m == *module));
        }
        // Every returned module is individually accessible; omitted ones are not
        for module in all {
            let shown = visible.iter().any(|m| **m == module);
            assert_eq!(shown, eval.can_access_module(Some(&nurse), module));
        }
    }

    #[test]
    fn role_predicates() {
        assert!(is_admin(Some(&user(Role::Admin))));
        assert!(!is_admin(Some(&user(Role::Doctor))));
        assert!(!is_admin(None));

        assert!(is_provider(Some(&user(Role::Doctor))));
        assert!(is_provider(Some(&user(Role::Nurse))));
        assert!(!is_provider(Some(&user(Role::Staff))));
        assert!(!is_provider(None));

        assert!(is_patient(Some(&user(Role::Patient))));
        assert!(!is_patient(Some(&user(Role::Nurse))));
        assert!(!is_patient(None));
    }

    proptest! {
        // The filtered list is always a subsequence of the input, whatever
        // the input ordering or multiplicity.
        #[test]
        fn accessible_modules_is_a_stable_subset(
            role in select(Role::ALL.to_vec()),
            modules in proptest::collection::vec(select(ModuleId::ALL.to_vec()), 0..32),
        ) {
            let (matrix, registry) = tables();
            let eval = AccessEvaluator::new(&matrix, &registry);
            let u = user(role);

            let visible = eval.accessible_modules(Some(&u), &modules);

            // Subsequence check against the input by position
            let mut last_pos = 0usize;
            for item in &visible {
                let pos = modules[last_pos..]
                    .iter()
                    .position(|m| std::ptr::eq(m, *item))
                    .map(|p| p + last_pos);
                prop_assert!(pos.is_some());
                last_pos = pos.unwrap() + 1;
            }
            prop_assert!(visible.len() <= modules.len());
        }
    }
}
