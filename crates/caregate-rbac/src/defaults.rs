//! Canonical default grants for the built-in roles.
//!
//! These match the grants seeded by the product's RBAC migration. The
//! mapping is an exhaustive match so adding a role without deciding its
//! grants is a compile error.

use caregate_types::{Action, PermissionModule, Role};

use crate::permissions::RoleGrants;

/// The default grants for a built-in role.
pub fn builtin_grants(role: Role) -> RoleGrants {
    use Action::{Create, Delete, Edit, Export, View};
    use PermissionModule::{Admin, Appointments, Billing, Crm, Ehr, Patients, Reports};

    match role {
        Role::Admin => RoleGrants::new()
            .allow_all(Patients)
            .allow_all(Appointments)
            .allow_all(Billing)
            .allow_all(Crm)
            .allow_all(Ehr)
            .allow_all(Reports)
            .allow_all(Admin),
        Role::Doctor => RoleGrants::new()
            .allow(Patients, [View, Create, Edit, Delete])
            .allow(Appointments, [View, Create, Edit, Delete])
            .allow(Ehr, [View, Create, Edit])
            .allow(Reports, [View, Export]),
        Role::Patient => RoleGrants::new()
            .allow(Appointments, [View, Create])
            .allow(Ehr, [View]),
        Role::Nurse => RoleGrants::new()
            .allow(Patients, [View, Create, Edit])
            .allow(Appointments, [View, Create, Edit])
            .allow(Ehr, [View, Create, Edit]),
        Role::Receptionist => RoleGrants::new()
            .allow(Patients, [View, Create, Edit])
            .allow(Appointments, [View, Create, Edit]),
        Role::BillingManager => RoleGrants::new()
            .allow(Patients, [View])
            .allow_all(Billing)
            .allow(Reports, [View, Export]),
        Role::CrmManager => RoleGrants::new()
            .allow_all(Crm)
            .allow(Reports, [View, Export]),
        Role::Staff => RoleGrants::new()
            .allow(Patients, [View])
            .allow(Appointments, [View]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_holds_every_flag() {
        let grants = builtin_grants(Role::Admin);
        for module in PermissionModule::ALL {
            for action in module.actions() {
                assert!(grants.allows(module, *action), "admin missing {module}.{action}");
            }
        }
    }

    #[test]
    fn doctor_has_no_billing_or_crm() {
        let grants = builtin_grants(Role::Doctor);
        assert!(!grants.allows(PermissionModule::Billing, Action::View));
        assert!(!grants.allows(PermissionModule::Billing, Action::Process));
        assert!(!grants.allows(PermissionModule::Crm, Action::View));
        assert!(!grants.allows(PermissionModule::Admin, Action::Users));

        assert!(grants.allows(PermissionModule::Patients, Action::Delete));
        assert!(grants.allows(PermissionModule::Ehr, Action::Edit));
        assert!(grants.allows(PermissionModule::Reports, Action::Export));
    }

    #[test]
    fn patient_is_portal_scoped() {
        let grants = builtin_grants(Role::Patient);
        assert!(grants.allows(PermissionModule::Appointments, Action::View));
        assert!(grants.allows(PermissionModule::Appointments, Action::Create));
        assert!(!grants.allows(PermissionModule::Appointments, Action::Edit));
        assert!(grants.allows(PermissionModule::Ehr, Action::View));
        assert!(!grants.allows(PermissionModule::Ehr, Action::Create));
        assert!(!grants.allows(PermissionModule::Patients, Action::View));
    }

    #[test]
    fn nurse_cannot_delete() {
        let grants = builtin_grants(Role::Nurse);
        assert!(grants.allows(PermissionModule::Patients, Action::Edit));
        assert!(!grants.allows(PermissionModule::Patients, Action::Delete));
        assert!(!grants.allows(PermissionModule::Appointments, Action::Delete));
    }

    #[test]
    fn billing_manager_processes_payments() {
        let grants = builtin_grants(Role::BillingManager);
        assert!(grants.allows(PermissionModule::Billing, Action::Process));
        assert!(grants.allows(PermissionModule::Patients, Action::View));
        assert!(!grants.allows(PermissionModule::Patients, Action::Create));
        assert!(!grants.allows(PermissionModule::Appointments, Action::View));
    }

    #[test]
    fn crm_manager_is_crm_scoped() {
        let grants = builtin_grants(Role::CrmManager);
        assert!(grants.allows(PermissionModule::Crm, Action::Delete));
        assert!(grants.allows(PermissionModule::Reports, Action::View));
        assert!(!grants.allows(PermissionModule::Patients, Action::View));
        assert!(!grants.allows(PermissionModule::Ehr, Action::View));
    }

    #[test]
    fn staff_is_read_only() {
        let grants = builtin_grants(Role::Staff);
        assert!(grants.allows(PermissionModule::Patients, Action::View));
        assert!(grants.allows(PermissionModule::Appointments, Action::View));
        for module in PermissionModule::ALL {
            for action in module.actions() {
                if *action != Action::View {
                    assert!(!grants.allows(module, *action));
                }
            }
        }
    }

    #[test]
    fn only_admin_holds_admin_capabilities() {
        for role in Role::ALL {
            let grants = builtin_grants(role);
            let has_admin = PermissionModule::Admin
                .actions()
                .iter()
                .any(|a| grants.allows(PermissionModule::Admin, *a));
            assert_eq!(has_admin, role == Role::Admin);
        }
    }
}
