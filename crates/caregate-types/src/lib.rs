//! # caregate-types: Core types for `CareGate`
//!
//! This crate contains the shared vocabulary used across the CareGate system:
//! - Role identities ([`Role`], [`CustomRoleName`], [`RoleId`])
//! - Permission-table keys ([`PermissionModule`], [`Action`])
//! - Feature areas ([`ModuleId`])
//! - Subscription tiers ([`PlanTier`])
//! - The authenticated subject ([`User`])
//!
//! Built-in identifiers are closed enumerations so that a missing case is a
//! compile error, not a silent deny. Custom roles created by administrators
//! at runtime live behind [`CustomRoleName`], a validated newtype that keeps
//! the built-in namespace reserved.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

// ============================================================================
// Built-in roles
// ============================================================================

/// Built-in role identity.
///
/// Listed in the order the product's admin UI presents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Practice administrator. Bypasses module-level gating entirely.
    Admin,
    /// Physician. Full clinical access, no billing or CRM.
    Doctor,
    /// Portal-only identity for the patients themselves.
    Patient,
    /// Clinical support. Like a doctor but cannot delete records.
    Nurse,
    /// Front desk. Scheduling and patient demographics only.
    Receptionist,
    /// Revenue-cycle staff. Billing plus read-only patient lookup.
    BillingManager,
    /// Marketing/outreach staff. CRM and reports only.
    CrmManager,
    /// Generic read-mostly staff account.
    Staff,
}

impl Role {
    /// All built-in roles, in admin-UI listing order.
    pub const ALL: [Role; 8] = [
        Role::Admin,
        Role::Doctor,
        Role::Patient,
        Role::Nurse,
        Role::Receptionist,
        Role::BillingManager,
        Role::CrmManager,
        Role::Staff,
    ];

    /// The wire name used in persisted tables and API payloads.
    pub fn wire_name(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Patient => "patient",
            Role::Nurse => "nurse",
            Role::Receptionist => "receptionist",
            Role::BillingManager => "billing_manager",
            Role::CrmManager => "crm_manager",
            Role::Staff => "staff",
        }
    }

    /// Human-readable name for admin UI listings.
    pub fn display_name(self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Doctor => "Doctor",
            Role::Patient => "Patient",
            Role::Nurse => "Nurse",
            Role::Receptionist => "Receptionist",
            Role::BillingManager => "Billing Manager",
            Role::CrmManager => "CRM Manager",
            Role::Staff => "Staff",
        }
    }

    /// Returns whether this role is a medical provider (doctor or nurse).
    pub fn is_provider(self) -> bool {
        matches!(self, Role::Doctor | Role::Nurse)
    }

    /// Parses a built-in role from its wire name.
    pub fn from_wire_name(name: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.wire_name() == name)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Role {
    type Err = RoleNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::from_wire_name(s).ok_or_else(|| RoleNameError::UnknownBuiltin(s.to_string()))
    }
}

// ============================================================================
// Custom roles
// ============================================================================

/// Error constructing a role name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleNameError {
    /// The name collides with a reserved built-in role.
    #[error("role name '{0}' is reserved for a built-in role")]
    Reserved(String),

    /// The name is empty after normalization.
    #[error("role name must not be empty")]
    Empty,

    /// Not a built-in role wire name.
    #[error("unknown built-in role '{0}'")]
    UnknownBuiltin(String),
}

/// Name of an administrator-created custom role.
///
/// Names are normalized the way the role-creation flow stores them:
/// lowercased, internal whitespace collapsed to `_`. Built-in wire names are
/// rejected at construction, so a custom role can never shadow a built-in
/// role's grants.
///
/// # Examples
///
/// ```
/// use caregate_types::CustomRoleName;
///
/// let name = CustomRoleName::new("Night Auditor").unwrap();
/// assert_eq!(name.as_str(), "night_auditor");
///
/// assert!(CustomRoleName::new("admin").is_err());
/// assert!(CustomRoleName::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CustomRoleName(String);

impl CustomRoleName {
    /// Normalizes and validates a custom role name.
    pub fn new(name: &str) -> Result<Self, RoleNameError> {
        let normalized = name
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");

        if normalized.is_empty() {
            return Err(RoleNameError::Empty);
        }
        if Role::from_wire_name(&normalized).is_some() {
            return Err(RoleNameError::Reserved(normalized));
        }
        Ok(Self(normalized))
    }

    /// The normalized name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CustomRoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CustomRoleName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        CustomRoleName::new(&raw).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Role identifier (built-in or custom)
// ============================================================================

/// Identifies either a built-in role or an administrator-created one.
///
/// Serializes as the plain role name, matching the wire shape of the
/// permission table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoleId {
    /// One of the eight built-in roles.
    Builtin(Role),
    /// A custom role created through the admin flow.
    Custom(CustomRoleName),
}

impl RoleId {
    /// Resolves a role name: built-in wire names map to [`RoleId::Builtin`],
    /// anything else becomes a validated custom name.
    pub fn from_name(name: &str) -> Result<Self, RoleNameError> {
        if let Some(role) = Role::from_wire_name(name.trim()) {
            return Ok(RoleId::Builtin(role));
        }
        CustomRoleName::new(name).map(RoleId::Custom)
    }

    /// The wire name of this role.
    pub fn name(&self) -> &str {
        match self {
            RoleId::Builtin(role) => role.wire_name(),
            RoleId::Custom(name) => name.as_str(),
        }
    }

    /// Returns the built-in role, if this is one.
    pub fn builtin(&self) -> Option<Role> {
        match self {
            RoleId::Builtin(role) => Some(*role),
            RoleId::Custom(_) => None,
        }
    }
}

impl From<Role> for RoleId {
    fn from(role: Role) -> Self {
        RoleId::Builtin(role)
    }
}

impl Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for RoleId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for RoleId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        RoleId::from_name(&raw).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Permission-table keys
// ============================================================================

/// Module key within the permission table.
///
/// These are the rows an administrator edits when configuring a role, not the
/// top-level feature areas (see [`ModuleId`] for those).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionModule {
    Patients,
    Appointments,
    Billing,
    Crm,
    Ehr,
    Reports,
    Admin,
}

impl PermissionModule {
    /// All permission modules.
    pub const ALL: [PermissionModule; 7] = [
        PermissionModule::Patients,
        PermissionModule::Appointments,
        PermissionModule::Billing,
        PermissionModule::Crm,
        PermissionModule::Ehr,
        PermissionModule::Reports,
        PermissionModule::Admin,
    ];

    /// The wire name used in persisted tables.
    pub fn wire_name(self) -> &'static str {
        match self {
            PermissionModule::Patients => "patients",
            PermissionModule::Appointments => "appointments",
            PermissionModule::Billing => "billing",
            PermissionModule::Crm => "crm",
            PermissionModule::Ehr => "ehr",
            PermissionModule::Reports => "reports",
            PermissionModule::Admin => "admin",
        }
    }

    /// The action flags this permission module carries.
    pub fn actions(self) -> &'static [Action] {
        match self {
            PermissionModule::Patients | PermissionModule::Appointments | PermissionModule::Crm => {
                &[Action::View, Action::Create, Action::Edit, Action::Delete]
            }
            PermissionModule::Billing => {
                &[Action::View, Action::Create, Action::Edit, Action::Process]
            }
            PermissionModule::Ehr => &[Action::View, Action::Create, Action::Edit],
            PermissionModule::Reports => &[Action::View, Action::Export],
            PermissionModule::Admin => {
                &[Action::Users, Action::Roles, Action::Plans, Action::Settings]
            }
        }
    }

    /// Parses a permission module from its wire name.
    pub fn from_wire_name(name: &str) -> Option<PermissionModule> {
        PermissionModule::ALL
            .into_iter()
            .find(|m| m.wire_name() == name)
    }
}

impl Display for PermissionModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Action flag within a permission module.
///
/// Most modules carry the CRUD flags; `billing` adds `process`, `reports`
/// carries `export`, and the `admin` module's "actions" are its four named
/// sub-capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
    /// Process a payment or claim (`billing` only).
    Process,
    /// Export report data (`reports` only).
    Export,
    /// Manage user accounts (`admin` only).
    Users,
    /// Manage roles and permissions (`admin` only).
    Roles,
    /// Manage subscription plans (`admin` only).
    Plans,
    /// Manage organization settings (`admin` only).
    Settings,
}

impl Action {
    /// All action flags.
    pub const ALL: [Action; 10] = [
        Action::View,
        Action::Create,
        Action::Edit,
        Action::Delete,
        Action::Process,
        Action::Export,
        Action::Users,
        Action::Roles,
        Action::Plans,
        Action::Settings,
    ];

    /// The wire name used in persisted tables.
    pub fn wire_name(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::Process => "process",
            Action::Export => "export",
            Action::Users => "users",
            Action::Roles => "roles",
            Action::Plans => "plans",
            Action::Settings => "settings",
        }
    }

    /// Returns whether this flag belongs to the given permission module.
    pub fn applies_to(self, module: PermissionModule) -> bool {
        module.actions().contains(&self)
    }

    /// Parses an action from its wire name.
    pub fn from_wire_name(name: &str) -> Option<Action> {
        Action::ALL.into_iter().find(|a| a.wire_name() == name)
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

// ============================================================================
// Feature modules
// ============================================================================

/// Top-level feature area of the application.
///
/// Each module is gated independently by plan entitlement and by role
/// permission. Wire names are the camelCase ids the UI routes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModuleId {
    Dashboard,
    PracticeManagement,
    ProviderManagement,
    Ehr,
    Telehealth,
    Rcm,
    Crm,
    Reports,
    Integrations,
    ClinicalServices,
    PatientPortal,
    AdminPanel,
    OfferingManagement,
}

impl ModuleId {
    /// All feature modules.
    pub const ALL: [ModuleId; 13] = [
        ModuleId::Dashboard,
        ModuleId::PracticeManagement,
        ModuleId::ProviderManagement,
        ModuleId::Ehr,
        ModuleId::Telehealth,
        ModuleId::Rcm,
        ModuleId::Crm,
        ModuleId::Reports,
        ModuleId::Integrations,
        ModuleId::ClinicalServices,
        ModuleId::PatientPortal,
        ModuleId::AdminPanel,
        ModuleId::OfferingManagement,
    ];

    /// The wire id the UI routes on.
    pub fn wire_name(self) -> &'static str {
        match self {
            ModuleId::Dashboard => "dashboard",
            ModuleId::PracticeManagement => "practiceManagement",
            ModuleId::ProviderManagement => "providerManagement",
            ModuleId::Ehr => "ehr",
            ModuleId::Telehealth => "telehealth",
            ModuleId::Rcm => "rcm",
            ModuleId::Crm => "crm",
            ModuleId::Reports => "reports",
            ModuleId::Integrations => "integrations",
            ModuleId::ClinicalServices => "clinicalServices",
            ModuleId::PatientPortal => "patientPortal",
            ModuleId::AdminPanel => "adminPanel",
            ModuleId::OfferingManagement => "offeringManagement",
        }
    }

    /// Parses a module id from its wire name.
    pub fn from_wire_name(name: &str) -> Option<ModuleId> {
        ModuleId::ALL.into_iter().find(|m| m.wire_name() == name)
    }
}

impl Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

// ============================================================================
// Plan tiers
// ============================================================================

/// Subscription plan tier.
///
/// Ordered from least to most entitled. Entitlement lists are expected to be
/// supersets going up the ordering by product convention; the catalog does
/// not enforce it (see `caregate-plans`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    Free,
    Starter,
    Professional,
    Enterprise,
}

impl PlanTier {
    /// All plan tiers, least entitled first.
    pub const ALL: [PlanTier; 4] = [
        PlanTier::Free,
        PlanTier::Starter,
        PlanTier::Professional,
        PlanTier::Enterprise,
    ];

    /// The wire name used in billing payloads.
    pub fn wire_name(self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Starter => "starter",
            PlanTier::Professional => "professional",
            PlanTier::Enterprise => "enterprise",
        }
    }

    /// Parses a plan tier from its wire name.
    pub fn from_wire_name(name: &str) -> Option<PlanTier> {
        PlanTier::ALL.into_iter().find(|t| t.wire_name() == name)
    }
}

impl Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

// ============================================================================
// User
// ============================================================================

/// The authenticated subject access decisions are made for.
///
/// Only the role (and, where plan gating applies, the organization's plan
/// tier) matters to the evaluator; everything else about the user is opaque
/// to this core. Decision entry points take `Option<&User>` so the
/// absent-user case is explicit and always resolves fail-closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque user id, carried through for audit events.
    pub id: Option<String>,
    /// The user's role.
    pub role: RoleId,
    /// The organization's plan tier, when known at evaluation time.
    #[serde(default)]
    pub plan_tier: Option<PlanTier>,
}

impl User {
    /// Creates a user with the given role.
    pub fn with_role(role: impl Into<RoleId>) -> Self {
        Self {
            id: None,
            role: role.into(),
            plan_tier: None,
        }
    }

    /// Sets the opaque user id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the plan tier.
    #[must_use]
    pub fn with_plan(mut self, tier: PlanTier) -> Self {
        self.plan_tier = Some(tier);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn role_wire_names_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::from_wire_name(role.wire_name()), Some(role));
            assert_eq!(role.wire_name().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn role_serde_uses_wire_names() {
        let json = serde_json::to_string(&Role::BillingManager).unwrap();
        assert_eq!(json, "\"billing_manager\"");
        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Role::BillingManager);
    }

    #[test]
    fn provider_roles() {
        assert!(Role::Doctor.is_provider());
        assert!(Role::Nurse.is_provider());
        assert!(!Role::Admin.is_provider());
        assert!(!Role::Patient.is_provider());
    }

    #[test_case("Night Auditor", "night_auditor")]
    #[test_case("  intake   clerk ", "intake_clerk")]
    #[test_case("TRIAGE", "triage")]
    fn custom_role_name_normalization(input: &str, expected: &str) {
        let name = CustomRoleName::new(input).unwrap();
        assert_eq!(name.as_str(), expected);
    }

    #[test]
    fn custom_role_name_rejects_reserved() {
        for role in Role::ALL {
            let err = CustomRoleName::new(role.wire_name()).unwrap_err();
            assert_eq!(err, RoleNameError::Reserved(role.wire_name().to_string()));
        }
        // Normalization happens before the reserved check
        assert!(CustomRoleName::new("  Billing  Manager ").is_err());
    }

    #[test]
    fn custom_role_name_rejects_empty() {
        assert_eq!(CustomRoleName::new(""), Err(RoleNameError::Empty));
        assert_eq!(CustomRoleName::new("   "), Err(RoleNameError::Empty));
    }

    #[test]
    fn role_id_routes_builtin_names() {
        assert_eq!(
            RoleId::from_name("doctor").unwrap(),
            RoleId::Builtin(Role::Doctor)
        );
        let custom = RoleId::from_name("night_auditor").unwrap();
        assert_eq!(custom.name(), "night_auditor");
        assert_eq!(custom.builtin(), None);
    }

    #[test]
    fn role_id_serde_is_plain_string() {
        let id: RoleId = serde_json::from_str("\"crm_manager\"").unwrap();
        assert_eq!(id, RoleId::Builtin(Role::CrmManager));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"crm_manager\"");

        let custom: RoleId = serde_json::from_str("\"night_auditor\"").unwrap();
        assert_eq!(custom.name(), "night_auditor");
    }

    #[test]
    fn module_id_wire_names_are_camel_case() {
        assert_eq!(ModuleId::PracticeManagement.wire_name(), "practiceManagement");
        assert_eq!(
            serde_json::to_string(&ModuleId::OfferingManagement).unwrap(),
            "\"offeringManagement\""
        );
        for module in ModuleId::ALL {
            assert_eq!(ModuleId::from_wire_name(module.wire_name()), Some(module));
        }
    }

    #[test]
    fn action_module_pairing() {
        assert!(Action::Process.applies_to(PermissionModule::Billing));
        assert!(!Action::Process.applies_to(PermissionModule::Patients));
        assert!(Action::Export.applies_to(PermissionModule::Reports));
        assert!(Action::Settings.applies_to(PermissionModule::Admin));
        assert!(!Action::View.applies_to(PermissionModule::Admin));
    }

    #[test]
    fn plan_tier_ordering() {
        assert!(PlanTier::Free < PlanTier::Starter);
        assert!(PlanTier::Starter < PlanTier::Professional);
        assert!(PlanTier::Professional < PlanTier::Enterprise);
    }

    #[test]
    fn user_builder() {
        let user = User::with_role(Role::Doctor)
            .with_id("u-17")
            .with_plan(PlanTier::Professional);
        assert_eq!(user.role, RoleId::Builtin(Role::Doctor));
        assert_eq!(user.id.as_deref(), Some("u-17"));
        assert_eq!(user.plan_tier, Some(PlanTier::Professional));
    }
}
