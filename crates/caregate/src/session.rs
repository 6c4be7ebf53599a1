//! Session-level handle over the loaded tables.
//!
//! A [`Session`] owns the tables a signed-in client works against: the
//! permission matrix, the module registry, the plan catalog, and the
//! organization's tier. Decisions borrow the tables; replacing a table is a
//! single wholesale assignment (e.g. after an administrator edits roles and
//! the client refetches), so readers always see either the old or the new
//! table in full.

use caregate_access::{AccessEvaluator, AccessGate, GateDecision, ModulePresentation, ModuleRegistry, has_access};
use caregate_config::CaregateConfig;
use caregate_plans::PlanCatalog;
use caregate_rbac::PermissionMatrix;
use caregate_types::{Action, ModuleId, PermissionModule, PlanTier, User};

/// Owns the access-control tables for one signed-in session.
#[derive(Debug, Clone)]
pub struct Session {
    matrix: PermissionMatrix,
    registry: ModuleRegistry,
    catalog: PlanCatalog,
    plan_tier: PlanTier,
    audit_enabled: bool,
}

impl Session {
    /// Creates a session from loaded configuration.
    pub fn from_config(config: &CaregateConfig) -> Self {
        let (matrix, catalog) = config.build_tables();
        Self {
            matrix,
            registry: ModuleRegistry::defaults(),
            catalog,
            plan_tier: config.organization.plan_tier,
            audit_enabled: config.audit.enabled,
        }
    }

    /// Creates a session over explicit tables.
    pub fn new(matrix: PermissionMatrix, catalog: PlanCatalog, plan_tier: PlanTier) -> Self {
        Self {
            matrix,
            registry: ModuleRegistry::defaults(),
            catalog,
            plan_tier,
            audit_enabled: true,
        }
    }

    /// The organization's plan tier.
    pub fn plan_tier(&self) -> PlanTier {
        self.plan_tier
    }

    /// The pure evaluator over this session's tables.
    pub fn evaluator(&self) -> AccessEvaluator<'_> {
        AccessEvaluator::new(&self.matrix, &self.registry)
    }

    /// The audited gate over this session's tables.
    pub fn gate(&self) -> AccessGate<'_> {
        let gate = AccessGate::new(&self.catalog, self.evaluator());
        if self.audit_enabled { gate } else { gate.without_audit() }
    }

    /// Replaces the permission matrix wholesale (post-admin-edit refetch).
    pub fn replace_matrix(&mut self, matrix: PermissionMatrix) {
        self.matrix = matrix;
    }

    /// Replaces the plan catalog wholesale.
    pub fn replace_catalog(&mut self, catalog: PlanCatalog) {
        self.catalog = catalog;
    }

    /// Updates the organization's tier (after a plan change).
    pub fn set_plan_tier(&mut self, tier: PlanTier) {
        self.plan_tier = tier;
    }

    /// Whether the user holds the action on the permission module.
    pub fn has_permission(&self, user: Option<&User>, module: PermissionModule, action: Action) -> bool {
        self.evaluator().has_permission(user, module, action)
    }

    /// Whether the user can open the feature module (role gating only).
    pub fn can_access_module(&self, user: Option<&User>, module: ModuleId) -> bool {
        self.evaluator().can_access_module(user, module)
    }

    /// Whether the session's plan and the user's role together unlock the
    /// module.
    pub fn has_access(&self, user: Option<&User>, module: ModuleId) -> bool {
        has_access(&self.catalog, &self.evaluator(), self.plan_tier, module, user)
    }

    /// Plan-and-role decision for a module, with audit events.
    pub fn decide(&self, user: Option<&User>, module: ModuleId) -> GateDecision {
        self.gate().decide(self.plan_tier, user, module)
    }

    /// Visual state for a module card, with audit events.
    pub fn present(&self, user: Option<&User>, module: ModuleId) -> ModulePresentation {
        self.gate().present(self.plan_tier, user, module)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(
            PermissionMatrix::defaults(),
            PlanCatalog::defaults(),
            PlanTier::Free,
        )
    }
}
