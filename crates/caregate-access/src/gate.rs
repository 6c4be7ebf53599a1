//! Combined plan + role gating.
//!
//! The evaluator answers the role question; the catalog answers the plan
//! question. This module composes the two the way call sites need them:
//! a single boolean for quick checks, a distinguishable [`GateDecision`] so
//! the UI can explain "upgrade your plan" vs "insufficient permissions", and
//! the presentation policy that turns a decision into a visual state.

use caregate_plans::PlanCatalog;
use caregate_types::{ModuleId, PlanTier, User};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::evaluator::{AccessEvaluator, ModuleRef};

/// Returns whether the plan+role combination unlocks the module.
///
/// `entitles(tier, module) AND can_access_module(user, module)`. When `user`
/// is `None` the check degrades to plan-only: a module is already locked in
/// the UI when the plan excludes it, before any role is known. Note the plan
/// half applies to admins too; the admin bypass lives only inside
/// [`AccessEvaluator::can_access_module`].
pub fn has_access(
    catalog: &PlanCatalog,
    evaluator: &AccessEvaluator<'_>,
    tier: PlanTier,
    module: ModuleId,
    user: Option<&User>,
) -> bool {
    catalog.entitles(tier, module)
        && match user {
            None => true,
            Some(user) => evaluator.can_access_module(Some(user), module),
        }
}

/// Why a module is or is not reachable.
///
/// When both the plan and the role would deny, the decision reads
/// [`PlanLocked`](GateDecision::PlanLocked): plan locks render first, and the
/// upsell state stays stable while an admin re-tunes roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
    /// Plan entitles the module and the role (if known) can open it.
    Granted,
    /// The subscription tier does not include the module.
    PlanLocked,
    /// The plan includes the module but the user's role cannot open it.
    RoleLocked,
}

impl GateDecision {
    /// Returns whether access is granted.
    pub fn is_granted(self) -> bool {
        self == GateDecision::Granted
    }
}

/// Visual state of a module card or nav entry.
///
/// The product convention: plan-gating shows-but-disables (locked card with
/// an upsell), role-gating hides outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModulePresentation {
    /// Fully interactive.
    Interactive,
    /// Visible but disabled, with a lock icon and upgrade prompt.
    Locked,
    /// Omitted from the list entirely.
    Hidden,
}

impl From<GateDecision> for ModulePresentation {
    fn from(decision: GateDecision) -> Self {
        match decision {
            GateDecision::Granted => ModulePresentation::Interactive,
            GateDecision::PlanLocked => ModulePresentation::Locked,
            GateDecision::RoleLocked => ModulePresentation::Hidden,
        }
    }
}

/// Audited gate over the evaluator and catalog.
///
/// The pure decision functions never log; UI surfaces that want their
/// grants and denials on the telemetry stream go through this wrapper
/// instead. Events are fire-and-forget.
#[derive(Debug, Clone, Copy)]
pub struct AccessGate<'a> {
    catalog: &'a PlanCatalog,
    evaluator: AccessEvaluator<'a>,
    audit_enabled: bool,
}

impl<'a> AccessGate<'a> {
    /// Creates a gate over the given tables.
    pub fn new(catalog: &'a PlanCatalog, evaluator: AccessEvaluator<'a>) -> Self {
        Self {
            catalog,
            evaluator,
            audit_enabled: true,
        }
    }

    /// Disables audit events (for testing).
    #[must_use]
    pub fn without_audit(mut self) -> Self {
        self.audit_enabled = false;
        self
    }

    /// Decides plan and role gating for a module.
    pub fn decide(&self, tier: PlanTier, user: Option<&User>, module: ModuleId) -> GateDecision {
        let decision = if !self.catalog.entitles(tier, module) {
            GateDecision::PlanLocked
        } else if user.is_some() && !self.evaluator.can_access_module(user, module) {
            GateDecision::RoleLocked
        } else {
            GateDecision::Granted
        };

        if self.audit_enabled {
            let user_id = user.and_then(|u| u.id.as_deref()).unwrap_or("-");
            let role = user.map(|u| u.role.name().to_string());
            match decision {
                GateDecision::Granted => debug!(
                    module = %module,
                    tier = %tier,
                    user = %user_id,
                    role = ?role,
                    "module access granted"
                ),
                GateDecision::PlanLocked | GateDecision::RoleLocked => warn!(
                    module = %module,
                    tier = %tier,
                    user = %user_id,
                    role = ?role,
                    decision = ?decision,
                    "module access denied"
                ),
            }
        }

        decision
    }

    /// The visual state for a module card.
    pub fn present(&self, tier: PlanTier, user: Option<&User>, module: ModuleId) -> ModulePresentation {
        self.decide(tier, user, module).into()
    }

    /// Splits module descriptors into (interactive, locked) lists, dropping
    /// hidden ones, each list order-preserving.
    pub fn partition_modules<'m, T: ModuleRef>(
        &self,
        tier: PlanTier,
        user: Option<&User>,
        all_modules: &'m [T],
    ) -> (Vec<&'m T>, Vec<&'m T>) {
        let mut interactive = Vec::new();
        let mut locked = Vec::new();
        for module in all_modules {
            match self.present(tier, user, module.module_id()) {
                ModulePresentation::Interactive => interactive.push(module),
                ModulePresentation::Locked => locked.push(module),
                ModulePresentation::Hidden => {}
            }
        }
        (interactive, locked)
    }
}
