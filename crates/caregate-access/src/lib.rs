//! # caregate-access: Access Evaluator
//!
//! The single decision point every CareGate UI surface consults before
//! rendering or enabling an affordance. Combines role grants and plan
//! entitlements with the special-case module rules:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Render request                              │
//! │  (user, plan tier, module id / action)       │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  AccessEvaluator                             │
//! │  ├─ Admin bypass (module access only)        │
//! │  ├─ Patient-only portal / admin-only panels  │
//! │  ├─ Open dashboard                           │
//! │  └─ Registry lookup → view grant             │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  Gate                                        │
//! │  ├─ Plan entitlement ∧ role access           │
//! │  └─ Granted / PlanLocked / RoleLocked        │
//! │     → Interactive / Locked / Hidden          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Every decision is a pure, synchronous computation over injected tables:
//! no I/O, no mutation, no caching. A missing user always resolves
//! fail-closed; the audited [`AccessGate`] is the only surface that logs.
//!
//! ## Examples
//!
//! ```
//! use caregate_access::{AccessEvaluator, ModuleRegistry, has_access};
//! use caregate_plans::PlanCatalog;
//! use caregate_rbac::PermissionMatrix;
//! use caregate_types::{ModuleId, PlanTier, Role, User};
//!
//! let matrix = PermissionMatrix::defaults();
//! let registry = ModuleRegistry::defaults();
//! let catalog = PlanCatalog::defaults();
//! let evaluator = AccessEvaluator::new(&matrix, &registry);
//!
//! let doctor = User::with_role(Role::Doctor);
//! assert!(evaluator.can_access_module(Some(&doctor), ModuleId::Ehr));
//!
//! // Plan gating applies on top of role gating
//! assert!(!has_access(&catalog, &evaluator, PlanTier::Starter, ModuleId::Ehr, Some(&doctor)));
//! assert!(has_access(&catalog, &evaluator, PlanTier::Professional, ModuleId::Ehr, Some(&doctor)));
//! ```

pub mod evaluator;
pub mod gate;
pub mod registry;

// Re-export commonly used types
pub use evaluator::{AccessEvaluator, ModuleRef, is_admin, is_patient, is_provider};
pub use gate::{AccessGate, GateDecision, ModulePresentation, has_access};
pub use registry::ModuleRegistry;
