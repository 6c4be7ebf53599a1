//! # CareGate
//!
//! Role and plan access control for a multi-tenant healthcare
//! practice-management product.
//!
//! CareGate decides, from a user's role and the organization's subscription
//! tier, whether a feature module or UI affordance is interactive, visibly
//! locked, or hidden. Every decision is a pure, synchronous lookup over
//! in-memory tables loaded once at session start:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          CareGate                            │
//! │  ┌──────────┐   ┌──────────┐   ┌───────────┐   ┌──────────┐  │
//! │  │  Matrix  │ + │ Catalog  │ → │ Evaluator │ → │   Gate   │  │
//! │  │ (grants) │   │ (plans)  │   │  (pure)   │   │ (audited)│  │
//! │  └──────────┘   └──────────┘   └───────────┘   └──────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use caregate::{ModuleId, PlanTier, Role, Session, User};
//!
//! let session = Session::new(
//!     caregate::PermissionMatrix::defaults(),
//!     caregate::PlanCatalog::defaults(),
//!     PlanTier::Professional,
//! );
//!
//! let doctor = User::with_role(Role::Doctor);
//! assert!(session.has_access(Some(&doctor), ModuleId::Ehr));
//! assert!(!session.has_access(Some(&doctor), ModuleId::Rcm)); // role-locked
//! ```
//!
//! # Modules
//!
//! - **Session layer**: [`Session`] - owns the loaded tables
//! - **Vocabulary**: roles, actions, module ids, plan tiers
//! - **Tables**: [`PermissionMatrix`], [`PlanCatalog`], [`ModuleRegistry`]
//! - **Decisions**: [`AccessEvaluator`], [`AccessGate`], [`has_access`]

mod session;

// Session layer - main API
pub use session::Session;

// Re-export core vocabulary from caregate-types
pub use caregate_types::{
    Action, CustomRoleName, ModuleId, PermissionModule, PlanTier, Role, RoleId, RoleNameError,
    User,
};

// Re-export the permission table
pub use caregate_rbac::{MatrixError, PermissionMatrix, RawPermissionTable, RoleGrants};

// Re-export the plan catalog
pub use caregate_plans::{PlanCatalog, RawPlanCatalog};

// Re-export the decision layer
pub use caregate_access::{
    AccessEvaluator, AccessGate, GateDecision, ModulePresentation, ModuleRef, ModuleRegistry,
    has_access, is_admin, is_patient, is_provider,
};

// Re-export configuration
pub use caregate_config::{CaregateConfig, ConfigError, ConfigLoader};
