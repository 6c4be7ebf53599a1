//! # caregate-plans: Plan Feature Table
//!
//! Maps each subscription tier to the feature modules it entitles,
//! independent of role:
//!
//! | Tier         | Entitled modules                                              |
//! |--------------|---------------------------------------------------------------|
//! | free         | — (fully plan-locked until upgrade)                           |
//! | starter      | practiceManagement, providerManagement, rcm, patientPortal    |
//! | professional | starter + ehr, telehealth, crm                                |
//! | enterprise   | professional + integrations                                   |
//!
//! Lookups are fail-closed; higher tiers are supersets by product convention
//! and [`PlanCatalog::tier_gaps`] reports where a loaded table breaks that
//! convention without rejecting it.
//!
//! ## Examples
//!
//! ```
//! use caregate_plans::PlanCatalog;
//! use caregate_types::{ModuleId, PlanTier};
//!
//! let catalog = PlanCatalog::defaults();
//! assert!(catalog.entitles(PlanTier::Starter, ModuleId::Rcm));
//! assert!(!catalog.entitles(PlanTier::Starter, ModuleId::Crm));
//! ```

pub mod catalog;

pub use catalog::{PlanCatalog, RawPlanCatalog};
