//! Configuration management for CareGate
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. Environment variables (CAREGATE_* prefix)
//! 2. caregate.local.toml (gitignored, local overrides)
//! 3. caregate.toml (git-tracked, project config)
//! 4. ~/.config/caregate/config.toml (user defaults)
//! 5. Built-in defaults (lowest precedence)
//!
//! The access-control tables themselves ride along: `[roles]` and `[plans]`
//! sections in wire form override the shipped defaults per role entry and
//! per tier, matching the wholesale-replacement model the rest of the
//! system assumes. [`CaregateConfig::build_tables`] produces the merged
//! [`PermissionMatrix`] and [`PlanCatalog`] a session starts with.

use anyhow::Result;
use caregate_plans::{PlanCatalog, RawPlanCatalog};
use caregate_rbac::{PermissionMatrix, RawPermissionTable};
use caregate_types::PlanTier;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;

/// Main CareGate configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaregateConfig {
    pub organization: OrganizationConfig,
    pub audit: AuditConfig,
    /// Role permission table overrides, wire form. Each role entry present
    /// here replaces that role's grants wholesale.
    pub roles: RawPermissionTable,
    /// Plan catalog overrides, wire form. Each tier present here replaces
    /// that tier's entitlement list wholesale.
    pub plans: RawPlanCatalog,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationConfig {
    pub name: String,
    /// The organization's subscription tier.
    pub plan_tier: PlanTier,
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            name: "caregate-practice".to_string(),
            plan_tier: PlanTier::Free,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Whether gate decisions are logged to the telemetry stream.
    pub enabled: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl CaregateConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Load configuration from a specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Builds the session tables: shipped defaults with the configured
    /// overrides merged on top.
    pub fn build_tables(&self) -> (PermissionMatrix, PlanCatalog) {
        let mut matrix = PermissionMatrix::defaults();
        matrix.apply_raw(self.roles.clone());

        let mut catalog = PlanCatalog::defaults();
        catalog.apply_raw(self.plans.clone());

        (matrix, catalog)
    }
}
