//! The plan tier → entitled modules catalog.

use std::collections::{BTreeMap, BTreeSet};

use caregate_types::{ModuleId, PlanTier};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Wire form of the catalog: tier name → list of module ids.
pub type RawPlanCatalog = BTreeMap<String, Vec<String>>;

/// Maps each plan tier to the modules it entitles.
///
/// Entitlement is independent of role. Lookups are fail-closed: a tier with
/// no entry, or a module not listed for the tier, is not entitled. The
/// catalog is deploy-time configuration; there is no runtime mutation path
/// beyond wholesale replacement at load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanCatalog {
    entitlements: BTreeMap<PlanTier, BTreeSet<ModuleId>>,
}

impl PlanCatalog {
    /// Creates a catalog that entitles nothing.
    pub fn empty() -> Self {
        Self {
            entitlements: BTreeMap::new(),
        }
    }

    /// The product's shipped plan catalog.
    ///
    /// The free tier entitles nothing: it exists so a trial organization has
    /// a well-defined, fully plan-locked state until upgraded.
    pub fn defaults() -> Self {
        use ModuleId::{
            Crm, Ehr, Integrations, PatientPortal, PracticeManagement, ProviderManagement, Rcm,
            Telehealth,
        };

        let mut catalog = Self::empty();
        catalog.set_entitlements(PlanTier::Free, []);
        catalog.set_entitlements(
            PlanTier::Starter,
            [PracticeManagement, ProviderManagement, Rcm, PatientPortal],
        );
        catalog.set_entitlements(
            PlanTier::Professional,
            [
                PracticeManagement,
                ProviderManagement,
                Ehr,
                Telehealth,
                Rcm,
                Crm,
                PatientPortal,
            ],
        );
        catalog.set_entitlements(
            PlanTier::Enterprise,
            [
                PracticeManagement,
                ProviderManagement,
                Ehr,
                Telehealth,
                Rcm,
                Crm,
                Integrations,
                PatientPortal,
            ],
        );
        catalog
    }

    /// Returns whether the tier entitles the module. Fail-closed.
    pub fn entitles(&self, tier: PlanTier, module: ModuleId) -> bool {
        self.entitlements
            .get(&tier)
            .is_some_and(|modules| modules.contains(&module))
    }

    /// The modules a tier entitles. Empty for an unconfigured tier.
    pub fn modules_for(&self, tier: PlanTier) -> impl Iterator<Item = ModuleId> + '_ {
        self.entitlements
            .get(&tier)
            .into_iter()
            .flat_map(|modules| modules.iter().copied())
    }

    /// Replaces a tier's entitlement list wholesale.
    pub fn set_entitlements(&mut self, tier: PlanTier, modules: impl IntoIterator<Item = ModuleId>) {
        self.entitlements
            .insert(tier, modules.into_iter().collect());
    }

    /// Builds a catalog from the wire form.
    ///
    /// Unknown tier names and unknown module ids are skipped with a warning;
    /// they can only ever deny.
    pub fn from_raw(raw: RawPlanCatalog) -> Self {
        let mut catalog = Self::empty();
        catalog.apply_raw(raw);
        catalog
    }

    /// Merges the wire form into this catalog. Tiers present in the wire
    /// table are replaced wholesale; tiers not mentioned are untouched.
    pub fn apply_raw(&mut self, raw: RawPlanCatalog) {
        for (tier_name, module_names) in raw {
            let Some(tier) = PlanTier::from_wire_name(&tier_name) else {
                warn!(tier = %tier_name, "skipping unknown plan tier");
                continue;
            };
            let modules: Vec<ModuleId> = module_names
                .iter()
                .filter_map(|name| {
                    let module = ModuleId::from_wire_name(name);
                    if module.is_none() {
                        warn!(tier = %tier_name, module = %name, "skipping unknown module id in plan");
                    }
                    module
                })
                .collect();
            self.set_entitlements(tier, modules);
        }
    }

    /// Reports entitlements that break the by-convention tier ordering:
    /// every (tier, module) pair entitled at some tier but missing from a
    /// higher one.
    ///
    /// Advisory only. Higher tiers are expected to be supersets by product
    /// intent, but the catalog never rejects a table that is not.
    pub fn tier_gaps(&self) -> Vec<(PlanTier, ModuleId)> {
        let mut gaps = Vec::new();
        for window in PlanTier::ALL.windows(2) {
            let (lower, higher) = (window[0], window[1]);
            for module in self.modules_for(lower) {
                if !self.entitles(higher, module) {
                    gaps.push((higher, module));
                }
            }
        }
        gaps
    }
}

impl Default for PlanCatalog {
    fn default() -> Self {
        Self::defaults()
    }
}
