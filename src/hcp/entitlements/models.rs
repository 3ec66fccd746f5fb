//! Entitlement data models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, TfeError};

/// Organization-level feature flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Entitlement {
    Agents,
    AuditLogging,
    ConfigurationDesigner,
    CostEstimation,
    GlobalRunTasks,
    ModuleTestsGeneration,
    Operations,
    PrivateModuleRegistry,
    PrivateRunTasks,
    PrivatePolicyAgents,
    RunTasks,
    SelfServeBilling,
    Sentinel,
    Sso,
    StateStorage,
    Teams,
    UsageReporting,
    VcsIntegrations,
}

impl Entitlement {
    /// Attribute name in the entitlement-set document
    pub fn as_str(&self) -> &'static str {
        match self {
            Entitlement::Agents => "agents",
            Entitlement::AuditLogging => "audit-logging",
            Entitlement::ConfigurationDesigner => "configuration-designer",
            Entitlement::CostEstimation => "cost-estimation",
            Entitlement::GlobalRunTasks => "global-run-tasks",
            Entitlement::ModuleTestsGeneration => "module-tests-generation",
            Entitlement::Operations => "operations",
            Entitlement::PrivateModuleRegistry => "private-module-registry",
            Entitlement::PrivateRunTasks => "private-run-tasks",
            Entitlement::PrivatePolicyAgents => "private-policy-agents",
            Entitlement::RunTasks => "run-tasks",
            Entitlement::SelfServeBilling => "self-serve-billing",
            Entitlement::Sentinel => "sentinel",
            Entitlement::Sso => "sso",
            Entitlement::StateStorage => "state-storage",
            Entitlement::Teams => "teams",
            Entitlement::UsageReporting => "usage-reporting",
            Entitlement::VcsIntegrations => "vcs-integrations",
        }
    }
}

impl fmt::Display for Entitlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entitlement set document from TFE API
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct EntitlementSetResource {
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

/// Entitlements granted to one organization
///
/// Attributes that are not booleans (e.g. `user-limit`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntitlementSet {
    organization: String,
    granted: BTreeMap<String, bool>,
}

impl EntitlementSet {
    /// Build a set from the entitlements an organization is known to have
    pub fn new(organization: &str, granted: &[Entitlement]) -> Self {
        Self {
            organization: organization.to_string(),
            granted: granted
                .iter()
                .map(|e| (e.as_str().to_string(), true))
                .collect(),
        }
    }

    /// Build from the attributes of an entitlement-set resource
    pub fn from_resource(organization: &str, resource: &EntitlementSetResource) -> Self {
        Self {
            organization: organization.to_string(),
            granted: resource
                .attributes
                .iter()
                .filter_map(|(k, v)| v.as_bool().map(|b| (k.clone(), b)))
                .collect(),
        }
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn has(&self, entitlement: Entitlement) -> bool {
        self.granted
            .get(entitlement.as_str())
            .copied()
            .unwrap_or(false)
    }

    /// Required entitlements this set lacks, in the order given
    pub fn missing(&self, required: &[Entitlement]) -> Vec<Entitlement> {
        required.iter().copied().filter(|e| !self.has(*e)).collect()
    }

    /// Fail with `MissingEntitlements` unless every required entitlement is granted
    pub fn ensure(&self, required: &[Entitlement]) -> Result<()> {
        let missing = self.missing(required);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(TfeError::MissingEntitlements {
                organization: self.organization.clone(),
                missing,
            })
        }
    }
}
