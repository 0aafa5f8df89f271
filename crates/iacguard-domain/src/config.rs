use iacguard_types::Severity;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolicyOverride {
    pub enabled: Option<bool>,
    pub severity: Option<Severity>,
}

/// Resolved run configuration consumed by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub profile: String,
    /// Lowest severity whose failures fail the run.
    pub fail_on: Severity,
    /// Emit SKIPPED outcomes for policies that do not target a resource's type.
    pub report_skipped: bool,
    pub policies: BTreeMap<String, PolicyOverride>,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            profile: "strict".to_string(),
            fail_on: Severity::Low,
            report_skipped: false,
            policies: BTreeMap::new(),
        }
    }
}

impl EffectiveConfig {
    pub fn is_enabled(&self, policy_id: &str) -> bool {
        self.policies
            .get(policy_id)
            .and_then(|p| p.enabled)
            .unwrap_or(true)
    }

    pub fn severity_override(&self, policy_id: &str) -> Option<Severity> {
        self.policies.get(policy_id).and_then(|p| p.severity)
    }

    pub fn disable(&mut self, policy_id: &str) {
        self.policies
            .entry(policy_id.to_string())
            .or_default()
            .enabled = Some(false);
    }

    pub fn override_severity(&mut self, policy_id: &str, severity: Severity) {
        self.policies
            .entry(policy_id.to_string())
            .or_default()
            .severity = Some(severity);
    }
}
