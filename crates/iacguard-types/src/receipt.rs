use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

/// Stable schema identifier for iacguard reports.
pub const SCHEMA_REPORT_V1: &str = "iacguard.report.v1";

/// Policy severity. Ordered: `Low < Medium < High < Critical`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed policy taxonomy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Networking,
    Iam,
    Encryption,
    GeneralSecurity,
    Logging,
    BackupAndRecovery,
    Kubernetes,
    Secrets,
    ApplicationSecurity,
    Convention,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Networking => "NETWORKING",
            Category::Iam => "IAM",
            Category::Encryption => "ENCRYPTION",
            Category::GeneralSecurity => "GENERAL_SECURITY",
            Category::Logging => "LOGGING",
            Category::BackupAndRecovery => "BACKUP_AND_RECOVERY",
            Category::Kubernetes => "KUBERNETES",
            Category::Secrets => "SECRETS",
            Category::ApplicationSecurity => "APPLICATION_SECURITY",
            Category::Convention => "CONVENTION",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one policy against one resource instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Passed,
    Failed,
    Skipped,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Passed => "PASSED",
            Verdict::Failed => "FAILED",
            Verdict::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the per-resource output consumed by reporting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyOutcome {
    pub policy_id: String,
    pub policy_name: String,
    pub severity: Severity,
    pub category: Category,
    pub verdict: Verdict,

    /// Diagnostic text only; never used for control flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceReport {
    pub resource_type: String,
    pub resource_id: String,
    /// In declared policy-set order.
    pub outcomes: Vec<PolicyOutcome>,
}

impl ResourceReport {
    pub fn failed(&self) -> impl Iterator<Item = &PolicyOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.verdict == Verdict::Failed)
    }
}

/// Whole-run status derived from failed outcomes and the `fail_on` threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OutcomeCounts {
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
}

impl OutcomeCounts {
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Passed => self.passed += 1,
            Verdict::Failed => self.failed += 1,
            Verdict::Skipped => self.skipped += 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AuditData {
    pub profile: String,
    pub fail_on: Severity,
    pub resources_scanned: u32,
    pub policies_active: u32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
}

/// The emitted `iacguard.report.v1` envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AuditReport {
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub status: RunStatus,
    pub counts: OutcomeCounts,
    pub resources: Vec<ResourceReport>,
    pub data: AuditData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_low_to_critical() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn vocabularies_serialize_as_upper_case_tags() {
        assert_eq!(
            serde_json::to_value(Severity::Critical).expect("serialize"),
            "CRITICAL"
        );
        assert_eq!(
            serde_json::to_value(Category::GeneralSecurity).expect("serialize"),
            "GENERAL_SECURITY"
        );
        assert_eq!(
            serde_json::to_value(Verdict::Skipped).expect("serialize"),
            "SKIPPED"
        );
        assert_eq!(serde_json::to_value(RunStatus::Warn).expect("serialize"), "warn");
    }

    #[test]
    fn outcome_reason_is_omitted_when_absent() {
        let outcome = PolicyOutcome {
            policy_id: "CKV_AZURE_CUSTOM_4".to_string(),
            policy_name: "acls".to_string(),
            severity: Severity::High,
            category: Category::Networking,
            verdict: Verdict::Passed,
            reason: None,
        };
        let json = serde_json::to_value(&outcome).expect("serialize");
        assert!(json.get("reason").is_none());
        assert_eq!(json["category"], "NETWORKING");
    }

    #[test]
    fn counts_record_each_verdict() {
        let mut counts = OutcomeCounts::default();
        counts.record(Verdict::Passed);
        counts.record(Verdict::Failed);
        counts.record(Verdict::Failed);
        counts.record(Verdict::Skipped);
        assert_eq!(
            counts,
            OutcomeCounts {
                passed: 1,
                failed: 2,
                skipped: 1
            }
        );
    }
}
