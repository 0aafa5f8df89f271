//! The `audit` use case: evaluate the policy catalog and produce a report.

use anyhow::Context;
use camino::Utf8Path;
use iacguard_domain::model::{RawResource, ResourceInstance};
use iacguard_settings::{Overrides, ResolvedConfig};
use iacguard_types::{
    AuditData, AuditReport, Category, RunStatus, SCHEMA_REPORT_V1, Severity, ToolMeta, ids,
};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::info;

/// Input for the audit use case.
#[derive(Clone, Debug)]
pub struct AuditInput<'a> {
    /// Resource declarations as JSON (a bare array or `{"resources": [...]}`).
    pub resources_json: &'a str,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the audit use case.
#[derive(Clone, Debug)]
pub struct AuditOutput {
    pub report: AuditReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// One row of `iacguard policies`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicySummary {
    pub id: String,
    pub name: String,
    pub severity: Severity,
    pub category: Category,
    pub targets: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ResourceDocument {
    Bare(Vec<RawResource>),
    Wrapped { resources: Vec<RawResource> },
}

/// Parse the resource interchange document handed over by the HCL parser.
pub fn parse_resources(text: &str) -> anyhow::Result<Vec<ResourceInstance>> {
    let doc: ResourceDocument = serde_json::from_str(text).context("parse resources json")?;
    let raw = match doc {
        ResourceDocument::Bare(raw) => raw,
        ResourceDocument::Wrapped { resources } => resources,
    };
    Ok(raw.into_iter().map(ResourceInstance::from).collect())
}

pub fn load_resources(path: &Utf8Path) -> anyhow::Result<Vec<ResourceInstance>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read resources: {}", path))?;
    parse_resources(&text).with_context(|| format!("load resources: {}", path))
}

fn resolve(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    // Empty is allowed, defaults apply.
    let cfg = if config_text.trim().is_empty() {
        iacguard_settings::IacguardConfigV1::default()
    } else {
        iacguard_settings::parse_config_toml(config_text).context("parse config")?
    };
    iacguard_settings::resolve_config(cfg, overrides).context("resolve config")
}

/// Run the audit use case: resolve config, build the policy set, evaluate every resource.
pub fn run_audit(input: AuditInput<'_>) -> anyhow::Result<AuditOutput> {
    let started_at = OffsetDateTime::now_utc();

    let resolved = resolve(input.config_text, input.overrides.clone())?;
    let set = iacguard_domain::catalog::builtin_policy_set(&resolved.effective)
        .context("build policy set")?;
    let resources = parse_resources(input.resources_json)?;

    info!(
        resources = resources.len(),
        policies = set.len(),
        profile = %resolved.effective.profile,
        "starting audit"
    );

    let domain = iacguard_domain::audit(&resources, &set, &resolved.effective);

    let mut reasons = Vec::new();
    if input.config_text.trim().is_empty() {
        reasons.push(ids::REASON_CONFIG_MISSING_DEFAULTED.to_string());
    }

    let report = AuditReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "iacguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        status: domain.status,
        counts: domain.counts,
        resources: domain.resources,
        data: AuditData {
            profile: resolved.effective.profile.clone(),
            fail_on: resolved.effective.fail_on,
            resources_scanned: resources.len() as u32,
            policies_active: domain.policies_active,
            reasons,
        },
    };

    info!(
        status = ?report.status,
        passed = report.counts.passed,
        failed = report.counts.failed,
        "audit finished"
    );

    Ok(AuditOutput {
        report,
        resolved_config: resolved,
    })
}

/// The active catalog after config filtering and severity overrides, in catalog order.
pub fn list_policies(config_text: &str, overrides: Overrides) -> anyhow::Result<Vec<PolicySummary>> {
    let resolved = resolve(config_text, overrides)?;
    let set = iacguard_domain::catalog::builtin_policy_set(&resolved.effective)
        .context("build policy set")?;
    Ok(set
        .policies()
        .iter()
        .map(|p| PolicySummary {
            id: p.id.clone(),
            name: p.name.clone(),
            severity: p.severity,
            category: p.category,
            targets: p.target_types.iter().cloned().collect(),
        })
        .collect())
}

/// Map run status to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(status: RunStatus) -> i32 {
    match status {
        RunStatus::Pass => 0,
        RunStatus::Warn => 0,
        RunStatus::Fail => 2,
    }
}
