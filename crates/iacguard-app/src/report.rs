use anyhow::Context;
use camino::Utf8Path;
use iacguard_render::{
    RenderableCounts, RenderableFailure, RenderableReport, RenderableSeverity, RenderableStatus,
};
use iacguard_types::{
    AuditData, AuditReport, OutcomeCounts, RunStatus, SCHEMA_REPORT_V1, Severity, ToolMeta, ids,
};
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<AuditReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse iacguard report")
}

pub fn serialize_report(report: &AuditReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn read_report(path: &Utf8Path) -> anyhow::Result<AuditReport> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read report: {}", path))?;
    parse_report_json(&text)
}

pub fn write_report(path: &Utf8Path, report: &AuditReport) -> anyhow::Result<()> {
    let data = serialize_report(report)?;
    write_bytes(path, &data).with_context(|| format!("write report: {}", path))
}

pub fn write_text(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    write_bytes(path, text.as_bytes()).with_context(|| format!("write text: {}", path))
}

fn write_bytes(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, data)?;
    Ok(())
}

/// Report emitted when the tool itself failed: status `fail`, no outcomes, and a
/// `tool.runtime` reason carrying the error message.
pub fn runtime_error_report(message: &str) -> AuditReport {
    let now = OffsetDateTime::now_utc();
    AuditReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "iacguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: now,
        finished_at: now,
        status: RunStatus::Fail,
        counts: OutcomeCounts::default(),
        resources: Vec::new(),
        data: AuditData {
            profile: "unknown".to_string(),
            fail_on: Severity::Low,
            resources_scanned: 0,
            policies_active: 0,
            reasons: vec![format!("{}: {}", ids::TOOL_RUNTIME, message)],
        },
    }
}

pub fn to_renderable(report: &AuditReport) -> RenderableReport {
    let failures = report
        .resources
        .iter()
        .flat_map(|r| {
            r.failed().map(move |o| RenderableFailure {
                resource_type: r.resource_type.clone(),
                resource_id: r.resource_id.clone(),
                policy_id: o.policy_id.clone(),
                policy_name: o.policy_name.clone(),
                severity: map_severity(o.severity),
                reason: o.reason.clone(),
            })
        })
        .collect();

    RenderableReport {
        status: match report.status {
            RunStatus::Pass => RenderableStatus::Pass,
            RunStatus::Warn => RenderableStatus::Warn,
            RunStatus::Fail => RenderableStatus::Fail,
        },
        counts: RenderableCounts {
            resources: report.data.resources_scanned,
            passed: report.counts.passed,
            failed: report.counts.failed,
            skipped: report.counts.skipped,
        },
        failures,
        reasons: report.data.reasons.clone(),
    }
}

fn map_severity(severity: Severity) -> RenderableSeverity {
    match severity {
        Severity::Low => RenderableSeverity::Low,
        Severity::Medium => RenderableSeverity::Medium,
        Severity::High => RenderableSeverity::High,
        Severity::Critical => RenderableSeverity::Critical,
    }
}
