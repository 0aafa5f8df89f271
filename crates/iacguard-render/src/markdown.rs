use crate::{RenderableReport, RenderableSeverity, RenderableStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# iacguard report\n\n");
    let status = match report.status {
        RenderableStatus::Pass => "PASS",
        RenderableStatus::Warn => "WARN",
        RenderableStatus::Fail => "FAIL",
    };
    let c = &report.counts;
    out.push_str(&format!(
        "- Verdict: **{}**\n- Resources: {}\n- Outcomes: {} passed / {} failed / {} skipped\n\n",
        status, c.resources, c.passed, c.failed, c.skipped
    ));

    for r in &report.reasons {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    if report.failures.is_empty() {
        out.push_str("No failed policies.\n");
        return out;
    }

    out.push_str("## Failed policies\n\n");
    out.push_str("| Severity | Resource | Policy | Reason |\n");
    out.push_str("|---|---|---|---|\n");

    for f in &report.failures {
        out.push_str(&format!(
            "| {} | `{}.{}` | `{}` {} | {} |\n",
            severity_label(f.severity),
            f.resource_type,
            f.resource_id,
            f.policy_id,
            escape_cell(&f.policy_name),
            escape_cell(f.reason.as_deref().unwrap_or("")),
        ));
    }

    out
}

fn severity_label(sev: RenderableSeverity) -> &'static str {
    match sev {
        RenderableSeverity::Low => "LOW",
        RenderableSeverity::Medium => "MEDIUM",
        RenderableSeverity::High => "HIGH",
        RenderableSeverity::Critical => "CRITICAL",
    }
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}
