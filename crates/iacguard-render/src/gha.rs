use crate::{RenderableReport, RenderableSeverity};

/// Render failed outcomes as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} title={policy_id}::{message}`
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    for f in &report.failures {
        let level = match f.severity {
            RenderableSeverity::Critical | RenderableSeverity::High => "error",
            RenderableSeverity::Medium => "warning",
            RenderableSeverity::Low => "notice",
        };

        let mut message = format!("{}.{}: {}", f.resource_type, f.resource_id, f.policy_name);
        if let Some(reason) = &f.reason {
            message.push_str(&format!(" ({})", reason));
        }

        out.push(format!(
            "::{} title={}::{}",
            level,
            escape_property(&f.policy_id),
            escape_data(&message)
        ));
    }

    out
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
