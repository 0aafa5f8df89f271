//! The `explain` use case: look up policy documentation.

use iacguard_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(Explanation),
    /// Unknown identifier; includes the available policy ids.
    NotFound {
        identifier: String,
        available_policy_ids: &'static [&'static str],
    },
}

/// Look up an explanation for a policy id.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_policy_ids: explain::all_policy_ids(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\nRemediation\n-----------\n");
    out.push_str(exp.remediation);
    out.push_str("\n\nExamples\n--------\n\n");
    out.push_str("Before (violation):\n```hcl\n");
    out.push_str(exp.examples.before);
    out.push_str("\n```\n\nAfter (fixed):\n```hcl\n");
    out.push_str(exp.examples.after);
    out.push_str("\n```\n");

    out
}

pub fn format_not_found(identifier: &str, policy_ids: &[&'static str]) -> String {
    let mut out = format!("Unknown policy id: {}\n\nAvailable policy ids:\n", identifier);
    for id in policy_ids {
        out.push_str(&format!("  - {}\n", id));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use iacguard_types::ids;

    #[test]
    fn explain_known_policy_id() {
        let output = run_explain(ids::POLICY_KEY_VAULT_ACCESS_POLICY);
        assert!(matches!(output, ExplainOutput::Found(_)));
    }

    #[test]
    fn explain_unknown_lists_catalog() {
        match run_explain("CKV_AZURE_CUSTOM_99") {
            ExplainOutput::NotFound {
                identifier,
                available_policy_ids,
            } => {
                assert_eq!(identifier, "CKV_AZURE_CUSTOM_99");
                assert_eq!(available_policy_ids.len(), 6);
            }
            ExplainOutput::Found(_) => panic!("expected NotFound"),
        }
    }

    #[test]
    fn format_explanation_output() {
        let exp = explain::lookup_explanation(ids::POLICY_STORAGE_NETWORK_RULES).expect("known");
        let formatted = format_explanation(&exp);
        assert!(formatted.starts_with(exp.title));
        assert!(formatted.contains("Remediation"));
        assert!(formatted.contains("```hcl"));
    }

    #[test]
    fn format_not_found_output() {
        let formatted = format_not_found("missing", &["A_1", "B_2"]);
        assert!(formatted.contains("Unknown policy id: missing"));
        assert!(formatted.contains("  - A_1\n"));
        assert!(formatted.contains("  - B_2\n"));
    }
}
