use crate::config::EffectiveConfig;
use crate::model::ResourceInstance;
use crate::policy::{Evaluation, PolicyDefinition, PolicySet};
use crate::report::DomainReport;
use iacguard_types::{OutcomeCounts, PolicyOutcome, ResourceReport, RunStatus, Severity, Verdict};
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error};

/// Run every policy targeting `resource.resource_type`, in policy-set order.
pub fn evaluate<'a>(
    resource: &ResourceInstance,
    set: &'a PolicySet,
) -> Vec<(&'a PolicyDefinition, Evaluation)> {
    set.policies()
        .iter()
        .filter(|p| p.applies_to(&resource.resource_type))
        .map(|p| (p, run_rule(p, resource)))
        .collect()
}

/// Like [`evaluate`], but policies that do not target the resource type are
/// reported as SKIPPED instead of omitted.
pub fn evaluate_exhaustive<'a>(
    resource: &ResourceInstance,
    set: &'a PolicySet,
) -> Vec<(&'a PolicyDefinition, Evaluation)> {
    set.policies()
        .iter()
        .map(|p| {
            if p.applies_to(&resource.resource_type) {
                (p, run_rule(p, resource))
            } else {
                (
                    p,
                    Evaluation::skipped(format!(
                        "resource type {} is not targeted",
                        resource.resource_type
                    )),
                )
            }
        })
        .collect()
}

pub fn evaluate_resource(
    resource: &ResourceInstance,
    set: &PolicySet,
    cfg: &EffectiveConfig,
) -> ResourceReport {
    let evaluations = if cfg.report_skipped {
        evaluate_exhaustive(resource, set)
    } else {
        evaluate(resource, set)
    };
    debug!(
        resource_type = %resource.resource_type,
        resource_id = %resource.resource_id,
        policies = evaluations.len(),
        "evaluated resource"
    );

    ResourceReport {
        resource_type: resource.resource_type.clone(),
        resource_id: resource.resource_id.clone(),
        outcomes: evaluations
            .into_iter()
            .map(|(policy, eval)| to_outcome(policy, eval))
            .collect(),
    }
}

/// Evaluate a whole run. Resources are spread over the rayon pool; output keeps
/// input order.
pub fn audit(
    resources: &[ResourceInstance],
    set: &PolicySet,
    cfg: &EffectiveConfig,
) -> DomainReport {
    let reports: Vec<ResourceReport> = resources
        .par_iter()
        .map(|r| evaluate_resource(r, set, cfg))
        .collect();

    let mut counts = OutcomeCounts::default();
    for outcome in reports.iter().flat_map(|r| &r.outcomes) {
        counts.record(outcome.verdict);
    }
    let status = compute_status(&reports, cfg.fail_on);

    DomainReport {
        status,
        counts,
        resources: reports,
        policies_active: set.len() as u32,
    }
}

pub fn to_outcome(policy: &PolicyDefinition, eval: Evaluation) -> PolicyOutcome {
    PolicyOutcome {
        policy_id: policy.id.clone(),
        policy_name: policy.name.clone(),
        severity: policy.severity,
        category: policy.category,
        verdict: eval.verdict,
        reason: eval.reason,
    }
}

fn compute_status(reports: &[ResourceReport], fail_on: Severity) -> RunStatus {
    let mut status = RunStatus::Pass;
    for outcome in reports.iter().flat_map(|r| r.failed()) {
        if outcome.severity >= fail_on {
            return RunStatus::Fail;
        }
        status = RunStatus::Warn;
    }
    status
}

/// A panicking rule is an engine fault: it degrades to FAILED for this pair only.
fn run_rule(policy: &PolicyDefinition, resource: &ResourceInstance) -> Evaluation {
    match panic::catch_unwind(AssertUnwindSafe(|| policy.rule().evaluate(&resource.config))) {
        Ok(eval) => eval,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!(
                policy_id = %policy.id,
                resource_type = %resource.resource_type,
                resource_id = %resource.resource_id,
                "policy rule panicked: {message}"
            );
            Evaluation {
                verdict: Verdict::Failed,
                reason: Some(format!("policy evaluation fault: {message}")),
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
