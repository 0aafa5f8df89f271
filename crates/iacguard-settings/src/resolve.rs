use crate::{model::IacguardConfigV1, presets};
use anyhow::Context;
use iacguard_domain::config::EffectiveConfig;
use iacguard_types::{Severity, explain};

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub fail_on: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: IacguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let mut effective = presets::preset(&profile);

    if let Some(report_skipped) = cfg.report_skipped {
        effective.report_skipped = report_skipped;
    }

    // per-policy overrides
    for (policy_id, pc) in cfg.policies.iter() {
        if !explain::all_policy_ids().iter().any(|id| *id == policy_id.as_str()) {
            anyhow::bail!("unknown policy id in config: {policy_id}");
        }
        let entry = effective.policies.entry(policy_id.clone()).or_default();
        if let Some(enabled) = pc.enabled {
            entry.enabled = Some(enabled);
        }
        if let Some(sev) = pc.severity.as_deref() {
            entry.severity = Some(
                parse_severity(sev).with_context(|| format!("invalid severity for {policy_id}"))?,
            );
        }
    }

    // fail_on: CLI beats file beats profile
    if let Some(fail_on_s) = overrides.fail_on.as_deref().or(cfg.fail_on.as_deref()) {
        effective.fail_on = parse_severity(fail_on_s).context("invalid fail_on")?;
    }

    Ok(ResolvedConfig { effective })
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v.to_ascii_lowercase().as_str() {
        "low" => Ok(Severity::Low),
        "medium" => Ok(Severity::Medium),
        "high" => Ok(Severity::High),
        "critical" => Ok(Severity::Critical),
        _ => anyhow::bail!("unknown severity: {v} (expected low|medium|high|critical)"),
    }
}
