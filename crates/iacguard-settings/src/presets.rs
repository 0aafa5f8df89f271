use iacguard_domain::config::EffectiveConfig;
use iacguard_types::Severity;

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "advisory" => advisory_profile(),
        // default
        _ => strict_profile(),
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig::default()
}

fn advisory_profile() -> EffectiveConfig {
    // Low and medium findings are surfaced but do not fail the run.
    EffectiveConfig {
        profile: "advisory".to_string(),
        fail_on: Severity::High,
        ..EffectiveConfig::default()
    }
}
