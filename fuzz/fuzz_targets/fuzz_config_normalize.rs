//! Fuzz target for configuration normalization and the built-in catalog.
//!
//! Goal: normalizing arbitrary JSON and running every built-in policy against it
//! must **never panic**. Every policy yields PASSED or FAILED.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_normalize
//! ```

#![no_main]

use iacguard_domain::config::EffectiveConfig;
use iacguard_domain::node::ConfigNode;
use iacguard_types::Verdict;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    let node = ConfigNode::from_json(&value);
    let Ok(set) = iacguard_domain::catalog::builtin_policy_set(&EffectiveConfig::default()) else {
        return;
    };
    for policy in set.policies() {
        let eval = policy.rule().evaluate(&node);
        assert_ne!(eval.verdict, Verdict::Skipped);
    }
});
