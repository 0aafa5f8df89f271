//! Fuzz target for `iacguard.toml` parsing and resolution.
//!
//! Goal: parsing and resolving arbitrary text may return errors but must
//! **never panic**.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_toml
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(cfg) = iacguard_settings::parse_config_toml(text) else {
        return;
    };
    if let Ok(resolved) = iacguard_settings::resolve_config(cfg, Default::default()) {
        let _ = iacguard_domain::catalog::builtin_policy_set(&resolved.effective);
    }
});
