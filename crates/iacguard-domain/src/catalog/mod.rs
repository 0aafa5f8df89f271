//! Built-in Azure policy catalog.

use crate::config::EffectiveConfig;
use crate::policy::{PolicyError, PolicySet, PolicySetBuilder};

mod key_vault;
mod storage_account;


/// Keys every project resource must carry in `tags`.
pub const REQUIRED_TAGS: [&str; 4] = ["deployed_via", "owner", "Team", "Environment"];

/// Grants that are never acceptable in a Key Vault access policy.
pub const EXCESSIVE_PERMISSIONS: [&str; 2] = ["*", "all"];

/// Register the built-in policies in catalog order.
pub fn register_builtin(builder: &mut PolicySetBuilder) {
    storage_account::register(builder);
    key_vault::register(builder);
}

/// The built-in catalog, filtered and re-ranked by `cfg`.
pub fn builtin_policy_set(cfg: &EffectiveConfig) -> Result<PolicySet, PolicyError> {
    let mut builder = PolicySet::builder();
    register_builtin(&mut builder);
    builder.configure(cfg).build()
}
