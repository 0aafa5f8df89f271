use super::{EXCESSIVE_PERMISSIONS, REQUIRED_TAGS};
use crate::patterns::{DefaultActionGate, DenySetScan, RequiredKeys};
use crate::policy::{PolicyDefinition, PolicySetBuilder};
use iacguard_types::{Category, Severity, ids};

pub fn register(builder: &mut PolicySetBuilder) {
    builder
        .register(
            PolicyDefinition::new(
                ids::POLICY_KEY_VAULT_NETWORK_ACLS,
                "Ensure Key Vault has restrictive network ACLs configured",
                Category::Networking,
                Severity::High,
                DefaultActionGate::new("network_acls", "default_action", "Deny")
                    .with_exception("bypass", "AzureServices"),
            )
            .targeting([ids::RESOURCE_KEY_VAULT]),
        )
        .register(
            PolicyDefinition::new(
                ids::POLICY_KEY_VAULT_ACCESS_POLICY,
                "Ensure Key Vault access policies follow least privilege principle",
                Category::Iam,
                Severity::Medium,
                DenySetScan::new(
                    [
                        "key_permissions",
                        "secret_permissions",
                        "certificate_permissions",
                    ],
                    EXCESSIVE_PERMISSIONS,
                ),
            )
            .targeting([ids::RESOURCE_KEY_VAULT_ACCESS_POLICY]),
        )
        .register(
            PolicyDefinition::new(
                ids::POLICY_KEY_VAULT_REQUIRED_TAGS,
                "Ensure Key Vault has required project tags",
                Category::GeneralSecurity,
                Severity::Low,
                RequiredKeys::new("tags", REQUIRED_TAGS),
            )
            .targeting([ids::RESOURCE_KEY_VAULT]),
        );
}
