use super::REQUIRED_TAGS;
use crate::patterns::{RequiredBlockField, RequiredKeys, RestrictedDefaultGate};
use crate::policy::{PolicyDefinition, PolicySetBuilder};
use iacguard_types::{Category, Severity, ids};

pub fn register(builder: &mut PolicySetBuilder) {
    builder
        .register(
            PolicyDefinition::new(
                ids::POLICY_STORAGE_CUSTOMER_MANAGED_KEY,
                "Ensure Storage Account uses customer-managed keys for encryption",
                Category::Encryption,
                Severity::High,
                RequiredBlockField::new("customer_managed_key", "key_vault_key_id"),
            )
            .targeting([ids::RESOURCE_STORAGE_ACCOUNT]),
        )
        .register(
            PolicyDefinition::new(
                ids::POLICY_STORAGE_NETWORK_RULES,
                "Ensure Storage Account has restrictive network access rules configured",
                Category::Networking,
                Severity::Medium,
                RestrictedDefaultGate::new(
                    "network_rules",
                    "default_action",
                    "Deny",
                    ["ip_rules", "virtual_network_subnet_ids"],
                ),
            )
            .targeting([ids::RESOURCE_STORAGE_ACCOUNT]),
        )
        .register(
            PolicyDefinition::new(
                ids::POLICY_STORAGE_REQUIRED_TAGS,
                "Ensure Storage Account has required project tags",
                Category::GeneralSecurity,
                Severity::Low,
                RequiredKeys::new("tags", REQUIRED_TAGS),
            )
            .targeting([ids::RESOURCE_STORAGE_ACCOUNT]),
        );
}
