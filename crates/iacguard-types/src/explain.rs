//! Explain registry for built-in policies.
//!
//! Maps policy IDs to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a policy.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the policy.
    pub title: &'static str,
    /// What the policy checks and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after HCL examples.
    pub examples: ExamplePair,
}

/// Before and after HCL examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Configuration that fails the policy.
    pub before: &'static str,
    /// Configuration that passes the policy.
    pub after: &'static str,
}

/// Look up an explanation by policy ID.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        ids::POLICY_STORAGE_CUSTOMER_MANAGED_KEY => Some(explain_storage_customer_managed_key()),
        ids::POLICY_STORAGE_NETWORK_RULES => Some(explain_storage_network_rules()),
        ids::POLICY_STORAGE_REQUIRED_TAGS => Some(explain_required_tags()),
        ids::POLICY_KEY_VAULT_NETWORK_ACLS => Some(explain_key_vault_network_acls()),
        ids::POLICY_KEY_VAULT_ACCESS_POLICY => Some(explain_key_vault_access_policy()),
        ids::POLICY_KEY_VAULT_REQUIRED_TAGS => Some(explain_required_tags()),
        _ => None,
    }
}

/// List all built-in policy IDs.
pub fn all_policy_ids() -> &'static [&'static str] {
    &[
        ids::POLICY_STORAGE_CUSTOMER_MANAGED_KEY,
        ids::POLICY_STORAGE_NETWORK_RULES,
        ids::POLICY_STORAGE_REQUIRED_TAGS,
        ids::POLICY_KEY_VAULT_NETWORK_ACLS,
        ids::POLICY_KEY_VAULT_ACCESS_POLICY,
        ids::POLICY_KEY_VAULT_REQUIRED_TAGS,
    ]
}

fn explain_storage_customer_managed_key() -> Explanation {
    Explanation {
        title: "Storage Account Customer-Managed Keys",
        description: "\
Requires storage accounts to encrypt data with a key held in Key Vault rather
than the platform-managed default. The `customer_managed_key` block must exist
and reference a key through a non-empty `key_vault_key_id`.",
        remediation: "\
Add a `customer_managed_key` block pointing at a Key Vault key and grant the
account's managed identity access to that key.",
        examples: ExamplePair {
            before: r#"resource "azurerm_storage_account" "data" {
  name                     = "data"
  account_tier             = "Standard"
  account_replication_type = "GRS"
}"#,
            after: r#"resource "azurerm_storage_account" "data" {
  name                     = "data"
  account_tier             = "Standard"
  account_replication_type = "GRS"

  customer_managed_key {
    key_vault_key_id          = azurerm_key_vault_key.data.id
    user_assigned_identity_id = azurerm_user_assigned_identity.data.id
  }
}"#,
        },
    }
}

fn explain_storage_network_rules() -> Explanation {
    Explanation {
        title: "Storage Account Network Rules",
        description: "\
Requires storage accounts to deny network traffic by default and to allow only
explicitly listed sources. `network_rules.default_action` must be `Deny` and at
least one of `ip_rules` or `virtual_network_subnet_ids` must be non-empty.",
        remediation: "\
Set `default_action = \"Deny\"` and list the address ranges or subnets that
need access.",
        examples: ExamplePair {
            before: r#"network_rules {
  default_action = "Allow"
}"#,
            after: r#"network_rules {
  default_action             = "Deny"
  ip_rules                   = ["203.0.113.0/24"]
  virtual_network_subnet_ids = [azurerm_subnet.app.id]
}"#,
        },
    }
}

fn explain_required_tags() -> Explanation {
    Explanation {
        title: "Required Project Tags",
        description: "\
Requires the `tags` map to carry the project ownership keys `deployed_via`,
`owner`, `Team` and `Environment`. Only key presence is checked; values are not
inspected.",
        remediation: "\
Add every missing key to `tags`. Keys are case-sensitive.",
        examples: ExamplePair {
            before: r#"tags = {
  owner = "platform"
}"#,
            after: r#"tags = {
  deployed_via = "terraform"
  owner        = "platform"
  Team         = "infra"
  Environment  = "prod"
}"#,
        },
    }
}

fn explain_key_vault_network_acls() -> Explanation {
    Explanation {
        title: "Key Vault Network ACLs",
        description: "\
Requires Key Vaults to deny network traffic by default while letting trusted
Azure services through. `network_acls.default_action` must be exactly `Deny` and
`bypass` must include the `AzureServices` token.",
        remediation: "\
Add a `network_acls` block with `default_action = \"Deny\"` and
`bypass = \"AzureServices\"`.",
        examples: ExamplePair {
            before: r#"network_acls {
  default_action = "Allow"
  bypass         = "None"
}"#,
            after: r#"network_acls {
  default_action = "Deny"
  bypass         = "AzureServices"
}"#,
        },
    }
}

fn explain_key_vault_access_policy() -> Explanation {
    Explanation {
        title: "Key Vault Least-Privilege Access Policies",
        description: "\
Flags access policies granting wildcard permissions. Any entry of
`key_permissions`, `secret_permissions` or `certificate_permissions` equal to
`*` or `all` (case-insensitive) fails the policy. Granting nothing passes.",
        remediation: "\
Replace wildcard grants with the specific operations the principal needs.",
        examples: ExamplePair {
            before: r#"secret_permissions = ["*"]"#,
            after: r#"secret_permissions = ["Get", "List"]"#,
        },
    }
}
