//! Stable identifiers for built-in policies and the resource types they target.
//!
//! Policy IDs follow `CATEGORY_PREFIX_<n>`.

// Policies: storage account
pub const POLICY_STORAGE_CUSTOMER_MANAGED_KEY: &str = "CKV_AZURE_CUSTOM_1";
pub const POLICY_STORAGE_NETWORK_RULES: &str = "CKV_AZURE_CUSTOM_2";
pub const POLICY_STORAGE_REQUIRED_TAGS: &str = "CKV_AZURE_CUSTOM_3";

// Policies: key vault
pub const POLICY_KEY_VAULT_NETWORK_ACLS: &str = "CKV_AZURE_CUSTOM_4";
pub const POLICY_KEY_VAULT_ACCESS_POLICY: &str = "CKV_AZURE_CUSTOM_5";
pub const POLICY_KEY_VAULT_REQUIRED_TAGS: &str = "CKV_AZURE_CUSTOM_6";

// Resource types
pub const RESOURCE_STORAGE_ACCOUNT: &str = "azurerm_storage_account";
pub const RESOURCE_KEY_VAULT: &str = "azurerm_key_vault";
pub const RESOURCE_KEY_VAULT_ACCESS_POLICY: &str = "azurerm_key_vault_access_policy";

// Tool-level
pub const TOOL_RUNTIME: &str = "tool.runtime";
pub const REASON_CONFIG_MISSING_DEFAULTED: &str = "config_missing_defaulted";
