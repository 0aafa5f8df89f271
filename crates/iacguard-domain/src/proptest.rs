//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - wrapping-insensitive block access
//! - deny-set scans and required-key sets
//! - absence handling of the default-action gates
//! - totality of the built-in catalog on arbitrary input

use crate::catalog::{EXCESSIVE_PERMISSIONS, REQUIRED_TAGS};
use crate::engine::evaluate;
use crate::node::ConfigNode;
use crate::policy::{Evaluation, PolicyDefinition, PolicySet};
use crate::test_support::{builtin_set, resource, run_policy};
use iacguard_types::{Category, Severity, Verdict, ids};
use proptest::prelude::*;
use serde_json::{Map, Value as JsonValue, json};

// ============================================================================
// Strategies
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,11}").unwrap()
}

fn arb_scalar() -> impl Strategy<Value = JsonValue> {
    prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::from),
        any::<i32>().prop_map(JsonValue::from),
        "[A-Za-z0-9 ,*]{0,12}".prop_map(JsonValue::from),
    ]
}

/// Arbitrary JSON resembling parser output.
fn arb_json() -> impl Strategy<Value = JsonValue> {
    arb_scalar().prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(JsonValue::Array),
            prop::collection::btree_map(
                prop_oneof![
                    arb_key(),
                    Just("network_acls".to_string()),
                    Just("network_rules".to_string()),
                    Just("tags".to_string()),
                    Just("default_action".to_string()),
                    Just("bypass".to_string()),
                    Just("key_permissions".to_string()),
                    Just("customer_managed_key".to_string()),
                ],
                inner,
                0..5
            )
            .prop_map(|m| JsonValue::Object(m.into_iter().collect())),
        ]
    })
}

/// Permission names that are never in the deny set.
fn arb_clean_permission() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Get", "List", "Create", "Delete", "Update", "Import", "Backup", "Restore", "Purge",
        "Recover", "Sign", "Verify", "WrapKey", "UnwrapKey",
    ])
    .prop_map(str::to_string)
}

fn arb_forbidden_permission() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("*".to_string()),
        prop::sample::select(vec!["all", "ALL", "All", "aLl"]).prop_map(str::to_string),
    ]
}

/// Either a flat list of names or the double-wrapped `[[...]]` form.
fn wrap_permissions(perms: Vec<String>, double: bool) -> JsonValue {
    let list = JsonValue::from(perms);
    if double { json!([list]) } else { list }
}

fn single_field(field: &str, value: JsonValue) -> JsonValue {
    let mut m = Map::new();
    m.insert(field.to_string(), value);
    JsonValue::Object(m)
}

const PERMISSION_FIELDS: [&str; 3] = [
    "key_permissions",
    "secret_permissions",
    "certificate_permissions",
];

// ============================================================================
// Normalizer
// ============================================================================

proptest! {
    #[test]
    fn as_mapping_is_wrapping_insensitive(
        entries in prop::collection::btree_map(arb_key(), arb_scalar(), 0..6)
    ) {
        let block: Map<String, JsonValue> = entries.into_iter().collect();
        let bare = ConfigNode::from_json(&json!({ "block": block.clone() }));
        let wrapped = ConfigNode::from_json(&json!({ "block": [block] }));
        prop_assert_eq!(bare.as_mapping("block"), wrapped.as_mapping("block"));
        prop_assert!(bare.as_mapping("block").is_some());
    }

    #[test]
    fn scalar_list_is_wrapping_insensitive(
        perms in prop::collection::vec(arb_clean_permission(), 0..6)
    ) {
        let flat = ConfigNode::from_json(&json!({ "p": wrap_permissions(perms.clone(), false) }));
        let double = ConfigNode::from_json(&json!({ "p": wrap_permissions(perms, true) }));
        prop_assert_eq!(flat.as_scalar_list("p"), double.as_scalar_list("p"));
    }

    #[test]
    fn accessors_never_panic(raw in arb_json(), path in "[a-z_.]{0,24}") {
        let node = ConfigNode::from_json(&raw);
        let _ = node.exists(&path);
        let _ = node.as_mapping(&path);
        let _ = node.as_scalar(&path);
        let _ = node.as_scalar_list(&path);
        let _ = node.scalar_equals(&path, "Deny", true);
    }
}

// ============================================================================
// Deny-set scan
// ============================================================================

proptest! {
    #[test]
    fn clean_grants_pass(
        grants in prop::collection::vec(
            (prop::collection::vec(arb_clean_permission(), 0..5), any::<bool>()),
            0..=3
        )
    ) {
        let mut cfg = Map::new();
        for (field, (perms, double)) in PERMISSION_FIELDS.iter().zip(grants) {
            cfg.insert(field.to_string(), wrap_permissions(perms, double));
        }
        let eval = run_policy(ids::POLICY_KEY_VAULT_ACCESS_POLICY, JsonValue::Object(cfg));
        prop_assert_eq!(eval.verdict, Verdict::Passed);
    }

    #[test]
    fn adding_a_forbidden_grant_flips_to_failed(
        perms in prop::collection::vec(arb_clean_permission(), 0..5),
        forbidden in arb_forbidden_permission(),
        field_idx in 0usize..3,
        insert_at in any::<prop::sample::Index>(),
        double in any::<bool>(),
    ) {
        let field = PERMISSION_FIELDS[field_idx];
        let before = run_policy(
            ids::POLICY_KEY_VAULT_ACCESS_POLICY,
            single_field(field, wrap_permissions(perms.clone(), double)),
        );
        prop_assert_eq!(before.verdict, Verdict::Passed);

        let mut tainted = perms;
        let at = insert_at.index(tainted.len() + 1);
        tainted.insert(at, forbidden);
        let after = run_policy(
            ids::POLICY_KEY_VAULT_ACCESS_POLICY,
            single_field(field, wrap_permissions(tainted, double)),
        );
        prop_assert_eq!(after.verdict, Verdict::Failed);
    }
}

// ============================================================================
// Required tags
// ============================================================================

proptest! {
    #[test]
    fn tags_pass_iff_required_keys_are_a_subset(
        present in prop::collection::vec(any::<bool>(), REQUIRED_TAGS.len()),
        extra in prop::collection::btree_map(arb_key(), arb_scalar(), 0..4),
    ) {
        let mut tags: Map<String, JsonValue> = extra.into_iter().collect();
        for (key, keep) in REQUIRED_TAGS.iter().zip(&present) {
            if *keep {
                tags.insert(key.to_string(), json!("v"));
            } else {
                tags.remove(*key);
            }
        }
        let expected = if present.iter().all(|p| *p) { Verdict::Passed } else { Verdict::Failed };
        for id in [ids::POLICY_KEY_VAULT_REQUIRED_TAGS, ids::POLICY_STORAGE_REQUIRED_TAGS] {
            let eval = run_policy(id, json!({ "tags": [tags.clone()] }));
            prop_assert_eq!(eval.verdict, expected);
        }
    }
}

// ============================================================================
// Gates
// ============================================================================

proptest! {
    #[test]
    fn gates_fail_when_governed_block_is_absent(raw in arb_json()) {
        let mut cfg = match raw {
            JsonValue::Object(m) => m,
            other => {
                let mut m = Map::new();
                m.insert("other".to_string(), other);
                m
            }
        };
        cfg.remove("network_acls");
        cfg.remove("network_rules");
        cfg.remove("customer_managed_key");
        let cfg = JsonValue::Object(cfg);

        for id in [
            ids::POLICY_KEY_VAULT_NETWORK_ACLS,
            ids::POLICY_STORAGE_NETWORK_RULES,
            ids::POLICY_STORAGE_CUSTOMER_MANAGED_KEY,
        ] {
            prop_assert_eq!(run_policy(id, cfg.clone()).verdict, Verdict::Failed);
        }
    }

    #[test]
    fn catalog_is_total_on_arbitrary_input(raw in arb_json()) {
        let set = builtin_set();
        for resource_type in [
            ids::RESOURCE_KEY_VAULT,
            ids::RESOURCE_KEY_VAULT_ACCESS_POLICY,
            ids::RESOURCE_STORAGE_ACCOUNT,
        ] {
            let r = resource(resource_type, "r", raw.clone());
            for (_, eval) in evaluate(&r, &set) {
                prop_assert_ne!(eval.verdict, Verdict::Skipped);
                if eval.verdict == Verdict::Failed {
                    let reason = eval.reason.unwrap_or_default();
                    prop_assert!(!reason.starts_with("policy evaluation fault"), "{}", reason);
                }
            }
        }
    }
}

// ============================================================================
// Policy set
// ============================================================================

fn numbered(n: u32) -> PolicyDefinition {
    PolicyDefinition::new(
        format!("CKV_PROP_{n}"),
        format!("policy {n}"),
        Category::Convention,
        Severity::Low,
        |_: &ConfigNode| Evaluation::passed(),
    )
    .targeting(["t"])
}

proptest! {
    #[test]
    fn policy_set_keeps_registration_order(
        ns in prop::collection::btree_set(0u32..1000, 1..12)
            .prop_map(|s| s.into_iter().collect::<Vec<_>>())
            .prop_shuffle()
    ) {
        let mut builder = PolicySet::builder();
        for n in &ns {
            builder.register(numbered(*n));
        }
        let set = builder.build().expect("unique ids");
        let got: Vec<String> = evaluate(&resource("t", "r", json!({})), &set)
            .into_iter()
            .map(|(p, _)| p.id.clone())
            .collect();
        let want: Vec<String> = ns.iter().map(|n| format!("CKV_PROP_{n}")).collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn any_repeated_id_is_rejected(
        ns in prop::collection::vec(0u32..1000, 1..8),
        dup in any::<prop::sample::Index>(),
    ) {
        let mut builder = PolicySet::builder();
        for n in &ns {
            builder.register(numbered(*n));
        }
        builder.register(numbered(ns[dup.index(ns.len())]));
        prop_assert!(builder.build().is_err());
    }
}

#[test]
fn excessive_permissions_are_lowercase() {
    for token in EXCESSIVE_PERMISSIONS {
        assert_eq!(token, token.to_lowercase());
    }
}
