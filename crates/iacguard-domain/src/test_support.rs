use crate::catalog;
use crate::config::EffectiveConfig;
use crate::model::ResourceInstance;
use crate::node::ConfigNode;
use crate::policy::{Evaluation, PolicySet};
use serde_json::Value as JsonValue;

pub fn resource(resource_type: &str, resource_id: &str, config: JsonValue) -> ResourceInstance {
    ResourceInstance::new(resource_type, resource_id, ConfigNode::from_json(&config))
}

pub fn builtin_set() -> PolicySet {
    catalog::builtin_policy_set(&EffectiveConfig::default()).expect("builtin catalog is valid")
}

/// Evaluate a single built-in policy against a raw config.
pub fn run_policy(policy_id: &str, config: JsonValue) -> Evaluation {
    let set = builtin_set();
    let policy = set.get(policy_id).expect("known policy id");
    policy.rule().evaluate(&ConfigNode::from_json(&config))
}

pub fn full_tags() -> JsonValue {
    serde_json::json!([{
        "deployed_via": "terraform",
        "owner": "x",
        "Team": "y",
        "Environment": "prod",
    }])
}
