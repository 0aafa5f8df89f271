use crate::node::ConfigNode;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One parsed resource declaration as handed over by the HCL parser.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawResource {
    pub resource_type: String,
    pub resource_id: String,
    #[serde(default)]
    pub config: JsonValue,
}

/// A resource declaration with its configuration normalized.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceInstance {
    pub resource_type: String,
    pub resource_id: String,
    pub config: ConfigNode,
}

impl ResourceInstance {
    pub fn new(
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        config: ConfigNode,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            config,
        }
    }

    pub fn from_raw(raw: &RawResource) -> Self {
        Self::new(
            raw.resource_type.clone(),
            raw.resource_id.clone(),
            ConfigNode::from_json(&raw.config),
        )
    }
}

impl From<RawResource> for ResourceInstance {
    fn from(raw: RawResource) -> Self {
        Self {
            config: ConfigNode::from_json(&raw.config),
            resource_type: raw.resource_type,
            resource_id: raw.resource_id,
        }
    }
}
