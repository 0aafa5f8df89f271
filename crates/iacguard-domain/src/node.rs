//! Normalized configuration tree.
//!
//! Parsed infrastructure-as-code blocks arrive with a structural quirk: a single
//! nested block is a one-element list wrapping a mapping, a repeated block is a
//! list of mappings, and simple attributes are sometimes list-wrapped (or
//! double-wrapped) scalars. [`ConfigNode`] models that explicitly and the
//! accessors hide the wrapping from policy code.
//!
//! No accessor panics or errors. A path that does not resolve, or resolves to
//! an unexpected shape, yields `None` / an empty list.

use serde_json::Value as JsonValue;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl Scalar {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    /// Text used for comparisons. `Null` has none.
    pub fn text(&self) -> Option<String> {
        match self {
            Scalar::Null => None,
            Scalar::Bool(b) => Some(b.to_string()),
            Scalar::Number(n) => Some(n.to_string()),
            Scalar::String(s) => Some(s.clone()),
        }
    }

    /// `false` for null and for strings that are empty after trimming.
    pub fn is_populated(&self) -> bool {
        match self {
            Scalar::Null => false,
            Scalar::String(s) => !s.trim().is_empty(),
            Scalar::Bool(_) | Scalar::Number(_) => true,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

/// Ordered key/value block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, ConfigNode)>,
}

impl Mapping {
    pub fn new(entries: Vec<(String, ConfigNode)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigNode {
    Scalar(Scalar),
    Mapping(Mapping),
    Sequence(Vec<ConfigNode>),
}

impl ConfigNode {
    /// Normalize a raw JSON value as produced by the HCL parser.
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => ConfigNode::Scalar(Scalar::Null),
            JsonValue::Bool(b) => ConfigNode::Scalar(Scalar::Bool(*b)),
            JsonValue::Number(n) => ConfigNode::Scalar(Scalar::Number(n.clone())),
            JsonValue::String(s) => ConfigNode::Scalar(Scalar::String(s.clone())),
            JsonValue::Array(items) => {
                ConfigNode::Sequence(items.iter().map(ConfigNode::from_json).collect())
            }
            JsonValue::Object(map) => ConfigNode::Mapping(Mapping::new(
                map.iter()
                    .map(|(k, v)| (k.clone(), ConfigNode::from_json(v)))
                    .collect(),
            )),
        }
    }

    pub fn empty() -> Self {
        ConfigNode::Mapping(Mapping::default())
    }

    /// Treat this node as a block: a mapping, or the first element of a sequence
    /// when that element is a mapping.
    pub fn block(&self) -> Option<&Mapping> {
        match self {
            ConfigNode::Mapping(m) => Some(m),
            ConfigNode::Sequence(items) => match items.first() {
                Some(ConfigNode::Mapping(m)) => Some(m),
                _ => None,
            },
            ConfigNode::Scalar(_) => None,
        }
    }

    /// Resolve a dotted path. Intermediate segments use block semantics; the
    /// empty path resolves to `self`.
    pub fn get(&self, path: &str) -> Option<&ConfigNode> {
        let mut current = self;
        for segment in path.split('.').filter(|s| !s.is_empty()) {
            current = current.block()?.get(segment)?;
        }
        Some(current)
    }

    /// True iff the path resolves to any node, including an empty sequence or mapping.
    pub fn exists(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn as_mapping(&self, path: &str) -> Option<&Mapping> {
        self.get(path)?.block()
    }

    /// A scalar, or the first element of a sequence when that element is a scalar.
    pub fn as_scalar(&self, path: &str) -> Option<&Scalar> {
        match self.get(path)? {
            ConfigNode::Scalar(s) => Some(s),
            ConfigNode::Sequence(items) => match items.first() {
                Some(ConfigNode::Scalar(s)) => Some(s),
                _ => None,
            },
            ConfigNode::Mapping(_) => None,
        }
    }

    /// All scalars at `path`, flattening one level of nested sequences.
    /// Mappings contribute nothing.
    pub fn as_scalar_list(&self, path: &str) -> Vec<&Scalar> {
        let mut out = Vec::new();
        match self.get(path) {
            Some(ConfigNode::Scalar(s)) => out.push(s),
            Some(ConfigNode::Sequence(items)) => {
                for item in items {
                    match item {
                        ConfigNode::Scalar(s) => out.push(s),
                        ConfigNode::Sequence(inner) => {
                            out.extend(inner.iter().filter_map(|n| match n {
                                ConfigNode::Scalar(s) => Some(s),
                                _ => None,
                            }));
                        }
                        ConfigNode::Mapping(_) => {}
                    }
                }
            }
            _ => {}
        }
        out
    }

    pub fn scalar_equals(&self, path: &str, expected: &str, case_insensitive: bool) -> bool {
        let Some(text) = self.as_scalar(path).and_then(Scalar::text) else {
            return false;
        };
        if case_insensitive {
            text.eq_ignore_ascii_case(expected)
        } else {
            text == expected
        }
    }

    /// True iff the path holds at least one populated scalar.
    pub fn has_values(&self, path: &str) -> bool {
        self.as_scalar_list(path).iter().any(|s| s.is_populated())
    }
}

impl From<&JsonValue> for ConfigNode {
    fn from(value: &JsonValue) -> Self {
        ConfigNode::from_json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(v: JsonValue) -> ConfigNode {
        ConfigNode::from_json(&v)
    }

    #[test]
    fn as_mapping_ignores_singleton_wrapping() {
        let bare = node(json!({ "network_acls": { "default_action": "Deny" } }));
        let wrapped = node(json!({ "network_acls": [{ "default_action": "Deny" }] }));
        assert_eq!(bare.as_mapping("network_acls"), wrapped.as_mapping("network_acls"));
        assert!(bare.as_mapping("network_acls").is_some());
    }

    #[test]
    fn as_mapping_takes_first_of_repeated_blocks() {
        let n = node(json!({ "rule": [{ "name": "a" }, { "name": "b" }] }));
        let first = n.as_mapping("rule").expect("block");
        assert_eq!(
            first.get("name"),
            Some(&ConfigNode::Scalar(Scalar::String("a".to_string())))
        );
    }

    #[test]
    fn as_mapping_rejects_scalars_and_scalar_lists() {
        let n = node(json!({ "a": "x", "b": ["x"], "c": [] }));
        assert!(n.as_mapping("a").is_none());
        assert!(n.as_mapping("b").is_none());
        assert!(n.as_mapping("c").is_none());
        assert!(n.as_mapping("missing").is_none());
    }

    #[test]
    fn exists_distinguishes_absent_from_empty() {
        let n = node(json!({ "empty_list": [], "empty_map": {} }));
        assert!(n.exists("empty_list"));
        assert!(n.exists("empty_map"));
        assert!(!n.exists("absent"));
        assert!(n.exists(""));
    }

    #[test]
    fn dotted_paths_descend_through_wrapped_blocks() {
        let n = node(json!({ "network_acls": [{ "default_action": ["Deny"] }] }));
        assert!(n.exists("network_acls.default_action"));
        assert!(n.scalar_equals("network_acls.default_action", "Deny", false));
        assert!(!n.exists("network_acls.bypass"));
        assert!(!n.exists("network_acls.default_action.deeper"));
    }

    #[test]
    fn as_scalar_unwraps_list_wrapped_scalar() {
        let n = node(json!({ "a": "x", "b": ["y", "z"], "c": [["w"]], "d": { "k": 1 } }));
        assert_eq!(n.as_scalar("a").and_then(Scalar::as_str), Some("x"));
        assert_eq!(n.as_scalar("b").and_then(Scalar::as_str), Some("y"));
        assert!(n.as_scalar("c").is_none());
        assert!(n.as_scalar("d").is_none());
    }

    #[test]
    fn as_scalar_list_flattens_one_level() {
        let n = node(json!({
            "flat": ["Get", "List"],
            "double": [["Get", "List"]],
            "mixed": ["Get", ["List", ["Deep"]], { "k": "v" }],
            "single": "Get",
        }));
        let texts = |path: &str| -> Vec<String> {
            n.as_scalar_list(path).iter().filter_map(|s| s.text()).collect()
        };
        assert_eq!(texts("flat"), vec!["Get", "List"]);
        assert_eq!(texts("double"), vec!["Get", "List"]);
        assert_eq!(texts("mixed"), vec!["Get", "List"]);
        assert_eq!(texts("single"), vec!["Get"]);
        assert!(texts("missing").is_empty());
    }

    #[test]
    fn scalar_equals_respects_case_flag() {
        let n = node(json!({ "action": ["deny"], "enabled": true, "count": 3 }));
        assert!(!n.scalar_equals("action", "Deny", false));
        assert!(n.scalar_equals("action", "Deny", true));
        assert!(n.scalar_equals("enabled", "true", false));
        assert!(n.scalar_equals("count", "3", false));
        assert!(!n.scalar_equals("missing", "Deny", true));
    }

    #[test]
    fn null_is_present_but_unpopulated() {
        let n = node(json!({ "id": null, "blank": ["  "], "ok": ["x"] }));
        assert!(n.exists("id"));
        assert!(!n.has_values("id"));
        assert!(!n.has_values("blank"));
        assert!(n.has_values("ok"));
        assert!(!n.scalar_equals("id", "null", false));
    }

    #[test]
    fn mapping_preserves_key_order() {
        let n = node(json!({ "z": 1, "a": 2, "m": 3 }));
        let keys: Vec<&str> = n.as_mapping("").expect("root").keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}
