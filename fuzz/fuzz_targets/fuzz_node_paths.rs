//! Fuzz target for dotted-path accessors on normalized configuration.
//!
//! Goal: `get`, `as_scalar`, `as_scalar_list` and friends are total: any path
//! against any tree returns a value or nothing, never a panic.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_node_paths
//! ```

#![no_main]

use arbitrary::Arbitrary;
use iacguard_domain::node::ConfigNode;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct PathInput {
    /// Raw JSON text for the configuration tree.
    json: String,
    /// Dotted paths to probe, e.g. "network_acls.default_action".
    paths: Vec<String>,
    expected: String,
    case_insensitive: bool,
}

fuzz_target!(|input: PathInput| {
    if input.json.len() > 16 * 1024 || input.paths.len() > 32 {
        return;
    }
    let Ok(value) = serde_json::from_str::<serde_json::Value>(&input.json) else {
        return;
    };
    let node = ConfigNode::from_json(&value);

    for path in &input.paths {
        let exists = node.exists(path);
        assert_eq!(exists, node.get(path).is_some());
        let _ = node.as_mapping(path);
        let _ = node.as_scalar(path);
        let _ = node.has_values(path);
        let _ = node.scalar_equals(path, &input.expected, input.case_insensitive);
        if !exists {
            assert!(node.as_scalar_list(path).is_empty());
        }
    }
});
