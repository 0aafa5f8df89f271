//! Policy definitions and the ordered, validated policy set.
//!
//! A policy is a plain value: identity, metadata and a [`Rule`]. Policies are
//! registered explicitly through [`PolicySetBuilder`]; nothing registers itself.

use crate::config::EffectiveConfig;
use crate::node::ConfigNode;
use iacguard_types::{Category, Severity, Verdict};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result of one rule invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub verdict: Verdict,
    pub reason: Option<String>,
}

impl Evaluation {
    pub fn passed() -> Self {
        Self {
            verdict: Verdict::Passed,
            reason: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Failed,
            reason: Some(reason.into()),
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Skipped,
            reason: Some(reason.into()),
        }
    }
}

/// Verdict logic for one policy.
///
/// Implementations must be total: every input, including missing fields and
/// unexpected shapes, maps to a definite [`Evaluation`].
pub trait Rule: Send + Sync {
    fn evaluate(&self, config: &ConfigNode) -> Evaluation;
}

impl<F> Rule for F
where
    F: Fn(&ConfigNode) -> Evaluation + Send + Sync,
{
    fn evaluate(&self, config: &ConfigNode) -> Evaluation {
        self(config)
    }
}

#[derive(Clone)]
pub struct PolicyDefinition {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub severity: Severity,
    pub target_types: BTreeSet<String>,
    rule: Arc<dyn Rule>,
}

impl PolicyDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        severity: Severity,
        rule: impl Rule + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            severity,
            target_types: BTreeSet::new(),
            rule: Arc::new(rule),
        }
    }

    pub fn targeting<I, S>(mut self, resource_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_types
            .extend(resource_types.into_iter().map(Into::into));
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn applies_to(&self, resource_type: &str) -> bool {
        self.target_types.contains(resource_type)
    }

    pub fn rule(&self) -> &dyn Rule {
        self.rule.as_ref()
    }
}

impl fmt::Debug for PolicyDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyDefinition")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("category", &self.category)
            .field("severity", &self.severity)
            .field("target_types", &self.target_types)
            .finish_non_exhaustive()
    }
}

/// Structural defects in policy definitions, detected when the set is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("duplicate policy id: {id}")]
    DuplicateId { id: String },

    #[error("malformed policy id: {id:?} (expected CATEGORY_PREFIX_<n>)")]
    MalformedId { id: String },

    #[error("policy {id} has an empty name")]
    EmptyName { id: String },

    #[error("policy {id} targets no resource types")]
    NoTargets { id: String },
}

#[derive(Default)]
pub struct PolicySetBuilder {
    policies: Vec<PolicyDefinition>,
}

impl PolicySetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a policy. Registration order is evaluation and report order.
    pub fn register(&mut self, policy: PolicyDefinition) -> &mut Self {
        self.policies.push(policy);
        self
    }

    /// Drop policies disabled by `cfg` and apply severity overrides.
    pub fn configure(mut self, cfg: &EffectiveConfig) -> Self {
        self.policies.retain(|p| cfg.is_enabled(&p.id));
        for policy in &mut self.policies {
            if let Some(severity) = cfg.severity_override(&policy.id) {
                policy.severity = severity;
            }
        }
        self
    }

    pub fn build(self) -> Result<PolicySet, PolicyError> {
        let mut seen = HashSet::new();
        for policy in &self.policies {
            if !is_well_formed_id(&policy.id) {
                return Err(PolicyError::MalformedId {
                    id: policy.id.clone(),
                });
            }
            if !seen.insert(policy.id.as_str()) {
                return Err(PolicyError::DuplicateId {
                    id: policy.id.clone(),
                });
            }
            if policy.name.trim().is_empty() {
                return Err(PolicyError::EmptyName {
                    id: policy.id.clone(),
                });
            }
            if policy.target_types.is_empty() {
                return Err(PolicyError::NoTargets {
                    id: policy.id.clone(),
                });
            }
        }

        Ok(PolicySet {
            policies: self.policies.into(),
        })
    }
}

/// Immutable, validated, ordered policy set. Cheap to clone and safe to share
/// across worker threads.
#[derive(Clone, Debug)]
pub struct PolicySet {
    policies: Arc<[PolicyDefinition]>,
}

impl PolicySet {
    pub fn builder() -> PolicySetBuilder {
        PolicySetBuilder::new()
    }

    pub fn policies(&self) -> &[PolicyDefinition] {
        &self.policies
    }

    pub fn get(&self, id: &str) -> Option<&PolicyDefinition> {
        self.policies.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

/// `CATEGORY_PREFIX_<n>`: upper-case alphanumeric segments joined by `_`,
/// the first starting with a letter, the last all digits.
fn is_well_formed_id(id: &str) -> bool {
    let segments: Vec<&str> = id.split('_').collect();
    let Some((number, prefix)) = segments.split_last() else {
        return false;
    };
    if prefix.is_empty() || number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let starts_with_letter = prefix[0]
        .bytes()
        .next()
        .is_some_and(|b| b.is_ascii_uppercase());
    starts_with_letter
        && prefix.iter().all(|seg| {
            !seg.is_empty()
                && seg
                    .bytes()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        })
}
