//! Reusable verdict rules.
//!
//! Each primitive states its own absence policy: the gates and required-field
//! rules fail when the governed block is missing, while [`DenySetScan`] treats
//! a missing grant as compliant.

use crate::node::{ConfigNode, Scalar};
use crate::policy::{Evaluation, Rule};

/// Restrictive default plus a declared exception token, e.g. Key Vault
/// `network_acls { default_action = "Deny", bypass = "AzureServices" }`.
#[derive(Clone, Debug)]
pub struct DefaultActionGate {
    pub block: String,
    pub discriminator: String,
    pub required: String,
    pub exception_field: String,
    pub exception_token: String,
}

impl DefaultActionGate {
    pub fn new(
        block: impl Into<String>,
        discriminator: impl Into<String>,
        required: impl Into<String>,
    ) -> Self {
        Self {
            block: block.into(),
            discriminator: discriminator.into(),
            required: required.into(),
            exception_field: String::new(),
            exception_token: String::new(),
        }
    }

    pub fn with_exception(
        mut self,
        field: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        self.exception_field = field.into();
        self.exception_token = token.into();
        self
    }
}

impl Rule for DefaultActionGate {
    fn evaluate(&self, config: &ConfigNode) -> Evaluation {
        let block = match restrictive_block(config, &self.block, &self.discriminator, &self.required)
        {
            Ok(block) => block,
            Err(failed) => return failed,
        };

        let values = block.as_scalar_list(&self.exception_field);
        if values
            .iter()
            .any(|s| contains_token(s, &self.exception_token))
        {
            Evaluation::passed()
        } else {
            Evaluation::failed(format!(
                "{}.{} does not include {}",
                self.block, self.exception_field, self.exception_token
            ))
        }
    }
}

/// Restrictive default plus at least one non-empty restriction field, e.g.
/// storage `network_rules` with `ip_rules` or `virtual_network_subnet_ids`.
#[derive(Clone, Debug)]
pub struct RestrictedDefaultGate {
    pub block: String,
    pub discriminator: String,
    pub required: String,
    pub restrictions: Vec<String>,
}

impl RestrictedDefaultGate {
    pub fn new<I, S>(
        block: impl Into<String>,
        discriminator: impl Into<String>,
        required: impl Into<String>,
        restrictions: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            block: block.into(),
            discriminator: discriminator.into(),
            required: required.into(),
            restrictions: restrictions.into_iter().map(Into::into).collect(),
        }
    }
}

impl Rule for RestrictedDefaultGate {
    fn evaluate(&self, config: &ConfigNode) -> Evaluation {
        let block = match restrictive_block(config, &self.block, &self.discriminator, &self.required)
        {
            Ok(block) => block,
            Err(failed) => return failed,
        };

        if self.restrictions.iter().any(|field| block.has_values(field)) {
            Evaluation::passed()
        } else {
            Evaluation::failed(format!(
                "{} sets no restriction in any of: {}",
                self.block,
                self.restrictions.join(", ")
            ))
        }
    }
}

/// Fails on the first granted value found in the deny set.
#[derive(Clone, Debug)]
pub struct DenySetScan {
    pub fields: Vec<String>,
    /// Stored lower-cased.
    pub deny: Vec<String>,
}

impl DenySetScan {
    pub fn new<F, FS, D, DS>(fields: F, deny: D) -> Self
    where
        F: IntoIterator<Item = FS>,
        FS: Into<String>,
        D: IntoIterator<Item = DS>,
        DS: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            deny: deny
                .into_iter()
                .map(|d| d.into().to_lowercase())
                .collect(),
        }
    }
}

impl Rule for DenySetScan {
    fn evaluate(&self, config: &ConfigNode) -> Evaluation {
        for field in &self.fields {
            for value in config.as_scalar_list(field) {
                let Some(text) = value.text() else { continue };
                let lowered = text.to_lowercase();
                if self.deny.iter().any(|d| *d == lowered) {
                    return Evaluation::failed(format!("{field} grants {text:?}"));
                }
            }
        }
        Evaluation::passed()
    }
}

/// Every listed key must exist in the labels block. Values are not inspected.
#[derive(Clone, Debug)]
pub struct RequiredKeys {
    pub block: String,
    pub keys: Vec<String>,
}

impl RequiredKeys {
    pub fn new<I, S>(block: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            block: block.into(),
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

impl Rule for RequiredKeys {
    fn evaluate(&self, config: &ConfigNode) -> Evaluation {
        let Some(labels) = config.as_mapping(&self.block) else {
            return Evaluation::failed(format!("{} is absent", self.block));
        };
        match self.keys.iter().find(|key| !labels.contains_key(key)) {
            Some(missing) => Evaluation::failed(format!("{} is missing {missing:?}", self.block)),
            None => Evaluation::passed(),
        }
    }
}

/// A block must exist and carry a populated value for `field`.
#[derive(Clone, Debug)]
pub struct RequiredBlockField {
    pub block: String,
    pub field: String,
}

impl RequiredBlockField {
    pub fn new(block: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            block: block.into(),
            field: field.into(),
        }
    }
}

impl Rule for RequiredBlockField {
    fn evaluate(&self, config: &ConfigNode) -> Evaluation {
        let Some(block) = governed_block(config, &self.block) else {
            return Evaluation::failed(format!("{} is absent", self.block));
        };
        if block.as_scalar(&self.field).is_some_and(Scalar::is_populated) {
            Evaluation::passed()
        } else {
            Evaluation::failed(format!("{}.{} is not set", self.block, self.field))
        }
    }
}

/// The node at `path`, provided it reads as a block.
fn governed_block<'a>(config: &'a ConfigNode, path: &str) -> Option<&'a ConfigNode> {
    config.get(path).filter(|node| node.block().is_some())
}

fn restrictive_block<'a>(
    config: &'a ConfigNode,
    path: &str,
    discriminator: &str,
    required: &str,
) -> Result<&'a ConfigNode, Evaluation> {
    let Some(block) = governed_block(config, path) else {
        return Err(Evaluation::failed(format!("{path} is absent")));
    };
    match block.as_scalar(discriminator).and_then(Scalar::text) {
        Some(actual) if actual == required => Ok(block),
        Some(actual) => Err(Evaluation::failed(format!(
            "{path}.{discriminator} is {actual:?}, expected {required:?}"
        ))),
        None => Err(Evaluation::failed(format!(
            "{path}.{discriminator} is not set"
        ))),
    }
}

/// Exact match against the comma-separated, trimmed entries of `value`.
fn contains_token(value: &Scalar, token: &str) -> bool {
    value
        .as_str()
        .is_some_and(|s| s.split(',').any(|entry| entry.trim() == token))
}
