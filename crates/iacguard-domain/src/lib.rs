//! Pure policy evaluation (no IO).
//!
//! Input: resource instances whose raw configuration is normalized into
//! [`node::ConfigNode`] trees, plus a validated [`policy::PolicySet`].
//! Output: one verdict per applicable policy, plus run-level counts and status.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod model;
pub mod node;
pub mod patterns;
pub mod policy;
pub mod report;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::{audit, evaluate, evaluate_exhaustive, evaluate_resource, to_outcome};
