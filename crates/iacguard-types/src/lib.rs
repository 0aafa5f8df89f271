//! Stable DTOs and IDs used across the iacguard workspace.
//!
//! This crate is intentionally boring:
//! - severity, category and verdict vocabularies
//! - data types for the emitted audit report
//! - stable policy IDs and resource type tags
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod receipt;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use receipt::{
    AuditData, AuditReport, Category, OutcomeCounts, PolicyOutcome, ResourceReport, RunStatus,
    SCHEMA_REPORT_V1, Severity, ToolMeta, Verdict,
};
