//! Use case orchestration for iacguard.
//!
//! This crate provides the application layer: use cases that coordinate the settings, domain,
//! and render layers. It is intentionally thin and delegates heavy lifting to those layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod explain;
mod render;
mod report;

pub use check::{
    AuditInput, AuditOutput, PolicySummary, list_policies, load_resources, parse_resources,
    run_audit, verdict_exit_code,
};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use render::{render_annotations, render_markdown};
pub use report::{
    parse_report_json, read_report, runtime_error_report, serialize_report, to_renderable,
    write_report, write_text,
};
