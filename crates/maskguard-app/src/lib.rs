//! Use case orchestration for maskguard.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo, and
//! render layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod audit;
mod explain;
mod project;
mod render;
mod report;

pub use audit::{run_audit, verdict_exit_code, AuditInput, AuditOutput};
pub use explain::{format_explanation, format_not_found, run_explain, ExplainOutput};
pub use project::{run_project, ProjectInput, ProjectOutput};
pub use render::{render_annotations, render_console, render_markdown, write_report, write_text};
pub use report::{
    parse_report_json, runtime_error_report, serialize_report, skipped_report, to_renderable,
};
