//! Rendering utilities for maskguard findings (console, Markdown, GitHub annotations).

#![forbid(unsafe_code)]

mod console;
mod gha;
mod markdown;
mod model;
mod table;

pub use console::{render_console, ConsoleStyle};
pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{
    RenderableData, RenderableFinding, RenderableKind, RenderableReport, RenderableVerdictStatus,
};
pub use table::render_table;
