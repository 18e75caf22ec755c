//! Render use cases: console, markdown and GitHub annotations from in-memory reports.

use anyhow::Context;
use camino::Utf8Path;
use maskguard_render::{ConsoleStyle, RenderableReport};
use maskguard_types::MaskguardReport;

use crate::report::serialize_report;

pub fn render_console(report: &RenderableReport, color: bool) -> String {
    let style = if color {
        ConsoleStyle::colored()
    } else {
        ConsoleStyle::plain()
    };
    maskguard_render::render_console(report, style)
}

pub fn render_markdown(report: &RenderableReport) -> String {
    maskguard_render::render_markdown(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    maskguard_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}

pub fn write_report(path: &Utf8Path, report: &MaskguardReport) -> anyhow::Result<()> {
    let data = serialize_report(report)?;
    write_bytes(path, &data).with_context(|| format!("write report: {}", path))
}

pub fn write_text(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    write_bytes(path, text.as_bytes()).with_context(|| format!("write text: {}", path))
}

fn write_bytes(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, data)?;
    Ok(())
}
