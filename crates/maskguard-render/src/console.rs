use crate::{render_table, RenderableFinding, RenderableReport};

const YELLOW: &str = "\x1b[93m";
const RED: &str = "\x1b[91m";
const RESET: &str = "\x1b[0m";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConsoleStyle {
    pub color: bool,
}

impl ConsoleStyle {
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn colored() -> Self {
        Self { color: true }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Console report for an audit run.
///
/// Mismatches come first as an advisory block, errors follow as the error
/// block. A clean run renders nothing.
pub fn render_console(report: &RenderableReport, style: ConsoleStyle) -> String {
    let mut out = String::new();

    let mismatches: Vec<&RenderableFinding> = report.mismatches().collect();
    if !mismatches.is_empty() {
        let block = block(
            "[WARNING] Sensitive field policy mismatches detected:",
            &mismatches,
        );
        out.push_str(&style.paint(YELLOW, &block));
        out.push('\n');
    }

    let errors: Vec<&RenderableFinding> = report.errors().collect();
    if !errors.is_empty() {
        let block = block(
            "[ERROR] Detected sensitive field(s) not enforced in model:",
            &errors,
        );
        out.push_str(&style.paint(RED, &block));
        out.push('\n');
    }

    out
}

fn block(title: &str, findings: &[&RenderableFinding]) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&render_table(findings.iter().copied()));
    out.push_str("\n[Details]\n");
    for f in findings {
        out.push_str(&format!(" \u{2022} {}: {}\n", f.qualified(), f.message));
    }
    out
}
