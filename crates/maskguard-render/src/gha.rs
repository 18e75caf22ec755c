use crate::RenderableReport;
use maskguard_types::Severity;

/// Render findings as GitHub Actions workflow command annotations.
///
/// Format: `::{level} title={model.column}::[{check_id}:{code}] {message}`
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    report
        .findings
        .iter()
        .map(|f| {
            let level = match f.kind.severity() {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            let title = escape_property(&f.qualified());
            let message = escape_data(&format!("[{}:{}] {}", f.check_id, f.code, f.message));
            format!("::{} title={}::{}", level, title, message)
        })
        .collect()
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
