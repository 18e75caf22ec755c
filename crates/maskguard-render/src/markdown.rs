use crate::{RenderableFinding, RenderableReport, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Maskguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Warn => "WARN",
        RenderableVerdictStatus::Fail => "FAIL",
        RenderableVerdictStatus::Skip => "SKIP",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Sensitive fields: {}\n- Occurrences checked: {}\n- Errors: {} / Mismatches: {}\n\n",
        verdict,
        report.data.sensitive_fields,
        report.data.occurrences_checked,
        report.data.errors,
        report.data.mismatches
    ));

    if let Some(r) = &report.data.skipped_reason {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    let errors: Vec<&RenderableFinding> = report.errors().collect();
    if !errors.is_empty() {
        out.push_str("## Errors\n\n");
        push_section(&mut out, &errors);
    }

    let mismatches: Vec<&RenderableFinding> = report.mismatches().collect();
    if !mismatches.is_empty() {
        out.push_str("## Mismatches (advisory)\n\n");
        push_section(&mut out, &mismatches);
    }

    out
}

fn push_section(out: &mut String, findings: &[&RenderableFinding]) {
    out.push_str("| model | column | expected | actual |\n");
    out.push_str("|---|---|---|---|\n");
    for f in findings {
        out.push_str(&format!(
            "| {} | `{}` | {} | {} |\n",
            f.model_name.as_deref().unwrap_or("_none_"),
            f.column_name,
            cell(f.expected_policy.as_deref()),
            cell(f.actual_policy.as_deref()),
        ));
    }
    out.push('\n');
    for f in findings {
        out.push_str(&format!("- `{}` ({}): {}\n", f.qualified(), f.code, f.message));
        if let Some(help) = &f.help {
            out.push_str(&format!("  - help: {}\n", help));
        }
    }
    out.push('\n');
}

fn cell(value: Option<&str>) -> String {
    match value {
        Some(v) => format!("`{}`", v),
        None => "_none_".to_string(),
    }
}
