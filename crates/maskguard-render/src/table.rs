use crate::RenderableFinding;

const HEADERS: [&str; 4] = [
    "model_name",
    "column_name",
    "expected_policy",
    "actual_policy",
];

/// Plain-text table of findings, one row per finding, columns padded to the
/// widest cell. Missing values print as `None`.
pub fn render_table<'a, I>(findings: I) -> String
where
    I: IntoIterator<Item = &'a RenderableFinding>,
{
    let rows: Vec<[String; 4]> = findings
        .into_iter()
        .map(|f| {
            [
                f.model_name.clone().unwrap_or_else(|| "None".to_string()),
                f.column_name.clone(),
                f.expected_policy
                    .clone()
                    .unwrap_or_else(|| "None".to_string()),
                f.actual_policy.clone().unwrap_or_else(|| "None".to_string()),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(rule.join("  ").trim_end());
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{cell:<w$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
