//! The `explain` use case: look up check/code documentation.

use maskguard_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    /// Found an explanation for the identifier.
    Found(Explanation),
    /// Unknown identifier; includes available check_ids and codes.
    NotFound {
        identifier: String,
        available_check_ids: &'static [&'static str],
        available_codes: &'static [&'static str],
    },
}

pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_check_ids: explain::all_check_ids(),
            available_codes: explain::all_codes(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\nRemediation\n-----------\n");
    out.push_str(exp.remediation);
    out.push_str("\n\nExamples\n--------\n\n");
    for (label, body) in [
        ("Before (violation)", exp.examples.before),
        ("After (fixed)", exp.examples.after),
    ] {
        out.push_str(&format!("{label}:\n```yaml\n{body}\n```\n\n"));
    }
    out.truncate(out.trim_end().len());
    out.push('\n');

    out
}

pub fn format_not_found(
    identifier: &str,
    check_ids: &[&'static str],
    codes: &[&'static str],
) -> String {
    let mut out = format!("Unknown check_id or code: {}\n\nAvailable check_ids:\n", identifier);
    for id in check_ids {
        out.push_str(&format!("  - {}\n", id));
    }
    out.push_str("\nAvailable codes:\n");
    for code in codes {
        out.push_str(&format!("  - {}\n", code));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use maskguard_types::ids;

    #[test]
    fn every_code_has_an_explanation() {
        for code in explain::all_codes() {
            assert!(matches!(run_explain(code), ExplainOutput::Found(_)), "{code}");
        }
        assert!(matches!(
            run_explain(ids::CHECK_SENSITIVE_ENFORCEMENT),
            ExplainOutput::Found(_)
        ));
    }

    #[test]
    fn explain_unknown_lists_alternatives() {
        match run_explain("not_a_real_thing") {
            ExplainOutput::NotFound {
                identifier,
                available_check_ids,
                available_codes,
            } => {
                assert_eq!(identifier, "not_a_real_thing");
                assert!(!available_check_ids.is_empty());
                assert_eq!(available_codes.len(), 3);
            }
            ExplainOutput::Found(_) => panic!("expected NotFound"),
        }
    }

    #[test]
    fn format_explanation_output() {
        let ExplainOutput::Found(exp) = run_explain(ids::CODE_POLICY_MISMATCH) else {
            panic!("expected Found");
        };
        let formatted = format_explanation(&exp);
        assert!(formatted.starts_with(exp.title));
        assert!(formatted.contains("Remediation"));
        assert!(formatted.contains("```yaml"));
        assert!(formatted.ends_with("```\n"));
    }

    #[test]
    fn format_not_found_output() {
        let formatted = format_not_found("missing", &["check.one"], &["code.one", "code.two"]);
        assert!(formatted.contains("Unknown check_id or code: missing"));
        assert!(formatted.contains("  - check.one"));
        assert!(formatted.contains("  - code.two"));
    }
}
