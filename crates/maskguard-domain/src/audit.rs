use crate::fingerprint::fingerprint_for_column;
use crate::mapping::SensitiveMapping;
use crate::model::ColumnAuditRow;
use crate::report::{compute_verdict, AuditReport};
use maskguard_types::{ids, ColumnRef, Finding, FindingKind, MaskguardData};
use std::collections::BTreeMap;

/// One appearance of a column in a model.
#[derive(Clone, Copy, Debug)]
struct Occurrence<'a> {
    model_name: &'a str,
    security_role: Option<&'a str>,
}

/// Cross-check the sensitive-field mapping against the column audit.
///
/// Every mapped column yields, in audit order:
/// - one model-less error when it occurs nowhere,
/// - otherwise one error per occurrence without a role and one mismatch per
///   occurrence whose role differs from the mapping.
///
/// Audit columns that are not in the mapping are ignored.
pub fn evaluate(mapping: &SensitiveMapping, rows: &[ColumnAuditRow]) -> AuditReport {
    let index = index_occurrences(rows);

    let mut errors: Vec<Finding> = Vec::new();
    let mut mismatches: Vec<Finding> = Vec::new();
    let mut occurrences_checked = 0u32;

    for (column, entry) in mapping.iter() {
        let expected = entry.mask_policy.as_str();

        let Some(occurrences) = index.get(column) else {
            errors.push(missing_from_audit(column, expected));
            continue;
        };

        for occ in occurrences {
            occurrences_checked += 1;
            match occ.security_role {
                None => errors.push(missing_security_role(occ.model_name, column, expected)),
                Some(actual) if actual != expected => {
                    mismatches.push(policy_mismatch(occ.model_name, column, expected, actual))
                }
                Some(_) => {}
            }
        }
    }

    let verdict = compute_verdict(&errors, &mismatches);
    let data = MaskguardData {
        sensitive_fields: mapping.len() as u32,
        audit_rows: rows.len() as u32,
        occurrences_checked,
        errors: errors.len() as u32,
        mismatches: mismatches.len() as u32,
        skipped_reason: None,
    };

    AuditReport {
        verdict,
        errors,
        mismatches,
        data,
    }
}

/// column_name -> occurrences, in audit row order. Every list is non-empty.
fn index_occurrences(rows: &[ColumnAuditRow]) -> BTreeMap<&str, Vec<Occurrence<'_>>> {
    let mut index: BTreeMap<&str, Vec<Occurrence<'_>>> = BTreeMap::new();
    for row in rows {
        index
            .entry(row.column_name.as_str())
            .or_default()
            .push(Occurrence {
                model_name: row.model_name.as_str(),
                security_role: row.security_role(),
            });
    }
    index
}

fn missing_from_audit(column: &str, expected: &str) -> Finding {
    finding(
        FindingKind::Error,
        ids::CODE_MISSING_FROM_AUDIT,
        None,
        column,
        expected,
        None,
        format!(
            "Sensitive tag declared in mapping but not applied in any model. \
             Suggest adding column_security_role: {expected} to the model."
        ),
        format!("Declare `meta.column_security_role: {expected}` on the model column, or drop the mapping entry."),
    )
}

fn missing_security_role(model: &str, column: &str, expected: &str) -> Finding {
    finding(
        FindingKind::Error,
        ids::CODE_MISSING_SECURITY_ROLE,
        Some(model),
        column,
        expected,
        None,
        format!(
            "Sensitive field present in model but has no column_security_role. \
             Expected '{expected}', got 'None'."
        ),
        format!("Set `meta.column_security_role: {expected}` on {model}.{column}."),
    )
}

fn policy_mismatch(model: &str, column: &str, expected: &str, actual: &str) -> Finding {
    finding(
        FindingKind::Mismatch,
        ids::CODE_POLICY_MISMATCH,
        Some(model),
        column,
        expected,
        Some(actual),
        format!("Mismatch - Expected '{expected}', got '{actual}'. Manual override possible."),
        "Align the role with the mapping unless the override is intentional.".to_string(),
    )
}

#[allow(clippy::too_many_arguments)]
fn finding(
    kind: FindingKind,
    code: &str,
    model: Option<&str>,
    column: &str,
    expected: &str,
    actual: Option<&str>,
    message: String,
    help: String,
) -> Finding {
    Finding {
        kind,
        check_id: ids::CHECK_SENSITIVE_ENFORCEMENT.to_string(),
        code: code.to_string(),
        message,
        column: Some(ColumnRef {
            model_name: model.map(str::to_string),
            column_name: column.to_string(),
        }),
        expected_policy: Some(expected.to_string()),
        actual_policy: actual.map(str::to_string),
        help: Some(help),
        fingerprint: Some(fingerprint_for_column(
            ids::CHECK_SENSITIVE_ENFORCEMENT,
            code,
            model,
            column,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{mapping, row};
    use maskguard_types::Verdict;

    #[test]
    fn null_role_is_one_error_and_fails() {
        let mapping = mapping(&[("ssn", "mask_full")]);
        let rows = vec![row("customers", "ssn", None)];

        let report = evaluate(&mapping, &rows);

        assert_eq!(report.errors.len(), 1);
        assert!(report.mismatches.is_empty());
        assert_eq!(report.verdict, Verdict::Fail);

        let err = &report.errors[0];
        assert_eq!(err.code, ids::CODE_MISSING_SECURITY_ROLE);
        assert_eq!(err.model_name(), Some("customers"));
        assert_eq!(err.column_name(), Some("ssn"));
        assert_eq!(err.expected_policy.as_deref(), Some("mask_full"));
        assert_eq!(err.actual_policy, None);
        assert!(err.message.contains("got 'None'"));
    }

    #[test]
    fn differing_role_is_one_mismatch_and_warns() {
        let mapping = mapping(&[("email", "mask_partial")]);
        let rows = vec![row("users", "email", Some("mask_full"))];

        let report = evaluate(&mapping, &rows);

        assert!(report.errors.is_empty());
        assert_eq!(report.mismatches.len(), 1);
        assert_eq!(report.verdict, Verdict::Warn);
        assert!(!report.is_fatal());

        let m = &report.mismatches[0];
        assert_eq!(m.kind, FindingKind::Mismatch);
        assert_eq!(m.actual_policy.as_deref(), Some("mask_full"));
        assert!(m.message.contains("Manual override possible"));
    }

    #[test]
    fn absent_column_is_one_model_less_error() {
        let mapping = mapping(&[("dob", "mask_full")]);

        let report = evaluate(&mapping, &[]);

        assert_eq!(report.errors.len(), 1);
        assert!(report.mismatches.is_empty());
        assert_eq!(report.verdict, Verdict::Fail);

        let err = &report.errors[0];
        assert_eq!(err.code, ids::CODE_MISSING_FROM_AUDIT);
        assert_eq!(err.model_name(), None);
        assert_eq!(err.column_name(), Some("dob"));
        assert!(err.message.contains("column_security_role: mask_full"));
    }

    #[test]
    fn matching_role_passes_silently() {
        let mapping = mapping(&[("ssn", "mask_full")]);
        let rows = vec![row("customers", "ssn", Some("mask_full"))];

        let report = evaluate(&mapping, &rows);

        assert!(report.errors.is_empty());
        assert!(report.mismatches.is_empty());
        assert_eq!(report.verdict, Verdict::Pass);
        assert_eq!(report.data.occurrences_checked, 1);
    }

    #[test]
    fn one_finding_per_occurrence_in_audit_order() {
        let mapping = mapping(&[("email", "mask_partial")]);
        let rows = vec![
            row("users", "email", None),
            row("orders", "email", Some("mask_partial")),
            row("leads", "email", Some("mask_full")),
            row("contacts", "email", Some("")),
        ];

        let report = evaluate(&mapping, &rows);

        let error_models: Vec<_> = report.errors.iter().map(|f| f.model_name()).collect();
        assert_eq!(error_models, vec![Some("users"), Some("contacts")]);
        let mismatch_models: Vec<_> = report.mismatches.iter().map(|f| f.model_name()).collect();
        assert_eq!(mismatch_models, vec![Some("leads")]);
        assert_eq!(report.data.occurrences_checked, 4);
    }

    #[test]
    fn roles_are_compared_verbatim() {
        let mapping = mapping(&[("ssn", "mask_full")]);
        let rows = vec![
            row("customers", "ssn", Some("mask_full ")),
            row("accounts", "ssn", Some("  ")),
        ];

        let report = evaluate(&mapping, &rows);

        assert!(report.errors.is_empty());
        let actual: Vec<_> = report
            .mismatches
            .iter()
            .map(|f| f.actual_policy.as_deref())
            .collect();
        assert_eq!(actual, vec![Some("mask_full "), Some("  ")]);
        assert_eq!(report.verdict, Verdict::Warn);
    }

    #[test]
    fn unmapped_columns_are_ignored() {
        let mapping = mapping(&[("ssn", "mask_full")]);
        let rows = vec![
            row("customers", "ssn", Some("mask_full")),
            row("customers", "nickname", None),
        ];

        let report = evaluate(&mapping, &rows);
        assert_eq!(report.verdict, Verdict::Pass);
        assert_eq!(report.data.audit_rows, 2);
        assert_eq!(report.data.sensitive_fields, 1);
    }

    #[test]
    fn errors_and_mismatches_are_collected_across_the_whole_mapping() {
        let mapping = mapping(&[
            ("dob", "mask_full"),
            ("email", "mask_partial"),
            ("ssn", "mask_full"),
        ]);
        let rows = vec![
            row("users", "email", Some("mask_full")),
            row("customers", "ssn", None),
        ];

        let report = evaluate(&mapping, &rows);

        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.mismatches.len(), 1);
        assert_eq!(report.data.errors, 2);
        assert_eq!(report.data.mismatches, 1);

        let all: Vec<_> = report.clone().into_findings();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].kind, FindingKind::Mismatch);
        assert_eq!(report.findings().count(), 3);
    }

    #[test]
    fn findings_carry_fingerprints() {
        let mapping = mapping(&[("ssn", "mask_full")]);
        let report = evaluate(&mapping, &[row("customers", "ssn", None)]);
        let expected = fingerprint_for_column(
            ids::CHECK_SENSITIVE_ENFORCEMENT,
            ids::CODE_MISSING_SECURITY_ROLE,
            Some("customers"),
            "ssn",
        );
        assert_eq!(report.errors[0].fingerprint.as_deref(), Some(expected.as_str()));
    }
}
