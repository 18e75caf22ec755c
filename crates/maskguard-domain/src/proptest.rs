//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - one finding per non-conforming (model, column) occurrence
//! - model-less errors for mapped columns absent from the audit
//! - determinism of the audit
//! - `is_sensitive` agreeing with the projected security role

use crate::audit::evaluate;
use crate::model::{ColumnAuditRow, ColumnDecl, ModelDecl, SchemaDocument};
use crate::projector::project_schema;
use crate::test_support::mapping;
use maskguard_types::{FindingKind, ids};
use proptest::prelude::*;
use serde_json::{Map, Value};

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

fn arb_column_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("ssn".to_string()),
        Just("email".to_string()),
        Just("dob".to_string()),
        Just("phone".to_string()),
        Just("total".to_string()),
    ]
}

fn arb_model_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z_]{0,11}").unwrap()
}

fn arb_role() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some("mask_full".to_string())),
        Just(Some("mask_partial".to_string())),
        Just(Some("mask_hash".to_string())),
    ]
}

fn arb_row() -> impl Strategy<Value = ColumnAuditRow> {
    (arb_model_name(), arb_column_name(), arb_role()).prop_map(|(model, column, role)| {
        ColumnAuditRow {
            model_name: model,
            column_name: column,
            column_security_role: role,
            model_type: Some("model".to_string()),
            column_tags: None,
        }
    })
}

fn arb_mapping_entries() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::btree_map(
        arb_column_name(),
        prop_oneof![Just("mask_full".to_string()), Just("mask_partial".to_string())],
        0..5,
    )
    .prop_map(|m| m.into_iter().collect())
}

fn arb_column_decl() -> impl Strategy<Value = ColumnDecl> {
    (arb_column_name(), arb_role()).prop_map(|(name, role)| {
        let mut meta = Map::new();
        if let Some(role) = role {
            meta.insert("column_security_role".to_string(), Value::String(role));
        }
        ColumnDecl {
            name,
            description: String::new(),
            meta,
        }
    })
}

fn arb_schema() -> impl Strategy<Value = SchemaDocument> {
    prop::collection::vec(
        (arb_model_name(), prop::collection::vec(arb_column_decl(), 0..6)),
        0..4,
    )
    .prop_map(|models| SchemaDocument {
        models: models
            .into_iter()
            .map(|(name, columns)| ModelDecl {
                name,
                description: String::new(),
                columns,
            })
            .collect(),
    })
}

fn as_refs(entries: &[(String, String)]) -> Vec<(&str, &str)> {
    entries
        .iter()
        .map(|(c, p)| (c.as_str(), p.as_str()))
        .collect()
}

proptest! {
    #[test]
    fn absent_columns_yield_exactly_one_model_less_error(
        entries in arb_mapping_entries(),
        rows in prop::collection::vec(arb_row(), 0..20),
    ) {
        let mapping = mapping(&as_refs(&entries));
        let report = evaluate(&mapping, &rows);

        for (column, _) in &entries {
            let occurs = rows.iter().any(|r| &r.column_name == column);
            let model_less: Vec<_> = report
                .errors
                .iter()
                .filter(|f| f.column_name() == Some(column.as_str()) && f.model_name().is_none())
                .collect();
            if occurs {
                prop_assert!(model_less.is_empty());
            } else {
                prop_assert_eq!(model_less.len(), 1);
                prop_assert_eq!(&model_less[0].code, ids::CODE_MISSING_FROM_AUDIT);
                prop_assert!(!report.mismatches.iter().any(|f| f.column_name() == Some(column.as_str())));
            }
        }
    }

    #[test]
    fn each_occurrence_gets_at_most_one_classified_finding(
        entries in arb_mapping_entries(),
        rows in prop::collection::vec(arb_row(), 0..20),
    ) {
        let mapping = mapping(&as_refs(&entries));
        let report = evaluate(&mapping, &rows);

        let mut expected_errors = 0usize;
        let mut expected_mismatches = 0usize;
        for (column, policy) in &entries {
            let occurrences: Vec<_> = rows.iter().filter(|r| &r.column_name == column).collect();
            if occurrences.is_empty() {
                expected_errors += 1;
                continue;
            }
            for r in occurrences {
                match r.security_role() {
                    None => expected_errors += 1,
                    Some(actual) if actual != policy => expected_mismatches += 1,
                    Some(_) => {}
                }
            }
        }

        prop_assert_eq!(report.errors.len(), expected_errors);
        prop_assert_eq!(report.mismatches.len(), expected_mismatches);
        prop_assert!(report.errors.iter().all(|f| f.kind == FindingKind::Error));
        prop_assert!(report.mismatches.iter().all(|f| f.kind == FindingKind::Mismatch));
        prop_assert!(report.mismatches.iter().all(|f| f.actual_policy.is_some()));
        prop_assert!(report.errors.iter().all(|f| f.actual_policy.is_none()));
    }

    #[test]
    fn audit_is_deterministic(
        entries in arb_mapping_entries(),
        rows in prop::collection::vec(arb_row(), 0..20),
    ) {
        let mapping = mapping(&as_refs(&entries));
        let first = evaluate(&mapping, &rows);
        let second = evaluate(&mapping, &rows);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn is_sensitive_tracks_security_role(schema in arb_schema()) {
        let out = project_schema(&schema, None);
        prop_assert_eq!(out.models().len(), schema.models.len());
        for (flat, decl) in out.models().iter().zip(&schema.models) {
            prop_assert_eq!(flat.columns.len(), decl.columns.len());
            for col in &flat.columns {
                let has_role = matches!(&col.security_role, Some(Value::String(r)) if !r.is_empty());
                prop_assert_eq!(col.is_sensitive, has_role);
            }
        }
    }
}
