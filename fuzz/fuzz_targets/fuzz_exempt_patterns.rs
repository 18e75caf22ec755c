//! Fuzz target for audit scoping with arbitrary exempt-column globs.
//!
//! Goal: building a scope and filtering rows should **never panic**. Invalid
//! patterns must surface as configuration errors.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_exempt_patterns
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use maskguard_domain::model::ColumnAuditRow;
use maskguard_domain::policy::AuditScope;

#[derive(Arbitrary, Debug)]
struct ScopeInput {
    model_types: Vec<String>,
    patterns: Vec<String>,
    rows: Vec<(String, String, Option<String>)>,
}

fuzz_target!(|input: ScopeInput| {
    if input.patterns.len() > 20 || input.rows.len() > 100 {
        return;
    }
    let patterns: Vec<String> = input
        .patterns
        .into_iter()
        .filter(|p| p.len() <= 256)
        .collect();

    let Ok(scope) = AuditScope::new(input.model_types, patterns) else {
        return;
    };

    let rows: Vec<ColumnAuditRow> = input
        .rows
        .into_iter()
        .map(|(model_name, column_name, model_type)| ColumnAuditRow {
            model_name,
            column_name,
            model_type,
            ..ColumnAuditRow::default()
        })
        .collect();
    let _ = scope.apply(rows);
});
