use crate::error::ConfigurationError;
use crate::model::ColumnAuditRow;
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Model types that are audited unless configured otherwise. External tables
/// and seeds are not expected to carry masking roles.
pub const DEFAULT_MODEL_TYPES: &[&str] = &["model"];

/// Warehouse bookkeeping columns that never carry business data.
pub const DEFAULT_EXEMPT_COLUMNS: &[&str] = &[
    "dbt_scd_id",
    "dbt_updated_at",
    "dbt_valid_from",
    "dbt_valid_to",
    "value_var",
    "dcr_desc",
    "id",
    "value",
    "metadata_filename",
    "metadata_file_last_modified",
    "metadata_file_row_number",
    "_dbt_copied_at",
    "bus_eff_ts",
    "bus_exp_ts",
    "record_id",
    "sys_upd_ts",
];

/// Which audit rows take part in the cross-check.
///
/// An empty `model_types` list admits every row. Exempt columns are glob
/// patterns matched against `column_name` (case-sensitive).
#[derive(Clone, Debug)]
pub struct AuditScope {
    model_types: Vec<String>,
    exempt_columns: Vec<String>,
    exempt: Option<GlobSet>,
}

impl AuditScope {
    pub fn new(
        model_types: Vec<String>,
        exempt_columns: Vec<String>,
    ) -> Result<Self, ConfigurationError> {
        let exempt = build_exempt_set(&exempt_columns)?;
        Ok(Self {
            model_types,
            exempt_columns,
            exempt,
        })
    }

    /// Admits every row.
    pub fn unrestricted() -> Self {
        Self {
            model_types: Vec::new(),
            exempt_columns: Vec::new(),
            exempt: None,
        }
    }

    pub fn model_types(&self) -> &[String] {
        &self.model_types
    }

    pub fn exempt_columns(&self) -> &[String] {
        &self.exempt_columns
    }

    pub fn admits(&self, row: &ColumnAuditRow) -> bool {
        if !self.model_types.is_empty() {
            let Some(model_type) = row.model_type.as_deref() else {
                return false;
            };
            if !self.model_types.iter().any(|t| t == model_type) {
                return false;
            }
        }

        !self
            .exempt
            .as_ref()
            .map(|set| set.is_match(&row.column_name))
            .unwrap_or(false)
    }

    pub fn apply(&self, rows: Vec<ColumnAuditRow>) -> Vec<ColumnAuditRow> {
        rows.into_iter().filter(|r| self.admits(r)).collect()
    }
}

impl Default for AuditScope {
    fn default() -> Self {
        let model_types = DEFAULT_MODEL_TYPES.iter().map(|s| s.to_string()).collect();
        let exempt_columns = DEFAULT_EXEMPT_COLUMNS
            .iter()
            .map(|s| s.to_string())
            .collect();
        // Plain identifiers always compile as globs.
        Self::new(model_types, exempt_columns).unwrap_or_else(|_| Self::unrestricted())
    }
}

fn build_exempt_set(patterns: &[String]) -> Result<Option<GlobSet>, ConfigurationError> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let invalid = |pattern: &str, err: globset::Error| ConfigurationError::InvalidExemptPattern {
        pattern: pattern.to_string(),
        message: err.to_string(),
    };

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).map_err(|e| invalid(pattern, e))?);
    }
    let set = builder
        .build()
        .map_err(|e| invalid(&patterns.join(","), e))?;
    Ok(Some(set))
}
