use crate::model::MaskguardConfigV1;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use maskguard_domain::policy::{AuditScope, DEFAULT_EXEMPT_COLUMNS, DEFAULT_MODEL_TYPES};

pub const DEFAULT_COLUMNS_PATH: &str = "seeds/olympus_dbt_audit_columns.csv";
pub const DEFAULT_SCHEMA_PATH: &str = "dbt_model/anonymization.yml";
pub const DEFAULT_OUTPUT_PATH: &str = "schema_for_opa.json";
const REF_FILES_DIR: &str = "ref_files";
const MAPPING_FILE_NAME: &str = "sensitive_fields_mapping.yml";

/// Values supplied by flags or environment variables. They win over the config file.
///
/// `columns_path` is relative to the project root. The other file overrides are
/// taken as given (relative to the working directory).
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub project_path: Option<String>,
    pub cicd_path: Option<String>,
    pub columns_path: Option<String>,
    pub mapping_path: Option<String>,
    pub schema_path: Option<String>,
    pub output_path: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub project_root: Utf8PathBuf,
    pub cicd_root: Utf8PathBuf,
    pub columns_file: Utf8PathBuf,
    pub mapping_file: Utf8PathBuf,
    pub schema_path: Utf8PathBuf,
    pub output_file: Utf8PathBuf,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub paths: ResolvedPaths,
    pub scope: AuditScope,
}

pub fn resolve_config(
    cfg: MaskguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let paths = resolve_paths(&cfg, &overrides);

    let model_types = cfg
        .audit
        .model_types
        .clone()
        .unwrap_or_else(|| to_strings(DEFAULT_MODEL_TYPES));

    let mut exempt_columns = cfg
        .audit
        .exempt_columns
        .clone()
        .unwrap_or_else(|| to_strings(DEFAULT_EXEMPT_COLUMNS));
    exempt_columns.extend(cfg.audit.extra_exempt_columns.iter().cloned());

    let scope = AuditScope::new(model_types, exempt_columns).context("invalid [audit] config")?;

    Ok(ResolvedConfig { paths, scope })
}

fn resolve_paths(cfg: &MaskguardConfigV1, overrides: &Overrides) -> ResolvedPaths {
    let project_root = root_dir(
        overrides
            .project_path
            .as_deref()
            .or(cfg.paths.project_path.as_deref()),
    );
    let cicd_root = root_dir(
        overrides
            .cicd_path
            .as_deref()
            .or(cfg.paths.cicd_path.as_deref()),
    );

    let columns_file = project_root.join(
        overrides
            .columns_path
            .as_deref()
            .or(cfg.paths.columns_path.as_deref())
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(DEFAULT_COLUMNS_PATH),
    );

    let mapping_file = overridden_or_relative(
        overrides.mapping_path.as_deref(),
        cfg.paths.mapping_path.as_deref(),
        &project_root,
    )
    .unwrap_or_else(|| cicd_root.join(REF_FILES_DIR).join(MAPPING_FILE_NAME));

    let schema_path = overridden_or_relative(
        overrides.schema_path.as_deref(),
        cfg.project.schema_path.as_deref(),
        &project_root,
    )
    .unwrap_or_else(|| project_root.join(DEFAULT_SCHEMA_PATH));

    let output_file = overridden_or_relative(
        overrides.output_path.as_deref(),
        cfg.project.output_path.as_deref(),
        &project_root,
    )
    .unwrap_or_else(|| project_root.join(DEFAULT_OUTPUT_PATH));

    ResolvedPaths {
        project_root,
        cicd_root,
        columns_file,
        mapping_file,
        schema_path,
        output_file,
    }
}

/// Blank values (an exported-but-empty env var) mean "not set".
fn root_dir(value: Option<&str>) -> Utf8PathBuf {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => Utf8PathBuf::from(v),
        None => Utf8PathBuf::from("."),
    }
}

fn overridden_or_relative(
    override_value: Option<&str>,
    config_value: Option<&str>,
    base: &Utf8Path,
) -> Option<Utf8PathBuf> {
    if let Some(v) = override_value.filter(|v| !v.trim().is_empty()) {
        return Some(Utf8PathBuf::from(v));
    }
    config_value
        .filter(|v| !v.trim().is_empty())
        .map(|v| base.join(v))
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
