use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `maskguard.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MaskguardConfigV1 {
    /// Optional schema string for tooling (`maskguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub audit: AuditConfig,

    #[serde(default)]
    pub project: ProjectConfig,
}

/// Input locations. Relative paths resolve against the directory noted on each field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PathsConfig {
    /// Root of the analytics project (default `.`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_path: Option<String>,

    /// Root of the CI/CD checkout that holds `ref_files/` (default `.`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cicd_path: Option<String>,

    /// Column audit CSV, relative to `project_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns_path: Option<String>,

    /// Sensitive-field mapping YAML (default `<cicd_path>/ref_files/sensitive_fields_mapping.yml`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping_path: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AuditConfig {
    /// Model types taking part in the audit (default `["model"]`; empty list = all).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_types: Option<Vec<String>>,

    /// Replace the built-in list of exempt bookkeeping columns (glob patterns).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exempt_columns: Option<Vec<String>>,

    /// Patterns added on top of the exempt list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_exempt_columns: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectConfig {
    /// Schema YAML file or directory of YAML files, relative to `project_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<String>,

    /// Where the policy input JSON is written, relative to `project_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
}
