use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for maskguard reports.
pub const SCHEMA_REPORT_V1: &str = "maskguard.report.v1";

/// Severity is intentionally small: it maps cleanly to CI signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Outcome class of a single enforcement finding.
///
/// `Error` fails the run. `Mismatch` is advisory: the column carries a security
/// role, just not the one the mapping asks for (a manual override is possible).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    Error,
    Mismatch,
}

impl FindingKind {
    pub fn severity(self) -> Severity {
        match self {
            FindingKind::Error => Severity::Error,
            FindingKind::Mismatch => Severity::Warning,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FindingKind::Error => "error",
            FindingKind::Mismatch => "mismatch",
        }
    }
}

/// The (model, column) occurrence a finding is about.
///
/// `model_name` is `None` when the column never shows up in the audit at all.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnRef {
    #[serde(default)]
    pub model_name: Option<String>,
    pub column_name: String,
}

impl ColumnRef {
    /// `model.column`, with `None` standing in for a missing model.
    pub fn qualified(&self) -> String {
        format!(
            "{}.{}",
            self.model_name.as_deref().unwrap_or("None"),
            self.column_name
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub kind: FindingKind,
    pub check_id: String,
    pub code: String,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_policy: Option<String>,
    #[serde(default)]
    pub actual_policy: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Stable identifier intended for dedup and trending. A hash of
    /// `check_id + code + model + column`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl Finding {
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn model_name(&self) -> Option<&str> {
        self.column.as_ref().and_then(|c| c.model_name.as_deref())
    }

    pub fn column_name(&self) -> Option<&str> {
        self.column.as_ref().map(|c| c.column_name.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
    Skip,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Maskguard-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct MaskguardData {
    /// Number of columns declared in the sensitive-field mapping.
    pub sensitive_fields: u32,
    /// Audit rows that survived scoping (model type + exempt columns).
    pub audit_rows: u32,
    /// (model, column) occurrences of mapped columns that were inspected.
    pub occurrences_checked: u32,

    pub errors: u32,
    pub mismatches: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped_reason: Option<String>,
}

/// A generic receipt/envelope.
///
/// Keeping this generic allows tool-specific data while still enforcing a stable outer shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = MaskguardData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub findings: Vec<Finding>,
    pub data: TData,
}

pub type MaskguardReport = ReportEnvelope<MaskguardData>;
