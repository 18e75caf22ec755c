use maskguard_types::Severity;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableKind {
    Error,
    Mismatch,
}

impl RenderableKind {
    pub fn severity(self) -> Severity {
        match self {
            RenderableKind::Error => Severity::Error,
            RenderableKind::Mismatch => Severity::Warning,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Warn,
    Fail,
    Skip,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableFinding {
    pub kind: RenderableKind,
    pub check_id: String,
    pub code: String,
    pub model_name: Option<String>,
    pub column_name: String,
    pub expected_policy: Option<String>,
    pub actual_policy: Option<String>,
    pub message: String,
    pub help: Option<String>,
}

impl RenderableFinding {
    /// `model.column`, printing `None` for a missing model.
    pub fn qualified(&self) -> String {
        format!(
            "{}.{}",
            self.model_name.as_deref().unwrap_or("None"),
            self.column_name
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableData {
    pub sensitive_fields: u32,
    pub occurrences_checked: u32,
    pub errors: u32,
    pub mismatches: u32,
    pub skipped_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    pub findings: Vec<RenderableFinding>,
    pub data: RenderableData,
}

impl RenderableReport {
    pub fn errors(&self) -> impl Iterator<Item = &RenderableFinding> {
        self.findings
            .iter()
            .filter(|f| f.kind == RenderableKind::Error)
    }

    pub fn mismatches(&self) -> impl Iterator<Item = &RenderableFinding> {
        self.findings
            .iter()
            .filter(|f| f.kind == RenderableKind::Mismatch)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use maskguard_types::ids;

    pub fn finding(
        kind: RenderableKind,
        model: Option<&str>,
        column: &str,
        expected: &str,
        actual: Option<&str>,
        message: &str,
    ) -> RenderableFinding {
        RenderableFinding {
            kind,
            check_id: ids::CHECK_SENSITIVE_ENFORCEMENT.to_string(),
            code: match kind {
                RenderableKind::Error => ids::CODE_MISSING_SECURITY_ROLE.to_string(),
                RenderableKind::Mismatch => ids::CODE_POLICY_MISMATCH.to_string(),
            },
            model_name: model.map(str::to_string),
            column_name: column.to_string(),
            expected_policy: Some(expected.to_string()),
            actual_policy: actual.map(str::to_string),
            message: message.to_string(),
            help: None,
        }
    }

    pub fn report(
        verdict: RenderableVerdictStatus,
        findings: Vec<RenderableFinding>,
    ) -> RenderableReport {
        let errors = findings
            .iter()
            .filter(|f| f.kind == RenderableKind::Error)
            .count() as u32;
        let mismatches = findings.len() as u32 - errors;
        RenderableReport {
            verdict,
            findings,
            data: RenderableData {
                sensitive_fields: 1,
                occurrences_checked: 1,
                errors,
                mismatches,
                skipped_reason: None,
            },
        }
    }
}
