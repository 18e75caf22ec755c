use anyhow::Context;
use maskguard_render::{
    RenderableData, RenderableFinding, RenderableKind, RenderableReport, RenderableVerdictStatus,
};
use maskguard_types::{
    ids, Finding, FindingKind, MaskguardData, MaskguardReport, ReportEnvelope, ToolMeta, Verdict,
    SCHEMA_REPORT_V1,
};
use time::OffsetDateTime;

pub(crate) fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "maskguard".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

pub fn parse_report_json(text: &str) -> anyhow::Result<MaskguardReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse maskguard report")
}

pub fn serialize_report(report: &MaskguardReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &MaskguardReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Warn => RenderableVerdictStatus::Warn,
            Verdict::Fail => RenderableVerdictStatus::Fail,
            Verdict::Skip => RenderableVerdictStatus::Skip,
        },
        findings: report.findings.iter().map(renderable_finding).collect(),
        data: RenderableData {
            sensitive_fields: report.data.sensitive_fields,
            occurrences_checked: report.data.occurrences_checked,
            errors: report.data.errors,
            mismatches: report.data.mismatches,
            skipped_reason: report.data.skipped_reason.clone(),
        },
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        kind: match f.kind {
            FindingKind::Error => RenderableKind::Error,
            FindingKind::Mismatch => RenderableKind::Mismatch,
        },
        check_id: f.check_id.clone(),
        code: f.code.clone(),
        model_name: f.model_name().map(str::to_string),
        column_name: f.column_name().unwrap_or_default().to_string(),
        expected_policy: f.expected_policy.clone(),
        actual_policy: f.actual_policy.clone(),
        message: f.message.clone(),
        help: f.help.clone(),
    }
}

/// Report for a run that had nothing to check.
pub fn skipped_report(started_at: OffsetDateTime, reason: String) -> MaskguardReport {
    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict: Verdict::Skip,
        findings: Vec::new(),
        data: MaskguardData {
            skipped_reason: Some(reason),
            ..MaskguardData::default()
        },
    }
}

/// Receipt for a run that never reached a verdict (bad config, unreadable input).
pub fn runtime_error_report(message: &str) -> MaskguardReport {
    let now = OffsetDateTime::now_utc();
    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        findings: vec![Finding {
            kind: FindingKind::Error,
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            column: None,
            expected_policy: None,
            actual_policy: None,
            help: Some("Fix the tool error and re-run maskguard.".to_string()),
            fingerprint: None,
        }],
        data: MaskguardData {
            errors: 1,
            ..MaskguardData::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maskguard_types::ColumnRef;

    fn sample() -> MaskguardReport {
        let now = OffsetDateTime::now_utc();
        ReportEnvelope {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: tool_meta(),
            started_at: now,
            finished_at: now,
            verdict: Verdict::Warn,
            findings: vec![Finding {
                kind: FindingKind::Mismatch,
                check_id: ids::CHECK_SENSITIVE_ENFORCEMENT.to_string(),
                code: ids::CODE_POLICY_MISMATCH.to_string(),
                message: "override".to_string(),
                column: Some(ColumnRef {
                    model_name: Some("users".to_string()),
                    column_name: "email".to_string(),
                }),
                expected_policy: Some("mask_partial".to_string()),
                actual_policy: Some("mask_full".to_string()),
                help: None,
                fingerprint: Some("abc".to_string()),
            }],
            data: MaskguardData {
                sensitive_fields: 1,
                audit_rows: 1,
                occurrences_checked: 1,
                errors: 0,
                mismatches: 1,
                skipped_reason: None,
            },
        }
    }

    #[test]
    fn serialized_report_parses_back() {
        let report = sample();
        let bytes = serialize_report(&report).expect("serialize");
        let text = String::from_utf8(bytes).expect("utf8");
        let parsed = parse_report_json(&text).expect("parse");
        assert_eq!(parsed.findings, report.findings);
        assert_eq!(parsed.verdict, Verdict::Warn);
    }

    #[test]
    fn unknown_schema_is_rejected() {
        let err = parse_report_json(r#"{"schema":"other.report.v1"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown report schema"));
    }

    #[test]
    fn renderable_keeps_column_and_policies() {
        let r = to_renderable(&sample());
        assert_eq!(r.verdict, RenderableVerdictStatus::Warn);
        let f = &r.findings[0];
        assert_eq!(f.kind, RenderableKind::Mismatch);
        assert_eq!(f.qualified(), "users.email");
        assert_eq!(f.actual_policy.as_deref(), Some("mask_full"));
    }

    #[test]
    fn runtime_error_report_fails() {
        let r = runtime_error_report("boom");
        assert_eq!(r.verdict, Verdict::Fail);
        assert_eq!(r.findings[0].check_id, ids::CHECK_TOOL_RUNTIME);
        assert_eq!(r.findings[0].message, "boom");
    }
}
