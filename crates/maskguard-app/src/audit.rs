//! The `audit` use case: cross-check the sensitive-field mapping against the column audit.

use anyhow::Context;
use maskguard_settings::{MaskguardConfigV1, Overrides, ResolvedConfig};
use maskguard_types::{MaskguardReport, ReportEnvelope, Verdict, SCHEMA_REPORT_V1};
use time::OffsetDateTime;

use crate::report::{skipped_report, tool_meta};

/// Input for the audit use case.
#[derive(Clone, Debug)]
pub struct AuditInput<'a> {
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// Flag and environment overrides.
    pub overrides: Overrides,
}

#[derive(Clone, Debug)]
pub struct AuditOutput {
    pub report: MaskguardReport,
    pub resolved_config: ResolvedConfig,
}

/// Resolve config, load the mapping and the audit, and evaluate enforcement.
///
/// A missing audit file yields a `skip` report before the mapping is opened.
/// Otherwise the mapping is loaded first, so configuration errors abort the
/// run before any cross-referencing.
pub fn run_audit(input: AuditInput<'_>) -> anyhow::Result<AuditOutput> {
    let started_at = OffsetDateTime::now_utc();

    let resolved = resolve(input.config_text, input.overrides)?;
    let paths = &resolved.paths;

    if !paths.columns_file.exists() {
        tracing::warn!(path = %paths.columns_file, "column audit not found; skipping enforcement check");
        let report = skipped_report(
            started_at,
            format!("column audit not found: {}", paths.columns_file),
        );
        return Ok(AuditOutput {
            report,
            resolved_config: resolved,
        });
    }

    let mapping = maskguard_repo::read_mapping(&paths.mapping_file)
        .context("load sensitive field mapping")?;

    let rows =
        maskguard_repo::read_column_audit(&paths.columns_file).context("load column audit")?;
    let total_rows = rows.len();
    let rows = resolved.scope.apply(rows);
    tracing::debug!(
        total = total_rows,
        in_scope = rows.len(),
        "applied audit scope"
    );

    let audit = maskguard_domain::evaluate(&mapping, &rows);
    let verdict = audit.verdict;
    let data = audit.data.clone();
    let findings = audit.into_findings();

    tracing::info!(
        verdict = ?verdict,
        errors = data.errors,
        mismatches = data.mismatches,
        "enforcement audit finished"
    );

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        findings,
        data,
    };

    Ok(AuditOutput {
        report,
        resolved_config: resolved,
    })
}

pub(crate) fn resolve(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    // Empty is allowed, defaults apply.
    let cfg = if config_text.trim().is_empty() {
        MaskguardConfigV1::default()
    } else {
        maskguard_settings::parse_config_toml(config_text).context("parse config")?
    };
    maskguard_settings::resolve_config(cfg, overrides).context("resolve config")
}

/// Map verdict to exit code: 0 = pass/warn/skip, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Skip => 0,
        Verdict::Fail => 2,
    }
}
