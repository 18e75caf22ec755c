use maskguard_types::{Finding, MaskguardData, Verdict};

/// Result of one enforcement pass.
///
/// `errors` fail the run; `mismatches` are advisory. Both keep the order in
/// which they were found.
#[derive(Clone, Debug, PartialEq)]
pub struct AuditReport {
    pub verdict: Verdict,
    pub errors: Vec<Finding>,
    pub mismatches: Vec<Finding>,
    pub data: MaskguardData,
}

impl AuditReport {
    pub fn is_fatal(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Errors first, then mismatches.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.errors.iter().chain(self.mismatches.iter())
    }

    pub fn into_findings(self) -> Vec<Finding> {
        let mut out = self.errors;
        out.extend(self.mismatches);
        out
    }
}

pub(crate) fn compute_verdict(errors: &[Finding], mismatches: &[Finding]) -> Verdict {
    if !errors.is_empty() {
        Verdict::Fail
    } else if !mismatches.is_empty() {
        Verdict::Warn
    } else {
        Verdict::Pass
    }
}
