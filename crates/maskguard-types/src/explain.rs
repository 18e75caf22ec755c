//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after model YAML.
    pub examples: ExamplePair,
}

/// Before and after examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Declaration that would trigger a finding.
    pub before: &'static str,
    /// Declaration that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_SENSITIVE_ENFORCEMENT => Some(explain_sensitive_enforcement()),

        // Codes
        ids::CODE_MISSING_FROM_AUDIT => Some(explain_missing_from_audit()),
        ids::CODE_MISSING_SECURITY_ROLE => Some(explain_missing_security_role()),
        ids::CODE_POLICY_MISMATCH => Some(explain_policy_mismatch()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[ids::CHECK_SENSITIVE_ENFORCEMENT]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_MISSING_FROM_AUDIT,
        ids::CODE_MISSING_SECURITY_ROLE,
        ids::CODE_POLICY_MISMATCH,
    ]
}

fn explain_sensitive_enforcement() -> Explanation {
    Explanation {
        title: "Sensitive Field Enforcement",
        description: "\
Cross-checks the sensitive-field mapping against the column audit.

Every column listed under `fields` in the mapping must appear in at least one
model, and every model that materializes it must carry a column_security_role:
- absent from every model: error (the mapping declares something nobody enforces)
- present without a security role: error (the data is exposed unmasked)
- present with a different role: warning only, since a manual override is possible",
        remediation: "\
Add `meta.column_security_role` to every model column named in the mapping,
using the mask_policy from the mapping unless an override is intended.
If a column is no longer sensitive, remove it from the mapping instead.",
        examples: ExamplePair {
            before: r#"models:
  - name: customers
    columns:
      - name: ssn
        description: Social security number"#,
            after: r#"models:
  - name: customers
    columns:
      - name: ssn
        description: Social security number
        meta:
          column_security_role: mask_full"#,
        },
    }
}

fn explain_missing_from_audit() -> Explanation {
    Explanation {
        title: "Sensitive Field Missing From Audit",
        description: "\
The mapping declares a sensitive column, but no audited model materializes a
column with that name. The finding has no model attached.

Columns dropped by scoping (non-model types, exempt bookkeeping columns) also
count as missing.",
        remediation: "\
Either add the column with `column_security_role: <mask_policy>` to the model
that should expose it, or remove the stale entry from the mapping.",
        examples: ExamplePair {
            before: r#"# sensitive_fields_mapping.yml
fields:
  dob:
    mask_policy: mask_full
# ...but no model has a `dob` column"#,
            after: r#"models:
  - name: patients
    columns:
      - name: dob
        meta:
          column_security_role: mask_full"#,
        },
    }
}

fn explain_missing_security_role() -> Explanation {
    let mut exp = explain_sensitive_enforcement();
    exp.title = "Sensitive Field Without Security Role";
    exp.description = "\
A model materializes a sensitive column but declares no column_security_role
for it. Reported once per model occurrence.";
    exp
}

fn explain_policy_mismatch() -> Explanation {
    Explanation {
        title: "Security Role Differs From Mapping",
        description: "\
A model materializes a sensitive column with a security role, but the role is
not the mask_policy named in the mapping. This is advisory: the run still
passes, because a model owner may override the policy on purpose.",
        remediation: "\
Align the role with the mapping, or record the override with the data
governance owner so the divergence is intentional.",
        examples: ExamplePair {
            before: r#"# mapping: email -> mask_partial
      - name: email
        meta:
          column_security_role: mask_full"#,
            after: r#"      - name: email
        meta:
          column_security_role: mask_partial"#,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_check_id() {
        assert!(lookup_explanation(ids::CHECK_SENSITIVE_ENFORCEMENT).is_some());
    }

    #[test]
    fn lookup_by_code() {
        assert!(lookup_explanation(ids::CODE_MISSING_FROM_AUDIT).is_some());
        assert!(lookup_explanation(ids::CODE_MISSING_SECURITY_ROLE).is_some());
        assert!(lookup_explanation(ids::CODE_POLICY_MISMATCH).is_some());
    }

    #[test]
    fn lookup_unknown_returns_none() {
        assert!(lookup_explanation("unknown.check").is_none());
        assert!(lookup_explanation("unknown_code").is_none());
    }

    #[test]
    fn all_codes_are_valid() {
        for code in all_check_ids().iter().chain(all_codes()) {
            assert!(
                lookup_explanation(code).is_some(),
                "identifier {} should be in registry",
                code
            );
        }
    }
}
