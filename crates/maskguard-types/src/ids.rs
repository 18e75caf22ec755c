//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_SENSITIVE_ENFORCEMENT: &str = "sensitive.enforcement";

// Codes: sensitive.enforcement
pub const CODE_MISSING_FROM_AUDIT: &str = "missing_from_audit";
pub const CODE_MISSING_SECURITY_ROLE: &str = "missing_security_role";
pub const CODE_POLICY_MISMATCH: &str = "policy_mismatch";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
