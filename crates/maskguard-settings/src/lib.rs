//! Config parsing and path/scope resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{AuditConfig, MaskguardConfigV1, PathsConfig, ProjectConfig};
pub use resolve::{Overrides, ResolvedConfig, ResolvedPaths};

/// Parse `maskguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<MaskguardConfigV1> {
    let cfg: MaskguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config (defaults + config file + overrides), once per run.
pub fn resolve_config(
    cfg: MaskguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
