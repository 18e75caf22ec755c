//! Repository adapters: read the mapping, the column audit, and model schema files.
//!
//! This crate is allowed to do filesystem IO. Parsing entry points that take text
//! are public so callers and tests can skip the filesystem.

#![forbid(unsafe_code)]

mod audit;
mod mapping;
mod schema;

pub use audit::{parse_column_audit_csv, read_column_audit, REQUIRED_AUDIT_COLUMNS};
pub use mapping::{parse_mapping_yaml, read_mapping};
pub use schema::{discover_schema_files, load_schema, parse_schema_yaml};

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    /// Parse arbitrary text as a mapping document. **Never panics** on any input.
    pub fn parse_mapping(text: &str) -> anyhow::Result<()> {
        let _ = super::parse_mapping_yaml(text)?;
        Ok(())
    }

    /// Parse arbitrary text as a column audit CSV. **Never panics** on any input.
    pub fn parse_audit(text: &str) -> anyhow::Result<()> {
        let _ = super::parse_column_audit_csv(text.as_bytes())?;
        Ok(())
    }

    /// Parse arbitrary text as a schema document. **Never panics** on any input.
    pub fn parse_schema(text: &str) -> anyhow::Result<()> {
        let _ = super::parse_schema_yaml(text)?;
        Ok(())
    }
}
