//! Pure audit and projection logic (no IO).
//!
//! Input: a sensitive-field mapping, a column audit and/or a model schema, all
//! loaded elsewhere.
//! Output: enforcement findings + verdict, or a flat policy-engine document.

#![forbid(unsafe_code)]

pub mod error;
pub mod mapping;
pub mod model;
pub mod policy;
pub mod projector;
pub mod report;

mod audit;
mod fingerprint;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use audit::evaluate;
pub use error::ConfigurationError;
pub use fingerprint::fingerprint_for_column;
pub use mapping::{MappingEntry, SensitiveMapping};
pub use projector::{project_schema, PolicyInput};
