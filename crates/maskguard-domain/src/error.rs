use thiserror::Error;

/// A malformed mapping document or audit scope.
///
/// Always fatal, and always raised before any cross-referencing happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("mapping document must be a key-value mapping at the top level, found {found}")]
    NotAMapping { found: &'static str },

    #[error("mapping document must contain a top-level 'fields' key")]
    MissingFields,

    #[error("mapping 'fields' must be a key-value mapping, found {found}")]
    FieldsNotAMapping { found: &'static str },

    #[error("mapping entry '{column}' must be a key-value mapping, found {found}")]
    EntryNotAMapping { column: String, found: &'static str },

    #[error("mapping entry '{column}' has no mask_policy")]
    MissingMaskPolicy { column: String },

    #[error("mapping entry '{column}' has an invalid mask_policy: expected a non-empty string, found {found}")]
    InvalidMaskPolicy { column: String, found: &'static str },

    #[error("invalid exempt column pattern '{pattern}': {message}")]
    InvalidExemptPattern { pattern: String, message: String },
}
