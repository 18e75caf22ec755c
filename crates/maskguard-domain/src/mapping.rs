//! The hand-maintained sensitive-field mapping.
//!
//! Document shape:
//!
//! ```yaml
//! fields:
//!   ssn:
//!     mask_policy: mask_full
//!     pii_type: government_id
//! ```
//!
//! The document is validated once, here. Everything downstream works with a
//! typed [`SensitiveMapping`] and never re-checks shapes.

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const KEY_FIELDS: &str = "fields";
const KEY_MASK_POLICY: &str = "mask_policy";

/// Expected protection for one sensitive column.
///
/// `metadata` keeps every other key of the entry verbatim so it can be handed to
/// the policy engine untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub mask_policy: String,
    #[serde(flatten)]
    pub metadata: BTreeMap<String, Value>,
}

impl MappingEntry {
    pub fn new(mask_policy: impl Into<String>) -> Self {
        Self {
            mask_policy: mask_policy.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// Column name -> expected protection. Iteration order is column name order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SensitiveMapping {
    fields: BTreeMap<String, MappingEntry>,
}

impl SensitiveMapping {
    /// Validate an already-parsed mapping document.
    ///
    /// A `fields: ~` (declared but empty) section is accepted as an empty mapping.
    pub fn from_document(doc: &Value) -> Result<Self, ConfigurationError> {
        let Value::Object(root) = doc else {
            return Err(ConfigurationError::NotAMapping {
                found: value_kind(doc),
            });
        };

        let fields = match root.get(KEY_FIELDS) {
            None => return Err(ConfigurationError::MissingFields),
            Some(Value::Null) => return Ok(Self::default()),
            Some(Value::Object(fields)) => fields,
            Some(other) => {
                return Err(ConfigurationError::FieldsNotAMapping {
                    found: value_kind(other),
                });
            }
        };

        let mut out = BTreeMap::new();
        for (column, raw) in fields {
            let entry = parse_entry(column, raw)?;
            out.insert(column.clone(), entry);
        }

        Ok(Self { fields: out })
    }

    pub fn get(&self, column: &str) -> Option<&MappingEntry> {
        self.fields.get(column)
    }

    pub fn expected_policy(&self, column: &str) -> Option<&str> {
        self.get(column).map(|e| e.mask_policy.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MappingEntry)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, MappingEntry)> for SensitiveMapping {
    fn from_iter<I: IntoIterator<Item = (String, MappingEntry)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

fn parse_entry(column: &str, raw: &Value) -> Result<MappingEntry, ConfigurationError> {
    let Value::Object(attrs) = raw else {
        return Err(ConfigurationError::EntryNotAMapping {
            column: column.to_string(),
            found: value_kind(raw),
        });
    };

    let mask_policy = match attrs.get(KEY_MASK_POLICY) {
        None | Some(Value::Null) => {
            return Err(ConfigurationError::MissingMaskPolicy {
                column: column.to_string(),
            });
        }
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(other) => {
            return Err(ConfigurationError::InvalidMaskPolicy {
                column: column.to_string(),
                found: value_kind(other),
            });
        }
    };

    Ok(MappingEntry {
        mask_policy,
        metadata: metadata_without_policy(attrs),
    })
}

fn metadata_without_policy(attrs: &Map<String, Value>) -> BTreeMap<String, Value> {
    attrs
        .iter()
        .filter(|(k, _)| k.as_str() != KEY_MASK_POLICY)
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(s) if s.trim().is_empty() => "an empty string",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
