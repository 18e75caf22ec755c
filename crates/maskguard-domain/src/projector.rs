//! Flatten model declarations into the policy-engine input document.
//!
//! Output shape:
//!
//! ```json
//! {"input": {"schema": {"models": [
//!   {"name": "...", "description": "...", "columns": [
//!     {"name": "...", "description": "...", "security_role": null,
//!      "is_sensitive": false, "mapping": {...}}
//!   ]}
//! ]}}}
//! ```
//!
//! The top-level `input` key tells the policy evaluator that the whole
//! structure is its input document.

use crate::mapping::{MappingEntry, SensitiveMapping};
use crate::model::{ColumnDecl, ModelDecl, SchemaDocument};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyInput {
    pub input: PolicyDocument,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyDocument {
    pub schema: FlatSchema,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatSchema {
    pub models: Vec<FlatModel>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlatModel {
    pub name: String,
    pub description: String,
    pub columns: Vec<FlatColumn>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlatColumn {
    pub name: String,
    pub description: String,
    /// The declared role, verbatim. Always serialized; `null` when undeclared.
    pub security_role: Option<Value>,
    pub is_sensitive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<MappingEntry>,
}

/// Project `schema` into the flat policy input, annotating columns with their
/// mapping entry when one exists. Model and column order is preserved.
pub fn project_schema(schema: &SchemaDocument, mapping: Option<&SensitiveMapping>) -> PolicyInput {
    let models = schema
        .models
        .iter()
        .map(|m| project_model(m, mapping))
        .collect();

    PolicyInput {
        input: PolicyDocument {
            schema: FlatSchema { models },
        },
    }
}

fn project_model(model: &ModelDecl, mapping: Option<&SensitiveMapping>) -> FlatModel {
    FlatModel {
        name: model.name.clone(),
        description: model.description.clone(),
        columns: model
            .columns
            .iter()
            .map(|c| project_column(c, mapping))
            .collect(),
    }
}

fn project_column(column: &ColumnDecl, mapping: Option<&SensitiveMapping>) -> FlatColumn {
    FlatColumn {
        name: column.name.clone(),
        description: column.description.clone(),
        security_role: column.security_role().cloned(),
        is_sensitive: column.is_sensitive(),
        mapping: mapping.and_then(|m| m.get(&column.name)).cloned(),
    }
}

impl PolicyInput {
    pub fn models(&self) -> &[FlatModel] {
        &self.input.schema.models
    }
}
