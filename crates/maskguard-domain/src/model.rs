use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

const META_SECURITY_ROLE: &str = "column_security_role";
const TAG_SKIP_TEST: &str = "skip_test";
const TAG_SKIP_NAMING_VALIDATION: &str = "skip_naming_validation";

/// One column as actually materialized in one model.
///
/// Several rows may share a `column_name`; ownership is per (model, column).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnAuditRow {
    pub model_name: String,
    pub column_name: String,
    #[serde(default)]
    pub column_security_role: Option<String>,
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default)]
    pub column_tags: Option<String>,
}

impl ColumnAuditRow {
    /// The applied security role, compared verbatim. An empty cell means no role.
    pub fn security_role(&self) -> Option<&str> {
        self.column_security_role
            .as_deref()
            .filter(|role| !role.is_empty())
    }

    /// Whether the column opted out of naming checks via its tags.
    pub fn skips_naming_validation(&self) -> bool {
        self.column_tags
            .as_deref()
            .map(|tags| tags.contains(TAG_SKIP_TEST) || tags.contains(TAG_SKIP_NAMING_VALIDATION))
            .unwrap_or(false)
    }
}

/// A model-definition document (`schema.yml` style).
///
/// Every field is optional on the wire; `null` and missing both fall back to the default.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SchemaDocument {
    #[serde(default, deserialize_with = "nullable")]
    pub models: Vec<ModelDecl>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ModelDecl {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub columns: Vec<ColumnDecl>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ColumnDecl {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub meta: Map<String, Value>,
}

impl ColumnDecl {
    /// Declared `meta.column_security_role`, exactly as written. `null` counts as undeclared.
    pub fn security_role(&self) -> Option<&Value> {
        self.meta.get(META_SECURITY_ROLE).filter(|v| !v.is_null())
    }

    /// A declared role marks the column sensitive unless it is an empty value
    /// (`""`, `false`, `0`, `[]`, `{}`).
    pub fn is_sensitive(&self) -> bool {
        self.security_role().is_some_and(is_truthy)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
