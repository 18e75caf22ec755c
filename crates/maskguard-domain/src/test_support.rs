use crate::mapping::{MappingEntry, SensitiveMapping};
use crate::model::{ColumnAuditRow, ColumnDecl, ModelDecl, SchemaDocument};
use serde_json::{Map, Value};

pub fn row(model: &str, column: &str, role: Option<&str>) -> ColumnAuditRow {
    row_with_type(model, column, role, Some("model"))
}

pub fn row_with_type(
    model: &str,
    column: &str,
    role: Option<&str>,
    model_type: Option<&str>,
) -> ColumnAuditRow {
    ColumnAuditRow {
        model_name: model.to_string(),
        column_name: column.to_string(),
        column_security_role: role.map(|r| r.to_string()),
        model_type: model_type.map(|t| t.to_string()),
        column_tags: None,
    }
}

pub fn mapping(entries: &[(&str, &str)]) -> SensitiveMapping {
    entries
        .iter()
        .map(|(column, policy)| (column.to_string(), MappingEntry::new(*policy)))
        .collect()
}

pub fn column(name: &str, role: Option<&str>) -> ColumnDecl {
    let mut meta = Map::new();
    if let Some(role) = role {
        meta.insert(
            "column_security_role".to_string(),
            Value::String(role.to_string()),
        );
    }
    ColumnDecl {
        name: name.to_string(),
        description: String::new(),
        meta,
    }
}

pub fn schema(models: Vec<(&str, Vec<ColumnDecl>)>) -> SchemaDocument {
    SchemaDocument {
        models: models
            .into_iter()
            .map(|(name, columns)| ModelDecl {
                name: name.to_string(),
                description: String::new(),
                columns,
            })
            .collect(),
    }
}
