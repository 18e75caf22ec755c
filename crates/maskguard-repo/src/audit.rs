use anyhow::Context;
use camino::Utf8Path;
use maskguard_domain::model::ColumnAuditRow;
use std::io::Read;

/// Headers the column audit CSV must carry. `column_tags` and any extra columns are optional.
pub const REQUIRED_AUDIT_COLUMNS: &[&str] = &[
    "model_name",
    "column_name",
    "column_security_role",
    "model_type",
];

/// Read the column audit table. Callers decide what a missing file means.
pub fn read_column_audit(path: &Utf8Path) -> anyhow::Result<Vec<ColumnAuditRow>> {
    let file = std::fs::File::open(path).with_context(|| format!("open {}", path))?;
    let rows = parse_column_audit_csv(file).with_context(|| format!("parse {}", path))?;
    tracing::debug!(path = %path, rows = rows.len(), "loaded column audit");
    Ok(rows)
}

/// Parse a column audit CSV. Header names are trimmed; cell values are kept
/// verbatim and empty cells become `None`.
pub fn parse_column_audit_csv<R: Read>(reader: R) -> anyhow::Result<Vec<ColumnAuditRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers().context("read CSV header")?.clone();
    let missing: Vec<&str> = REQUIRED_AUDIT_COLUMNS
        .iter()
        .copied()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .collect();
    if !missing.is_empty() {
        anyhow::bail!(
            "column audit is missing required column(s): {}",
            missing.join(", ")
        );
    }

    let mut rows = Vec::new();
    for (idx, record) in rdr.deserialize::<ColumnAuditRow>().enumerate() {
        // +2: 1-based, and the header is line 1.
        let row = record.with_context(|| format!("CSV record at line {}", idx + 2))?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_and_treats_empty_cells_as_null() {
        let csv = "\
model_name,column_name,column_security_role,model_type,column_tags,data_type
customers,ssn,,model,,varchar
users,email,mask_full,model,\"pii,skip_test\",varchar
";
        let rows = parse_column_audit_csv(csv.as_bytes()).expect("parse");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].model_name, "customers");
        assert_eq!(rows[0].column_security_role, None);
        assert_eq!(rows[0].column_tags, None);
        assert_eq!(rows[1].security_role(), Some("mask_full"));
        assert!(rows[1].skips_naming_validation());
    }

    #[test]
    fn column_tags_header_is_optional() {
        let csv = "model_name,column_name,column_security_role,model_type\nm,c,,model\n";
        let rows = parse_column_audit_csv(csv.as_bytes()).expect("parse");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].column_tags, None);
    }

    #[test]
    fn missing_required_headers_are_reported() {
        let csv = "model_name,column_name\nm,c\n";
        let err = parse_column_audit_csv(csv.as_bytes()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("column_security_role"));
        assert!(msg.contains("model_type"));
    }

    #[test]
    fn role_cells_are_not_trimmed() {
        let csv = "\
model_name , column_name,column_security_role,model_type
users,email,\"mask_full \",model
contacts,phone,\"  \",model
";
        let rows = parse_column_audit_csv(csv.as_bytes()).expect("parse");

        assert_eq!(rows[0].model_name, "users");
        assert_eq!(rows[0].security_role(), Some("mask_full "));
        assert_eq!(rows[1].security_role(), Some("  "));
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let csv = "model_name,column_name,column_security_role,model_type,column_tags\n";
        let rows = parse_column_audit_csv(csv.as_bytes()).expect("parse");
        assert!(rows.is_empty());
    }
}
