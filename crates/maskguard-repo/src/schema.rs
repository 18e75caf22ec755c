use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use maskguard_domain::model::SchemaDocument;
use walkdir::WalkDir;

/// Load model declarations from a single YAML file or from every `*.yml` /
/// `*.yaml` file below a directory.
///
/// In directory mode, files are visited in sorted path order and files whose
/// top-level `models` is missing or not a list (project files, source
/// definitions) are skipped.
pub fn load_schema(path: &Utf8Path) -> anyhow::Result<SchemaDocument> {
    if path.is_dir() {
        let mut merged = SchemaDocument::default();
        for file in discover_schema_files(path)? {
            let text = std::fs::read_to_string(&file).with_context(|| format!("read {}", file))?;
            match parse_schema_candidate(&text).with_context(|| format!("parse {}", file))? {
                Some(doc) => {
                    tracing::debug!(path = %file, models = doc.models.len(), "loaded schema file");
                    merged.models.extend(doc.models);
                }
                None => tracing::debug!(path = %file, "no model list; skipped"),
            }
        }
        return Ok(merged);
    }

    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path))?;
    let doc = parse_schema_yaml(&text).with_context(|| format!("parse {}", path))?;
    tracing::debug!(path = %path, models = doc.models.len(), "loaded schema file");
    Ok(doc)
}

/// YAML files under `dir`, sorted by path.
pub fn discover_schema_files(dir: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let mut out = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walk {}", dir))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(path) = Utf8Path::from_path(entry.path()) else {
            tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 path");
            continue;
        };
        if matches!(path.extension(), Some("yml" | "yaml")) {
            out.push(path.to_path_buf());
        }
    }
    out.sort();
    Ok(out)
}

/// Parse one schema document. An empty document has no models.
pub fn parse_schema_yaml(text: &str) -> anyhow::Result<SchemaDocument> {
    if text.trim().is_empty() {
        return Ok(SchemaDocument::default());
    }
    let doc: SchemaDocument = serde_yaml::from_str(text).context("parse schema YAML")?;
    Ok(doc)
}

fn parse_schema_candidate(text: &str) -> anyhow::Result<Option<SchemaDocument>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    let value: serde_yaml::Value = serde_yaml::from_str(text).context("parse schema YAML")?;
    let has_model_list = value
        .get("models")
        .map(serde_yaml::Value::is_sequence)
        .unwrap_or(false);
    if !has_model_list {
        return Ok(None);
    }
    let doc: SchemaDocument = serde_yaml::from_value(value).context("decode schema models")?;
    Ok(Some(doc))
}
