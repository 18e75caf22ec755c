use anyhow::Context;
use camino::Utf8Path;
use maskguard_domain::SensitiveMapping;

/// Read and validate the sensitive-field mapping. A missing file is an error.
pub fn read_mapping(path: &Utf8Path) -> anyhow::Result<SensitiveMapping> {
    if !path.exists() {
        anyhow::bail!("missing reference file: {}", path);
    }
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path))?;
    let mapping = parse_mapping_yaml(&text).with_context(|| format!("invalid mapping {}", path))?;
    tracing::debug!(path = %path, fields = mapping.len(), "loaded sensitive-field mapping");
    Ok(mapping)
}

pub fn parse_mapping_yaml(text: &str) -> anyhow::Result<SensitiveMapping> {
    let doc: serde_json::Value = serde_yaml::from_str(text).context("parse mapping YAML")?;
    let mapping = SensitiveMapping::from_document(&doc)?;
    Ok(mapping)
}
