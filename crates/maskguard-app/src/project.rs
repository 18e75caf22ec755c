//! The `project` use case: flatten model declarations into the policy-engine input.

use anyhow::Context;
use camino::Utf8PathBuf;
use maskguard_domain::{project_schema, PolicyInput};
use maskguard_settings::Overrides;

use crate::audit::resolve;

#[derive(Clone, Debug)]
pub struct ProjectInput<'a> {
    pub config_text: &'a str,
    pub overrides: Overrides,
    /// Project without mapping annotations.
    pub skip_mapping: bool,
}

#[derive(Clone, Debug)]
pub struct ProjectOutput {
    pub document: PolicyInput,
    /// Pretty-printed JSON of `document`.
    pub json: String,
    /// Where the document should be written.
    pub output_file: Utf8PathBuf,
}

/// Load the schema (file or directory) and the mapping, then project.
///
/// An explicitly given mapping path must exist. The default mapping location
/// is optional: when it is absent the columns are projected without mapping
/// annotations.
pub fn run_project(input: ProjectInput<'_>) -> anyhow::Result<ProjectOutput> {
    let explicit_mapping = input
        .overrides
        .mapping_path
        .as_deref()
        .is_some_and(|v| !v.trim().is_empty());
    let resolved = resolve(input.config_text, input.overrides)?;
    let paths = &resolved.paths;

    let schema = maskguard_repo::load_schema(&paths.schema_path)
        .with_context(|| format!("load schema {}", paths.schema_path))?;

    let mapping = if input.skip_mapping {
        None
    } else if explicit_mapping || paths.mapping_file.exists() {
        Some(
            maskguard_repo::read_mapping(&paths.mapping_file)
                .context("load sensitive field mapping")?,
        )
    } else {
        tracing::warn!(path = %paths.mapping_file, "mapping not found; projecting without it");
        None
    };

    let document = project_schema(&schema, mapping.as_ref());
    let json = serde_json::to_string_pretty(&document).context("serialize policy input")?;

    tracing::info!(
        models = document.models().len(),
        mapped = mapping.is_some(),
        "projected schema"
    );

    Ok(ProjectOutput {
        document,
        json,
        output_file: paths.output_file.clone(),
    })
}
