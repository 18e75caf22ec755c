//! Developer tasks (schema generation, fixture checks).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use maskguard_types::{Finding, SCHEMA_REPORT_V1, explain};
use schemars::schema_for;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Project root (parent of the xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("determine current directory")?,
    };

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .context("xtask has no parent directory")
    } else {
        Ok(manifest_dir)
    }
}

struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "maskguard.report.v1.json",
            generate: || schema_for!(maskguard_types::MaskguardReport),
        },
        SchemaSpec {
            filename: "maskguard.config.v1.json",
            generate: || schema_for!(maskguard_settings::MaskguardConfigV1),
        },
    ]
}

/// Pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = project_root()?.join("schemas");
    fs::create_dir_all(&dir).context("create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json).with_context(|| format!("write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// Fail when `schemas/` is missing a file or differs from the generated output.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = project_root()?.join("schemas");
    let mut stale = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        let expected = serialize_schema(&(spec.generate)())?;
        match fs::read_to_string(&path) {
            Ok(actual) if actual == expected => {}
            Ok(_) => stale.push(format!("{} (out of date)", spec.filename)),
            Err(_) => stale.push(format!("{} (missing)", spec.filename)),
        }
    }

    if stale.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    for name in &stale {
        eprintln!("  - {}", name);
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("schema validation failed")
}

/// Every `expected.report.json` fixture must be a normalized v1 receipt whose
/// findings deserialize and carry explained codes.
fn check_fixtures() -> anyhow::Result<()> {
    let dir = project_root()?.join("tests").join("fixtures");
    let mut entries: Vec<PathBuf> = fs::read_dir(&dir)
        .with_context(|| format!("read {}", dir.display()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.join("expected.report.json").is_file())
        .collect();
    entries.sort();

    let mut problems = Vec::new();
    for fixture in &entries {
        let name = fixture
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if let Err(err) = check_fixture(&fixture.join("expected.report.json")) {
            problems.push(format!("{name}: {err:#}"));
        } else {
            println!("  ok {name}");
        }
    }

    if problems.is_empty() {
        println!("{} fixture(s) checked.", entries.len());
        return Ok(());
    }
    for p in &problems {
        eprintln!("  - {p}");
    }
    bail!("fixture check failed")
}

fn check_fixture(path: &Path) -> anyhow::Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value: Value = serde_json::from_str(&text).context("parse JSON")?;

    if value.get("schema").and_then(Value::as_str) != Some(SCHEMA_REPORT_V1) {
        bail!("schema is not {SCHEMA_REPORT_V1}");
    }
    if maskguard_test_util::normalize_nondeterministic(value.clone()) != value {
        bail!("timestamps or tool version are not normalized");
    }

    let findings: Vec<Finding> = serde_json::from_value(
        value.get("findings").cloned().unwrap_or(Value::Array(Vec::new())),
    )
    .context("decode findings")?;
    for f in &findings {
        if explain::lookup_explanation(&f.code).is_none() {
            bail!("finding code '{}' has no explanation", f.code);
        }
    }
    Ok(())
}

fn explain_coverage() -> anyhow::Result<()> {
    let mut errors = Vec::new();

    for id in explain::all_check_ids().iter().chain(explain::all_codes()) {
        match explain::lookup_explanation(id) {
            Some(exp) => {
                for (field, text) in [
                    ("title", exp.title),
                    ("description", exp.description),
                    ("remediation", exp.remediation),
                    ("examples.before", exp.examples.before),
                    ("examples.after", exp.examples.after),
                ] {
                    if text.trim().is_empty() {
                        errors.push(format!("'{id}' has empty {field}"));
                    }
                }
            }
            None => errors.push(format!("'{id}' has no explanation")),
        }
    }

    if errors.is_empty() {
        println!("All check IDs and codes are explained.");
        return Ok(());
    }
    for e in &errors {
        eprintln!("  - {e}");
    }
    bail!("explain coverage failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  check-fixtures    Check golden reports under tests/fixtures/");
    eprintln!("  explain-coverage  Check every check_id and code has an explanation");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cmd = args.first().map(String::as_str).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "check-fixtures" => check_fixtures(),
        "explain-coverage" => explain_coverage(),
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
}
