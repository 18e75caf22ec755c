//! CLI entry point for maskguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `maskguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser, Subcommand};
use maskguard_app::{
    format_explanation, format_not_found, parse_report_json, render_annotations, render_console,
    render_markdown, run_audit, run_explain, run_project, runtime_error_report, to_renderable,
    verdict_exit_code, write_report, write_text, AuditInput, ExplainOutput, ProjectInput,
};
use maskguard_settings::Overrides;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MASKGUARD_LOG";
const CONFIG_FILE_NAME: &str = "maskguard.toml";

#[derive(Parser, Debug)]
#[command(
    name = "maskguard",
    version,
    about = "Sensitive-column masking policy audit for dbt projects"
)]
struct Cli {
    /// dbt project root. Audit and schema paths are resolved against it.
    #[arg(long, env = "project_path", global = true)]
    project_path: Option<String>,

    /// CI/CD root holding `ref_files/sensitive_fields_mapping.yml`.
    #[arg(long, env = "cicd_path", global = true)]
    cicd_path: Option<String>,

    /// Path to maskguard config TOML (default: `<project-path>/maskguard.toml`).
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    /// Disable ANSI colors in console output.
    #[arg(long, global = true)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug). `MASKGUARD_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Cross-check the sensitive-field mapping against the column audit.
    Audit {
        /// Column audit CSV, relative to the project root.
        #[arg(long, env = "columns_path")]
        columns_path: Option<String>,

        /// Sensitive-field mapping YAML.
        #[arg(long)]
        mapping: Option<String>,

        /// Where to write the JSON report.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,

        /// Where to write a Markdown summary.
        #[arg(long)]
        markdown_out: Option<Utf8PathBuf>,
    },

    /// Flatten model declarations into the policy-engine input document.
    Project {
        /// Schema YAML file, or a directory searched for `*.yml` / `*.yaml`.
        #[arg(long)]
        schema: Option<String>,

        /// Sensitive-field mapping YAML used to annotate columns.
        #[arg(long, conflicts_with = "no_mapping")]
        mapping: Option<String>,

        /// Project without mapping annotations.
        #[arg(long)]
        no_mapping: bool,

        /// Output file, or `-` for stdout.
        #[arg(long, short)]
        output: Option<String>,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/maskguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/maskguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "sensitive.enforcement") or code (e.g., "policy_mismatch").
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.cmd {
        Commands::Audit {
            columns_path,
            mapping,
            report_out,
            markdown_out,
        } => {
            let overrides = Overrides {
                columns_path: columns_path.clone(),
                mapping_path: mapping.clone(),
                ..base_overrides(&cli)
            };
            cmd_audit(&cli, overrides, report_out.as_deref(), markdown_out.as_deref())
        }
        Commands::Project {
            schema,
            mapping,
            no_mapping,
            output,
        } => {
            let stdout = output.as_deref() == Some("-");
            let overrides = Overrides {
                mapping_path: mapping.clone(),
                schema_path: schema.clone(),
                output_path: output.clone().filter(|_| !stdout),
                ..base_overrides(&cli)
            };
            cmd_project(&cli, overrides, *no_mapping, stdout)
        }
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Annotations { report, max } => cmd_annotations(report, *max),
        Commands::Explain { identifier } => cmd_explain(identifier),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn base_overrides(cli: &Cli) -> Overrides {
    Overrides {
        project_path: cli.project_path.clone(),
        cicd_path: cli.cicd_path.clone(),
        ..Overrides::default()
    }
}

/// Config file contents; a missing default config means defaults apply.
fn load_config_text(cli: &Cli) -> anyhow::Result<String> {
    match &cli.config {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("read config: {}", path))
        }
        None => {
            let root = cli
                .project_path
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .unwrap_or(".");
            let path = Utf8Path::new(root).join(CONFIG_FILE_NAME);
            if path.exists() {
                tracing::debug!(path = %path, "using config file");
                std::fs::read_to_string(&path).with_context(|| format!("read config: {}", path))
            } else {
                Ok(String::new())
            }
        }
    }
}

fn cmd_audit(
    cli: &Cli,
    overrides: Overrides,
    report_out: Option<&Utf8Path>,
    markdown_out: Option<&Utf8Path>,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let config_text = load_config_text(cli)?;
        let output = run_audit(AuditInput {
            config_text: &config_text,
            overrides,
        })?;
        let report = output.report;

        if let Some(path) = report_out {
            write_report(path, &report).context("write report json")?;
        }

        let renderable = to_renderable(&report);
        if let Some(path) = markdown_out {
            write_text(path, &render_markdown(&renderable)).context("write markdown")?;
        }

        print!("{}", render_console(&renderable, !cli.no_color));

        Ok(verdict_exit_code(report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            if let Some(path) = report_out {
                let report = runtime_error_report(&format!("{err:#}"));
                let _ = write_report(path, &report);
            }
            eprintln!("maskguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_project(
    cli: &Cli,
    overrides: Overrides,
    skip_mapping: bool,
    stdout: bool,
) -> anyhow::Result<()> {
    let config_text = load_config_text(cli)?;
    let output = run_project(ProjectInput {
        config_text: &config_text,
        overrides,
        skip_mapping,
    })?;

    if stdout {
        println!("{}", output.json);
    } else {
        write_text(&output.output_file, &output.json).context("write policy input")?;
        println!("Schema saved to: {}", output.output_file);
    }
    Ok(())
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text(out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;

    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{}", annotation);
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
