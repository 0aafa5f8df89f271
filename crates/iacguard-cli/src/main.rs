//! CLI entry point for iacguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup, and exit
//! codes. All business logic lives in the `iacguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use iacguard_app::{
    AuditInput, ExplainOutput, list_policies, read_report, render_annotations, render_markdown,
    run_audit, run_explain, runtime_error_report, to_renderable, verdict_exit_code, write_report,
    write_text,
};
use iacguard_settings::Overrides;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "iacguard=info,warn";

#[derive(Parser, Debug)]
#[command(
    name = "iacguard",
    version,
    about = "Security policy audits for Terraform resource declarations"
)]
struct Cli {
    /// Path to iacguard config TOML. A missing file means defaults apply.
    #[arg(long, default_value = "iacguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|advisory).
    #[arg(long)]
    profile: Option<String>,

    /// Override the lowest severity that fails the run (low|medium|high|critical).
    #[arg(long)]
    fail_on: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate the policy catalog against parsed resources and write artifacts.
    Audit {
        /// JSON document of parsed resource declarations.
        #[arg(long)]
        resources: Utf8PathBuf,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/iacguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/iacguard/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/iacguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/iacguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a policy id with remediation guidance.
    Explain {
        /// The policy id (e.g., "CKV_AZURE_CUSTOM_4").
        identifier: String,
    },

    /// List the active policy catalog after config is applied.
    Policies,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Audit {
            ref resources,
            ref report_out,
            write_markdown,
            ref markdown_out,
        } => cmd_audit(&cli, resources, report_out, write_markdown, markdown_out),
        Commands::Md { ref report, ref output } => cmd_md(report, output.as_deref()),
        Commands::Annotations { ref report, max } => cmd_annotations(report, max),
        Commands::Explain { ref identifier } => cmd_explain(identifier),
        Commands::Policies => cmd_policies(&cli),
    }
}

/// Logs go to stderr so stdout stays clean for `md` and `annotations` output.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        profile: cli.profile.clone(),
        fail_on: cli.fail_on.clone(),
    }
}

fn read_config(path: &Utf8Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            debug!(config = %path, "no config loaded ({err}); defaults apply");
            String::new()
        }
    }
}

fn cmd_audit(
    cli: &Cli,
    resources: &Utf8Path,
    report_out: &Utf8Path,
    write_markdown: bool,
    markdown_out: &Utf8Path,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let cfg_text = read_config(&cli.config);
        let resources_json = std::fs::read_to_string(resources)
            .with_context(|| format!("read resources: {}", resources))?;

        let output = run_audit(AuditInput {
            resources_json: &resources_json,
            config_text: &cfg_text,
            overrides: overrides(cli),
        })?;

        write_report(report_out, &output.report).context("write report json")?;

        if write_markdown {
            let md = render_markdown(&to_renderable(&output.report));
            write_text(markdown_out, &md).context("write markdown")?;
        }

        Ok(verdict_exit_code(output.report.status))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            error!("audit failed: {err:#}");
            let report = runtime_error_report(&format!("{err:#}"));
            let _ = write_report(report_out, &report);
            eprintln!("iacguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text(out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{}", annotation);
    }
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", iacguard_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_policy_ids,
        } => {
            eprint!(
                "{}",
                iacguard_app::format_not_found(&identifier, available_policy_ids)
            );
            std::process::exit(1);
        }
    }
}

fn cmd_policies(cli: &Cli) -> anyhow::Result<()> {
    let cfg_text = read_config(&cli.config);
    let policies = list_policies(&cfg_text, overrides(cli))?;

    for p in policies {
        println!(
            "{:<20} {:<9} {:<17} {:<34} {}",
            p.id,
            p.severity.as_str(),
            p.category.as_str(),
            p.targets.join(","),
            p.name
        );
    }

    Ok(())
}
