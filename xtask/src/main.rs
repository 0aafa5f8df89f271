//! Developer tasks (schema generation, fixture conformance, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use iacguard_app::{AuditInput, run_audit, serialize_report};
use iacguard_settings::Overrides;
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// The project root (parent of the xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(iacguard_types::AuditReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(iacguard_settings::IacguardConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "iacguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "iacguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas/ matches what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    for name in &missing {
        eprintln!("  - missing: {}", name);
    }
    for name in &mismatched {
        eprintln!("  - out of date: {}", name);
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Audit every fixture under tests/fixtures/ in-process and validate the produced
/// report against the generated report schema.
fn conform() -> anyhow::Result<()> {
    let schema_value = serde_json::to_value(generate_report_schema())
        .context("Failed to convert report schema to JSON")?;
    let validator = jsonschema::validator_for(&schema_value)
        .map_err(|e| anyhow::anyhow!("Failed to compile report schema: {}", e))?;
    println!("✓ iacguard.report.v1 schema compiles");

    let mut entries: Vec<PathBuf> = fs::read_dir(fixtures_dir())
        .context("Failed to read tests/fixtures/")?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.join("resources.json").exists())
        .collect();
    entries.sort();

    if entries.is_empty() {
        bail!("No fixtures found in {}", fixtures_dir().display());
    }

    let mut errors = Vec::new();
    for dir in &entries {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let resources = fs::read_to_string(dir.join("resources.json"))
            .with_context(|| format!("Failed to read {}/resources.json", name))?;
        let config = fs::read_to_string(dir.join("iacguard.toml")).unwrap_or_default();

        let output = run_audit(AuditInput {
            resources_json: &resources,
            config_text: &config,
            overrides: Overrides::default(),
        })
        .with_context(|| format!("audit fixture {}", name))?;

        let bytes = serialize_report(&output.report)?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        for err in validator.iter_errors(&value) {
            errors.push(format!("{}: schema validation: {}", name, err));
        }
        println!("  ✓ {} validates", name);
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ All {} fixtures produce conforming reports!", entries.len());
    Ok(())
}

/// Every catalog policy must have a complete explanation.
fn explain_coverage() -> anyhow::Result<()> {
    let policy_ids = iacguard_types::explain::all_policy_ids();
    let mut errors = Vec::new();

    for id in policy_ids {
        match iacguard_types::explain::lookup_explanation(id) {
            Some(exp) => {
                for (field, text) in [
                    ("title", exp.title),
                    ("description", exp.description),
                    ("remediation", exp.remediation),
                    ("examples.before", exp.examples.before),
                    ("examples.after", exp.examples.after),
                ] {
                    if text.trim().is_empty() {
                        errors.push(format!("Policy '{}' has empty {}", id, field));
                    }
                }
            }
            None => errors.push(format!("Policy '{}' has no explanation", id)),
        }
    }

    if errors.is_empty() {
        println!("✓ {} policy IDs have explanations", policy_ids.len());
        return Ok(());
    }

    for error in &errors {
        eprintln!("  - {}", error);
    }
    bail!(
        "Explain coverage validation failed with {} errors",
        errors.len()
    )
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  conform           Audit tests/fixtures/ and validate reports against the schema");
    eprintln!("  explain-coverage  Validate all policy IDs have explanations");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
