use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use ferrum_codegen::generators::GeneratorConfig;
use ferrum_codegen::CodeGenerator;
use ferrum_r5::model_support::{self, ConstraintLevel, FieldInfo, TypeInfo, TypeKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ferrum",
    about = "Generate and inspect FHIR R5 models",
    version,
    arg_required_else_help = true
)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG).
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Rust model modules from StructureDefinition JSON files.
    Generate {
        /// Directory of StructureDefinition (or Bundle) JSON files.
        #[arg(short, long, value_name = "DIR")]
        input: PathBuf,
        /// Output directory for generated files.
        #[arg(short, long, value_name = "DIR", default_value = "generated")]
        output: PathBuf,
        /// Skip documentation comments.
        #[arg(long, action = ArgAction::SetTrue)]
        no_docs: bool,
        /// Emit bare `TypeInfo` statics without fields, bindings or constraints.
        #[arg(long, action = ArgAction::SetTrue)]
        no_metadata: bool,
        /// Path of the runtime crate inside generated modules.
        #[arg(long)]
        module_prefix: Option<String>,
    },

    /// Print the parsed intermediate representation of StructureDefinitions as JSON.
    Ir {
        /// Directory of StructureDefinition (or Bundle) JSON files.
        #[arg(short, long, value_name = "DIR")]
        input: PathBuf,
        /// Only print this type.
        #[arg(long = "type", value_name = "NAME")]
        type_name: Option<String>,
    },

    /// Print the metadata of a built-in model type (e.g. AuditEvent.Agent, Period).
    Inspect {
        /// FHIR type name; backbone elements use their dotted path.
        type_name: String,
    },

    /// Print CLI version.
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Generate {
            input,
            output,
            no_docs,
            no_metadata,
            module_prefix,
        } => {
            let config = GeneratorConfig {
                generate_docs: !no_docs,
                generate_metadata: !no_metadata,
                module_prefix,
            };
            run_generate(&input, &output, config)?;
        }
        Commands::Ir { input, type_name } => {
            run_ir(&input, type_name.as_deref())?;
        }
        Commands::Inspect { type_name } => {
            let info = model_support::type_info(&type_name)
                .with_context(|| format!("Unknown model type '{type_name}'"))?;
            print!("{}", render_type_info(info));
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_generate(input: &Path, output: &Path, config: GeneratorConfig) -> Result<()> {
    let report = ferrum_codegen::generate_rust_from_dir(input, output, config)
        .with_context(|| format!("Failed to generate Rust models from {}", input.display()))?;

    for (name, reason) in &report.skipped {
        warn!(name = %name, "Skipped: {reason}");
    }
    info!(
        modules = report.modules,
        skipped = report.skipped.len(),
        "Generation finished"
    );
    println!(
        "Generated {} Rust modules into {}",
        report.modules,
        output.display()
    );

    Ok(())
}

fn run_ir(input: &Path, type_name: Option<&str>) -> Result<()> {
    let codegen = CodeGenerator::from_dir(input)?;
    let registry = codegen.registry();

    let value = match type_name {
        Some(name) => {
            let type_def = registry
                .get_type_by_name(name)
                .with_context(|| format!("No StructureDefinition named '{name}'"))?;
            serde_json::to_value(type_def)?
        }
        None => {
            let mut types: Vec<_> = registry.types().map(|(_, t)| t).collect();
            types.sort_by(|a, b| a.name.cmp(&b.name));
            serde_json::to_value(types)?
        }
    };
    println!("{}", serde_json::to_string_pretty(&value)?);

    Ok(())
}

fn render_type_info(info: &TypeInfo) -> String {
    let mut out = String::new();

    let kind = match info.kind {
        TypeKind::PrimitiveType => "primitive type",
        TypeKind::ComplexType => "complex type",
        TypeKind::BackboneElement => "backbone element",
        TypeKind::Resource => "resource",
    };
    let _ = write!(out, "{} ({kind}", info.name);
    if let Some(base) = info.base {
        let _ = write!(out, ", base {base}");
    }
    let _ = writeln!(out, ")");
    if let Some(url) = info.url {
        let _ = writeln!(out, "  {url}");
    }

    let fields = info.all_fields();
    if !fields.is_empty() {
        let _ = writeln!(out, "\nFields:");
        let width = fields.iter().map(|f| display_name(f).len()).max().unwrap_or(0);
        for field in fields {
            let _ = writeln!(out, "  {}", render_field(field, width));
        }
    }

    if !info.constraints.is_empty() {
        let _ = writeln!(out, "\nConstraints:");
        for constraint in info.constraints {
            let level = match constraint.level {
                ConstraintLevel::Rule => "rule",
                ConstraintLevel::Warning => "warning",
            };
            let _ = writeln!(
                out,
                "  {} [{level}] {}: {}",
                constraint.id, constraint.location, constraint.description
            );
            if !constraint.expression.is_empty() {
                let _ = writeln!(out, "      {}", constraint.expression);
            }
        }
    }

    out
}

fn display_name(field: &FieldInfo) -> String {
    if field.is_choice() {
        format!("{}[x]", field.name)
    } else {
        field.name.to_string()
    }
}

fn render_field(field: &FieldInfo, width: usize) -> String {
    let mut line = format!(
        "{:<width$}  {:<4}  {}",
        display_name(field),
        field.cardinality(),
        field.types.join(" | ")
    );

    let mut flags = Vec::new();
    if field.summary {
        flags.push("summary");
    }
    if field.modifier {
        flags.push("modifier");
    }
    if !flags.is_empty() {
        let _ = write!(line, "  [{}]", flags.join(", "));
    }
    if !field.reference_targets.is_empty() {
        let _ = write!(line, "  -> {}", field.reference_targets.join(" | "));
    }
    if let Some(binding) = field.binding {
        let _ = write!(
            line,
            "  {} ({}) {}",
            binding.name,
            binding.strength.as_str(),
            binding.value_set
        );
    }

    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_generate_flags() {
        let cli = Cli::parse_from([
            "ferrum",
            "generate",
            "--input",
            "defs",
            "--output",
            "out",
            "--no-metadata",
        ]);
        match cli.command {
            Commands::Generate {
                input,
                output,
                no_docs,
                no_metadata,
                module_prefix,
            } => {
                assert_eq!(input, PathBuf::from("defs"));
                assert_eq!(output, PathBuf::from("out"));
                assert!(!no_docs);
                assert!(no_metadata);
                assert!(module_prefix.is_none());
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_render_agent() {
        let info = model_support::type_info("AuditEvent.Agent").unwrap();
        let text = render_type_info(info);

        assert!(text.starts_with("AuditEvent.Agent (backbone element, base BackboneElement)\n"));
        assert!(text.contains("network[x]"));
        assert!(text.contains("Reference | uri | string"));
        let who = text.lines().find(|l| l.trim_start().starts_with("who ")).unwrap();
        assert!(who.contains("1..1"));
        assert!(who.contains("[summary]"));
        assert!(who.contains("-> Practitioner | PractitionerRole"));
    }

    #[test]
    fn test_render_constraints_and_bindings() {
        let info = model_support::type_info("EvidenceVariable").unwrap();
        let text = render_type_info(info);
        assert!(text.contains("evv-1 [rule]"));

        let info = model_support::type_info("AuditEvent").unwrap();
        let text = render_type_info(info);
        assert!(text.contains("AuditEventAction (required)"));
        // Inherited fields come first
        assert!(text.find("  id").unwrap() < text.find("  category").unwrap());
    }
}
