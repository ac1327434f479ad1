//! FHIR Code Generator
//!
//! Generates `ferrum-r5` model modules from FHIR StructureDefinitions.
//!
//! ## Architecture
//!
//! The generator uses a three-stage pipeline:
//! 1. **Parser**: Extracts type information from FHIR StructureDefinitions
//! 2. **IR (Intermediate Representation)**: Language-agnostic type model
//! 3. **Generators**: Language-specific code generation from IR
//!
//! This architecture allows adding new target languages without re-parsing definitions.

pub mod error;
pub mod generators;
pub mod ir;
pub mod parser;
pub mod utils;

use std::path::Path;

use anyhow::{Context, Result};
use generators::rust::RustGenerator;
use generators::GeneratorConfig;
use ir::TypeRegistry;
use serde_json::Value;
use tracing::info;

pub use error::Error;

/// Main entry point for code generation
pub struct CodeGenerator {
    registry: TypeRegistry,
}

impl CodeGenerator {
    /// Create a new code generator from StructureDefinitions or Bundles of them
    pub fn from_definitions<'a>(definitions: impl IntoIterator<Item = &'a Value>) -> Self {
        Self {
            registry: parser::parse_definitions(definitions),
        }
    }

    /// Create a new code generator from a directory of JSON definitions
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let registry = parser::parse_dir(dir)?;
        Ok(Self { registry })
    }

    /// Get the type registry
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Generate code for a specific language
    pub fn generate<G: generators::Generator>(&self, generator: G) -> Result<G::Output> {
        generator.generate(&self.registry)
    }
}

/// Summary of a generation run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub modules: usize,
    /// Types left out, with the reason
    pub skipped: Vec<(String, String)>,
}

/// Convenience helper to run the Rust code generator over a definitions directory.
pub fn generate_rust_from_dir(
    input_dir: &Path,
    output_dir: &Path,
    config: GeneratorConfig,
) -> Result<GenerationReport> {
    let codegen = CodeGenerator::from_dir(input_dir).context("building type registry")?;
    info!(types = codegen.registry().len(), "Parsed StructureDefinitions");

    let generator = RustGenerator::new(config);
    let output = codegen
        .generate(generator)
        .context("running Rust generator")?;

    utils::write_modules(output_dir, &output.modules)?;

    Ok(GenerationReport {
        modules: output.modules.len(),
        skipped: output.skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_generate_rust_from_dir() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(
            input.path().join("AuditEvent.json"),
            parser::tests::audit_event_definition().to_string(),
        )
        .unwrap();

        let target = output.path().join("generated");
        let report =
            generate_rust_from_dir(input.path(), &target, GeneratorConfig::default()).unwrap();

        assert_eq!(report.modules, 2);
        assert!(report.skipped.is_empty());
        let code = fs::read_to_string(target.join("audit_event.rs")).unwrap();
        assert!(code.contains("pub struct AuditEventBuilder {"));
        assert!(target.join("mod.rs").exists());
    }

    #[test]
    fn test_missing_input_dir() {
        let output = tempfile::tempdir().unwrap();
        let err = generate_rust_from_dir(
            &output.path().join("missing"),
            output.path(),
            GeneratorConfig::default(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("building type registry"));
    }
}
