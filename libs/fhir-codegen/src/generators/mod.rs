//! Generators over the IR
//!
//! A generator turns a [`TypeRegistry`] into source for one target. Rust is
//! the only target; its modules are laid out for the `ferrum-r5` runtime.

pub mod rust;

use crate::ir::TypeRegistry;
use anyhow::Result;

/// A code generation target
pub trait Generator {
    type Output;

    /// Generate code for every supported type in the registry
    fn generate(&self, registry: &TypeRegistry) -> Result<Self::Output>;
}

/// Options shared by generators
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Whether to generate documentation comments
    pub generate_docs: bool,
    /// Whether to emit field, binding and constraint metadata in the
    /// `TypeInfo` statics; without it they only carry name and kind
    pub generate_metadata: bool,
    /// Path of the runtime crate the generated modules live in
    pub module_prefix: Option<String>,
}

impl GeneratorConfig {
    pub fn module_prefix(&self) -> &str {
        self.module_prefix.as_deref().unwrap_or("crate")
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generate_docs: true,
            generate_metadata: true,
            module_prefix: None,
        }
    }
}
