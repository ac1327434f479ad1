//! Output generators
//!
//! Generators walk a model tree with a [`crate::visitor::Visitor`] and write
//! it in a FHIR wire format. Only JSON is provided.

mod json;

pub use json::JsonGenerator;

/// Output options shared by the generators
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Indent the output
    pub pretty: bool,
}

impl GeneratorConfig {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}
