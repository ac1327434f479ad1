use std::any::Any;

use crate::builder::{finish, ElementBuilder};
use crate::error::Result;
use crate::model_support::{ConstraintInfo, ConstraintLevel, FieldInfo, TypeInfo, TypeKind};
use crate::types::element::complex_element;
use crate::types::{ElementBase, FhirString, Identifier, Uri};
use crate::validation;
use crate::visitor::{self, Visitable, Visitor};

/// A reference from one resource to another
///
/// Only the type tag of a reference is checked by the model, see
/// [`validation::check_reference_type`]. The target is never resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    base: ElementBase,
    reference: Option<FhirString>,
    r#type: Option<Uri>,
    identifier: Option<Box<Identifier>>,
    display: Option<FhirString>,
}

impl Reference {
    pub fn builder() -> ReferenceBuilder {
        ReferenceBuilder::default()
    }

    pub fn to_builder(&self) -> ReferenceBuilder {
        ReferenceBuilder {
            base: self.base.clone(),
            reference: self.reference.clone(),
            r#type: self.r#type.clone(),
            identifier: self.identifier.clone(),
            display: self.display.clone(),
            skip_validation: false,
        }
    }

    /// Literal reference, relative, internal or absolute URL
    pub fn reference(&self) -> Option<&FhirString> {
        self.reference.as_ref()
    }

    /// Type the reference refers to (e.g. "Patient")
    pub fn r#type(&self) -> Option<&Uri> {
        self.r#type.as_ref()
    }

    /// Logical reference, when literal reference is not known
    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_deref()
    }

    pub fn display(&self) -> Option<&FhirString> {
        self.display.as_ref()
    }

    fn validate(&self) -> Result<()> {
        validation::require_value_or_children(self)
    }
}

complex_element!(Reference);

impl Visitable for Reference {
    fn type_name(&self) -> &'static str {
        "Reference"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &TYPE_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children()
            || self.reference.is_some()
            || self.r#type.is_some()
            || self.identifier.is_some()
            || self.display.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "reference", self.reference.as_ref());
            visitor::accept(v, "type", self.r#type.as_ref());
            visitor::accept(v, "identifier", self.identifier.as_deref());
            visitor::accept(v, "display", self.display.as_ref());
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceBuilder {
    base: ElementBase,
    reference: Option<FhirString>,
    r#type: Option<Uri>,
    identifier: Option<Box<Identifier>>,
    display: Option<FhirString>,
    skip_validation: bool,
}

impl ElementBuilder for ReferenceBuilder {
    fn element_base(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl ReferenceBuilder {
    pub fn reference(mut self, reference: impl Into<FhirString>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn r#type(mut self, r#type: Uri) -> Self {
        self.r#type = Some(r#type);
        self
    }

    pub fn identifier(mut self, identifier: Identifier) -> Self {
        self.identifier = Some(Box::new(identifier));
        self
    }

    pub fn display(mut self, display: impl Into<FhirString>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<Reference> {
        let validate = !self.skip_validation;
        finish("Reference", validate, || {
            let reference = Reference {
                base: self.base.clone(),
                reference: self.reference.clone(),
                r#type: self.r#type.clone(),
                identifier: self.identifier.clone(),
                display: self.display.clone(),
            };
            if validate {
                reference.validate()?;
            }
            Ok(reference)
        })
    }
}

pub static TYPE_INFO: TypeInfo = TypeInfo {
    name: "Reference",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    url: Some("http://hl7.org/fhir/StructureDefinition/Reference"),
    fields: &[
        FieldInfo::new("reference", &["string"]).summary(),
        FieldInfo::new("type", &["uri"]).summary(),
        FieldInfo::new("identifier", &["Identifier"]).summary(),
        FieldInfo::new("display", &["string"]).summary(),
    ],
    constraints: &[ConstraintInfo {
        id: "ref-1",
        level: ConstraintLevel::Rule,
        location: "(base)",
        description: "SHALL have a contained resource if a local reference is provided",
        expression: "reference.exists() implies (reference.startsWith('#').not() or (reference.substring(1).trace('url') in %rootResource.contained.id.trace('ids')) or (reference='#' and %rootResource!=%resource))",
    }],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_with_identifier() {
        let identifier = Identifier::builder()
            .system(Uri::new("urn:oid:1.2.36.146.595.217.0.1").unwrap())
            .value("12345")
            .build()
            .unwrap();
        let reference = Reference::builder()
            .identifier(identifier.clone())
            .display("Patient 12345")
            .build()
            .unwrap();
        assert_eq!(reference.identifier(), Some(&identifier));
        assert!(reference.reference().is_none());
        assert_eq!(reference, reference.to_builder().build().unwrap());
    }

    #[test]
    fn test_empty_reference_rejected() {
        assert!(Reference::builder().build().is_err());
    }
}
