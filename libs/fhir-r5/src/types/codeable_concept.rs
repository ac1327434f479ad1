use std::any::Any;

use crate::builder::{finish, ElementBuilder};
use crate::error::Result;
use crate::model_support::{FieldInfo, TypeInfo, TypeKind};
use crate::types::element::complex_element;
use crate::types::{Coding, ElementBase, FhirString, Reference};
use crate::validation;
use crate::visitor::{self, Visitable, Visitor};

/// Concept - reference to a terminology or just text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeableConcept {
    base: ElementBase,
    coding: Vec<Coding>,
    text: Option<FhirString>,
}

impl CodeableConcept {
    pub fn builder() -> CodeableConceptBuilder {
        CodeableConceptBuilder::default()
    }

    pub fn to_builder(&self) -> CodeableConceptBuilder {
        CodeableConceptBuilder {
            base: self.base.clone(),
            coding: self.coding.clone(),
            text: self.text.clone(),
            skip_validation: false,
        }
    }

    /// A concept holding only text.
    pub fn text_only(text: impl Into<FhirString>) -> Self {
        CodeableConcept {
            base: ElementBase::default(),
            coding: Vec::new(),
            text: Some(text.into()),
        }
    }

    pub fn coding(&self) -> &[Coding] {
        &self.coding
    }

    pub fn text(&self) -> Option<&FhirString> {
        self.text.as_ref()
    }

    fn validate(&self) -> Result<()> {
        validation::require_value_or_children(self)
    }
}

impl From<Coding> for CodeableConcept {
    fn from(coding: Coding) -> Self {
        CodeableConcept {
            base: ElementBase::default(),
            coding: vec![coding],
            text: None,
        }
    }
}

complex_element!(CodeableConcept);

impl Visitable for CodeableConcept {
    fn type_name(&self) -> &'static str {
        "CodeableConcept"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &CODEABLE_CONCEPT_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children() || !self.coding.is_empty() || self.text.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept_list(v, "coding", &self.coding);
            visitor::accept(v, "text", self.text.as_ref());
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodeableConceptBuilder {
    base: ElementBase,
    coding: Vec<Coding>,
    text: Option<FhirString>,
    skip_validation: bool,
}

impl ElementBuilder for CodeableConceptBuilder {
    fn element_base(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl CodeableConceptBuilder {
    pub fn coding(mut self, coding: Coding) -> Self {
        self.coding.push(coding);
        self
    }

    pub fn set_coding(mut self, coding: impl IntoIterator<Item = Coding>) -> Self {
        self.coding = coding.into_iter().collect();
        self
    }

    pub fn text(mut self, text: impl Into<FhirString>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<CodeableConcept> {
        let validate = !self.skip_validation;
        finish("CodeableConcept", validate, || {
            let concept = CodeableConcept {
                base: self.base.clone(),
                coding: self.coding.clone(),
                text: self.text.clone(),
            };
            if validate {
                concept.validate()?;
            }
            Ok(concept)
        })
    }
}

/// Reference to a resource or a concept
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeableReference {
    base: ElementBase,
    concept: Option<CodeableConcept>,
    reference: Option<Reference>,
}

impl CodeableReference {
    pub fn builder() -> CodeableReferenceBuilder {
        CodeableReferenceBuilder::default()
    }

    pub fn to_builder(&self) -> CodeableReferenceBuilder {
        CodeableReferenceBuilder {
            base: self.base.clone(),
            concept: self.concept.clone(),
            reference: self.reference.clone(),
            skip_validation: false,
        }
    }

    pub fn concept(&self) -> Option<&CodeableConcept> {
        self.concept.as_ref()
    }

    pub fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    fn validate(&self) -> Result<()> {
        validation::require_value_or_children(self)
    }
}

complex_element!(CodeableReference);

impl Visitable for CodeableReference {
    fn type_name(&self) -> &'static str {
        "CodeableReference"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &CODEABLE_REFERENCE_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children() || self.concept.is_some() || self.reference.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "concept", self.concept.as_ref());
            visitor::accept(v, "reference", self.reference.as_ref());
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodeableReferenceBuilder {
    base: ElementBase,
    concept: Option<CodeableConcept>,
    reference: Option<Reference>,
    skip_validation: bool,
}

impl ElementBuilder for CodeableReferenceBuilder {
    fn element_base(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl CodeableReferenceBuilder {
    pub fn concept(mut self, concept: impl Into<CodeableConcept>) -> Self {
        self.concept = Some(concept.into());
        self
    }

    pub fn reference(mut self, reference: Reference) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<CodeableReference> {
        let validate = !self.skip_validation;
        finish("CodeableReference", validate, || {
            let codeable_reference = CodeableReference {
                base: self.base.clone(),
                concept: self.concept.clone(),
                reference: self.reference.clone(),
            };
            if validate {
                codeable_reference.validate()?;
            }
            Ok(codeable_reference)
        })
    }
}

pub static CODEABLE_CONCEPT_INFO: TypeInfo = TypeInfo {
    name: "CodeableConcept",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    url: Some("http://hl7.org/fhir/StructureDefinition/CodeableConcept"),
    fields: &[
        FieldInfo::new("coding", &["Coding"]).list().summary(),
        FieldInfo::new("text", &["string"]).summary(),
    ],
    constraints: &[],
};

pub static CODEABLE_REFERENCE_INFO: TypeInfo = TypeInfo {
    name: "CodeableReference",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    url: Some("http://hl7.org/fhir/StructureDefinition/CodeableReference"),
    fields: &[
        FieldInfo::new("concept", &["CodeableConcept"]).summary(),
        FieldInfo::new("reference", &["Reference"]).summary(),
    ],
    constraints: &[],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Code, Uri};

    fn coding(code: &str) -> Coding {
        Coding::builder()
            .system(Uri::new("http://terminology.hl7.org/CodeSystem/v3-ActReason").unwrap())
            .code(Code::new(code).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_append_and_replace_coding() {
        let concept = CodeableConcept::builder()
            .coding(coding("HTEST"))
            .coding(coding("TREAT"))
            .build()
            .unwrap();
        assert_eq!(concept.coding().len(), 2);

        let replaced = concept
            .to_builder()
            .set_coding([coding("ETREAT")])
            .build()
            .unwrap();
        assert_eq!(replaced.coding().len(), 1);
        assert_eq!(replaced.coding()[0].code().unwrap().value().unwrap(), "ETREAT");
    }

    #[test]
    fn test_conversions() {
        let concept = CodeableConcept::from(coding("HTEST"));
        assert_eq!(concept.coding().len(), 1);
        assert_eq!(
            CodeableConcept::text_only("free text").text().unwrap().as_str(),
            Some("free text")
        );
    }

    #[test]
    fn test_codeable_reference() {
        let cr = CodeableReference::builder()
            .reference(Reference::builder().reference("Observation/1").build().unwrap())
            .build()
            .unwrap();
        assert!(cr.concept().is_none());
        assert!(cr.has_children());
        assert!(CodeableReference::builder().build().is_err());
    }
}
