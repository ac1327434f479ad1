use std::any::Any;

use crate::builder::{finish, ElementBuilder};
use crate::error::Result;
use crate::model_support::{BindingStrength, FieldInfo, TypeInfo, TypeKind};
use crate::types::element::complex_element;
use crate::types::{
    Attachment, Canonical, CodeableConcept, Coded, Date, ElementBase, FhirString, Markdown,
    Reference, RelatedArtifactPublicationStatus, RelatedArtifactType,
};
use crate::validation;
use crate::visitor::{self, Visitable, Visitor};

/// Related artifacts for a knowledge resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelatedArtifact {
    base: ElementBase,
    r#type: Coded<RelatedArtifactType>,
    classifier: Vec<CodeableConcept>,
    label: Option<FhirString>,
    display: Option<FhirString>,
    citation: Option<Markdown>,
    document: Option<Attachment>,
    resource: Option<Canonical>,
    resource_reference: Option<Reference>,
    publication_status: Option<Coded<RelatedArtifactPublicationStatus>>,
    publication_date: Option<Date>,
}

impl RelatedArtifact {
    pub fn builder() -> RelatedArtifactBuilder {
        RelatedArtifactBuilder::default()
    }

    pub fn to_builder(&self) -> RelatedArtifactBuilder {
        RelatedArtifactBuilder {
            base: self.base.clone(),
            r#type: Some(self.r#type.clone()),
            classifier: self.classifier.clone(),
            label: self.label.clone(),
            display: self.display.clone(),
            citation: self.citation.clone(),
            document: self.document.clone(),
            resource: self.resource.clone(),
            resource_reference: self.resource_reference.clone(),
            publication_status: self.publication_status.clone(),
            publication_date: self.publication_date.clone(),
            skip_validation: false,
        }
    }

    pub fn r#type(&self) -> &Coded<RelatedArtifactType> {
        &self.r#type
    }

    pub fn classifier(&self) -> &[CodeableConcept] {
        &self.classifier
    }

    pub fn label(&self) -> Option<&FhirString> {
        self.label.as_ref()
    }

    pub fn display(&self) -> Option<&FhirString> {
        self.display.as_ref()
    }

    pub fn citation(&self) -> Option<&Markdown> {
        self.citation.as_ref()
    }

    pub fn document(&self) -> Option<&Attachment> {
        self.document.as_ref()
    }

    pub fn resource(&self) -> Option<&Canonical> {
        self.resource.as_ref()
    }

    pub fn resource_reference(&self) -> Option<&Reference> {
        self.resource_reference.as_ref()
    }

    pub fn publication_status(&self) -> Option<&Coded<RelatedArtifactPublicationStatus>> {
        self.publication_status.as_ref()
    }

    pub fn publication_date(&self) -> Option<&Date> {
        self.publication_date.as_ref()
    }

    fn validate(&self) -> Result<()> {
        validation::require_value_or_children(self)
    }
}

complex_element!(RelatedArtifact);

impl Visitable for RelatedArtifact {
    fn type_name(&self) -> &'static str {
        "RelatedArtifact"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &TYPE_INFO
    }

    fn has_children(&self) -> bool {
        true
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            self.r#type.accept("type", None, v);
            visitor::accept_list(v, "classifier", &self.classifier);
            visitor::accept(v, "label", self.label.as_ref());
            visitor::accept(v, "display", self.display.as_ref());
            visitor::accept(v, "citation", self.citation.as_ref());
            visitor::accept(v, "document", self.document.as_ref());
            visitor::accept(v, "resource", self.resource.as_ref());
            visitor::accept(v, "resourceReference", self.resource_reference.as_ref());
            visitor::accept(v, "publicationStatus", self.publication_status.as_ref());
            visitor::accept(v, "publicationDate", self.publication_date.as_ref());
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct RelatedArtifactBuilder {
    base: ElementBase,
    r#type: Option<Coded<RelatedArtifactType>>,
    classifier: Vec<CodeableConcept>,
    label: Option<FhirString>,
    display: Option<FhirString>,
    citation: Option<Markdown>,
    document: Option<Attachment>,
    resource: Option<Canonical>,
    resource_reference: Option<Reference>,
    publication_status: Option<Coded<RelatedArtifactPublicationStatus>>,
    publication_date: Option<Date>,
    skip_validation: bool,
}

impl ElementBuilder for RelatedArtifactBuilder {
    fn element_base(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl RelatedArtifactBuilder {
    pub fn r#type(mut self, r#type: impl Into<Coded<RelatedArtifactType>>) -> Self {
        self.r#type = Some(r#type.into());
        self
    }

    pub fn classifier(mut self, classifier: impl Into<CodeableConcept>) -> Self {
        self.classifier.push(classifier.into());
        self
    }

    pub fn set_classifier(mut self, classifier: impl IntoIterator<Item = CodeableConcept>) -> Self {
        self.classifier = classifier.into_iter().collect();
        self
    }

    pub fn label(mut self, label: impl Into<FhirString>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn display(mut self, display: impl Into<FhirString>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn citation(mut self, citation: impl Into<Markdown>) -> Self {
        self.citation = Some(citation.into());
        self
    }

    pub fn document(mut self, document: Attachment) -> Self {
        self.document = Some(document);
        self
    }

    pub fn resource(mut self, resource: Canonical) -> Self {
        self.resource = Some(resource);
        self
    }

    pub fn resource_reference(mut self, resource_reference: Reference) -> Self {
        self.resource_reference = Some(resource_reference);
        self
    }

    pub fn publication_status(
        mut self,
        publication_status: impl Into<Coded<RelatedArtifactPublicationStatus>>,
    ) -> Self {
        self.publication_status = Some(publication_status.into());
        self
    }

    pub fn publication_date(mut self, publication_date: Date) -> Self {
        self.publication_date = Some(publication_date);
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<RelatedArtifact> {
        let validate = !self.skip_validation;
        finish("RelatedArtifact", validate, || {
            let artifact = RelatedArtifact {
                base: self.base.clone(),
                r#type: validation::require_non_null(self.r#type.clone(), "type")?,
                classifier: self.classifier.clone(),
                label: self.label.clone(),
                display: self.display.clone(),
                citation: self.citation.clone(),
                document: self.document.clone(),
                resource: self.resource.clone(),
                resource_reference: self.resource_reference.clone(),
                publication_status: self.publication_status.clone(),
                publication_date: self.publication_date.clone(),
            };
            if validate {
                artifact.validate()?;
            }
            Ok(artifact)
        })
    }
}

pub static TYPE_INFO: TypeInfo = TypeInfo {
    name: "RelatedArtifact",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    url: Some("http://hl7.org/fhir/StructureDefinition/RelatedArtifact"),
    fields: &[
        FieldInfo::new("type", &["code"]).required().summary().binding(
            "RelatedArtifactType",
            BindingStrength::Required,
            "http://hl7.org/fhir/ValueSet/related-artifact-type|5.0.0",
        ),
        FieldInfo::new("classifier", &["CodeableConcept"])
            .list()
            .summary()
            .binding(
                "RelatedArtifactClassifier",
                BindingStrength::Example,
                "http://hl7.org/fhir/ValueSet/citation-artifact-classifier",
            ),
        FieldInfo::new("label", &["string"]).summary(),
        FieldInfo::new("display", &["string"]).summary(),
        FieldInfo::new("citation", &["markdown"]).summary(),
        FieldInfo::new("document", &["Attachment"]).summary(),
        FieldInfo::new("resource", &["canonical"]).summary(),
        FieldInfo::new("resourceReference", &["Reference"]).summary(),
        FieldInfo::new("publicationStatus", &["code"]).summary().binding(
            "PublicationStatus",
            BindingStrength::Required,
            "http://hl7.org/fhir/ValueSet/publication-status|5.0.0",
        ),
        FieldInfo::new("publicationDate", &["date"]).summary(),
    ],
    constraints: &[],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_type_is_required() {
        let err = RelatedArtifact::builder().label("x").build().unwrap_err();
        assert!(matches!(err, Error::MissingRequired { ref element } if element == "type"));
    }

    #[test]
    fn test_citation_artifact() {
        let artifact = RelatedArtifact::builder()
            .r#type(RelatedArtifactType::CiteAs)
            .citation("Smith J. Evidence. 2023.")
            .publication_status(RelatedArtifactPublicationStatus::Active)
            .publication_date(Date::new("2023-04").unwrap())
            .build()
            .unwrap();
        assert_eq!(artifact.r#type().value(), Some(RelatedArtifactType::CiteAs));
        assert_eq!(artifact, artifact.to_builder().build().unwrap());
    }
}
