use std::any::Any;

use crate::builder::{finish, ElementBuilder};
use crate::error::Result;
use crate::model_support::{BindingStrength, FieldInfo, TypeInfo, TypeKind};
use crate::types::element::complex_element;
use crate::types::{
    CodeableConcept, Coded, ElementBase, FhirString, IdentifierUse, Period, Reference, Uri,
};
use crate::validation;
use crate::visitor::{self, Visitable, Visitor};

const ASSIGNER_TARGETS: &[&str] = &["Organization"];

/// An identifier intended for computation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    base: ElementBase,
    r#use: Option<Coded<IdentifierUse>>,
    r#type: Option<CodeableConcept>,
    system: Option<Uri>,
    value: Option<FhirString>,
    period: Option<Period>,
    assigner: Option<Box<Reference>>,
}

impl Identifier {
    pub fn builder() -> IdentifierBuilder {
        IdentifierBuilder::default()
    }

    pub fn to_builder(&self) -> IdentifierBuilder {
        IdentifierBuilder {
            base: self.base.clone(),
            r#use: self.r#use.clone(),
            r#type: self.r#type.clone(),
            system: self.system.clone(),
            value: self.value.clone(),
            period: self.period.clone(),
            assigner: self.assigner.clone(),
            skip_validation: false,
        }
    }

    pub fn r#use(&self) -> Option<&Coded<IdentifierUse>> {
        self.r#use.as_ref()
    }

    pub fn r#type(&self) -> Option<&CodeableConcept> {
        self.r#type.as_ref()
    }

    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn value(&self) -> Option<&FhirString> {
        self.value.as_ref()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    /// Organization that issued id
    pub fn assigner(&self) -> Option<&Reference> {
        self.assigner.as_deref()
    }

    fn validate(&self) -> Result<()> {
        validation::check_reference_type(self.assigner.as_deref(), "assigner", ASSIGNER_TARGETS)?;
        validation::require_value_or_children(self)
    }
}

complex_element!(Identifier);

impl Visitable for Identifier {
    fn type_name(&self) -> &'static str {
        "Identifier"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &TYPE_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children()
            || self.r#use.is_some()
            || self.r#type.is_some()
            || self.system.is_some()
            || self.value.is_some()
            || self.period.is_some()
            || self.assigner.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "use", self.r#use.as_ref());
            visitor::accept(v, "type", self.r#type.as_ref());
            visitor::accept(v, "system", self.system.as_ref());
            visitor::accept(v, "value", self.value.as_ref());
            visitor::accept(v, "period", self.period.as_ref());
            visitor::accept(v, "assigner", self.assigner.as_deref());
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct IdentifierBuilder {
    base: ElementBase,
    r#use: Option<Coded<IdentifierUse>>,
    r#type: Option<CodeableConcept>,
    system: Option<Uri>,
    value: Option<FhirString>,
    period: Option<Period>,
    assigner: Option<Box<Reference>>,
    skip_validation: bool,
}

impl ElementBuilder for IdentifierBuilder {
    fn element_base(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl IdentifierBuilder {
    pub fn r#use(mut self, r#use: impl Into<Coded<IdentifierUse>>) -> Self {
        self.r#use = Some(r#use.into());
        self
    }

    pub fn r#type(mut self, r#type: impl Into<CodeableConcept>) -> Self {
        self.r#type = Some(r#type.into());
        self
    }

    pub fn system(mut self, system: Uri) -> Self {
        self.system = Some(system);
        self
    }

    pub fn value(mut self, value: impl Into<FhirString>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn assigner(mut self, assigner: Reference) -> Self {
        self.assigner = Some(Box::new(assigner));
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<Identifier> {
        let validate = !self.skip_validation;
        finish("Identifier", validate, || {
            let identifier = Identifier {
                base: self.base.clone(),
                r#use: self.r#use.clone(),
                r#type: self.r#type.clone(),
                system: self.system.clone(),
                value: self.value.clone(),
                period: self.period.clone(),
                assigner: self.assigner.clone(),
            };
            if validate {
                identifier.validate()?;
            }
            Ok(identifier)
        })
    }
}

pub static TYPE_INFO: TypeInfo = TypeInfo {
    name: "Identifier",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    url: Some("http://hl7.org/fhir/StructureDefinition/Identifier"),
    fields: &[
        FieldInfo::new("use", &["code"])
            .summary()
            .modifier()
            .binding(
                "IdentifierUse",
                BindingStrength::Required,
                "http://hl7.org/fhir/ValueSet/identifier-use|5.0.0",
            ),
        FieldInfo::new("type", &["CodeableConcept"])
            .summary()
            .binding(
                "IdentifierType",
                BindingStrength::Extensible,
                "http://hl7.org/fhir/ValueSet/identifier-type",
            ),
        FieldInfo::new("system", &["uri"]).summary(),
        FieldInfo::new("value", &["string"]).summary(),
        FieldInfo::new("period", &["Period"]).summary(),
        FieldInfo::new("assigner", &["Reference"])
            .summary()
            .targets(ASSIGNER_TARGETS),
    ],
    constraints: &[],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_assigner_must_be_organization() {
        let ok = Identifier::builder()
            .value("A-1")
            .r#use(IdentifierUse::Official)
            .assigner(Reference::builder().reference("Organization/acme").build().unwrap())
            .build()
            .unwrap();
        assert_eq!(ok.r#use().and_then(|u| u.value()), Some(IdentifierUse::Official));

        let err = Identifier::builder()
            .value("A-1")
            .assigner(Reference::builder().reference("Patient/p1").build().unwrap())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidReferenceType { ref element, .. } if element == "assigner"));
    }
}
