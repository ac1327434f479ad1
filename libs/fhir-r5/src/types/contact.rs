//! ContactPoint, ContactDetail and UsageContext

use std::any::Any;

use crate::builder::{finish, ElementBuilder};
use crate::error::Result;
use crate::model_support::{BindingStrength, FieldInfo, TypeInfo, TypeKind};
use crate::types::choice::choice_enum;
use crate::types::element::complex_element;
use crate::types::{
    CodeableConcept, Coded, Coding, ContactPointSystem, ContactPointUse, ElementBase, FhirString,
    Period, PositiveInt, Quantity, Range, Reference,
};
use crate::validation;
use crate::visitor::{self, Visitable, Visitor};

/// Details of a technology mediated contact point (phone, fax, email, etc.)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContactPoint {
    base: ElementBase,
    system: Option<Coded<ContactPointSystem>>,
    value: Option<FhirString>,
    r#use: Option<Coded<ContactPointUse>>,
    rank: Option<PositiveInt>,
    period: Option<Period>,
}

impl ContactPoint {
    pub fn builder() -> ContactPointBuilder {
        ContactPointBuilder::default()
    }

    pub fn to_builder(&self) -> ContactPointBuilder {
        ContactPointBuilder {
            base: self.base.clone(),
            system: self.system.clone(),
            value: self.value.clone(),
            r#use: self.r#use.clone(),
            rank: self.rank.clone(),
            period: self.period.clone(),
            skip_validation: false,
        }
    }

    pub fn system(&self) -> Option<&Coded<ContactPointSystem>> {
        self.system.as_ref()
    }

    pub fn value(&self) -> Option<&FhirString> {
        self.value.as_ref()
    }

    pub fn r#use(&self) -> Option<&Coded<ContactPointUse>> {
        self.r#use.as_ref()
    }

    pub fn rank(&self) -> Option<&PositiveInt> {
        self.rank.as_ref()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    fn validate(&self) -> Result<()> {
        validation::require_value_or_children(self)
    }
}

complex_element!(ContactPoint);

impl Visitable for ContactPoint {
    fn type_name(&self) -> &'static str {
        "ContactPoint"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &CONTACT_POINT_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children()
            || self.system.is_some()
            || self.value.is_some()
            || self.r#use.is_some()
            || self.rank.is_some()
            || self.period.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "system", self.system.as_ref());
            visitor::accept(v, "value", self.value.as_ref());
            visitor::accept(v, "use", self.r#use.as_ref());
            visitor::accept(v, "rank", self.rank.as_ref());
            visitor::accept(v, "period", self.period.as_ref());
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactPointBuilder {
    base: ElementBase,
    system: Option<Coded<ContactPointSystem>>,
    value: Option<FhirString>,
    r#use: Option<Coded<ContactPointUse>>,
    rank: Option<PositiveInt>,
    period: Option<Period>,
    skip_validation: bool,
}

impl ElementBuilder for ContactPointBuilder {
    fn element_base(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl ContactPointBuilder {
    pub fn system(mut self, system: impl Into<Coded<ContactPointSystem>>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn value(mut self, value: impl Into<FhirString>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn r#use(mut self, r#use: impl Into<Coded<ContactPointUse>>) -> Self {
        self.r#use = Some(r#use.into());
        self
    }

    pub fn rank(mut self, rank: PositiveInt) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<ContactPoint> {
        let validate = !self.skip_validation;
        finish("ContactPoint", validate, || {
            let contact_point = ContactPoint {
                base: self.base.clone(),
                system: self.system.clone(),
                value: self.value.clone(),
                r#use: self.r#use.clone(),
                rank: self.rank.clone(),
                period: self.period.clone(),
            };
            if validate {
                contact_point.validate()?;
            }
            Ok(contact_point)
        })
    }
}

/// Contact information
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContactDetail {
    base: ElementBase,
    name: Option<FhirString>,
    telecom: Vec<ContactPoint>,
}

impl ContactDetail {
    pub fn builder() -> ContactDetailBuilder {
        ContactDetailBuilder::default()
    }

    pub fn to_builder(&self) -> ContactDetailBuilder {
        ContactDetailBuilder {
            base: self.base.clone(),
            name: self.name.clone(),
            telecom: self.telecom.clone(),
            skip_validation: false,
        }
    }

    pub fn name(&self) -> Option<&FhirString> {
        self.name.as_ref()
    }

    pub fn telecom(&self) -> &[ContactPoint] {
        &self.telecom
    }

    fn validate(&self) -> Result<()> {
        validation::require_value_or_children(self)
    }
}

complex_element!(ContactDetail);

impl Visitable for ContactDetail {
    fn type_name(&self) -> &'static str {
        "ContactDetail"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &CONTACT_DETAIL_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children() || self.name.is_some() || !self.telecom.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "name", self.name.as_ref());
            visitor::accept_list(v, "telecom", &self.telecom);
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactDetailBuilder {
    base: ElementBase,
    name: Option<FhirString>,
    telecom: Vec<ContactPoint>,
    skip_validation: bool,
}

impl ElementBuilder for ContactDetailBuilder {
    fn element_base(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl ContactDetailBuilder {
    pub fn name(mut self, name: impl Into<FhirString>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn telecom(mut self, telecom: ContactPoint) -> Self {
        self.telecom.push(telecom);
        self
    }

    pub fn set_telecom(mut self, telecom: impl IntoIterator<Item = ContactPoint>) -> Self {
        self.telecom = telecom.into_iter().collect();
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<ContactDetail> {
        let validate = !self.skip_validation;
        finish("ContactDetail", validate, || {
            let detail = ContactDetail {
                base: self.base.clone(),
                name: self.name.clone(),
                telecom: self.telecom.clone(),
            };
            if validate {
                detail.validate()?;
            }
            Ok(detail)
        })
    }
}

choice_enum! {
    /// UsageContext.value[x]
    pub enum UsageContextValue {
        CodeableConcept(CodeableConcept),
        Quantity(Quantity),
        Range(Range),
        Reference(Reference),
    }
}

const USAGE_CONTEXT_VALUE_TYPES: &[&str] = &["CodeableConcept", "Quantity", "Range", "Reference"];

const USAGE_CONTEXT_VALUE_TARGETS: &[&str] = &[
    "PlanDefinition",
    "ResearchStudy",
    "InsurancePlan",
    "HealthcareService",
    "Group",
    "Location",
    "Organization",
];

/// Describes the context of use for a conformance or knowledge resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UsageContext {
    base: ElementBase,
    code: Coding,
    value: UsageContextValue,
}

impl UsageContext {
    pub fn builder() -> UsageContextBuilder {
        UsageContextBuilder::default()
    }

    pub fn to_builder(&self) -> UsageContextBuilder {
        UsageContextBuilder {
            base: self.base.clone(),
            code: Some(self.code.clone()),
            value: Some(self.value.clone()),
            skip_validation: false,
        }
    }

    pub fn code(&self) -> &Coding {
        &self.code
    }

    pub fn value(&self) -> &UsageContextValue {
        &self.value
    }

    fn validate(&self) -> Result<()> {
        validation::choice_element(Some(&self.value), "value", USAGE_CONTEXT_VALUE_TYPES)?;
        validation::check_choice_reference_type(
            Some(&self.value),
            "value",
            USAGE_CONTEXT_VALUE_TARGETS,
        )?;
        validation::require_value_or_children(self)
    }
}

complex_element!(UsageContext);

impl Visitable for UsageContext {
    fn type_name(&self) -> &'static str {
        "UsageContext"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &USAGE_CONTEXT_INFO
    }

    fn has_children(&self) -> bool {
        true
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            self.code.accept("code", None, v);
            self.value.accept("value", None, v);
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct UsageContextBuilder {
    base: ElementBase,
    code: Option<Coding>,
    value: Option<UsageContextValue>,
    skip_validation: bool,
}

impl ElementBuilder for UsageContextBuilder {
    fn element_base(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl UsageContextBuilder {
    pub fn code(mut self, code: Coding) -> Self {
        self.code = Some(code);
        self
    }

    pub fn value(mut self, value: impl Into<UsageContextValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<UsageContext> {
        let validate = !self.skip_validation;
        finish("UsageContext", validate, || {
            let context = UsageContext {
                base: self.base.clone(),
                code: validation::require_non_null(self.code.clone(), "code")?,
                value: validation::require_non_null(self.value.clone(), "value")?,
            };
            if validate {
                context.validate()?;
            }
            Ok(context)
        })
    }
}

pub static CONTACT_POINT_INFO: TypeInfo = TypeInfo {
    name: "ContactPoint",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    url: Some("http://hl7.org/fhir/StructureDefinition/ContactPoint"),
    fields: &[
        FieldInfo::new("system", &["code"]).summary().binding(
            "ContactPointSystem",
            BindingStrength::Required,
            "http://hl7.org/fhir/ValueSet/contact-point-system|5.0.0",
        ),
        FieldInfo::new("value", &["string"]).summary(),
        FieldInfo::new("use", &["code"]).summary().modifier().binding(
            "ContactPointUse",
            BindingStrength::Required,
            "http://hl7.org/fhir/ValueSet/contact-point-use|5.0.0",
        ),
        FieldInfo::new("rank", &["positiveInt"]).summary(),
        FieldInfo::new("period", &["Period"]).summary(),
    ],
    constraints: &[crate::model_support::ConstraintInfo {
        id: "cpt-2",
        level: crate::model_support::ConstraintLevel::Rule,
        location: "(base)",
        description: "A system is required if a value is provided.",
        expression: "value.empty() or system.exists()",
    }],
};

pub static CONTACT_DETAIL_INFO: TypeInfo = TypeInfo {
    name: "ContactDetail",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    url: Some("http://hl7.org/fhir/StructureDefinition/ContactDetail"),
    fields: &[
        FieldInfo::new("name", &["string"]).summary(),
        FieldInfo::new("telecom", &["ContactPoint"]).list().summary(),
    ],
    constraints: &[],
};

pub static USAGE_CONTEXT_INFO: TypeInfo = TypeInfo {
    name: "UsageContext",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    url: Some("http://hl7.org/fhir/StructureDefinition/UsageContext"),
    fields: &[
        FieldInfo::new("code", &["Coding"]).required().summary().binding(
            "UsageContextType",
            BindingStrength::Extensible,
            "http://hl7.org/fhir/ValueSet/usage-context-type",
        ),
        FieldInfo::new("value", USAGE_CONTEXT_VALUE_TYPES)
            .required()
            .summary()
            .targets(USAGE_CONTEXT_VALUE_TARGETS)
            .binding(
                "UsageContextValue",
                BindingStrength::Example,
                "http://hl7.org/fhir/ValueSet/use-context",
            ),
    ],
    constraints: &[],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::{Code, Uri};

    fn focus() -> Coding {
        Coding::builder()
            .system(Uri::new("http://terminology.hl7.org/CodeSystem/usage-context-type").unwrap())
            .code(Code::new("focus").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_usage_context_reference_targets() {
        let ok = UsageContext::builder()
            .code(focus())
            .value(Reference::builder().reference("Group/g1").build().unwrap())
            .build()
            .unwrap();
        assert_eq!(ok.value().type_name(), "Reference");

        let err = UsageContext::builder()
            .code(focus())
            .value(Reference::builder().reference("Patient/p1").build().unwrap())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidReferenceType { .. }));
    }

    #[test]
    fn test_usage_context_requires_value() {
        let err = UsageContext::builder().code(focus()).build().unwrap_err();
        assert_eq!(err.element(), Some("value"));
    }

    #[test]
    fn test_contact_detail() {
        let detail = ContactDetail::builder()
            .name("HL7")
            .telecom(
                ContactPoint::builder()
                    .system(ContactPointSystem::Url)
                    .value("http://hl7.org/fhir")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        assert_eq!(detail.telecom().len(), 1);
        assert_eq!(
            detail.telecom()[0].system().and_then(|s| s.value()),
            Some(ContactPointSystem::Url)
        );
    }
}
