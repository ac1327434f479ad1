use std::any::Any;

use crate::builder::{finish, ElementBuilder};
use crate::error::Result;
use crate::model_support::{FieldInfo, TypeInfo, TypeKind};
use crate::types::element::complex_element;
use crate::types::{Boolean, Code, ElementBase, FhirString, Uri};
use crate::validation;
use crate::visitor::{self, Visitable, Visitor};

/// A reference to a code defined by a terminology system
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coding {
    base: ElementBase,
    system: Option<Uri>,
    version: Option<FhirString>,
    code: Option<Code>,
    display: Option<FhirString>,
    user_selected: Option<Boolean>,
}

impl Coding {
    pub fn builder() -> CodingBuilder {
        CodingBuilder::default()
    }

    pub fn to_builder(&self) -> CodingBuilder {
        CodingBuilder {
            base: self.base.clone(),
            system: self.system.clone(),
            version: self.version.clone(),
            code: self.code.clone(),
            display: self.display.clone(),
            user_selected: self.user_selected.clone(),
            skip_validation: false,
        }
    }

    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn version(&self) -> Option<&FhirString> {
        self.version.as_ref()
    }

    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    pub fn display(&self) -> Option<&FhirString> {
        self.display.as_ref()
    }

    pub fn user_selected(&self) -> Option<&Boolean> {
        self.user_selected.as_ref()
    }

    fn validate(&self) -> Result<()> {
        validation::require_value_or_children(self)
    }
}

complex_element!(Coding);

impl Visitable for Coding {
    fn type_name(&self) -> &'static str {
        "Coding"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &TYPE_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children()
            || self.system.is_some()
            || self.version.is_some()
            || self.code.is_some()
            || self.display.is_some()
            || self.user_selected.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "system", self.system.as_ref());
            visitor::accept(v, "version", self.version.as_ref());
            visitor::accept(v, "code", self.code.as_ref());
            visitor::accept(v, "display", self.display.as_ref());
            visitor::accept(v, "userSelected", self.user_selected.as_ref());
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodingBuilder {
    base: ElementBase,
    system: Option<Uri>,
    version: Option<FhirString>,
    code: Option<Code>,
    display: Option<FhirString>,
    user_selected: Option<Boolean>,
    skip_validation: bool,
}

impl ElementBuilder for CodingBuilder {
    fn element_base(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl CodingBuilder {
    pub fn system(mut self, system: Uri) -> Self {
        self.system = Some(system);
        self
    }

    pub fn version(mut self, version: impl Into<FhirString>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn code(mut self, code: Code) -> Self {
        self.code = Some(code);
        self
    }

    pub fn display(mut self, display: impl Into<FhirString>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn user_selected(mut self, user_selected: impl Into<Boolean>) -> Self {
        self.user_selected = Some(user_selected.into());
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<Coding> {
        let validate = !self.skip_validation;
        finish("Coding", validate, || {
            let coding = Coding {
                base: self.base.clone(),
                system: self.system.clone(),
                version: self.version.clone(),
                code: self.code.clone(),
                display: self.display.clone(),
                user_selected: self.user_selected.clone(),
            };
            if validate {
                coding.validate()?;
            }
            Ok(coding)
        })
    }
}

pub static TYPE_INFO: TypeInfo = TypeInfo {
    name: "Coding",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    url: Some("http://hl7.org/fhir/StructureDefinition/Coding"),
    fields: &[
        FieldInfo::new("system", &["uri"]).summary(),
        FieldInfo::new("version", &["string"]).summary(),
        FieldInfo::new("code", &["code"]).summary(),
        FieldInfo::new("display", &["string"]).summary(),
        FieldInfo::new("userSelected", &["boolean"]).summary(),
    ],
    constraints: &[],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coding_accessors() {
        let coding = Coding::builder()
            .system(Uri::new("http://dicom.nema.org/resources/ontology/DCM").unwrap())
            .code(Code::new("110114").unwrap())
            .display("User Authentication")
            .user_selected(false)
            .build()
            .unwrap();
        assert_eq!(coding.code().unwrap().value().unwrap(), "110114");
        assert_eq!(coding.display().unwrap().as_str(), Some("User Authentication"));
        assert_eq!(coding.user_selected().unwrap().value(), Some(&false));
        assert!(coding.has_children());
    }
}
