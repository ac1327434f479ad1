use std::any::Any;

use crate::builder::{finish, ElementBuilder};
use crate::error::Result;
use crate::model_support::{
    BindingStrength, ConstraintInfo, ConstraintLevel, FieldInfo, TypeInfo, TypeKind,
};
use crate::types::element::complex_element;
use crate::types::{Code, ElementBase, FhirString, Uri};
use crate::validation;
use crate::visitor::{self, Visitable, Visitor};

/// An expression that can be used to generate a value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    base: ElementBase,
    description: Option<FhirString>,
    name: Option<Code>,
    language: Option<Code>,
    expression: Option<FhirString>,
    reference: Option<Uri>,
}

impl Expression {
    pub fn builder() -> ExpressionBuilder {
        ExpressionBuilder::default()
    }

    pub fn to_builder(&self) -> ExpressionBuilder {
        ExpressionBuilder {
            base: self.base.clone(),
            description: self.description.clone(),
            name: self.name.clone(),
            language: self.language.clone(),
            expression: self.expression.clone(),
            reference: self.reference.clone(),
            skip_validation: false,
        }
    }

    pub fn description(&self) -> Option<&FhirString> {
        self.description.as_ref()
    }

    pub fn name(&self) -> Option<&Code> {
        self.name.as_ref()
    }

    /// `text/cql`, `text/fhirpath`, `application/x-fhir-query` and so on
    pub fn language(&self) -> Option<&Code> {
        self.language.as_ref()
    }

    pub fn expression(&self) -> Option<&FhirString> {
        self.expression.as_ref()
    }

    pub fn reference(&self) -> Option<&Uri> {
        self.reference.as_ref()
    }

    fn validate(&self) -> Result<()> {
        validation::require_value_or_children(self)
    }
}

complex_element!(Expression);

impl Visitable for Expression {
    fn type_name(&self) -> &'static str {
        "Expression"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &TYPE_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children()
            || self.description.is_some()
            || self.name.is_some()
            || self.language.is_some()
            || self.expression.is_some()
            || self.reference.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "description", self.description.as_ref());
            visitor::accept(v, "name", self.name.as_ref());
            visitor::accept(v, "language", self.language.as_ref());
            visitor::accept(v, "expression", self.expression.as_ref());
            visitor::accept(v, "reference", self.reference.as_ref());
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExpressionBuilder {
    base: ElementBase,
    description: Option<FhirString>,
    name: Option<Code>,
    language: Option<Code>,
    expression: Option<FhirString>,
    reference: Option<Uri>,
    skip_validation: bool,
}

impl ElementBuilder for ExpressionBuilder {
    fn element_base(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl ExpressionBuilder {
    pub fn description(mut self, description: impl Into<FhirString>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(mut self, name: Code) -> Self {
        self.name = Some(name);
        self
    }

    pub fn language(mut self, language: Code) -> Self {
        self.language = Some(language);
        self
    }

    pub fn expression(mut self, expression: impl Into<FhirString>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    pub fn reference(mut self, reference: Uri) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<Expression> {
        let validate = !self.skip_validation;
        finish("Expression", validate, || {
            let expression = Expression {
                base: self.base.clone(),
                description: self.description.clone(),
                name: self.name.clone(),
                language: self.language.clone(),
                expression: self.expression.clone(),
                reference: self.reference.clone(),
            };
            if validate {
                expression.validate()?;
            }
            Ok(expression)
        })
    }
}

pub static TYPE_INFO: TypeInfo = TypeInfo {
    name: "Expression",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    url: Some("http://hl7.org/fhir/StructureDefinition/Expression"),
    fields: &[
        FieldInfo::new("description", &["string"]).summary(),
        FieldInfo::new("name", &["code"]).summary(),
        FieldInfo::new("language", &["code"]).summary().binding(
            "ExpressionLanguage",
            BindingStrength::Extensible,
            "http://hl7.org/fhir/ValueSet/expression-language",
        ),
        FieldInfo::new("expression", &["string"]).summary(),
        FieldInfo::new("reference", &["uri"]).summary(),
    ],
    constraints: &[ConstraintInfo {
        id: "exp-1",
        level: ConstraintLevel::Rule,
        location: "(base)",
        description: "An expression or a reference must be provided",
        expression: "expression.exists() or reference.exists()",
    }],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fhirpath_expression() {
        let expr = Expression::builder()
            .language(Code::new("text/fhirpath").unwrap())
            .expression("Patient.birthDate < today() - 18 years")
            .build()
            .unwrap();
        assert_eq!(expr.language().unwrap().value().unwrap(), "text/fhirpath");
        assert_eq!(expr, expr.to_builder().build().unwrap());
    }
}
