//! Money
//!
//! Generated from http://hl7.org/fhir/StructureDefinition/Money

use std::any::Any;

use crate::builder::{finish, ElementBuilder};
use crate::error::Result;
use crate::model_support::{BindingStrength, FieldInfo, TypeInfo, TypeKind};
use crate::types::element::complex_element;
use crate::types::{Code, Decimal, ElementBase};
use crate::validation;
use crate::visitor::{self, Visitable, Visitor};

/// An amount of economic utility in some recognized currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Money {
    base: ElementBase,
    value: Option<Decimal>,
    currency: Option<Code>,
}

impl Money {
    pub fn builder() -> MoneyBuilder {
        MoneyBuilder::default()
    }

    pub fn to_builder(&self) -> MoneyBuilder {
        MoneyBuilder {
            base: self.base.clone(),
            value: self.value.clone(),
            currency: self.currency.clone(),
            skip_validation: false,
        }
    }

    /// Numerical value (with implicit precision)
    pub fn value(&self) -> Option<&Decimal> {
        self.value.as_ref()
    }

    /// ISO 4217 Currency Code
    pub fn currency(&self) -> Option<&Code> {
        self.currency.as_ref()
    }

    fn validate(&self) -> Result<()> {
        validation::require_value_or_children(self)
    }
}

complex_element!(Money);

impl ElementBuilder for MoneyBuilder {
    fn element_base(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl Visitable for Money {
    fn type_name(&self) -> &'static str {
        "Money"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &MONEY_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children()
            || self.value.is_some()
            || self.currency.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "value", self.value.as_ref());
            visitor::accept(v, "currency", self.currency.as_ref());
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct MoneyBuilder {
    base: ElementBase,
    value: Option<Decimal>,
    currency: Option<Code>,
    skip_validation: bool,
}

impl MoneyBuilder {
    pub fn value(mut self, value: impl Into<Decimal>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn currency(mut self, currency: Code) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<Money> {
        let validate = !self.skip_validation;
        finish("Money", validate, || {
            let record = Money {
                base: self.base.clone(),
                value: self.value.clone(),
                currency: self.currency.clone(),
            };
            if validate {
                record.validate()?;
            }
            Ok(record)
        })
    }
}

pub static MONEY_INFO: TypeInfo = TypeInfo {
    name: "Money",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    url: Some("http://hl7.org/fhir/StructureDefinition/Money"),
    fields: &[
        FieldInfo::new("value", &["decimal"])
            .summary(),
        FieldInfo::new("currency", &["code"])
            .summary()
            .binding("CurrencyCode", BindingStrength::Required, "http://hl7.org/fhir/ValueSet/currencies|5.0.0"),
    ],
    constraints: &[],
};
