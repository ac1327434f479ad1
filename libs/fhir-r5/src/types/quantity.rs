//! Quantity, Range and Ratio

use std::any::Any;

use crate::builder::{finish, ElementBuilder};
use crate::error::Result;
use crate::model_support::{
    BindingStrength, ConstraintInfo, ConstraintLevel, FieldInfo, TypeInfo, TypeKind,
};
use crate::types::element::complex_element;
use crate::types::{Code, Coded, Decimal, ElementBase, FhirString, QuantityComparator, Uri};
use crate::validation;
use crate::visitor::{self, Visitable, Visitor};

/// A measured or measurable amount
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quantity {
    base: ElementBase,
    value: Option<Decimal>,
    comparator: Option<Coded<QuantityComparator>>,
    unit: Option<FhirString>,
    system: Option<Uri>,
    code: Option<Code>,
}

impl Quantity {
    pub fn builder() -> QuantityBuilder {
        QuantityBuilder::default()
    }

    pub fn to_builder(&self) -> QuantityBuilder {
        QuantityBuilder {
            base: self.base.clone(),
            value: self.value.clone(),
            comparator: self.comparator.clone(),
            unit: self.unit.clone(),
            system: self.system.clone(),
            code: self.code.clone(),
            skip_validation: false,
        }
    }

    pub fn value(&self) -> Option<&Decimal> {
        self.value.as_ref()
    }

    pub fn comparator(&self) -> Option<&Coded<QuantityComparator>> {
        self.comparator.as_ref()
    }

    pub fn unit(&self) -> Option<&FhirString> {
        self.unit.as_ref()
    }

    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    fn validate(&self) -> Result<()> {
        validation::require_value_or_children(self)
    }
}

complex_element!(Quantity);

impl Visitable for Quantity {
    fn type_name(&self) -> &'static str {
        "Quantity"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &QUANTITY_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children()
            || self.value.is_some()
            || self.comparator.is_some()
            || self.unit.is_some()
            || self.system.is_some()
            || self.code.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "value", self.value.as_ref());
            visitor::accept(v, "comparator", self.comparator.as_ref());
            visitor::accept(v, "unit", self.unit.as_ref());
            visitor::accept(v, "system", self.system.as_ref());
            visitor::accept(v, "code", self.code.as_ref());
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuantityBuilder {
    base: ElementBase,
    value: Option<Decimal>,
    comparator: Option<Coded<QuantityComparator>>,
    unit: Option<FhirString>,
    system: Option<Uri>,
    code: Option<Code>,
    skip_validation: bool,
}

impl ElementBuilder for QuantityBuilder {
    fn element_base(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl QuantityBuilder {
    pub fn value(mut self, value: impl Into<Decimal>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn comparator(mut self, comparator: impl Into<Coded<QuantityComparator>>) -> Self {
        self.comparator = Some(comparator.into());
        self
    }

    pub fn unit(mut self, unit: impl Into<FhirString>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn system(mut self, system: Uri) -> Self {
        self.system = Some(system);
        self
    }

    pub fn code(mut self, code: Code) -> Self {
        self.code = Some(code);
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<Quantity> {
        let validate = !self.skip_validation;
        finish("Quantity", validate, || {
            let quantity = Quantity {
                base: self.base.clone(),
                value: self.value.clone(),
                comparator: self.comparator.clone(),
                unit: self.unit.clone(),
                system: self.system.clone(),
                code: self.code.clone(),
            };
            if validate {
                quantity.validate()?;
            }
            Ok(quantity)
        })
    }
}

/// Set of values bounded by low and high
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Range {
    base: ElementBase,
    low: Option<Quantity>,
    high: Option<Quantity>,
}

impl Range {
    pub fn builder() -> RangeBuilder {
        RangeBuilder::default()
    }

    pub fn to_builder(&self) -> RangeBuilder {
        RangeBuilder {
            base: self.base.clone(),
            low: self.low.clone(),
            high: self.high.clone(),
            skip_validation: false,
        }
    }

    pub fn low(&self) -> Option<&Quantity> {
        self.low.as_ref()
    }

    pub fn high(&self) -> Option<&Quantity> {
        self.high.as_ref()
    }

    fn validate(&self) -> Result<()> {
        validation::require_value_or_children(self)
    }
}

complex_element!(Range);

impl Visitable for Range {
    fn type_name(&self) -> &'static str {
        "Range"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &RANGE_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children() || self.low.is_some() || self.high.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "low", self.low.as_ref());
            visitor::accept(v, "high", self.high.as_ref());
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct RangeBuilder {
    base: ElementBase,
    low: Option<Quantity>,
    high: Option<Quantity>,
    skip_validation: bool,
}

impl ElementBuilder for RangeBuilder {
    fn element_base(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl RangeBuilder {
    pub fn low(mut self, low: Quantity) -> Self {
        self.low = Some(low);
        self
    }

    pub fn high(mut self, high: Quantity) -> Self {
        self.high = Some(high);
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<Range> {
        let validate = !self.skip_validation;
        finish("Range", validate, || {
            let range = Range {
                base: self.base.clone(),
                low: self.low.clone(),
                high: self.high.clone(),
            };
            if validate {
                range.validate()?;
            }
            Ok(range)
        })
    }
}

/// A ratio of two Quantity values - a numerator and a denominator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ratio {
    base: ElementBase,
    numerator: Option<Quantity>,
    denominator: Option<Quantity>,
}

impl Ratio {
    pub fn builder() -> RatioBuilder {
        RatioBuilder::default()
    }

    pub fn to_builder(&self) -> RatioBuilder {
        RatioBuilder {
            base: self.base.clone(),
            numerator: self.numerator.clone(),
            denominator: self.denominator.clone(),
            skip_validation: false,
        }
    }

    pub fn numerator(&self) -> Option<&Quantity> {
        self.numerator.as_ref()
    }

    pub fn denominator(&self) -> Option<&Quantity> {
        self.denominator.as_ref()
    }

    fn validate(&self) -> Result<()> {
        validation::require_value_or_children(self)
    }
}

complex_element!(Ratio);

impl Visitable for Ratio {
    fn type_name(&self) -> &'static str {
        "Ratio"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &RATIO_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children() || self.numerator.is_some() || self.denominator.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "numerator", self.numerator.as_ref());
            visitor::accept(v, "denominator", self.denominator.as_ref());
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct RatioBuilder {
    base: ElementBase,
    numerator: Option<Quantity>,
    denominator: Option<Quantity>,
    skip_validation: bool,
}

impl ElementBuilder for RatioBuilder {
    fn element_base(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl RatioBuilder {
    pub fn numerator(mut self, numerator: Quantity) -> Self {
        self.numerator = Some(numerator);
        self
    }

    pub fn denominator(mut self, denominator: Quantity) -> Self {
        self.denominator = Some(denominator);
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<Ratio> {
        let validate = !self.skip_validation;
        finish("Ratio", validate, || {
            let ratio = Ratio {
                base: self.base.clone(),
                numerator: self.numerator.clone(),
                denominator: self.denominator.clone(),
            };
            if validate {
                ratio.validate()?;
            }
            Ok(ratio)
        })
    }
}

pub static QUANTITY_INFO: TypeInfo = TypeInfo {
    name: "Quantity",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    url: Some("http://hl7.org/fhir/StructureDefinition/Quantity"),
    fields: &[
        FieldInfo::new("value", &["decimal"]).summary(),
        FieldInfo::new("comparator", &["code"])
            .summary()
            .modifier()
            .binding(
                "QuantityComparator",
                BindingStrength::Required,
                "http://hl7.org/fhir/ValueSet/quantity-comparator|5.0.0",
            ),
        FieldInfo::new("unit", &["string"]).summary(),
        FieldInfo::new("system", &["uri"]).summary(),
        FieldInfo::new("code", &["code"]).summary(),
    ],
    constraints: &[ConstraintInfo {
        id: "qty-3",
        level: ConstraintLevel::Rule,
        location: "(base)",
        description: "If a code for the unit is present, the system SHALL also be present",
        expression: "code.empty() or system.exists()",
    }],
};

pub static RANGE_INFO: TypeInfo = TypeInfo {
    name: "Range",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    url: Some("http://hl7.org/fhir/StructureDefinition/Range"),
    fields: &[
        FieldInfo::new("low", &["Quantity"]).summary(),
        FieldInfo::new("high", &["Quantity"]).summary(),
    ],
    constraints: &[ConstraintInfo {
        id: "rng-2",
        level: ConstraintLevel::Rule,
        location: "(base)",
        description: "If present, low SHALL have a lower value than high",
        expression: "low.value.empty() or high.value.empty() or (low <= high)",
    }],
};

pub static RATIO_INFO: TypeInfo = TypeInfo {
    name: "Ratio",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    url: Some("http://hl7.org/fhir/StructureDefinition/Ratio"),
    fields: &[
        FieldInfo::new("numerator", &["Quantity"]).summary(),
        FieldInfo::new("denominator", &["Quantity"]).summary(),
    ],
    constraints: &[ConstraintInfo {
        id: "rat-1",
        level: ConstraintLevel::Rule,
        location: "(base)",
        description: "Numerator and denominator SHALL both be present, or both are absent",
        expression: "(numerator.exists() and denominator.exists()) or (numerator.empty() and denominator.empty() and extension.exists())",
    }],
};

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal as RustDecimal;

    fn mg(value: i64) -> Quantity {
        Quantity::builder()
            .value(RustDecimal::new(value, 0))
            .unit("mg")
            .system(Uri::new("http://unitsofmeasure.org").unwrap())
            .code(Code::new("mg").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_quantity_with_comparator() {
        let q = mg(5).to_builder().comparator(QuantityComparator::LessThan).build().unwrap();
        assert_eq!(
            q.comparator().and_then(|c| c.value()),
            Some(QuantityComparator::LessThan)
        );
        assert_eq!(q.value().and_then(|d| d.value()), Some(&RustDecimal::new(5, 0)));
    }

    #[test]
    fn test_range_and_ratio() {
        let range = Range::builder().low(mg(1)).high(mg(10)).build().unwrap();
        assert_eq!(range.low(), Some(&mg(1)));

        let ratio = Ratio::builder().numerator(mg(1)).denominator(mg(2)).build().unwrap();
        assert!(ratio.has_children());
        assert_eq!(ratio, ratio.to_builder().build().unwrap());
    }
}
