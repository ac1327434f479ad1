use std::any::Any;

use crate::builder::{finish, ElementBuilder};
use crate::error::Result;
use crate::model_support::{ConstraintInfo, ConstraintLevel, FieldInfo, TypeInfo, TypeKind};
use crate::types::element::complex_element;
use crate::types::{DateTime, ElementBase};
use crate::validation;
use crate::visitor::{self, Visitable, Visitor};

/// Time range defined by start and end date/time
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Period {
    base: ElementBase,
    start: Option<DateTime>,
    end: Option<DateTime>,
}

impl Period {
    pub fn builder() -> PeriodBuilder {
        PeriodBuilder::default()
    }

    pub fn to_builder(&self) -> PeriodBuilder {
        PeriodBuilder {
            base: self.base.clone(),
            start: self.start.clone(),
            end: self.end.clone(),
            skip_validation: false,
        }
    }

    pub fn start(&self) -> Option<&DateTime> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&DateTime> {
        self.end.as_ref()
    }

    fn validate(&self) -> Result<()> {
        validation::require_value_or_children(self)
    }
}

complex_element!(Period);

impl Visitable for Period {
    fn type_name(&self) -> &'static str {
        "Period"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &TYPE_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children() || self.start.is_some() || self.end.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "start", self.start.as_ref());
            visitor::accept(v, "end", self.end.as_ref());
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct PeriodBuilder {
    base: ElementBase,
    start: Option<DateTime>,
    end: Option<DateTime>,
    skip_validation: bool,
}

impl ElementBuilder for PeriodBuilder {
    fn element_base(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl PeriodBuilder {
    pub fn start(mut self, start: DateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<Period> {
        let validate = !self.skip_validation;
        finish("Period", validate, || {
            let period = Period {
                base: self.base.clone(),
                start: self.start.clone(),
                end: self.end.clone(),
            };
            if validate {
                period.validate()?;
            }
            Ok(period)
        })
    }
}

pub static TYPE_INFO: TypeInfo = TypeInfo {
    name: "Period",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    url: Some("http://hl7.org/fhir/StructureDefinition/Period"),
    fields: &[
        FieldInfo::new("start", &["dateTime"]).summary(),
        FieldInfo::new("end", &["dateTime"]).summary(),
    ],
    constraints: &[ConstraintInfo {
        id: "per-1",
        level: ConstraintLevel::Rule,
        location: "(base)",
        description: "If present, start SHALL have a lower or equal value than end",
        expression: "start.hasValue().not() or end.hasValue().not() or (start.lowBoundary() <= end.highBoundary())",
    }],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_period_build() {
        let period = Period::builder()
            .start(DateTime::new("2023-01-01").unwrap())
            .end(DateTime::new("2023-12-31").unwrap())
            .build()
            .unwrap();
        assert_eq!(period.start().unwrap().value().unwrap(), "2023-01-01");
        assert_eq!(period, period.to_builder().build().unwrap());
    }

    #[test]
    fn test_empty_period_is_vacuous() {
        let err = Period::builder().build().unwrap_err();
        assert!(matches!(err, Error::VacuousElement { .. }));
        assert!(Period::builder().validating(false).build().is_ok());
    }
}
