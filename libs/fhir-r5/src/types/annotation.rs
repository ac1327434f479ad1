use std::any::Any;

use crate::builder::{finish, ElementBuilder};
use crate::error::Result;
use crate::model_support::{FieldInfo, TypeInfo, TypeKind};
use crate::types::choice::choice_enum;
use crate::types::element::complex_element;
use crate::types::{DateTime, ElementBase, FhirString, Markdown, Reference};
use crate::validation;
use crate::visitor::{self, Visitable, Visitor};

choice_enum! {
    /// Annotation.author[x]
    pub enum AnnotationAuthor {
        Reference(Reference),
        String(FhirString),
    }
}

const AUTHOR_TYPES: &[&str] = &["Reference", "string"];

const AUTHOR_TARGETS: &[&str] = &[
    "Practitioner",
    "PractitionerRole",
    "Patient",
    "RelatedPerson",
    "Organization",
];

/// Text node with attribution
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    base: ElementBase,
    author: Option<AnnotationAuthor>,
    time: Option<DateTime>,
    text: Markdown,
}

impl Annotation {
    pub fn builder() -> AnnotationBuilder {
        AnnotationBuilder::default()
    }

    pub fn to_builder(&self) -> AnnotationBuilder {
        AnnotationBuilder {
            base: self.base.clone(),
            author: self.author.clone(),
            time: self.time.clone(),
            text: Some(self.text.clone()),
            skip_validation: false,
        }
    }

    pub fn author(&self) -> Option<&AnnotationAuthor> {
        self.author.as_ref()
    }

    pub fn time(&self) -> Option<&DateTime> {
        self.time.as_ref()
    }

    pub fn text(&self) -> &Markdown {
        &self.text
    }

    fn validate(&self) -> Result<()> {
        validation::choice_element(self.author.as_ref(), "author", AUTHOR_TYPES)?;
        validation::check_choice_reference_type(self.author.as_ref(), "author", AUTHOR_TARGETS)?;
        validation::require_value_or_children(self)
    }
}

complex_element!(Annotation);

impl Visitable for Annotation {
    fn type_name(&self) -> &'static str {
        "Annotation"
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
            visitor::accept(v, "author", self.author.as_ref());
            visitor::accept(v, "time", self.time.as_ref());
            self.text.accept("text", None, v);
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnnotationBuilder {
    base: ElementBase,
    author: Option<AnnotationAuthor>,
    time: Option<DateTime>,
    text: Option<Markdown>,
    skip_validation: bool,
}

impl ElementBuilder for AnnotationBuilder {
    fn element_base(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl AnnotationBuilder {
    pub fn author(mut self, author: impl Into<AnnotationAuthor>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    pub fn text(mut self, text: impl Into<Markdown>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<Annotation> {
        let validate = !self.skip_validation;
        finish("Annotation", validate, || {
            let annotation = Annotation {
                base: self.base.clone(),
                author: self.author.clone(),
                time: self.time.clone(),
                text: validation::require_non_null(self.text.clone(), "text")?,
            };
            if validate {
                annotation.validate()?;
            }
            Ok(annotation)
        })
    }
}

pub static TYPE_INFO: TypeInfo = TypeInfo {
    name: "Annotation",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    url: Some("http://hl7.org/fhir/StructureDefinition/Annotation"),
    fields: &[
        FieldInfo::new("author", AUTHOR_TYPES)
            .summary()
            .targets(AUTHOR_TARGETS),
        FieldInfo::new("time", &["dateTime"]).summary(),
        FieldInfo::new("text", &["markdown"]).required().summary(),
    ],
    constraints: &[],
};
