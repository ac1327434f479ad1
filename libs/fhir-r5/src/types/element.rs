//! Element, BackboneElement and Extension

use std::any::Any;

use crate::builder::{finish, ElementBuilder};
use crate::error::Result;
use crate::model_support::{FieldInfo, TypeInfo, TypeKind};
use crate::types::choice::choice_enum;
use crate::types::{
    Attachment, Base64Binary, Boolean, Canonical, Code, CodeableConcept, Coding, Date, DateTime,
    Decimal, FhirString, Id, Identifier, Instant, Integer, Integer64, Markdown, Period,
    PositiveInt, Quantity, Range, Ratio, Reference, Time, UnsignedInt, Uri, Url,
};
use crate::validation;
use crate::visitor::{self, PrimitiveValue, Visitable, Visitor};

/// Base behaviour of every element.
pub trait Element: Visitable {
    fn id(&self) -> Option<&str>;

    fn extension(&self) -> &[Extension];

    /// Only backbone elements carry modifier extensions.
    fn modifier_extension(&self) -> &[Extension] {
        &[]
    }

    /// Whether a primitive value is present. Complex types have none.
    fn has_value(&self) -> bool {
        false
    }

    fn primitive_value(&self) -> Option<PrimitiveValue<'_>> {
        None
    }
}

/// Fields shared by all elements
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ElementBase {
    pub(crate) id: Option<String>,
    pub(crate) extension: Vec<Extension>,
}

impl ElementBase {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn extension(&self) -> &[Extension] {
        &self.extension
    }

    pub fn has_children(&self) -> bool {
        !self.extension.is_empty()
    }

    pub(crate) fn accept_children(&self, visitor: &mut dyn Visitor) {
        visitor::accept_value(visitor, "id", self.id.as_deref().map(PrimitiveValue::String));
        visitor::accept_list(visitor, "extension", &self.extension);
    }
}

/// Fields shared by backbone elements
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BackboneBase {
    pub(crate) element: ElementBase,
    pub(crate) modifier_extension: Vec<Extension>,
}

impl BackboneBase {
    pub fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }

    pub fn has_children(&self) -> bool {
        self.element.has_children() || !self.modifier_extension.is_empty()
    }

    pub(crate) fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        visitor::accept_list(visitor, "modifierExtension", &self.modifier_extension);
    }
}

/// Implements [`Element`] by delegating to a `base: BackboneBase` field, adds
/// the cached `hash_code()` and wires the base setters of the builder.
macro_rules! backbone_element {
    ($name:ty, $builder:ty) => {
        impl $crate::types::Element for $name {
            fn id(&self) -> Option<&str> {
                self.base.element.id()
            }

            fn extension(&self) -> &[$crate::types::Extension] {
                self.base.element.extension()
            }

            fn modifier_extension(&self) -> &[$crate::types::Extension] {
                self.base.modifier_extension()
            }
        }

        impl $name {
            /// Structural hash, computed on first use and cached.
            pub fn hash_code(&self) -> u64 {
                self.hash.get_or_compute(self)
            }
        }

        impl $crate::builder::ElementBuilder for $builder {
            fn element_base(&mut self) -> &mut $crate::types::ElementBase {
                &mut self.base.element
            }
        }

        impl $crate::builder::BackboneElementBuilder for $builder {
            fn backbone_base(&mut self) -> &mut $crate::types::BackboneBase {
                &mut self.base
            }
        }
    };
}

/// Implements [`Element`] by delegating to a `base: ElementBase` field.
macro_rules! complex_element {
    ($name:ty) => {
        impl $crate::types::Element for $name {
            fn id(&self) -> Option<&str> {
                self.base.id()
            }

            fn extension(&self) -> &[$crate::types::Extension] {
                self.base.extension()
            }
        }
    };
}

pub(crate) use backbone_element;
pub(crate) use complex_element;

choice_enum! {
    /// Extension.value[x]
    pub enum ExtensionValue {
        Base64Binary(Base64Binary),
        Boolean(Boolean),
        Canonical(Canonical),
        Code(Code),
        Date(Date),
        DateTime(DateTime),
        Decimal(Decimal),
        Id(Id),
        Instant(Instant),
        Integer(Integer),
        Integer64(Integer64),
        Markdown(Markdown),
        PositiveInt(PositiveInt),
        String(FhirString),
        Time(Time),
        UnsignedInt(UnsignedInt),
        Uri(Uri),
        Url(Url),
        Attachment(Attachment),
        CodeableConcept(CodeableConcept),
        Coding(Coding),
        Identifier(Identifier),
        Period(Period),
        Quantity(Quantity),
        Range(Range),
        Ratio(Ratio),
        Reference(Reference),
    }
}

const EXTENSION_VALUE_TYPES: &[&str] = &[
    "base64Binary",
    "boolean",
    "canonical",
    "code",
    "date",
    "dateTime",
    "decimal",
    "id",
    "instant",
    "integer",
    "integer64",
    "markdown",
    "positiveInt",
    "string",
    "time",
    "unsignedInt",
    "uri",
    "url",
    "Attachment",
    "CodeableConcept",
    "Coding",
    "Identifier",
    "Period",
    "Quantity",
    "Range",
    "Ratio",
    "Reference",
];

/// Optional additional information
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Extension {
    base: ElementBase,
    url: String,
    value: Option<ExtensionValue>,
}

impl Extension {
    pub fn builder() -> ExtensionBuilder {
        ExtensionBuilder::default()
    }

    pub fn to_builder(&self) -> ExtensionBuilder {
        ExtensionBuilder {
            base: self.base.clone(),
            url: Some(self.url.clone()),
            value: self.value.clone(),
            skip_validation: false,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn value(&self) -> Option<&ExtensionValue> {
        self.value.as_ref()
    }

    fn validate(&self) -> Result<()> {
        validation::choice_element(self.value.as_ref(), "value", EXTENSION_VALUE_TYPES)?;
        validation::require_value_or_children(self)
    }
}

complex_element!(Extension);

impl Visitable for Extension {
    fn type_name(&self) -> &'static str {
        "Extension"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &EXTENSION_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children() || self.value.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            v.visit_value("url", PrimitiveValue::String(&self.url));
            visitor::accept(v, "value", self.value.as_ref());
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExtensionBuilder {
    base: ElementBase,
    url: Option<String>,
    value: Option<ExtensionValue>,
    skip_validation: bool,
}

impl ElementBuilder for ExtensionBuilder {
    fn element_base(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl ExtensionBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn value(mut self, value: impl Into<ExtensionValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<Extension> {
        let validate = !self.skip_validation;
        finish("Extension", validate, || {
            let extension = Extension {
                base: self.base.clone(),
                url: validation::require_non_null(self.url.clone(), "url")?,
                value: self.value.clone(),
            };
            if validate {
                extension.validate()?;
            }
            Ok(extension)
        })
    }
}

pub static ELEMENT_INFO: TypeInfo = TypeInfo {
    name: "Element",
    kind: TypeKind::ComplexType,
    base: None,
    url: Some("http://hl7.org/fhir/StructureDefinition/Element"),
    fields: &[
        FieldInfo::new("id", &["string"]),
        FieldInfo::new("extension", &["Extension"]).list(),
    ],
    constraints: &[],
};

pub static BACKBONE_ELEMENT_INFO: TypeInfo = TypeInfo {
    name: "BackboneElement",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    url: Some("http://hl7.org/fhir/StructureDefinition/BackboneElement"),
    fields: &[FieldInfo::new("modifierExtension", &["Extension"])
        .list()
        .summary()
        .modifier()],
    constraints: &[],
};

pub static EXTENSION_INFO: TypeInfo = TypeInfo {
    name: "Extension",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    url: Some("http://hl7.org/fhir/StructureDefinition/Extension"),
    fields: &[
        FieldInfo::new("url", &["uri"]).required(),
        FieldInfo::new("value", EXTENSION_VALUE_TYPES),
    ],
    constraints: &[crate::model_support::ConstraintInfo {
        id: "ext-1",
        level: crate::model_support::ConstraintLevel::Rule,
        location: "(base)",
        description: "Must have either extensions or value[x], not both",
        expression: "extension.exists() != value.exists()",
    }],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_extension_requires_url() {
        let err = Extension::builder()
            .value(Boolean::from(true))
            .build()
            .unwrap_err();
        assert_eq!(err.element(), Some("url"));
    }

    #[test]
    fn test_extension_requires_value_or_children() {
        let err = Extension::builder()
            .url("http://example.org/ext")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::VacuousElement { ref type_name } if type_name == "Extension"));

        let nested = Extension::builder()
            .url("http://example.org/ext")
            .extension(
                Extension::builder()
                    .url("part")
                    .value(FhirString::from("x"))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        assert_eq!(nested.extension().len(), 1);
        assert!(nested.value().is_none());
    }

    #[test]
    fn test_extension_value_choice() {
        let ext = Extension::builder()
            .url("http://example.org/ext")
            .value(Integer::from(7))
            .build()
            .unwrap();
        let value = ext.value().unwrap();
        assert_eq!(value.type_name(), "integer");
        assert!(matches!(value, ExtensionValue::Integer(i) if i.value() == Some(&7)));
        assert!(crate::types::Choice::as_reference(value).is_none());
    }
}
