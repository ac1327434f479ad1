//! Resources
//!
//! `Resource` and `DomainResource` fields live in [`ResourceBase`] and
//! [`DomainResourceBase`]; each concrete resource embeds the latter and adds
//! its own fields and backbone elements.

pub mod audit_event;
pub mod evidence_variable;
pub mod test_plan;

use std::any::Any;

use crate::error::Result;
use crate::model_support::{FieldInfo, TypeInfo, TypeKind};
use crate::types::{Code, Extension, Meta, Narrative, Uri};
use crate::validation;
use crate::visitor::{self, PrimitiveValue, Visitable, Visitor};

pub use audit_event::AuditEvent;
pub use evidence_variable::EvidenceVariable;
pub use test_plan::TestPlan;

/// Base behaviour of every resource.
pub trait Resource: Visitable {
    /// Logical id of this artifact
    fn id(&self) -> Option<&str>;

    fn meta(&self) -> Option<&Meta>;

    fn implicit_rules(&self) -> Option<&Uri>;

    fn language(&self) -> Option<&Code>;
}

/// A resource with narrative, extensions and contained resources.
pub trait DomainResource: Resource {
    fn text(&self) -> Option<&Narrative>;

    fn contained(&self) -> &[AnyResource];

    fn extension(&self) -> &[Extension];

    fn modifier_extension(&self) -> &[Extension];
}

/// Fields of `Resource`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResourceBase {
    pub(crate) id: Option<String>,
    pub(crate) meta: Option<Meta>,
    pub(crate) implicit_rules: Option<Uri>,
    pub(crate) language: Option<Code>,
}

impl ResourceBase {
    pub fn has_children(&self) -> bool {
        self.id.is_some()
            || self.meta.is_some()
            || self.implicit_rules.is_some()
            || self.language.is_some()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match &self.id {
            Some(id) => validation::check_id(id),
            None => Ok(()),
        }
    }

    pub(crate) fn accept_children(&self, visitor: &mut dyn Visitor) {
        visitor::accept_value(visitor, "id", self.id.as_deref().map(PrimitiveValue::String));
        visitor::accept(visitor, "meta", self.meta.as_ref());
        visitor::accept(visitor, "implicitRules", self.implicit_rules.as_ref());
        visitor::accept(visitor, "language", self.language.as_ref());
    }
}

/// Fields of `DomainResource`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DomainResourceBase {
    pub(crate) resource: ResourceBase,
    pub(crate) text: Option<Narrative>,
    pub(crate) contained: Vec<AnyResource>,
    pub(crate) extension: Vec<Extension>,
    pub(crate) modifier_extension: Vec<Extension>,
}

impl DomainResourceBase {
    pub fn has_children(&self) -> bool {
        self.resource.has_children()
            || self.text.is_some()
            || !self.contained.is_empty()
            || !self.extension.is_empty()
            || !self.modifier_extension.is_empty()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        self.resource.validate()
    }

    pub(crate) fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.resource.accept_children(visitor);
        visitor::accept(visitor, "text", self.text.as_ref());
        visitor::accept_list(visitor, "contained", &self.contained);
        visitor::accept_list(visitor, "extension", &self.extension);
        visitor::accept_list(visitor, "modifierExtension", &self.modifier_extension);
    }
}

/// Implements [`Resource`] and [`DomainResource`] by delegating to a
/// `base: DomainResourceBase` field, plus the cached `hash_code()` and the
/// base setters of the builder.
macro_rules! domain_resource {
    ($name:ty, $builder:ty) => {
        impl $crate::resource::Resource for $name {
            fn id(&self) -> Option<&str> {
                self.base.resource.id.as_deref()
            }

            fn meta(&self) -> Option<&$crate::types::Meta> {
                self.base.resource.meta.as_ref()
            }

            fn implicit_rules(&self) -> Option<&$crate::types::Uri> {
                self.base.resource.implicit_rules.as_ref()
            }

            fn language(&self) -> Option<&$crate::types::Code> {
                self.base.resource.language.as_ref()
            }
        }

        impl $crate::resource::DomainResource for $name {
            fn text(&self) -> Option<&$crate::types::Narrative> {
                self.base.text.as_ref()
            }

            fn contained(&self) -> &[$crate::resource::AnyResource] {
                &self.base.contained
            }

            fn extension(&self) -> &[$crate::types::Extension] {
                &self.base.extension
            }

            fn modifier_extension(&self) -> &[$crate::types::Extension] {
                &self.base.modifier_extension
            }
        }

        impl $name {
            /// Structural hash, computed on first use and cached.
            pub fn hash_code(&self) -> u64 {
                self.hash.get_or_compute(self)
            }
        }

        impl $crate::builder::ResourceBuilder for $builder {
            fn resource_base(&mut self) -> &mut $crate::resource::ResourceBase {
                &mut self.base.resource
            }
        }

        impl $crate::builder::DomainResourceBuilder for $builder {
            fn domain_base(&mut self) -> &mut $crate::resource::DomainResourceBase {
                &mut self.base
            }
        }
    };
}

pub(crate) use domain_resource;

/// Any resource implemented by this crate, used for `contained`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnyResource {
    AuditEvent(Box<AuditEvent>),
    EvidenceVariable(Box<EvidenceVariable>),
    TestPlan(Box<TestPlan>),
}

impl AnyResource {
    pub fn as_resource(&self) -> &dyn DomainResource {
        match self {
            AnyResource::AuditEvent(r) => &**r,
            AnyResource::EvidenceVariable(r) => &**r,
            AnyResource::TestPlan(r) => &**r,
        }
    }

    pub fn resource_type(&self) -> &'static str {
        self.as_resource().type_name()
    }
}

impl From<AuditEvent> for AnyResource {
    fn from(resource: AuditEvent) -> Self {
        AnyResource::AuditEvent(Box::new(resource))
    }
}

impl From<EvidenceVariable> for AnyResource {
    fn from(resource: EvidenceVariable) -> Self {
        AnyResource::EvidenceVariable(Box::new(resource))
    }
}

impl From<TestPlan> for AnyResource {
    fn from(resource: TestPlan) -> Self {
        AnyResource::TestPlan(Box::new(resource))
    }
}

impl Visitable for AnyResource {
    fn type_name(&self) -> &'static str {
        self.as_resource().type_name()
    }

    fn type_info(&self) -> &'static TypeInfo {
        self.as_resource().type_info()
    }

    fn has_children(&self) -> bool {
        self.as_resource().has_children()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        self.as_resource().accept(name, index, visitor)
    }

    fn as_any(&self) -> &dyn Any {
        self.as_resource().as_any()
    }
}

pub static RESOURCE_INFO: TypeInfo = TypeInfo {
    name: "Resource",
    kind: TypeKind::Resource,
    base: None,
    url: Some("http://hl7.org/fhir/StructureDefinition/Resource"),
    fields: &[
        FieldInfo::new("id", &["id"]).summary(),
        FieldInfo::new("meta", &["Meta"]).summary(),
        FieldInfo::new("implicitRules", &["uri"]).summary().modifier(),
        FieldInfo::new("language", &["code"]).binding(
            "Language",
            crate::model_support::BindingStrength::Required,
            "http://hl7.org/fhir/ValueSet/all-languages|5.0.0",
        ),
    ],
    constraints: &[],
};

pub static DOMAIN_RESOURCE_INFO: TypeInfo = TypeInfo {
    name: "DomainResource",
    kind: TypeKind::Resource,
    base: Some("Resource"),
    url: Some("http://hl7.org/fhir/StructureDefinition/DomainResource"),
    fields: &[
        FieldInfo::new("text", &["Narrative"]),
        FieldInfo::new("contained", &["Resource"]).list(),
        FieldInfo::new("extension", &["Extension"]).list(),
        FieldInfo::new("modifierExtension", &["Extension"])
            .list()
            .summary()
            .modifier(),
    ],
    constraints: &[
        crate::model_support::ConstraintInfo {
            id: "dom-2",
            level: crate::model_support::ConstraintLevel::Rule,
            location: "(base)",
            description: "If the resource is contained in another resource, it SHALL NOT contain nested Resources",
            expression: "contained.contained.empty()",
        },
        crate::model_support::ConstraintInfo {
            id: "dom-3",
            level: crate::model_support::ConstraintLevel::Rule,
            location: "(base)",
            description: "If the resource is contained in another resource, it SHALL be referred to from elsewhere in the resource or SHALL refer to the containing resource",
            expression: "contained.where(((id.exists() and ('#'+id in (%resource.descendants().reference | %resource.descendants().ofType(canonical) | %resource.descendants().ofType(uri) | %resource.descendants().ofType(url)))) or descendants().where(reference = '#').exists() or descendants().where(ofType(canonical) = '#').exists() or descendants().where(ofType(canonical) = '#').exists()).not()).trace('unmatched', id).empty()",
        },
        crate::model_support::ConstraintInfo {
            id: "dom-4",
            level: crate::model_support::ConstraintLevel::Rule,
            location: "(base)",
            description: "If a resource is contained in another resource, it SHALL NOT have a meta.versionId or a meta.lastUpdated",
            expression: "contained.meta.versionId.empty() and contained.meta.lastUpdated.empty()",
        },
        crate::model_support::ConstraintInfo {
            id: "dom-6",
            level: crate::model_support::ConstraintLevel::Warning,
            location: "(base)",
            description: "A resource should have narrative for robust management",
            expression: "text.`div`.exists()",
        },
    ],
};
