//! FHIR R5 datatypes
//!
//! Primitive and general-purpose complex types shared by the resources. Every
//! type is an immutable record with a builder, see [`crate::builder`].

pub mod annotation;
pub mod attachment;
pub(crate) mod choice;
pub mod codeable_concept;
pub mod codes;
pub mod coding;
pub mod contact;
pub mod element;
pub mod expression;
pub mod identifier;
pub mod meta;
// Emitted by ferrum-codegen; the generator tests compare against this file
#[rustfmt::skip]
pub mod money;
pub mod period;
pub mod primitives;
pub mod quantity;
pub mod reference;
pub mod related_artifact;

pub use annotation::{Annotation, AnnotationAuthor, AnnotationBuilder};
pub use attachment::{Attachment, AttachmentBuilder};
pub use choice::Choice;
pub use codeable_concept::{
    CodeableConcept, CodeableConceptBuilder, CodeableReference, CodeableReferenceBuilder,
};
pub use codes::{
    AuditEventAction, AuditEventSeverity, CharacteristicCombination, CodeValue, Coded,
    CodedBuilder, ContactPointSystem, ContactPointUse, EvidenceVariableHandling, IdentifierUse,
    NarrativeStatus, PublicationStatus, QuantityComparator, RelatedArtifactPublicationStatus,
    RelatedArtifactType,
};
pub use coding::{Coding, CodingBuilder};
pub use contact::{
    ContactDetail, ContactDetailBuilder, ContactPoint, ContactPointBuilder, UsageContext,
    UsageContextBuilder, UsageContextValue,
};
pub use element::{BackboneBase, Element, ElementBase, Extension, ExtensionBuilder, ExtensionValue};
pub use expression::{Expression, ExpressionBuilder};
pub use identifier::{Identifier, IdentifierBuilder};
pub use meta::{Meta, MetaBuilder, Narrative, NarrativeBuilder};
pub use money::{Money, MoneyBuilder};
pub use period::{Period, PeriodBuilder};
pub use primitives::{
    Base64Binary, Boolean, Canonical, Code, Date, DateTime, Decimal, FhirString, Id, Instant,
    Integer, Integer64, Markdown, PositiveInt, Time, UnsignedInt, Uri, Url, Xhtml,
};
pub use quantity::{Quantity, QuantityBuilder, Range, RangeBuilder, Ratio, RatioBuilder};
pub use reference::{Reference, ReferenceBuilder};
pub use related_artifact::{RelatedArtifact, RelatedArtifactBuilder};
