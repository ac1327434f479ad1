//! FHIR R5 data models
//!
//! Immutable records for FHIR R5 resources, their backbone elements and the
//! datatypes they use. Every record:
//!
//! - is produced by its builder and validated once, at `build()` time
//! - exposes read-only accessors (`&T`, `Option<&T>`, `&[T]`)
//! - compares and hashes structurally; resources and backbone elements cache
//!   their hash on first use
//! - can be traversed with a [`visitor::Visitor`]
//! - publishes its schema through [`model_support::TypeInfo`]
//!
//! # Module Organization
//!
//! - `types`: primitives, coded values and general-purpose datatypes
//! - `resource`: `AuditEvent`, `TestPlan`, `EvidenceVariable` and the resource bases
//! - `validation`: the build-time rules
//! - `visitor`: traversal protocol
//! - `model_support`: metadata registry
//! - `generator`: FHIR JSON output
//!
//! # Example
//!
//! ```rust
//! use ferrum_r5::prelude::*;
//! use ferrum_r5::resource::audit_event::{AuditEventAgent, AuditEventSource};
//! use ferrum_r5::types::{AuditEventAction, CodeableConcept, Instant, Reference};
//! use chrono::Utc;
//!
//! let event = AuditEvent::builder()
//!     .code(CodeableConcept::text_only("login"))
//!     .action(AuditEventAction::Execute)
//!     .recorded(Instant::from(Utc::now()))
//!     .agent(
//!         AuditEventAgent::builder()
//!             .who(Reference::builder().reference("Practitioner/p1").build()?)
//!             .build()?,
//!     )
//!     .source(
//!         AuditEventSource::builder()
//!             .observer(Reference::builder().reference("Device/d1").build()?)
//!             .build()?,
//!     )
//!     .build()?;
//!
//! assert_eq!(event.agent().len(), 1);
//! assert_eq!(event, event.to_builder().build()?);
//! # Ok::<(), ferrum_r5::Error>(())
//! ```
//!
//! Records cannot be changed in place; edit through `to_builder()`:
//!
//! ```compile_fail
//! use ferrum_r5::prelude::*;
//! use ferrum_r5::types::PublicationStatus;
//!
//! let plan = TestPlan::builder().status(PublicationStatus::Draft).build().unwrap();
//! plan.test_case().push(todo!());
//! ```

pub mod builder;
pub mod error;
pub mod generator;
mod hash;
pub mod model_support;
pub mod resource;
pub mod types;
pub mod validation;
pub mod visitor;

pub use error::{Error, Result};
pub use resource::{AnyResource, AuditEvent, EvidenceVariable, TestPlan};

/// Builder traits and the core model traits.
pub mod prelude {
    pub use crate::builder::{
        BackboneElementBuilder, DomainResourceBuilder, ElementBuilder, ResourceBuilder,
    };
    pub use crate::resource::{AuditEvent, DomainResource, EvidenceVariable, Resource, TestPlan};
    pub use crate::types::{Choice, Element};
    pub use crate::visitor::{Visitable, Visitor};
}
