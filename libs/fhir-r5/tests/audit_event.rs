//! AuditEvent construction, validation and equality

use std::collections::HashSet;

use ferrum_r5::prelude::*;
use ferrum_r5::resource::audit_event::{
    AuditEventAgent, AuditEventAgentNetwork, AuditEventEntity, AuditEventEntityDetail,
    AuditEventEntityDetailValue, AuditEventOccurred, AuditEventOutcome, AuditEventSource,
};
use ferrum_r5::types::{
    AuditEventAction, AuditEventSeverity, DateTime, Extension, FhirString, Period, Reference, Uri,
};
use ferrum_r5::Error;

mod test_support;
use test_support::{agent, coding, concept, minimal_audit_event, recorded, reference, source};

#[test]
fn test_minimal_event_builds() {
    let event = minimal_audit_event().build().unwrap();

    assert_eq!(event.code().text().and_then(|t| t.as_str()), Some("login"));
    assert_eq!(event.recorded(), &recorded());
    assert_eq!(event.agent().len(), 1);
    assert_eq!(
        event.source().observer().reference().and_then(|r| r.value()).map(String::as_str),
        Some("Device/d1")
    );
    assert!(event.entity().is_empty());
    assert!(event.occurred().is_none());
}

#[test]
fn test_missing_source_names_element() {
    let err = AuditEvent::builder()
        .code(concept("login"))
        .recorded(recorded())
        .agent(agent("Practitioner/p1"))
        .build()
        .unwrap_err();

    assert!(matches!(err, Error::MissingRequired { .. }));
    assert_eq!(err.element(), Some("source"));
    assert!(err.to_string().contains("source"));
}

#[test]
fn test_missing_code_and_recorded() {
    let err = AuditEvent::builder()
        .recorded(recorded())
        .agent(agent("Practitioner/p1"))
        .source(source("Device/d1"))
        .build()
        .unwrap_err();
    assert_eq!(err.element(), Some("code"));

    let err = AuditEvent::builder()
        .code(concept("login"))
        .agent(agent("Practitioner/p1"))
        .source(source("Device/d1"))
        .build()
        .unwrap_err();
    assert_eq!(err.element(), Some("recorded"));
}

#[test]
fn test_agent_must_not_be_empty() {
    let err = minimal_audit_event()
        .set_agent(Vec::new())
        .build()
        .unwrap_err();

    assert!(matches!(err, Error::EmptyList { .. }));
    assert_eq!(err.element(), Some("agent"));
}

#[test]
fn test_validating_false_skips_rules_but_not_required_fields() {
    let event = minimal_audit_event()
        .set_agent(Vec::new())
        .patient(reference("Group/g1"))
        .validating(false)
        .build()
        .unwrap();
    assert!(event.agent().is_empty());

    let err = AuditEvent::builder()
        .code(concept("login"))
        .recorded(recorded())
        .validating(false)
        .build()
        .unwrap_err();
    assert_eq!(err.element(), Some("source"));

    // to_builder() validates again
    assert!(event.to_builder().build().is_err());
}

#[test]
fn test_outcome_requires_code() {
    let err = AuditEventOutcome::builder()
        .detail(concept("disk full"))
        .build()
        .unwrap_err();
    assert_eq!(err.element(), Some("code"));

    let outcome = AuditEventOutcome::builder()
        .code(coding("http://terminology.hl7.org/CodeSystem/issue-severity", "error"))
        .detail(concept("disk full"))
        .build()
        .unwrap();
    let event = minimal_audit_event().outcome(outcome.clone()).build().unwrap();
    assert_eq!(event.outcome(), Some(&outcome));
}

#[test]
fn test_occurred_choice() {
    let at = minimal_audit_event()
        .occurred(DateTime::new("2024-03-01T12:00:00Z").unwrap())
        .build()
        .unwrap();
    assert!(matches!(at.occurred(), Some(AuditEventOccurred::DateTime(_))));

    let period = Period::builder()
        .start(DateTime::new("2024-03-01").unwrap())
        .end(DateTime::new("2024-03-02").unwrap())
        .build()
        .unwrap();
    let during = minimal_audit_event().occurred(period).build().unwrap();
    match during.occurred() {
        Some(AuditEventOccurred::Period(p)) => {
            assert_eq!(p.end().and_then(|d| d.value()).map(String::as_str), Some("2024-03-02"))
        }
        other => panic!("expected a period, got {other:?}"),
    }
}

#[test]
fn test_agent_who_targets() {
    for allowed in ["Practitioner/p1", "Patient/123", "Device/d1/_history/2"] {
        assert!(
            AuditEventAgent::builder().who(reference(allowed)).build().is_ok(),
            "{allowed} should be accepted"
        );
    }

    let err = AuditEventAgent::builder()
        .who(reference("Observation/o1"))
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidReferenceType { .. }));
    assert_eq!(err.element(), Some("who"));
}

#[test]
fn test_reference_type_rules() {
    // Absolute references are checked like relative ones
    assert!(AuditEventAgent::builder()
        .who(reference("https://example.org/fhir/Practitioner/p1"))
        .build()
        .is_ok());
    let err = AuditEventAgent::builder()
        .who(reference("http://example.org/fhir/Location/1"))
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidReferenceType { .. }));
    assert_eq!(err.element(), Some("who"));

    // Contained references carry no checkable type
    assert!(AuditEventAgent::builder()
        .who(reference("#p1"))
        .build()
        .is_ok());

    let mismatched = Reference::builder()
        .reference("Practitioner/p1")
        .r#type(Uri::new("Patient").unwrap())
        .build()
        .unwrap();
    let err = AuditEventAgent::builder().who(mismatched).build().unwrap_err();
    assert!(matches!(err, Error::ReferenceTypeMismatch { .. }));

    let unknown = Reference::builder()
        .r#type(Uri::new("NotAResource").unwrap())
        .display("someone")
        .build()
        .unwrap();
    let err = AuditEventAgent::builder().who(unknown).build().unwrap_err();
    assert!(matches!(err, Error::InvalidResourceType { .. }));
}

#[test]
fn test_agent_network_choice() {
    let by_address = AuditEventAgent::builder()
        .who(reference("Device/d1"))
        .network(FhirString::from("10.0.0.12"))
        .build()
        .unwrap();
    assert!(matches!(by_address.network(), Some(AuditEventAgentNetwork::String(_))));

    assert!(AuditEventAgent::builder()
        .who(reference("Device/d1"))
        .network(reference("Endpoint/e1"))
        .build()
        .is_ok());

    let err = AuditEventAgent::builder()
        .who(reference("Device/d1"))
        .network(reference("Location/l1"))
        .build()
        .unwrap_err();
    assert_eq!(err.element(), Some("network"));
}

#[test]
fn test_resource_level_targets() {
    let err = minimal_audit_event()
        .based_on(reference("ServiceRequest/s1"))
        .based_on(reference("Patient/p1"))
        .build()
        .unwrap_err();
    assert_eq!(err.element(), Some("basedOn"));

    let err = minimal_audit_event()
        .encounter(reference("Patient/p1"))
        .build()
        .unwrap_err();
    assert_eq!(err.element(), Some("encounter"));

    let event = minimal_audit_event()
        .patient(reference("Patient/p1"))
        .encounter(reference("Encounter/e1"))
        .build()
        .unwrap();
    assert!(event.patient().is_some());
}

#[test]
fn test_entity_detail_requires_type_and_value() {
    let err = AuditEventEntityDetail::builder()
        .r#type(concept("query-parameters"))
        .build()
        .unwrap_err();
    assert_eq!(err.element(), Some("value"));

    let err = AuditEventEntityDetail::builder()
        .value(FhirString::from("name=smith"))
        .build()
        .unwrap_err();
    assert_eq!(err.element(), Some("type"));

    let detail = AuditEventEntityDetail::builder()
        .r#type(concept("query-parameters"))
        .value(FhirString::from("name=smith"))
        .build()
        .unwrap();
    assert!(matches!(detail.value(), AuditEventEntityDetailValue::String(_)));
}

#[test]
fn test_empty_entity_is_vacuous() {
    let err = AuditEventEntity::builder().build().unwrap_err();
    assert!(matches!(err, Error::VacuousElement { .. }));
    assert_eq!(err.element(), None);

    // An extension alone is enough
    let flagged = AuditEventEntity::builder()
        .extension(
            Extension::builder()
                .url("http://example.org/flag")
                .value(FhirString::from("x"))
                .build()
                .unwrap(),
        )
        .build();
    assert!(flagged.is_ok());
}

#[test]
fn test_entity_query_and_nested_agent() {
    let entity = AuditEventEntity::builder()
        .what(reference("Patient/p1"))
        .query(b"SELECT *".to_vec())
        .agent(agent("Organization/o1"))
        .build()
        .unwrap();
    assert_eq!(entity.query().and_then(|q| q.value()).map(Vec::as_slice), Some(&b"SELECT *"[..]));
    assert_eq!(entity.agent().len(), 1);
}

#[test]
fn test_to_builder_round_trip_and_copy_on_write() {
    let event = minimal_audit_event()
        .action(AuditEventAction::Execute)
        .severity(AuditEventSeverity::Informational)
        .category(concept("rest"))
        .build()
        .unwrap();

    let copy = event.to_builder().build().unwrap();
    assert_eq!(event, copy);
    assert_eq!(event.hash_code(), copy.hash_code());

    let changed = event
        .to_builder()
        .action(AuditEventAction::Read)
        .build()
        .unwrap();
    assert_ne!(event, changed);
    assert_eq!(event.action().and_then(|a| a.value()), Some(AuditEventAction::Execute));
    assert_eq!(changed.action().and_then(|a| a.value()), Some(AuditEventAction::Read));
}

#[test]
fn test_structural_equality_and_hash() {
    let a = minimal_audit_event().build().unwrap();
    let b = minimal_audit_event().build().unwrap();
    let c = minimal_audit_event()
        .agent(agent("Patient/p2"))
        .build()
        .unwrap();

    assert_eq!(a, b);
    assert_eq!(a.hash_code(), b.hash_code());
    assert_ne!(a, c);

    let set: HashSet<AuditEvent> = [a.clone(), b, c].into_iter().collect();
    assert_eq!(set.len(), 2);
    assert!(set.contains(&a));
}

#[test]
fn test_resource_id_and_contained() {
    let event = minimal_audit_event()
        .id("ae-1")
        .contained(test_support::draft_test_plan())
        .build()
        .unwrap();
    assert_eq!(event.id(), Some("ae-1"));
    assert_eq!(event.contained().len(), 1);
    assert_eq!(event.contained()[0].resource_type(), "TestPlan");

    let err = minimal_audit_event().id("not valid!").build().unwrap_err();
    assert!(matches!(err, Error::InvalidValue { .. }));
}

#[test]
fn test_source_type_and_site() {
    let source = AuditEventSource::builder()
        .site(reference("Location/l1"))
        .observer(reference("Organization/o1"))
        .r#type(coding("http://terminology.hl7.org/CodeSystem/security-source-type", "4"))
        .build()
        .unwrap();
    assert_eq!(source.r#type().len(), 1);

    let err = AuditEventSource::builder()
        .observer(reference("Encounter/e1"))
        .build()
        .unwrap_err();
    assert_eq!(err.element(), Some("observer"));
}
