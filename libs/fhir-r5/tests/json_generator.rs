//! FHIR JSON output

use ferrum_r5::generator::{GeneratorConfig, JsonGenerator};
use ferrum_r5::prelude::*;
use ferrum_r5::resource::audit_event::{
    AuditEventAgent, AuditEventEntity, AuditEventEntityDetail,
};
use ferrum_r5::resource::evidence_variable::{
    EvidenceVariableCharacteristic, EvidenceVariableCharacteristicDefinitionByCombination,
};
use ferrum_r5::types::{
    AuditEventAction, CharacteristicCombination, Code, DateTime, Extension, FhirString,
    Money, PublicationStatus, Quantity, Uri,
};
use serde_json::json;

mod test_support;
use test_support::{concept, draft_test_plan, minimal_audit_event, reference};

#[test]
fn test_audit_event_json() {
    let event = minimal_audit_event()
        .id("ae-1")
        .action(AuditEventAction::Execute)
        .occurred(DateTime::new("2024-03-01").unwrap())
        .build()
        .unwrap();

    let value = JsonGenerator::default().generate(&event).unwrap();
    assert_eq!(
        value,
        json!({
            "resourceType": "AuditEvent",
            "id": "ae-1",
            "code": {"text": "login"},
            "action": "E",
            "occurredDateTime": "2024-03-01",
            "recorded": "2024-03-01T12:30:00Z",
            "agent": [{"who": {"reference": "Practitioner/p1"}}],
            "source": {"observer": {"reference": "Device/d1"}}
        })
    );
}

#[test]
fn test_resource_type_comes_first() {
    let event = minimal_audit_event().build().unwrap();
    let text = JsonGenerator::default().generate_string(&event).unwrap();
    assert!(text.starts_with(r#"{"resourceType":"AuditEvent","code":"#));

    let pretty = JsonGenerator::new(GeneratorConfig::pretty())
        .generate_string(&event)
        .unwrap();
    assert!(pretty.starts_with("{\n  \"resourceType\": \"AuditEvent\""));
}

#[test]
fn test_choice_suffix_in_backbone() {
    let entity = AuditEventEntity::builder()
        .what(reference("Patient/p1"))
        .query(b"SELECT *".to_vec())
        .detail(
            AuditEventEntityDetail::builder()
                .r#type(concept("filter"))
                .value(FhirString::from("name=smith"))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let value = JsonGenerator::default().generate(&entity).unwrap();
    assert_eq!(
        value,
        json!({
            "what": {"reference": "Patient/p1"},
            "query": "U0VMRUNUICo=",
            "detail": [{"type": {"text": "filter"}, "valueString": "name=smith"}]
        })
    );
}

#[test]
fn test_repeating_primitives_are_padded() {
    let absent = Uri::builder()
        .extension(
            Extension::builder()
                .url("http://hl7.org/fhir/StructureDefinition/data-absent-reason")
                .value(Code::new("masked").unwrap())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let agent = AuditEventAgent::builder()
        .who(reference("Practitioner/p1"))
        .policy(Uri::new("http://example.org/policy/1").unwrap())
        .policy(absent)
        .build()
        .unwrap();

    let value = JsonGenerator::default().generate(&agent).unwrap();
    assert_eq!(
        value,
        json!({
            "who": {"reference": "Practitioner/p1"},
            "policy": ["http://example.org/policy/1", null],
            "_policy": [null, {"extension": [{
                "url": "http://hl7.org/fhir/StructureDefinition/data-absent-reason",
                "valueCode": "masked"
            }]}]
        })
    );
}

#[test]
fn test_contained_and_extensions() {
    let event = minimal_audit_event()
        .contained(draft_test_plan())
        .extension(
            Extension::builder()
                .url("http://example.org/ext")
                .value(FhirString::from("tagged"))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let value = JsonGenerator::default().generate(&event).unwrap();
    assert_eq!(
        value["contained"],
        json!([{"resourceType": "TestPlan", "status": "draft"}])
    );
    assert_eq!(
        value["extension"],
        json!([{"url": "http://example.org/ext", "valueString": "tagged"}])
    );
}

#[test]
fn test_nested_backbones() {
    let leaf = EvidenceVariableCharacteristic::builder()
        .definition_codeable_concept(concept("adult"))
        .build()
        .unwrap();
    let variable = EvidenceVariable::builder()
        .status(PublicationStatus::Active)
        .characteristic(
            EvidenceVariableCharacteristic::builder()
                .definition_by_combination(
                    EvidenceVariableCharacteristicDefinitionByCombination::builder()
                        .code(CharacteristicCombination::AllOf)
                        .characteristic(leaf)
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let value = JsonGenerator::default().generate(&variable).unwrap();
    assert_eq!(
        value,
        json!({
            "resourceType": "EvidenceVariable",
            "status": "active",
            "characteristic": [{
                "definitionByCombination": {
                    "code": "all-of",
                    "characteristic": [{"definitionCodeableConcept": {"text": "adult"}}]
                }
            }]
        })
    );
}

#[test]
fn test_decimal_keeps_precision() {
    for (text, expected) in [
        ("1.50", r#"{"value":1.50}"#),
        ("0.10", r#"{"value":0.10}"#),
        ("12345678901234567.89", r#"{"value":12345678901234567.89}"#),
    ] {
        let quantity = Quantity::builder()
            .value(text.parse::<rust_decimal::Decimal>().unwrap())
            .build()
            .unwrap();
        let json = JsonGenerator::default().generate_string(&quantity).unwrap();
        assert_eq!(json, expected);
    }
}

#[test]
fn test_money_json() {
    let price = Money::builder()
        .value("12.50".parse::<rust_decimal::Decimal>().unwrap())
        .currency(Code::new("EUR").unwrap())
        .build()
        .unwrap();
    assert_eq!(price.currency().and_then(|c| c.value()).map(String::as_str), Some("EUR"));

    let json = JsonGenerator::default().generate_string(&price).unwrap();
    assert_eq!(json, r#"{"value":12.50,"currency":"EUR"}"#);

    let err = Money::builder().build().unwrap_err();
    assert!(matches!(err, ferrum_r5::Error::VacuousElement { .. }));
}
