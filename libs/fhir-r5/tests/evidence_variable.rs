//! EvidenceVariable characteristics and their definitions

use ferrum_r5::prelude::*;
use ferrum_r5::resource::evidence_variable::{
    EvidenceVariableCategory, EvidenceVariableCategoryValue, EvidenceVariableCharacteristic,
    EvidenceVariableCharacteristicDefinitionByCombination,
    EvidenceVariableCharacteristicDefinitionByTypeAndValue,
    EvidenceVariableCharacteristicDefinitionByTypeAndValueValue,
    EvidenceVariableCharacteristicDuration, EvidenceVariableCharacteristicInstances,
    EvidenceVariableCharacteristicTimeFromEvent,
    EvidenceVariableCharacteristicTimeFromEventEvent,
};
use ferrum_r5::types::{
    Boolean, CharacteristicCombination, Date, EvidenceVariableHandling, FhirString, Id,
    PositiveInt, PublicationStatus, Quantity, Range,
};
use ferrum_r5::Error;
use rust_decimal::Decimal;

mod test_support;
use test_support::{concept, reference};

fn years(value: i64) -> Quantity {
    Quantity::builder()
        .value(Decimal::new(value, 0))
        .unit("years")
        .build()
        .unwrap()
}

fn adults() -> EvidenceVariableCharacteristic {
    EvidenceVariableCharacteristic::builder()
        .link_id(Id::new("adult").unwrap())
        .definition_by_type_and_value(
            EvidenceVariableCharacteristicDefinitionByTypeAndValue::builder()
                .r#type(concept("age"))
                .value(
                    Range::builder()
                        .low(years(18))
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

#[test]
fn test_status_required() {
    let err = EvidenceVariable::builder()
        .title("Adults with diabetes")
        .build()
        .unwrap_err();
    assert_eq!(err.element(), Some("status"));
}

#[test]
fn test_full_variable_builds() {
    let variable = EvidenceVariable::builder()
        .status(PublicationStatus::Active)
        .name("AdultsWithDiabetes")
        .title("Adults with diabetes")
        .short_title("T2D adults")
        .approval_date(Date::new("2023-11").unwrap())
        .actual(true)
        .handling(EvidenceVariableHandling::Dichotomous)
        .characteristic(adults())
        .category(
            EvidenceVariableCategory::builder()
                .name("cohort")
                .value(concept("exposed"))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    assert_eq!(
        variable.handling().and_then(|h| h.value()),
        Some(EvidenceVariableHandling::Dichotomous)
    );
    assert_eq!(variable.actual().and_then(Boolean::value), Some(&true));
    assert_eq!(variable.characteristic().len(), 1);
    assert!(matches!(
        variable.category()[0].value(),
        Some(EvidenceVariableCategoryValue::CodeableConcept(_))
    ));
}

#[test]
fn test_type_and_value_choices() {
    let characteristic = adults();
    let definition = characteristic.definition_by_type_and_value().unwrap();
    assert!(matches!(
        definition.value(),
        EvidenceVariableCharacteristicDefinitionByTypeAndValueValue::Range(_)
    ));

    let by_flag = EvidenceVariableCharacteristicDefinitionByTypeAndValue::builder()
        .r#type(concept("smoker"))
        .value(Boolean::from(true))
        .build()
        .unwrap();
    assert!(matches!(
        by_flag.value(),
        EvidenceVariableCharacteristicDefinitionByTypeAndValueValue::Boolean(_)
    ));

    let err = EvidenceVariableCharacteristicDefinitionByTypeAndValue::builder()
        .value(Boolean::from(true))
        .build()
        .unwrap_err();
    assert_eq!(err.element(), Some("type"));
}

#[test]
fn test_type_and_value_device_targets() {
    let err = EvidenceVariableCharacteristicDefinitionByTypeAndValue::builder()
        .r#type(concept("systolic"))
        .value(years(1))
        .device(reference("Patient/p1"))
        .build()
        .unwrap_err();
    assert_eq!(err.element(), Some("device"));

    assert!(EvidenceVariableCharacteristicDefinitionByTypeAndValue::builder()
        .r#type(concept("systolic"))
        .value(years(1))
        .device(reference("DeviceMetric/bp"))
        .build()
        .is_ok());
}

#[test]
fn test_combination_nests_characteristics() {
    let smokers = EvidenceVariableCharacteristic::builder()
        .definition_codeable_concept(concept("smoker"))
        .exclude(true)
        .build()
        .unwrap();
    let combination = EvidenceVariableCharacteristicDefinitionByCombination::builder()
        .code(CharacteristicCombination::AtLeast)
        .threshold(PositiveInt::new(1).unwrap())
        .characteristic(adults())
        .characteristic(smokers)
        .build()
        .unwrap();

    let outer = EvidenceVariableCharacteristic::builder()
        .definition_by_combination(combination)
        .build()
        .unwrap();
    let nested = outer.definition_by_combination().unwrap().characteristic();
    assert_eq!(nested.len(), 2);
    assert_eq!(nested[1].exclude().and_then(Boolean::value), Some(&true));
    assert_eq!(
        outer.definition_by_combination().unwrap().code().value(),
        Some(CharacteristicCombination::AtLeast)
    );
}

#[test]
fn test_combination_without_characteristics() {
    let err = EvidenceVariableCharacteristicDefinitionByCombination::builder()
        .code(CharacteristicCombination::AnyOf)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::EmptyList { .. }));

    let err = EvidenceVariableCharacteristicDefinitionByCombination::builder()
        .characteristic(adults())
        .build()
        .unwrap_err();
    assert_eq!(err.element(), Some("code"));
}

#[test]
fn test_instances_duration_and_time_from_event() {
    let characteristic = EvidenceVariableCharacteristic::builder()
        .definition_codeable_concept(concept("hospital admission"))
        .instances(years(2))
        .duration(
            Range::builder()
                .low(years(1))
                .high(years(5))
                .build()
                .unwrap(),
        )
        .time_from_event(
            EvidenceVariableCharacteristicTimeFromEvent::builder()
                .description("Within a year of diagnosis")
                .event(concept("diagnosis"))
                .range(
                    Range::builder()
                        .high(years(1))
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    assert!(matches!(
        characteristic.instances(),
        Some(EvidenceVariableCharacteristicInstances::Quantity(_))
    ));
    assert!(matches!(
        characteristic.duration(),
        Some(EvidenceVariableCharacteristicDuration::Range(_))
    ));
    assert!(matches!(
        characteristic.time_from_event()[0].event(),
        Some(EvidenceVariableCharacteristicTimeFromEventEvent::CodeableConcept(_))
    ));
}

#[test]
fn test_time_from_event_reference_and_id() {
    let by_reference = EvidenceVariableCharacteristicTimeFromEvent::builder()
        .event(reference("Procedure/surgery"))
        .build()
        .unwrap();
    assert!(matches!(
        by_reference.event(),
        Some(EvidenceVariableCharacteristicTimeFromEventEvent::Reference(_))
    ));

    let by_id = EvidenceVariableCharacteristicTimeFromEvent::builder()
        .event(Id::new("enrolment").unwrap())
        .build()
        .unwrap();
    assert!(matches!(
        by_id.event(),
        Some(EvidenceVariableCharacteristicTimeFromEventEvent::Id(_))
    ));
}

#[test]
fn test_empty_characteristic_is_vacuous() {
    let err = EvidenceVariableCharacteristic::builder().build().unwrap_err();
    assert!(matches!(err, Error::VacuousElement { .. }));
}

#[test]
fn test_category_value_variants() {
    let by_quantity = EvidenceVariableCategory::builder()
        .name("age")
        .value(years(65))
        .build()
        .unwrap();
    assert!(matches!(
        by_quantity.value(),
        Some(EvidenceVariableCategoryValue::Quantity(_))
    ));
    assert_eq!(
        by_quantity.name().and_then(FhirString::as_str),
        Some("age")
    );
}
