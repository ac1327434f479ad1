//! TestPlan construction and nested test cases

use ferrum_r5::prelude::*;
use ferrum_r5::resource::test_plan::{
    TestPlanDependency, TestPlanSource, TestPlanTestCase, TestPlanTestCaseAssertion,
    TestPlanTestCaseDependency, TestPlanTestCaseTestData, TestPlanTestCaseTestRun,
    TestPlanTestCaseTestRunScript, TestPlanVersionAlgorithm,
};
use ferrum_r5::types::{CodeableReference, FhirString, Integer, PublicationStatus};
use ferrum_r5::Error;

mod test_support;
use test_support::{coding, concept, draft_test_plan, reference};

fn test_case(sequence: i32) -> TestPlanTestCase {
    TestPlanTestCase::builder()
        .sequence(sequence)
        .test_run(
            TestPlanTestCaseTestRun::builder()
                .narrative("Run the read scenario")
                .script(
                    TestPlanTestCaseTestRunScript::builder()
                        .language(concept("TestScript"))
                        .source(reference("TestScript/read"))
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
fn test_draft_plan_has_defaults() {
    let plan = draft_test_plan();
    assert_eq!(plan.status().value(), Some(PublicationStatus::Draft));
    assert!(plan.test_case().is_empty());
    assert!(plan.url().is_none());
    assert!(plan.version_algorithm().is_none());
}

#[test]
fn test_status_is_required_even_without_validation() {
    let err = TestPlan::builder()
        .title("Untitled")
        .validating(false)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::MissingRequired { .. }));
    assert_eq!(err.element(), Some("status"));
}

#[test]
fn test_version_algorithm_choice() {
    let plan = TestPlan::builder()
        .status(PublicationStatus::Active)
        .version("1.0.0")
        .version_algorithm(coding(
            "http://hl7.org/fhir/version-algorithm",
            "semver",
        ))
        .build()
        .unwrap();
    assert!(matches!(
        plan.version_algorithm(),
        Some(TestPlanVersionAlgorithm::Coding(_))
    ));

    let plan = plan
        .to_builder()
        .version_algorithm(FhirString::from("date"))
        .build()
        .unwrap();
    assert!(matches!(
        plan.version_algorithm(),
        Some(TestPlanVersionAlgorithm::String(_))
    ));
}

#[test]
fn test_test_cases_keep_order() {
    let plan = TestPlan::builder()
        .status(PublicationStatus::Active)
        .test_case(test_case(1))
        .test_case(test_case(2))
        .test_case(test_case(3))
        .build()
        .unwrap();

    let sequences: Vec<i32> = plan
        .test_case()
        .iter()
        .filter_map(|tc| tc.sequence().and_then(Integer::value).copied())
        .collect();
    assert_eq!(sequences, vec![1, 2, 3]);

    let replaced = plan
        .to_builder()
        .set_test_case([test_case(9)])
        .build()
        .unwrap();
    assert_eq!(replaced.test_case().len(), 1);
    assert_eq!(plan.test_case().len(), 3);
}

#[test]
fn test_script_source_is_string_or_reference() {
    let case = test_case(1);
    let run = &case.test_run()[0];
    let script = run.script().unwrap();
    assert!(matches!(script.source(), Some(TestPlanSource::Reference(_))));

    let inline = TestPlanTestCaseTestRunScript::builder()
        .source(FhirString::from("GET /Patient/1"))
        .build()
        .unwrap();
    assert!(matches!(inline.source(), Some(TestPlanSource::String(_))));
}

#[test]
fn test_test_data_type_is_required() {
    let err = TestPlanTestCaseTestData::builder()
        .content(reference("Bundle/seed"))
        .build()
        .unwrap_err();
    assert_eq!(err.element(), Some("type"));

    let data = TestPlanTestCaseTestData::builder()
        .r#type(coding("http://example.org/test-data", "fixture"))
        .source(FhirString::from("seed.json"))
        .build()
        .unwrap();
    assert!(data.content().is_none());
    assert!(matches!(data.source(), Some(TestPlanSource::String(_))));
}

#[test]
fn test_assertion_holds_codeable_references() {
    let assertion = TestPlanTestCaseAssertion::builder()
        .r#type(concept("response"))
        .object(
            CodeableReference::builder()
                .reference(reference("Patient/p1"))
                .build()
                .unwrap(),
        )
        .result(
            CodeableReference::builder()
                .concept(concept("200 OK"))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    assert_eq!(assertion.r#type().len(), 1);
    assert_eq!(assertion.object().len(), 1);
    assert_eq!(assertion.result().len(), 1);
}

#[test]
fn test_dependencies_at_both_levels() {
    let plan_dependency = TestPlanDependency::builder()
        .description("Requires the base server suite")
        .predecessor(reference("TestPlan/base"))
        .build()
        .unwrap();
    let case_dependency = TestPlanTestCaseDependency::builder()
        .description("Runs after create")
        .build()
        .unwrap();

    let plan = TestPlan::builder()
        .status(PublicationStatus::Active)
        .dependency(plan_dependency.clone())
        .test_case(
            test_case(2)
                .to_builder()
                .dependency(case_dependency.clone())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    assert_eq!(plan.dependency(), &[plan_dependency]);
    assert_eq!(plan.test_case()[0].dependency(), &[case_dependency]);
    assert_eq!(plan.dependency()[0].type_name(), "TestPlan.Dependency");
    assert_eq!(
        plan.test_case()[0].dependency()[0].type_name(),
        "TestPlan.TestCase.Dependency"
    );
}

#[test]
fn test_empty_test_case_is_vacuous() {
    let err = TestPlanTestCase::builder().build().unwrap_err();
    assert!(matches!(err, Error::VacuousElement { ref type_name } if type_name == "TestPlan.TestCase"));

    // Building without validation lets the empty element through
    assert!(TestPlanTestCase::builder().validating(false).build().is_ok());
}

#[test]
fn test_plan_equality_and_contained() {
    let a = TestPlan::builder()
        .status(PublicationStatus::Active)
        .name("ReadSuite")
        .test_case(test_case(1))
        .build()
        .unwrap();
    let b = a.to_builder().build().unwrap();
    assert_eq!(a, b);
    assert_eq!(a.hash_code(), b.hash_code());

    let wrapper = TestPlan::builder()
        .status(PublicationStatus::Active)
        .contained(a.clone())
        .build()
        .unwrap();
    assert_eq!(wrapper.contained()[0].resource_type(), "TestPlan");
    assert_ne!(wrapper, a);
}
