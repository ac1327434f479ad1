//! TestPlan
//!
//! A plan for executing testing on an artifact or specifications.

use std::any::Any;

use crate::builder::finish;
use crate::error::Result;
use crate::hash::HashCache;
use crate::model_support::{
    BindingStrength, ConstraintInfo, ConstraintLevel, FieldInfo, TypeInfo, TypeKind,
};
use crate::resource::{domain_resource, DomainResourceBase};
use crate::types::choice::choice_enum;
use crate::types::element::backbone_element;
use crate::types::{
    BackboneBase, Boolean, CodeableConcept, CodeableReference, Coded, Coding, ContactDetail,
    DateTime, FhirString, Identifier, Integer, Markdown, PublicationStatus, Reference,
    UsageContext, Uri,
};
use crate::validation;
use crate::visitor::{self, Visitable, Visitor};

const VERSION_ALGORITHM_TYPES: &[&str] = &["string", "Coding"];
const SOURCE_TYPES: &[&str] = &["string", "Reference"];

choice_enum! {
    /// TestPlan.versionAlgorithm[x]
    pub enum TestPlanVersionAlgorithm {
        String(FhirString),
        Coding(Coding),
    }
}

choice_enum! {
    /// TestPlan.testCase.testRun.script.source[x] and
    /// TestPlan.testCase.testData.source[x]
    pub enum TestPlanSource {
        String(FhirString),
        Reference(Reference),
    }
}

/// Description of intended testing
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestPlan {
    base: DomainResourceBase,
    url: Option<Uri>,
    identifier: Vec<Identifier>,
    version: Option<FhirString>,
    version_algorithm: Option<TestPlanVersionAlgorithm>,
    name: Option<FhirString>,
    title: Option<FhirString>,
    status: Coded<PublicationStatus>,
    experimental: Option<Boolean>,
    date: Option<DateTime>,
    publisher: Option<FhirString>,
    contact: Vec<ContactDetail>,
    description: Option<Markdown>,
    use_context: Vec<UsageContext>,
    jurisdiction: Vec<CodeableConcept>,
    purpose: Option<Markdown>,
    copyright: Option<Markdown>,
    copyright_label: Option<FhirString>,
    category: Vec<CodeableConcept>,
    scope: Vec<Reference>,
    test_tools: Option<Markdown>,
    dependency: Vec<TestPlanDependency>,
    exit_criteria: Option<Markdown>,
    test_case: Vec<TestPlanTestCase>,
    hash: HashCache,
}

impl TestPlan {
    pub fn builder() -> TestPlanBuilder {
        TestPlanBuilder::default()
    }

    pub fn to_builder(&self) -> TestPlanBuilder {
        TestPlanBuilder {
            base: self.base.clone(),
            url: self.url.clone(),
            identifier: self.identifier.clone(),
            version: self.version.clone(),
            version_algorithm: self.version_algorithm.clone(),
            name: self.name.clone(),
            title: self.title.clone(),
            status: Some(self.status.clone()),
            experimental: self.experimental.clone(),
            date: self.date.clone(),
            publisher: self.publisher.clone(),
            contact: self.contact.clone(),
            description: self.description.clone(),
            use_context: self.use_context.clone(),
            jurisdiction: self.jurisdiction.clone(),
            purpose: self.purpose.clone(),
            copyright: self.copyright.clone(),
            copyright_label: self.copyright_label.clone(),
            category: self.category.clone(),
            scope: self.scope.clone(),
            test_tools: self.test_tools.clone(),
            dependency: self.dependency.clone(),
            exit_criteria: self.exit_criteria.clone(),
            test_case: self.test_case.clone(),
            skip_validation: false,
        }
    }

    /// Canonical identifier for this test plan, represented as a URI (globally unique)
    pub fn url(&self) -> Option<&Uri> {
        self.url.as_ref()
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    pub fn version(&self) -> Option<&FhirString> {
        self.version.as_ref()
    }

    /// How to compare versions
    pub fn version_algorithm(&self) -> Option<&TestPlanVersionAlgorithm> {
        self.version_algorithm.as_ref()
    }

    /// Computer-friendly name
    pub fn name(&self) -> Option<&FhirString> {
        self.name.as_ref()
    }

    pub fn title(&self) -> Option<&FhirString> {
        self.title.as_ref()
    }

    pub fn status(&self) -> &Coded<PublicationStatus> {
        &self.status
    }

    /// For testing purposes, not real usage
    pub fn experimental(&self) -> Option<&Boolean> {
        self.experimental.as_ref()
    }

    pub fn date(&self) -> Option<&DateTime> {
        self.date.as_ref()
    }

    pub fn publisher(&self) -> Option<&FhirString> {
        self.publisher.as_ref()
    }

    pub fn contact(&self) -> &[ContactDetail] {
        &self.contact
    }

    pub fn description(&self) -> Option<&Markdown> {
        self.description.as_ref()
    }

    pub fn use_context(&self) -> &[UsageContext] {
        &self.use_context
    }

    pub fn jurisdiction(&self) -> &[CodeableConcept] {
        &self.jurisdiction
    }

    pub fn purpose(&self) -> Option<&Markdown> {
        self.purpose.as_ref()
    }

    pub fn copyright(&self) -> Option<&Markdown> {
        self.copyright.as_ref()
    }

    pub fn copyright_label(&self) -> Option<&FhirString> {
        self.copyright_label.as_ref()
    }

    /// The category of the Test Plan, e.g. unit, integration, acceptance
    pub fn category(&self) -> &[CodeableConcept] {
        &self.category
    }

    /// What is being tested with this Test Plan
    pub fn scope(&self) -> &[Reference] {
        &self.scope
    }

    pub fn test_tools(&self) -> Option<&Markdown> {
        self.test_tools.as_ref()
    }

    pub fn dependency(&self) -> &[TestPlanDependency] {
        &self.dependency
    }

    /// The test passes when all criteria hold
    pub fn exit_criteria(&self) -> Option<&Markdown> {
        self.exit_criteria.as_ref()
    }

    pub fn test_case(&self) -> &[TestPlanTestCase] {
        &self.test_case
    }

    fn validate(&self) -> Result<()> {
        self.base.validate()?;
        validation::choice_element(
            self.version_algorithm.as_ref(),
            "versionAlgorithm",
            VERSION_ALGORITHM_TYPES,
        )
    }
}

domain_resource!(TestPlan, TestPlanBuilder);

impl Visitable for TestPlan {
    fn type_name(&self) -> &'static str {
        "TestPlan"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &TEST_PLAN_INFO
    }

    fn has_children(&self) -> bool {
        true
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "url", self.url.as_ref());
            visitor::accept_list(v, "identifier", &self.identifier);
            visitor::accept(v, "version", self.version.as_ref());
            visitor::accept(v, "versionAlgorithm", self.version_algorithm.as_ref());
            visitor::accept(v, "name", self.name.as_ref());
            visitor::accept(v, "title", self.title.as_ref());
            self.status.accept("status", None, v);
            visitor::accept(v, "experimental", self.experimental.as_ref());
            visitor::accept(v, "date", self.date.as_ref());
            visitor::accept(v, "publisher", self.publisher.as_ref());
            visitor::accept_list(v, "contact", &self.contact);
            visitor::accept(v, "description", self.description.as_ref());
            visitor::accept_list(v, "useContext", &self.use_context);
            visitor::accept_list(v, "jurisdiction", &self.jurisdiction);
            visitor::accept(v, "purpose", self.purpose.as_ref());
            visitor::accept(v, "copyright", self.copyright.as_ref());
            visitor::accept(v, "copyrightLabel", self.copyright_label.as_ref());
            visitor::accept_list(v, "category", &self.category);
            visitor::accept_list(v, "scope", &self.scope);
            visitor::accept(v, "testTools", self.test_tools.as_ref());
            visitor::accept_list(v, "dependency", &self.dependency);
            visitor::accept(v, "exitCriteria", self.exit_criteria.as_ref());
            visitor::accept_list(v, "testCase", &self.test_case);
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct TestPlanBuilder {
    base: DomainResourceBase,
    url: Option<Uri>,
    identifier: Vec<Identifier>,
    version: Option<FhirString>,
    version_algorithm: Option<TestPlanVersionAlgorithm>,
    name: Option<FhirString>,
    title: Option<FhirString>,
    status: Option<Coded<PublicationStatus>>,
    experimental: Option<Boolean>,
    date: Option<DateTime>,
    publisher: Option<FhirString>,
    contact: Vec<ContactDetail>,
    description: Option<Markdown>,
    use_context: Vec<UsageContext>,
    jurisdiction: Vec<CodeableConcept>,
    purpose: Option<Markdown>,
    copyright: Option<Markdown>,
    copyright_label: Option<FhirString>,
    category: Vec<CodeableConcept>,
    scope: Vec<Reference>,
    test_tools: Option<Markdown>,
    dependency: Vec<TestPlanDependency>,
    exit_criteria: Option<Markdown>,
    test_case: Vec<TestPlanTestCase>,
    skip_validation: bool,
}

impl TestPlanBuilder {
    pub fn url(mut self, url: Uri) -> Self {
        self.url = Some(url);
        self
    }

    pub fn identifier(mut self, identifier: Identifier) -> Self {
        self.identifier.push(identifier);
        self
    }

    pub fn set_identifier(mut self, identifier: impl IntoIterator<Item = Identifier>) -> Self {
        self.identifier = identifier.into_iter().collect();
        self
    }

    pub fn version(mut self, version: impl Into<FhirString>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// `FhirString` or `Coding`
    pub fn version_algorithm(
        mut self,
        version_algorithm: impl Into<TestPlanVersionAlgorithm>,
    ) -> Self {
        self.version_algorithm = Some(version_algorithm.into());
        self
    }

    pub fn name(mut self, name: impl Into<FhirString>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn title(mut self, title: impl Into<FhirString>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn status(mut self, status: impl Into<Coded<PublicationStatus>>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn experimental(mut self, experimental: impl Into<Boolean>) -> Self {
        self.experimental = Some(experimental.into());
        self
    }

    pub fn date(mut self, date: DateTime) -> Self {
        self.date = Some(date);
        self
    }

    pub fn publisher(mut self, publisher: impl Into<FhirString>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    pub fn contact(mut self, contact: ContactDetail) -> Self {
        self.contact.push(contact);
        self
    }

    pub fn set_contact(mut self, contact: impl IntoIterator<Item = ContactDetail>) -> Self {
        self.contact = contact.into_iter().collect();
        self
    }

    pub fn description(mut self, description: impl Into<Markdown>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn use_context(mut self, use_context: UsageContext) -> Self {
        self.use_context.push(use_context);
        self
    }

    pub fn set_use_context(mut self, use_context: impl IntoIterator<Item = UsageContext>) -> Self {
        self.use_context = use_context.into_iter().collect();
        self
    }

    pub fn jurisdiction(mut self, jurisdiction: impl Into<CodeableConcept>) -> Self {
        self.jurisdiction.push(jurisdiction.into());
        self
    }

    pub fn set_jurisdiction(
        mut self,
        jurisdiction: impl IntoIterator<Item = CodeableConcept>,
    ) -> Self {
        self.jurisdiction = jurisdiction.into_iter().collect();
        self
    }

    pub fn purpose(mut self, purpose: impl Into<Markdown>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    pub fn copyright(mut self, copyright: impl Into<Markdown>) -> Self {
        self.copyright = Some(copyright.into());
        self
    }

    pub fn copyright_label(mut self, copyright_label: impl Into<FhirString>) -> Self {
        self.copyright_label = Some(copyright_label.into());
        self
    }

    pub fn category(mut self, category: impl Into<CodeableConcept>) -> Self {
        self.category.push(category.into());
        self
    }

    pub fn set_category(mut self, category: impl IntoIterator<Item = CodeableConcept>) -> Self {
        self.category = category.into_iter().collect();
        self
    }

    pub fn scope(mut self, scope: Reference) -> Self {
        self.scope.push(scope);
        self
    }

    pub fn set_scope(mut self, scope: impl IntoIterator<Item = Reference>) -> Self {
        self.scope = scope.into_iter().collect();
        self
    }

    pub fn test_tools(mut self, test_tools: impl Into<Markdown>) -> Self {
        self.test_tools = Some(test_tools.into());
        self
    }

    pub fn dependency(mut self, dependency: TestPlanDependency) -> Self {
        self.dependency.push(dependency);
        self
    }

    pub fn set_dependency(
        mut self,
        dependency: impl IntoIterator<Item = TestPlanDependency>,
    ) -> Self {
        self.dependency = dependency.into_iter().collect();
        self
    }

    pub fn exit_criteria(mut self, exit_criteria: impl Into<Markdown>) -> Self {
        self.exit_criteria = Some(exit_criteria.into());
        self
    }

    pub fn test_case(mut self, test_case: TestPlanTestCase) -> Self {
        self.test_case.push(test_case);
        self
    }

    pub fn set_test_case(mut self, test_case: impl IntoIterator<Item = TestPlanTestCase>) -> Self {
        self.test_case = test_case.into_iter().collect();
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<TestPlan> {
        let validate = !self.skip_validation;
        finish("TestPlan", validate, || {
            let plan = TestPlan {
                base: self.base.clone(),
                url: self.url.clone(),
                identifier: self.identifier.clone(),
                version: self.version.clone(),
                version_algorithm: self.version_algorithm.clone(),
                name: self.name.clone(),
                title: self.title.clone(),
                status: validation::require_non_null(self.status.clone(), "status")?,
                experimental: self.experimental.clone(),
                date: self.date.clone(),
                publisher: self.publisher.clone(),
                contact: self.contact.clone(),
                description: self.description.clone(),
                use_context: self.use_context.clone(),
                jurisdiction: self.jurisdiction.clone(),
                purpose: self.purpose.clone(),
                copyright: self.copyright.clone(),
                copyright_label: self.copyright_label.clone(),
                category: self.category.clone(),
                scope: self.scope.clone(),
                test_tools: self.test_tools.clone(),
                dependency: self.dependency.clone(),
                exit_criteria: self.exit_criteria.clone(),
                test_case: self.test_case.clone(),
                hash: HashCache::default(),
            };
            if validate {
                plan.validate()?;
            }
            Ok(plan)
        })
    }
}

/// Generates the two dependency backbones, which share a shape but not a path.
macro_rules! dependency_backbone {
    ($name:ident, $builder:ident, $path:literal, $info:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            base: BackboneBase,
            description: Option<Markdown>,
            predecessor: Option<Reference>,
            hash: HashCache,
        }

        impl $name {
            pub fn builder() -> $builder {
                $builder::default()
            }

            pub fn to_builder(&self) -> $builder {
                $builder {
                    base: self.base.clone(),
                    description: self.description.clone(),
                    predecessor: self.predecessor.clone(),
                    skip_validation: false,
                }
            }

            /// Description of the dependency criterium
            pub fn description(&self) -> Option<&Markdown> {
                self.description.as_ref()
            }

            /// Link to predecessor test plans
            pub fn predecessor(&self) -> Option<&Reference> {
                self.predecessor.as_ref()
            }

            fn validate(&self) -> Result<()> {
                validation::require_value_or_children(self)
            }
        }

        backbone_element!($name, $builder);

        impl Visitable for $name {
            fn type_name(&self) -> &'static str {
                $path
            }

            fn type_info(&self) -> &'static TypeInfo {
                &$info
            }

            fn has_children(&self) -> bool {
                self.base.has_children()
                    || self.description.is_some()
                    || self.predecessor.is_some()
            }

            fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
                visitor::visit_node(visitor, name, index, self, |v| {
                    self.base.accept_children(v);
                    visitor::accept(v, "description", self.description.as_ref());
                    visitor::accept(v, "predecessor", self.predecessor.as_ref());
                });
            }

            fn as_any(&self) -> &dyn Any {
                self
            }
        }

        #[derive(Debug, Clone, Default)]
        pub struct $builder {
            base: BackboneBase,
            description: Option<Markdown>,
            predecessor: Option<Reference>,
            skip_validation: bool,
        }

        impl $builder {
            pub fn description(mut self, description: impl Into<Markdown>) -> Self {
                self.description = Some(description.into());
                self
            }

            pub fn predecessor(mut self, predecessor: Reference) -> Self {
                self.predecessor = Some(predecessor);
                self
            }

            pub fn validating(mut self, validating: bool) -> Self {
                self.skip_validation = !validating;
                self
            }

            pub fn build(&self) -> Result<$name> {
                let validate = !self.skip_validation;
                finish($path, validate, || {
                    let dependency = $name {
                        base: self.base.clone(),
                        description: self.description.clone(),
                        predecessor: self.predecessor.clone(),
                        hash: HashCache::default(),
                    };
                    if validate {
                        dependency.validate()?;
                    }
                    Ok(dependency)
                })
            }
        }
    };
}

dependency_backbone!(
    TestPlanDependency,
    TestPlanDependencyBuilder,
    "TestPlan.Dependency",
    DEPENDENCY_INFO
);

dependency_backbone!(
    TestPlanTestCaseDependency,
    TestPlanTestCaseDependencyBuilder,
    "TestPlan.TestCase.Dependency",
    TEST_CASE_DEPENDENCY_INFO
);

/// An individual test case
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestPlanTestCase {
    base: BackboneBase,
    sequence: Option<Integer>,
    scope: Vec<Reference>,
    dependency: Vec<TestPlanTestCaseDependency>,
    test_run: Vec<TestPlanTestCaseTestRun>,
    test_data: Vec<TestPlanTestCaseTestData>,
    assertion: Vec<TestPlanTestCaseAssertion>,
    hash: HashCache,
}

impl TestPlanTestCase {
    pub fn builder() -> TestPlanTestCaseBuilder {
        TestPlanTestCaseBuilder::default()
    }

    pub fn to_builder(&self) -> TestPlanTestCaseBuilder {
        TestPlanTestCaseBuilder {
            base: self.base.clone(),
            sequence: self.sequence.clone(),
            scope: self.scope.clone(),
            dependency: self.dependency.clone(),
            test_run: self.test_run.clone(),
            test_data: self.test_data.clone(),
            assertion: self.assertion.clone(),
            skip_validation: false,
        }
    }

    /// Sequence of test case in the test plan
    pub fn sequence(&self) -> Option<&Integer> {
        self.sequence.as_ref()
    }

    pub fn scope(&self) -> &[Reference] {
        &self.scope
    }

    pub fn dependency(&self) -> &[TestPlanTestCaseDependency] {
        &self.dependency
    }

    pub fn test_run(&self) -> &[TestPlanTestCaseTestRun] {
        &self.test_run
    }

    pub fn test_data(&self) -> &[TestPlanTestCaseTestData] {
        &self.test_data
    }

    pub fn assertion(&self) -> &[TestPlanTestCaseAssertion] {
        &self.assertion
    }

    fn validate(&self) -> Result<()> {
        validation::require_value_or_children(self)
    }
}

backbone_element!(TestPlanTestCase, TestPlanTestCaseBuilder);

impl Visitable for TestPlanTestCase {
    fn type_name(&self) -> &'static str {
        "TestPlan.TestCase"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &TEST_CASE_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children()
            || self.sequence.is_some()
            || !self.scope.is_empty()
            || !self.dependency.is_empty()
            || !self.test_run.is_empty()
            || !self.test_data.is_empty()
            || !self.assertion.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "sequence", self.sequence.as_ref());
            visitor::accept_list(v, "scope", &self.scope);
            visitor::accept_list(v, "dependency", &self.dependency);
            visitor::accept_list(v, "testRun", &self.test_run);
            visitor::accept_list(v, "testData", &self.test_data);
            visitor::accept_list(v, "assertion", &self.assertion);
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct TestPlanTestCaseBuilder {
    base: BackboneBase,
    sequence: Option<Integer>,
    scope: Vec<Reference>,
    dependency: Vec<TestPlanTestCaseDependency>,
    test_run: Vec<TestPlanTestCaseTestRun>,
    test_data: Vec<TestPlanTestCaseTestData>,
    assertion: Vec<TestPlanTestCaseAssertion>,
    skip_validation: bool,
}

impl TestPlanTestCaseBuilder {
    pub fn sequence(mut self, sequence: impl Into<Integer>) -> Self {
        self.sequence = Some(sequence.into());
        self
    }

    pub fn scope(mut self, scope: Reference) -> Self {
        self.scope.push(scope);
        self
    }

    pub fn set_scope(mut self, scope: impl IntoIterator<Item = Reference>) -> Self {
        self.scope = scope.into_iter().collect();
        self
    }

    pub fn dependency(mut self, dependency: TestPlanTestCaseDependency) -> Self {
        self.dependency.push(dependency);
        self
    }

    pub fn set_dependency(
        mut self,
        dependency: impl IntoIterator<Item = TestPlanTestCaseDependency>,
    ) -> Self {
        self.dependency = dependency.into_iter().collect();
        self
    }

    pub fn test_run(mut self, test_run: TestPlanTestCaseTestRun) -> Self {
        self.test_run.push(test_run);
        self
    }

    pub fn set_test_run(
        mut self,
        test_run: impl IntoIterator<Item = TestPlanTestCaseTestRun>,
    ) -> Self {
        self.test_run = test_run.into_iter().collect();
        self
    }

    pub fn test_data(mut self, test_data: TestPlanTestCaseTestData) -> Self {
        self.test_data.push(test_data);
        self
    }

    pub fn set_test_data(
        mut self,
        test_data: impl IntoIterator<Item = TestPlanTestCaseTestData>,
    ) -> Self {
        self.test_data = test_data.into_iter().collect();
        self
    }

    pub fn assertion(mut self, assertion: TestPlanTestCaseAssertion) -> Self {
        self.assertion.push(assertion);
        self
    }

    pub fn set_assertion(
        mut self,
        assertion: impl IntoIterator<Item = TestPlanTestCaseAssertion>,
    ) -> Self {
        self.assertion = assertion.into_iter().collect();
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<TestPlanTestCase> {
        let validate = !self.skip_validation;
        finish("TestPlan.TestCase", validate, || {
            let test_case = TestPlanTestCase {
                base: self.base.clone(),
                sequence: self.sequence.clone(),
                scope: self.scope.clone(),
                dependency: self.dependency.clone(),
                test_run: self.test_run.clone(),
                test_data: self.test_data.clone(),
                assertion: self.assertion.clone(),
                hash: HashCache::default(),
            };
            if validate {
                test_case.validate()?;
            }
            Ok(test_case)
        })
    }
}

/// The actual test to be executed
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestPlanTestCaseTestRun {
    base: BackboneBase,
    narrative: Option<Markdown>,
    script: Option<TestPlanTestCaseTestRunScript>,
    hash: HashCache,
}

impl TestPlanTestCaseTestRun {
    pub fn builder() -> TestPlanTestCaseTestRunBuilder {
        TestPlanTestCaseTestRunBuilder::default()
    }

    pub fn to_builder(&self) -> TestPlanTestCaseTestRunBuilder {
        TestPlanTestCaseTestRunBuilder {
            base: self.base.clone(),
            narrative: self.narrative.clone(),
            script: self.script.clone(),
            skip_validation: false,
        }
    }

    /// The narrative description of the tests
    pub fn narrative(&self) -> Option<&Markdown> {
        self.narrative.as_ref()
    }

    pub fn script(&self) -> Option<&TestPlanTestCaseTestRunScript> {
        self.script.as_ref()
    }

    fn validate(&self) -> Result<()> {
        validation::require_value_or_children(self)
    }
}

backbone_element!(TestPlanTestCaseTestRun, TestPlanTestCaseTestRunBuilder);

impl Visitable for TestPlanTestCaseTestRun {
    fn type_name(&self) -> &'static str {
        "TestPlan.TestCase.TestRun"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &TEST_RUN_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children() || self.narrative.is_some() || self.script.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "narrative", self.narrative.as_ref());
            visitor::accept(v, "script", self.script.as_ref());
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct TestPlanTestCaseTestRunBuilder {
    base: BackboneBase,
    narrative: Option<Markdown>,
    script: Option<TestPlanTestCaseTestRunScript>,
    skip_validation: bool,
}

impl TestPlanTestCaseTestRunBuilder {
    pub fn narrative(mut self, narrative: impl Into<Markdown>) -> Self {
        self.narrative = Some(narrative.into());
        self
    }

    pub fn script(mut self, script: TestPlanTestCaseTestRunScript) -> Self {
        self.script = Some(script);
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<TestPlanTestCaseTestRun> {
        let validate = !self.skip_validation;
        finish("TestPlan.TestCase.TestRun", validate, || {
            let test_run = TestPlanTestCaseTestRun {
                base: self.base.clone(),
                narrative: self.narrative.clone(),
                script: self.script.clone(),
                hash: HashCache::default(),
            };
            if validate {
                test_run.validate()?;
            }
            Ok(test_run)
        })
    }
}

/// The test cases in a structured language e.g. gherkin, Postman, or FHIR TestScript
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestPlanTestCaseTestRunScript {
    base: BackboneBase,
    language: Option<CodeableConcept>,
    source: Option<TestPlanSource>,
    hash: HashCache,
}

impl TestPlanTestCaseTestRunScript {
    pub fn builder() -> TestPlanTestCaseTestRunScriptBuilder {
        TestPlanTestCaseTestRunScriptBuilder::default()
    }

    pub fn to_builder(&self) -> TestPlanTestCaseTestRunScriptBuilder {
        TestPlanTestCaseTestRunScriptBuilder {
            base: self.base.clone(),
            language: self.language.clone(),
            source: self.source.clone(),
            skip_validation: false,
        }
    }

    pub fn language(&self) -> Option<&CodeableConcept> {
        self.language.as_ref()
    }

    /// The actual content of the tests or a reference to the tests
    pub fn source(&self) -> Option<&TestPlanSource> {
        self.source.as_ref()
    }

    fn validate(&self) -> Result<()> {
        validation::choice_element(self.source.as_ref(), "source", SOURCE_TYPES)?;
        validation::require_value_or_children(self)
    }
}

backbone_element!(TestPlanTestCaseTestRunScript, TestPlanTestCaseTestRunScriptBuilder);

impl Visitable for TestPlanTestCaseTestRunScript {
    fn type_name(&self) -> &'static str {
        "TestPlan.TestCase.TestRun.Script"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &SCRIPT_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children() || self.language.is_some() || self.source.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "language", self.language.as_ref());
            visitor::accept(v, "source", self.source.as_ref());
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct TestPlanTestCaseTestRunScriptBuilder {
    base: BackboneBase,
    language: Option<CodeableConcept>,
    source: Option<TestPlanSource>,
    skip_validation: bool,
}

impl TestPlanTestCaseTestRunScriptBuilder {
    pub fn language(mut self, language: impl Into<CodeableConcept>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// `FhirString` or `Reference`
    pub fn source(mut self, source: impl Into<TestPlanSource>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<TestPlanTestCaseTestRunScript> {
        let validate = !self.skip_validation;
        finish("TestPlan.TestCase.TestRun.Script", validate, || {
            let script = TestPlanTestCaseTestRunScript {
                base: self.base.clone(),
                language: self.language.clone(),
                source: self.source.clone(),
                hash: HashCache::default(),
            };
            if validate {
                script.validate()?;
            }
            Ok(script)
        })
    }
}

/// The test data used in the test case
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestPlanTestCaseTestData {
    base: BackboneBase,
    r#type: Coding,
    content: Option<Reference>,
    source: Option<TestPlanSource>,
    hash: HashCache,
}

impl TestPlanTestCaseTestData {
    pub fn builder() -> TestPlanTestCaseTestDataBuilder {
        TestPlanTestCaseTestDataBuilder::default()
    }

    pub fn to_builder(&self) -> TestPlanTestCaseTestDataBuilder {
        TestPlanTestCaseTestDataBuilder {
            base: self.base.clone(),
            r#type: Some(self.r#type.clone()),
            content: self.content.clone(),
            source: self.source.clone(),
            skip_validation: false,
        }
    }

    pub fn r#type(&self) -> &Coding {
        &self.r#type
    }

    /// The actual test resources when they exist
    pub fn content(&self) -> Option<&Reference> {
        self.content.as_ref()
    }

    /// Pointer to a definition of test resources, narrative or a reference
    pub fn source(&self) -> Option<&TestPlanSource> {
        self.source.as_ref()
    }

    fn validate(&self) -> Result<()> {
        validation::choice_element(self.source.as_ref(), "source", SOURCE_TYPES)?;
        validation::require_value_or_children(self)
    }
}

backbone_element!(TestPlanTestCaseTestData, TestPlanTestCaseTestDataBuilder);

impl Visitable for TestPlanTestCaseTestData {
    fn type_name(&self) -> &'static str {
        "TestPlan.TestCase.TestData"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &TEST_DATA_INFO
    }

    fn has_children(&self) -> bool {
        true
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            self.r#type.accept("type", None, v);
            visitor::accept(v, "content", self.content.as_ref());
            visitor::accept(v, "source", self.source.as_ref());
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct TestPlanTestCaseTestDataBuilder {
    base: BackboneBase,
    r#type: Option<Coding>,
    content: Option<Reference>,
    source: Option<TestPlanSource>,
    skip_validation: bool,
}

impl TestPlanTestCaseTestDataBuilder {
    pub fn r#type(mut self, r#type: Coding) -> Self {
        self.r#type = Some(r#type);
        self
    }

    pub fn content(mut self, content: Reference) -> Self {
        self.content = Some(content);
        self
    }

    /// `FhirString` or `Reference`
    pub fn source(mut self, source: impl Into<TestPlanSource>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<TestPlanTestCaseTestData> {
        let validate = !self.skip_validation;
        finish("TestPlan.TestCase.TestData", validate, || {
            let test_data = TestPlanTestCaseTestData {
                base: self.base.clone(),
                r#type: validation::require_non_null(self.r#type.clone(), "type")?,
                content: self.content.clone(),
                source: self.source.clone(),
                hash: HashCache::default(),
            };
            if validate {
                test_data.validate()?;
            }
            Ok(test_data)
        })
    }
}

/// Test assertions or expectations
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestPlanTestCaseAssertion {
    base: BackboneBase,
    r#type: Vec<CodeableConcept>,
    object: Vec<CodeableReference>,
    result: Vec<CodeableReference>,
    hash: HashCache,
}

impl TestPlanTestCaseAssertion {
    pub fn builder() -> TestPlanTestCaseAssertionBuilder {
        TestPlanTestCaseAssertionBuilder::default()
    }

    pub fn to_builder(&self) -> TestPlanTestCaseAssertionBuilder {
        TestPlanTestCaseAssertionBuilder {
            base: self.base.clone(),
            r#type: self.r#type.clone(),
            object: self.object.clone(),
            result: self.result.clone(),
            skip_validation: false,
        }
    }

    /// Assertion type - for example 'informative' or 'required'
    pub fn r#type(&self) -> &[CodeableConcept] {
        &self.r#type
    }

    /// The focus or object of the assertion
    pub fn object(&self) -> &[CodeableReference] {
        &self.object
    }

    /// The actual result assertion
    pub fn result(&self) -> &[CodeableReference] {
        &self.result
    }

    fn validate(&self) -> Result<()> {
        validation::require_value_or_children(self)
    }
}

backbone_element!(TestPlanTestCaseAssertion, TestPlanTestCaseAssertionBuilder);

impl Visitable for TestPlanTestCaseAssertion {
    fn type_name(&self) -> &'static str {
        "TestPlan.TestCase.Assertion"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &ASSERTION_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children()
            || !self.r#type.is_empty()
            || !self.object.is_empty()
            || !self.result.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept_list(v, "type", &self.r#type);
            visitor::accept_list(v, "object", &self.object);
            visitor::accept_list(v, "result", &self.result);
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct TestPlanTestCaseAssertionBuilder {
    base: BackboneBase,
    r#type: Vec<CodeableConcept>,
    object: Vec<CodeableReference>,
    result: Vec<CodeableReference>,
    skip_validation: bool,
}

impl TestPlanTestCaseAssertionBuilder {
    pub fn r#type(mut self, r#type: impl Into<CodeableConcept>) -> Self {
        self.r#type.push(r#type.into());
        self
    }

    pub fn set_type(mut self, r#type: impl IntoIterator<Item = CodeableConcept>) -> Self {
        self.r#type = r#type.into_iter().collect();
        self
    }

    pub fn object(mut self, object: CodeableReference) -> Self {
        self.object.push(object);
        self
    }

    pub fn set_object(mut self, object: impl IntoIterator<Item = CodeableReference>) -> Self {
        self.object = object.into_iter().collect();
        self
    }

    pub fn result(mut self, result: CodeableReference) -> Self {
        self.result.push(result);
        self
    }

    pub fn set_result(mut self, result: impl IntoIterator<Item = CodeableReference>) -> Self {
        self.result = result.into_iter().collect();
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<TestPlanTestCaseAssertion> {
        let validate = !self.skip_validation;
        finish("TestPlan.TestCase.Assertion", validate, || {
            let assertion = TestPlanTestCaseAssertion {
                base: self.base.clone(),
                r#type: self.r#type.clone(),
                object: self.object.clone(),
                result: self.result.clone(),
                hash: HashCache::default(),
            };
            if validate {
                assertion.validate()?;
            }
            Ok(assertion)
        })
    }
}

const DEPENDENCY_FIELDS: &[FieldInfo] = &[
    FieldInfo::new("description", &["markdown"]),
    FieldInfo::new("predecessor", &["Reference"]),
];

pub static TEST_PLAN_INFO: TypeInfo = TypeInfo {
    name: "TestPlan",
    kind: TypeKind::Resource,
    base: Some("DomainResource"),
    url: Some("http://hl7.org/fhir/StructureDefinition/TestPlan"),
    fields: &[
        FieldInfo::new("url", &["uri"]).summary(),
        FieldInfo::new("identifier", &["Identifier"]).list().summary(),
        FieldInfo::new("version", &["string"]).summary(),
        FieldInfo::new("versionAlgorithm", VERSION_ALGORITHM_TYPES)
            .summary()
            .binding(
                "VersionAlgorithm",
                BindingStrength::Extensible,
                "http://hl7.org/fhir/ValueSet/version-algorithm",
            ),
        FieldInfo::new("name", &["string"]).summary(),
        FieldInfo::new("title", &["string"]),
        FieldInfo::new("status", &["code"]).required().summary().modifier().binding(
            "PublicationStatus",
            BindingStrength::Required,
            "http://hl7.org/fhir/ValueSet/publication-status|5.0.0",
        ),
        FieldInfo::new("experimental", &["boolean"]).summary(),
        FieldInfo::new("date", &["dateTime"]).summary(),
        FieldInfo::new("publisher", &["string"]).summary(),
        FieldInfo::new("contact", &["ContactDetail"]).list().summary(),
        FieldInfo::new("description", &["markdown"]),
        FieldInfo::new("useContext", &["UsageContext"]).list().summary(),
        FieldInfo::new("jurisdiction", &["CodeableConcept"])
            .list()
            .summary()
            .binding(
                "Jurisdiction",
                BindingStrength::Extensible,
                "http://hl7.org/fhir/ValueSet/jurisdiction",
            ),
        FieldInfo::new("purpose", &["markdown"]),
        FieldInfo::new("copyright", &["markdown"]),
        FieldInfo::new("copyrightLabel", &["string"]),
        FieldInfo::new("category", &["CodeableConcept"]).list().binding(
            "TestPlanCategory",
            BindingStrength::Example,
            "http://hl7.org/fhir/ValueSet/testscript-scope-phase-codes",
        ),
        FieldInfo::new("scope", &["Reference"]).list(),
        FieldInfo::new("testTools", &["markdown"]),
        FieldInfo::new("dependency", &["TestPlan.Dependency"]).list(),
        FieldInfo::new("exitCriteria", &["markdown"]),
        FieldInfo::new("testCase", &["TestPlan.TestCase"]).list(),
    ],
    constraints: &[
        ConstraintInfo {
            id: "cnl-0",
            level: ConstraintLevel::Warning,
            location: "(base)",
            description: "Name should be usable as an identifier for the module by machine processing applications such as code generation",
            expression: "name.exists() implies name.matches('^[A-Z]([A-Za-z0-9_]){1,254}$')",
        },
        ConstraintInfo {
            id: "cnl-1",
            level: ConstraintLevel::Warning,
            location: "TestPlan.url",
            description: "URL should not contain | or # - these characters make processing canonical references problematic",
            expression: "exists() implies matches('^[^|# ]+$')",
        },
        ConstraintInfo {
            id: "testPlan-2",
            level: ConstraintLevel::Warning,
            location: "(base)",
            description: "SHALL, if possible, contain a code from value set http://hl7.org/fhir/ValueSet/version-algorithm",
            expression: "versionAlgorithm.as(String).exists() implies (versionAlgorithm.as(String).memberOf('http://hl7.org/fhir/ValueSet/version-algorithm', 'extensible'))",
        },
        ConstraintInfo {
            id: "testPlan-3",
            level: ConstraintLevel::Warning,
            location: "(base)",
            description: "SHALL, if possible, contain a code from value set http://hl7.org/fhir/ValueSet/jurisdiction",
            expression: "jurisdiction.exists() implies (jurisdiction.all(memberOf('http://hl7.org/fhir/ValueSet/jurisdiction', 'extensible')))",
        },
    ],
};

pub static DEPENDENCY_INFO: TypeInfo = TypeInfo {
    name: "TestPlan.Dependency",
    kind: TypeKind::BackboneElement,
    base: Some("BackboneElement"),
    url: None,
    fields: DEPENDENCY_FIELDS,
    constraints: &[],
};

pub static TEST_CASE_INFO: TypeInfo = TypeInfo {
    name: "TestPlan.TestCase",
    kind: TypeKind::BackboneElement,
    base: Some("BackboneElement"),
    url: None,
    fields: &[
        FieldInfo::new("sequence", &["integer"]),
        FieldInfo::new("scope", &["Reference"]).list(),
        FieldInfo::new("dependency", &["TestPlan.TestCase.Dependency"]).list(),
        FieldInfo::new("testRun", &["TestPlan.TestCase.TestRun"]).list(),
        FieldInfo::new("testData", &["TestPlan.TestCase.TestData"]).list(),
        FieldInfo::new("assertion", &["TestPlan.TestCase.Assertion"]).list(),
    ],
    constraints: &[],
};

pub static TEST_CASE_DEPENDENCY_INFO: TypeInfo = TypeInfo {
    name: "TestPlan.TestCase.Dependency",
    kind: TypeKind::BackboneElement,
    base: Some("BackboneElement"),
    url: None,
    fields: DEPENDENCY_FIELDS,
    constraints: &[],
};

pub static TEST_RUN_INFO: TypeInfo = TypeInfo {
    name: "TestPlan.TestCase.TestRun",
    kind: TypeKind::BackboneElement,
    base: Some("BackboneElement"),
    url: None,
    fields: &[
        FieldInfo::new("narrative", &["markdown"]),
        FieldInfo::new("script", &["TestPlan.TestCase.TestRun.Script"]),
    ],
    constraints: &[],
};

pub static SCRIPT_INFO: TypeInfo = TypeInfo {
    name: "TestPlan.TestCase.TestRun.Script",
    kind: TypeKind::BackboneElement,
    base: Some("BackboneElement"),
    url: None,
    fields: &[
        FieldInfo::new("language", &["CodeableConcept"]),
        FieldInfo::new("source", SOURCE_TYPES),
    ],
    constraints: &[],
};

pub static TEST_DATA_INFO: TypeInfo = TypeInfo {
    name: "TestPlan.TestCase.TestData",
    kind: TypeKind::BackboneElement,
    base: Some("BackboneElement"),
    url: None,
    fields: &[
        FieldInfo::new("type", &["Coding"]).required(),
        FieldInfo::new("content", &["Reference"]),
        FieldInfo::new("source", SOURCE_TYPES),
    ],
    constraints: &[],
};

pub static ASSERTION_INFO: TypeInfo = TypeInfo {
    name: "TestPlan.TestCase.Assertion",
    kind: TypeKind::BackboneElement,
    base: Some("BackboneElement"),
    url: None,
    fields: &[
        FieldInfo::new("type", &["CodeableConcept"]).list(),
        FieldInfo::new("object", &["CodeableReference"]).list(),
        FieldInfo::new("result", &["CodeableReference"]).list(),
    ],
    constraints: &[],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_status_is_required() {
        let err = TestPlan::builder().name("Plan").build().unwrap_err();
        assert_eq!(err.element(), Some("status"));
    }

    #[test]
    fn test_empty_backbones_are_rejected() {
        let err = TestPlanTestCase::builder().build().unwrap_err();
        assert!(
            matches!(err, Error::VacuousElement { ref type_name } if type_name == "TestPlan.TestCase")
        );
        assert!(TestPlanDependency::builder().build().is_err());
        assert!(TestPlanTestCaseAssertion::builder().build().is_err());
    }

    #[test]
    fn test_dependency_paths_differ() {
        let outer = TestPlanDependency::builder()
            .description("Run after setup")
            .build()
            .unwrap();
        let inner = TestPlanTestCaseDependency::builder()
            .description("Run after setup")
            .build()
            .unwrap();
        assert_eq!(outer.type_name(), "TestPlan.Dependency");
        assert_eq!(inner.type_name(), "TestPlan.TestCase.Dependency");
    }

    #[test]
    fn test_script_source_choice() {
        let script = TestPlanTestCaseTestRunScript::builder()
            .source(FhirString::from("Feature: login"))
            .build()
            .unwrap();
        assert_eq!(script.source().map(|s| s.type_name()), Some("string"));
    }

    #[test]
    fn test_test_data_requires_type() {
        let err = TestPlanTestCaseTestData::builder()
            .source(FhirString::from("fixtures/patient.json"))
            .build()
            .unwrap_err();
        assert_eq!(err.element(), Some("type"));
    }
}
