//! Static model metadata
//!
//! Every model type publishes a [`TypeInfo`] describing its fields the way the
//! R5 StructureDefinitions do: cardinality, allowed choice types, reference
//! targets, terminology bindings, summary/modifier flags and the invariants
//! declared on the type. The metadata is informational for the model layer
//! itself (validation is written out per type) and drives name handling in the
//! JSON generator.

use phf::phf_set;

use crate::resource::{audit_event, evidence_variable, test_plan, DOMAIN_RESOURCE_INFO, RESOURCE_INFO};
use crate::types::{
    annotation, attachment, codeable_concept, coding, contact, element, expression, identifier,
    meta, money, period, primitives, quantity, reference, related_artifact,
};

/// Kind of model type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    PrimitiveType,
    ComplexType,
    BackboneElement,
    Resource,
}

/// How strictly a coded element is bound to its value set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingStrength {
    Required,
    Extensible,
    Preferred,
    Example,
}

impl BindingStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            BindingStrength::Required => "required",
            BindingStrength::Extensible => "extensible",
            BindingStrength::Preferred => "preferred",
            BindingStrength::Example => "example",
        }
    }
}

/// Terminology binding of a coded element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingInfo {
    pub name: &'static str,
    pub strength: BindingStrength,
    pub value_set: &'static str,
}

/// Severity of a declared invariant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintLevel {
    Rule,
    Warning,
}

/// A FHIRPath invariant declared on a type. Not evaluated by the model layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintInfo {
    pub id: &'static str,
    pub level: ConstraintLevel,
    pub location: &'static str,
    pub description: &'static str,
    pub expression: &'static str,
}

/// Metadata of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    /// Element name as it appears on the wire (e.g. `basedOn`, `value` for `value[x]`)
    pub name: &'static str,
    /// Allowed type codes; more than one means the field is a choice
    pub types: &'static [&'static str],
    pub min: u32,
    /// Maximum cardinality, `None` for `*`
    pub max: Option<u32>,
    pub summary: bool,
    pub modifier: bool,
    /// Allowed target resource types for `Reference` typed fields
    pub reference_targets: &'static [&'static str],
    pub binding: Option<BindingInfo>,
}

impl FieldInfo {
    pub const fn new(name: &'static str, types: &'static [&'static str]) -> Self {
        Self {
            name,
            types,
            min: 0,
            max: Some(1),
            summary: false,
            modifier: false,
            reference_targets: &[],
            binding: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.min = 1;
        self
    }

    pub const fn list(mut self) -> Self {
        self.max = None;
        self
    }

    pub const fn summary(mut self) -> Self {
        self.summary = true;
        self
    }

    pub const fn modifier(mut self) -> Self {
        self.modifier = true;
        self
    }

    pub const fn targets(mut self, targets: &'static [&'static str]) -> Self {
        self.reference_targets = targets;
        self
    }

    pub const fn binding(
        mut self,
        name: &'static str,
        strength: BindingStrength,
        value_set: &'static str,
    ) -> Self {
        self.binding = Some(BindingInfo {
            name,
            strength,
            value_set,
        });
        self
    }

    pub fn is_choice(&self) -> bool {
        self.types.len() > 1
    }

    pub fn is_required(&self) -> bool {
        self.min > 0
    }

    pub fn is_list(&self) -> bool {
        self.max.map(|m| m > 1).unwrap_or(true)
    }

    /// Cardinality in StructureDefinition notation (e.g. `1..*`)
    pub fn cardinality(&self) -> String {
        match self.max {
            Some(max) => format!("{}..{}", self.min, max),
            None => format!("{}..*", self.min),
        }
    }
}

/// Metadata of a model type
#[derive(Debug)]
pub struct TypeInfo {
    /// FHIR type name; backbone elements use their dotted path (`AuditEvent.Agent`)
    pub name: &'static str,
    pub kind: TypeKind,
    pub base: Option<&'static str>,
    pub url: Option<&'static str>,
    /// Own fields in schema declaration order
    pub fields: &'static [FieldInfo],
    pub constraints: &'static [ConstraintInfo],
}

impl TypeInfo {
    /// Look up a field on this type or any of its base types.
    pub fn field(&self, name: &str) -> Option<&'static FieldInfo> {
        let mut current = type_info(self.name);
        while let Some(info) = current {
            if let Some(field) = info.fields.iter().find(|f| f.name == name) {
                return Some(field);
            }
            current = info.base.and_then(type_info);
        }
        None
    }

    /// All fields including inherited ones, base first.
    pub fn all_fields(&self) -> Vec<&'static FieldInfo> {
        let mut chain = Vec::new();
        let mut current = type_info(self.name);
        while let Some(info) = current {
            chain.push(info);
            current = info.base.and_then(type_info);
        }
        chain
            .into_iter()
            .rev()
            .flat_map(|info| info.fields.iter())
            .collect()
    }

    pub fn is_primitive(&self) -> bool {
        self.kind == TypeKind::PrimitiveType
    }

    pub fn is_resource(&self) -> bool {
        self.kind == TypeKind::Resource
    }
}

/// Look up the metadata of an implemented model type by FHIR name.
pub fn type_info(name: &str) -> Option<&'static TypeInfo> {
    let info: &'static TypeInfo = match name {
        "Element" => &element::ELEMENT_INFO,
        "BackboneElement" => &element::BACKBONE_ELEMENT_INFO,
        "Resource" => &RESOURCE_INFO,
        "DomainResource" => &DOMAIN_RESOURCE_INFO,
        "Extension" => &element::EXTENSION_INFO,

        "string" => &primitives::STRING_INFO,
        "boolean" => &primitives::BOOLEAN_INFO,
        "integer" => &primitives::INTEGER_INFO,
        "integer64" => &primitives::INTEGER64_INFO,
        "positiveInt" => &primitives::POSITIVE_INT_INFO,
        "unsignedInt" => &primitives::UNSIGNED_INT_INFO,
        "decimal" => &primitives::DECIMAL_INFO,
        "uri" => &primitives::URI_INFO,
        "url" => &primitives::URL_INFO,
        "canonical" => &primitives::CANONICAL_INFO,
        "code" => &primitives::CODE_INFO,
        "id" => &primitives::ID_INFO,
        "markdown" => &primitives::MARKDOWN_INFO,
        "dateTime" => &primitives::DATE_TIME_INFO,
        "date" => &primitives::DATE_INFO,
        "instant" => &primitives::INSTANT_INFO,
        "time" => &primitives::TIME_INFO,
        "base64Binary" => &primitives::BASE64_BINARY_INFO,
        "xhtml" => &primitives::XHTML_INFO,

        "Coding" => &coding::TYPE_INFO,
        "CodeableConcept" => &codeable_concept::CODEABLE_CONCEPT_INFO,
        "CodeableReference" => &codeable_concept::CODEABLE_REFERENCE_INFO,
        "Reference" => &reference::TYPE_INFO,
        "Identifier" => &identifier::TYPE_INFO,
        "Period" => &period::TYPE_INFO,
        "Quantity" => &quantity::QUANTITY_INFO,
        "Range" => &quantity::RANGE_INFO,
        "Ratio" => &quantity::RATIO_INFO,
        "Money" => &money::MONEY_INFO,
        "Meta" => &meta::META_INFO,
        "Narrative" => &meta::NARRATIVE_INFO,
        "ContactPoint" => &contact::CONTACT_POINT_INFO,
        "ContactDetail" => &contact::CONTACT_DETAIL_INFO,
        "UsageContext" => &contact::USAGE_CONTEXT_INFO,
        "Annotation" => &annotation::TYPE_INFO,
        "Expression" => &expression::TYPE_INFO,
        "Attachment" => &attachment::TYPE_INFO,
        "RelatedArtifact" => &related_artifact::TYPE_INFO,

        "AuditEvent" => &audit_event::AUDIT_EVENT_INFO,
        "AuditEvent.Outcome" => &audit_event::OUTCOME_INFO,
        "AuditEvent.Agent" => &audit_event::AGENT_INFO,
        "AuditEvent.Source" => &audit_event::SOURCE_INFO,
        "AuditEvent.Entity" => &audit_event::ENTITY_INFO,
        "AuditEvent.Entity.Detail" => &audit_event::ENTITY_DETAIL_INFO,

        "TestPlan" => &test_plan::TEST_PLAN_INFO,
        "TestPlan.Dependency" => &test_plan::DEPENDENCY_INFO,
        "TestPlan.TestCase" => &test_plan::TEST_CASE_INFO,
        "TestPlan.TestCase.Dependency" => &test_plan::TEST_CASE_DEPENDENCY_INFO,
        "TestPlan.TestCase.TestRun" => &test_plan::TEST_RUN_INFO,
        "TestPlan.TestCase.TestRun.Script" => &test_plan::SCRIPT_INFO,
        "TestPlan.TestCase.TestData" => &test_plan::TEST_DATA_INFO,
        "TestPlan.TestCase.Assertion" => &test_plan::ASSERTION_INFO,

        "EvidenceVariable" => &evidence_variable::EVIDENCE_VARIABLE_INFO,
        "EvidenceVariable.Characteristic" => &evidence_variable::CHARACTERISTIC_INFO,
        "EvidenceVariable.Characteristic.DefinitionByTypeAndValue" => {
            &evidence_variable::DEFINITION_BY_TYPE_AND_VALUE_INFO
        }
        "EvidenceVariable.Characteristic.DefinitionByCombination" => {
            &evidence_variable::DEFINITION_BY_COMBINATION_INFO
        }
        "EvidenceVariable.Characteristic.TimeFromEvent" => {
            &evidence_variable::TIME_FROM_EVENT_INFO
        }
        "EvidenceVariable.Category" => &evidence_variable::CATEGORY_INFO,

        _ => return None,
    };
    Some(info)
}

/// Primitive type codes start with a lower-case letter.
pub fn is_primitive_type(type_name: &str) -> bool {
    type_name
        .chars()
        .next()
        .map(|c| c.is_ascii_lowercase())
        .unwrap_or(false)
}

/// Wire name of a choice element for a concrete type:
/// `("occurred", "dateTime")` → `"occurredDateTime"`.
pub fn choice_element_name(element_name: &str, type_name: &str) -> String {
    let mut chars = type_name.chars();
    match chars.next() {
        Some(first) => format!("{}{}{}", element_name, first.to_ascii_uppercase(), chars.as_str()),
        None => element_name.to_string(),
    }
}

/// Whether `name` is an R5 resource type name.
pub fn is_resource_type(name: &str) -> bool {
    RESOURCE_TYPES.contains(name)
}

/// All resource type names defined by FHIR R5 (5.0.0).
pub static RESOURCE_TYPES: phf::Set<&'static str> = phf_set! {
    "Account", "ActivityDefinition", "ActorDefinition", "AdministrableProductDefinition",
    "AdverseEvent", "AllergyIntolerance", "Appointment", "AppointmentResponse",
    "ArtifactAssessment", "AuditEvent", "Basic", "Binary", "BiologicallyDerivedProduct",
    "BiologicallyDerivedProductDispense", "BodyStructure", "Bundle", "CapabilityStatement",
    "CarePlan", "CareTeam", "ChargeItem", "ChargeItemDefinition", "Citation", "Claim",
    "ClaimResponse", "ClinicalImpression", "ClinicalUseDefinition", "CodeSystem",
    "Communication", "CommunicationRequest", "CompartmentDefinition", "Composition",
    "ConceptMap", "Condition", "ConditionDefinition", "Consent", "Contract", "Coverage",
    "CoverageEligibilityRequest", "CoverageEligibilityResponse", "DetectedIssue", "Device",
    "DeviceAssociation", "DeviceDefinition", "DeviceDispense", "DeviceMetric", "DeviceRequest",
    "DeviceUsage", "DiagnosticReport", "DocumentReference", "Encounter", "EncounterHistory",
    "Endpoint", "EnrollmentRequest", "EnrollmentResponse", "EpisodeOfCare", "EventDefinition",
    "Evidence", "EvidenceReport", "EvidenceVariable", "ExampleScenario",
    "ExplanationOfBenefit", "FamilyMemberHistory", "Flag", "FormularyItem", "GenomicStudy",
    "Goal", "GraphDefinition", "Group", "GuidanceResponse", "HealthcareService",
    "ImagingSelection", "ImagingStudy", "Immunization", "ImmunizationEvaluation",
    "ImmunizationRecommendation", "ImplementationGuide", "Ingredient", "InsurancePlan",
    "InventoryItem", "InventoryReport", "Invoice", "Library", "Linkage", "List", "Location",
    "ManufacturedItemDefinition", "Measure", "MeasureReport", "Medication",
    "MedicationAdministration", "MedicationDispense", "MedicationKnowledge",
    "MedicationRequest", "MedicationStatement", "MedicinalProductDefinition",
    "MessageDefinition", "MessageHeader", "MolecularSequence", "NamingSystem",
    "NutritionIntake", "NutritionOrder", "NutritionProduct", "Observation",
    "ObservationDefinition", "OperationDefinition", "OperationOutcome", "Organization",
    "OrganizationAffiliation", "PackagedProductDefinition", "Parameters", "Patient",
    "PaymentNotice", "PaymentReconciliation", "Permission", "Person", "PlanDefinition",
    "Practitioner", "PractitionerRole", "Procedure", "Provenance", "Questionnaire",
    "QuestionnaireResponse", "RegulatedAuthorization", "RelatedPerson", "RequestOrchestration",
    "Requirements", "ResearchStudy", "ResearchSubject", "RiskAssessment", "Schedule",
    "SearchParameter", "ServiceRequest", "Slot", "Specimen", "SpecimenDefinition",
    "StructureDefinition", "StructureMap", "Subscription", "SubscriptionStatus",
    "SubscriptionTopic", "Substance", "SubstanceDefinition", "SubstanceNucleicAcid",
    "SubstancePolymer", "SubstanceProtein", "SubstanceReferenceInformation",
    "SubstanceSourceMaterial", "SupplyDelivery", "SupplyRequest", "Task",
    "TerminologyCapabilities", "TestPlan", "TestReport", "TestScript", "Transport",
    "ValueSet", "VerificationResult", "VisionPrescription",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_element_name() {
        assert_eq!(choice_element_name("occurred", "dateTime"), "occurredDateTime");
        assert_eq!(choice_element_name("occurred", "Period"), "occurredPeriod");
        assert_eq!(choice_element_name("value", "base64Binary"), "valueBase64Binary");
    }

    #[test]
    fn test_is_resource_type() {
        assert!(is_resource_type("Patient"));
        assert!(is_resource_type("TestPlan"));
        assert!(!is_resource_type("Period"));
        assert!(!is_resource_type("patient"));
    }

    #[test]
    fn test_is_primitive_type() {
        assert!(is_primitive_type("dateTime"));
        assert!(is_primitive_type("string"));
        assert!(!is_primitive_type("Reference"));
        assert!(!is_primitive_type(""));
    }

    #[test]
    fn test_field_lookup_walks_base_chain() {
        let info = type_info("AuditEvent").unwrap();
        assert!(info.field("agent").unwrap().is_required());
        // inherited from DomainResource and Resource
        assert!(info.field("contained").unwrap().is_list());
        assert_eq!(info.field("meta").unwrap().types, &["Meta"]);
        assert!(info.field("nonexistent").is_none());
    }

    #[test]
    fn test_backbone_field_metadata() {
        let agent = type_info("AuditEvent.Agent").unwrap();
        let who = agent.field("who").unwrap();
        assert!(who.is_required());
        assert!(who.summary);
        assert!(who.reference_targets.contains(&"Organization"));

        let network = agent.field("network").unwrap();
        assert!(network.is_choice());
        assert_eq!(network.types, &["Reference", "uri", "string"]);
        assert_eq!(network.reference_targets, &["Endpoint"]);
        assert!(agent.field("modifierExtension").is_some());
    }

    #[test]
    fn test_all_fields_order() {
        let period = type_info("Period").unwrap();
        let names: Vec<_> = period.all_fields().iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["id", "extension", "start", "end"]);
    }

    #[test]
    fn test_binding_metadata() {
        let info = type_info("AuditEvent").unwrap();
        let action = info.field("action").unwrap();
        let binding = action.binding.unwrap();
        assert_eq!(binding.strength, BindingStrength::Required);
        assert_eq!(
            binding.value_set,
            "http://hl7.org/fhir/ValueSet/audit-event-action|5.0.0"
        );
        assert_eq!(action.cardinality(), "0..1");
        assert_eq!(info.field("agent").unwrap().cardinality(), "1..*");
    }
}
