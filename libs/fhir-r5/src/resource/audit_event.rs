//! AuditEvent
//!
//! A record of an event relevant for purposes such as operations, privacy,
//! security, maintenance, and performance analysis.

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
    AuditEventAction, AuditEventSeverity, BackboneBase, Base64Binary, Boolean, CodeableConcept,
    Coded, Coding, DateTime, FhirString, Instant, Integer, Period, Quantity, Range, Ratio,
    Reference, Time, Uri,
};
use crate::validation;
use crate::visitor::{self, Visitable, Visitor};

const OCCURRED_TYPES: &[&str] = &["Period", "dateTime"];

const BASED_ON_TARGETS: &[&str] = &[
    "CarePlan",
    "DeviceRequest",
    "ImmunizationRecommendation",
    "MedicationRequest",
    "NutritionOrder",
    "ServiceRequest",
    "Task",
];

const PATIENT_TARGETS: &[&str] = &["Patient"];
const ENCOUNTER_TARGETS: &[&str] = &["Encounter"];
const LOCATION_TARGETS: &[&str] = &["Location"];
const ENDPOINT_TARGETS: &[&str] = &["Endpoint"];

/// Allowed targets of `agent.who` and `source.observer`
const ACTOR_TARGETS: &[&str] = &[
    "Practitioner",
    "PractitionerRole",
    "Organization",
    "CareTeam",
    "Patient",
    "Device",
    "RelatedPerson",
];

const NETWORK_TYPES: &[&str] = &["Reference", "uri", "string"];

const DETAIL_VALUE_TYPES: &[&str] = &[
    "Quantity",
    "CodeableConcept",
    "string",
    "boolean",
    "integer",
    "Range",
    "Ratio",
    "time",
    "dateTime",
    "Period",
    "base64Binary",
];

const PURPOSE_OF_USE: &str = "http://terminology.hl7.org/ValueSet/v3-PurposeOfUse";

choice_enum! {
    /// AuditEvent.occurred[x]
    pub enum AuditEventOccurred {
        Period(Period),
        DateTime(DateTime),
    }
}

choice_enum! {
    /// AuditEvent.agent.network[x]
    pub enum AuditEventAgentNetwork {
        Reference(Reference),
        Uri(Uri),
        String(FhirString),
    }
}

choice_enum! {
    /// AuditEvent.entity.detail.value[x]
    pub enum AuditEventEntityDetailValue {
        Quantity(Quantity),
        CodeableConcept(CodeableConcept),
        String(FhirString),
        Boolean(Boolean),
        Integer(Integer),
        Range(Range),
        Ratio(Ratio),
        Time(Time),
        DateTime(DateTime),
        Period(Period),
        Base64Binary(Base64Binary),
    }
}

/// Record of an event
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuditEvent {
    base: DomainResourceBase,
    category: Vec<CodeableConcept>,
    code: CodeableConcept,
    action: Option<Coded<AuditEventAction>>,
    severity: Option<Coded<AuditEventSeverity>>,
    occurred: Option<AuditEventOccurred>,
    recorded: Instant,
    outcome: Option<AuditEventOutcome>,
    authorization: Vec<CodeableConcept>,
    based_on: Vec<Reference>,
    patient: Option<Reference>,
    encounter: Option<Reference>,
    agent: Vec<AuditEventAgent>,
    source: AuditEventSource,
    entity: Vec<AuditEventEntity>,
    hash: HashCache,
}

impl AuditEvent {
    pub fn builder() -> AuditEventBuilder {
        AuditEventBuilder::default()
    }

    pub fn to_builder(&self) -> AuditEventBuilder {
        AuditEventBuilder {
            base: self.base.clone(),
            category: self.category.clone(),
            code: Some(self.code.clone()),
            action: self.action.clone(),
            severity: self.severity.clone(),
            occurred: self.occurred.clone(),
            recorded: Some(self.recorded.clone()),
            outcome: self.outcome.clone(),
            authorization: self.authorization.clone(),
            based_on: self.based_on.clone(),
            patient: self.patient.clone(),
            encounter: self.encounter.clone(),
            agent: self.agent.clone(),
            source: Some(self.source.clone()),
            entity: self.entity.clone(),
            skip_validation: false,
        }
    }

    /// Type/identifier of event
    pub fn category(&self) -> &[CodeableConcept] {
        &self.category
    }

    /// Specific type of event
    pub fn code(&self) -> &CodeableConcept {
        &self.code
    }

    /// Type of action performed during the event
    pub fn action(&self) -> Option<&Coded<AuditEventAction>> {
        self.action.as_ref()
    }

    pub fn severity(&self) -> Option<&Coded<AuditEventSeverity>> {
        self.severity.as_ref()
    }

    /// When the activity occurred
    pub fn occurred(&self) -> Option<&AuditEventOccurred> {
        self.occurred.as_ref()
    }

    /// Time when the event was recorded
    pub fn recorded(&self) -> &Instant {
        &self.recorded
    }

    pub fn outcome(&self) -> Option<&AuditEventOutcome> {
        self.outcome.as_ref()
    }

    /// Authorization related to the event
    pub fn authorization(&self) -> &[CodeableConcept] {
        &self.authorization
    }

    /// Workflow authorization within which this event occurred
    pub fn based_on(&self) -> &[Reference] {
        &self.based_on
    }

    pub fn patient(&self) -> Option<&Reference> {
        self.patient.as_ref()
    }

    pub fn encounter(&self) -> Option<&Reference> {
        self.encounter.as_ref()
    }

    /// Actor involved in the event
    pub fn agent(&self) -> &[AuditEventAgent] {
        &self.agent
    }

    /// Audit Event Reporter
    pub fn source(&self) -> &AuditEventSource {
        &self.source
    }

    /// Data or objects used
    pub fn entity(&self) -> &[AuditEventEntity] {
        &self.entity
    }

    fn validate(&self) -> Result<()> {
        self.base.validate()?;
        validation::choice_element(self.occurred.as_ref(), "occurred", OCCURRED_TYPES)?;
        validation::check_non_empty_list(&self.agent, "agent")?;
        validation::check_reference_types(&self.based_on, "basedOn", BASED_ON_TARGETS)?;
        validation::check_reference_type(self.patient.as_ref(), "patient", PATIENT_TARGETS)?;
        validation::check_reference_type(self.encounter.as_ref(), "encounter", ENCOUNTER_TARGETS)
    }
}

domain_resource!(AuditEvent, AuditEventBuilder);

impl Visitable for AuditEvent {
    fn type_name(&self) -> &'static str {
        "AuditEvent"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &AUDIT_EVENT_INFO
    }

    fn has_children(&self) -> bool {
        // code, recorded, agent and source are always present
        true
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept_list(v, "category", &self.category);
            self.code.accept("code", None, v);
            visitor::accept(v, "action", self.action.as_ref());
            visitor::accept(v, "severity", self.severity.as_ref());
            visitor::accept(v, "occurred", self.occurred.as_ref());
            self.recorded.accept("recorded", None, v);
            visitor::accept(v, "outcome", self.outcome.as_ref());
            visitor::accept_list(v, "authorization", &self.authorization);
            visitor::accept_list(v, "basedOn", &self.based_on);
            visitor::accept(v, "patient", self.patient.as_ref());
            visitor::accept(v, "encounter", self.encounter.as_ref());
            visitor::accept_list(v, "agent", &self.agent);
            self.source.accept("source", None, v);
            visitor::accept_list(v, "entity", &self.entity);
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditEventBuilder {
    base: DomainResourceBase,
    category: Vec<CodeableConcept>,
    code: Option<CodeableConcept>,
    action: Option<Coded<AuditEventAction>>,
    severity: Option<Coded<AuditEventSeverity>>,
    occurred: Option<AuditEventOccurred>,
    recorded: Option<Instant>,
    outcome: Option<AuditEventOutcome>,
    authorization: Vec<CodeableConcept>,
    based_on: Vec<Reference>,
    patient: Option<Reference>,
    encounter: Option<Reference>,
    agent: Vec<AuditEventAgent>,
    source: Option<AuditEventSource>,
    entity: Vec<AuditEventEntity>,
    skip_validation: bool,
}

impl AuditEventBuilder {
    pub fn category(mut self, category: impl Into<CodeableConcept>) -> Self {
        self.category.push(category.into());
        self
    }

    pub fn set_category(mut self, category: impl IntoIterator<Item = CodeableConcept>) -> Self {
        self.category = category.into_iter().collect();
        self
    }

    pub fn code(mut self, code: impl Into<CodeableConcept>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn action(mut self, action: impl Into<Coded<AuditEventAction>>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn severity(mut self, severity: impl Into<Coded<AuditEventSeverity>>) -> Self {
        self.severity = Some(severity.into());
        self
    }

    /// `Period` or `DateTime`
    pub fn occurred(mut self, occurred: impl Into<AuditEventOccurred>) -> Self {
        self.occurred = Some(occurred.into());
        self
    }

    pub fn recorded(mut self, recorded: impl Into<Instant>) -> Self {
        self.recorded = Some(recorded.into());
        self
    }

    pub fn outcome(mut self, outcome: AuditEventOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn authorization(mut self, authorization: impl Into<CodeableConcept>) -> Self {
        self.authorization.push(authorization.into());
        self
    }

    pub fn set_authorization(
        mut self,
        authorization: impl IntoIterator<Item = CodeableConcept>,
    ) -> Self {
        self.authorization = authorization.into_iter().collect();
        self
    }

    pub fn based_on(mut self, based_on: Reference) -> Self {
        self.based_on.push(based_on);
        self
    }

    pub fn set_based_on(mut self, based_on: impl IntoIterator<Item = Reference>) -> Self {
        self.based_on = based_on.into_iter().collect();
        self
    }

    pub fn patient(mut self, patient: Reference) -> Self {
        self.patient = Some(patient);
        self
    }

    pub fn encounter(mut self, encounter: Reference) -> Self {
        self.encounter = Some(encounter);
        self
    }

    pub fn agent(mut self, agent: AuditEventAgent) -> Self {
        self.agent.push(agent);
        self
    }

    pub fn set_agent(mut self, agent: impl IntoIterator<Item = AuditEventAgent>) -> Self {
        self.agent = agent.into_iter().collect();
        self
    }

    pub fn source(mut self, source: AuditEventSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn entity(mut self, entity: AuditEventEntity) -> Self {
        self.entity.push(entity);
        self
    }

    pub fn set_entity(mut self, entity: impl IntoIterator<Item = AuditEventEntity>) -> Self {
        self.entity = entity.into_iter().collect();
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<AuditEvent> {
        let validate = !self.skip_validation;
        finish("AuditEvent", validate, || {
            let event = AuditEvent {
                base: self.base.clone(),
                category: self.category.clone(),
                code: validation::require_non_null(self.code.clone(), "code")?,
                action: self.action.clone(),
                severity: self.severity.clone(),
                occurred: self.occurred.clone(),
                recorded: validation::require_non_null(self.recorded.clone(), "recorded")?,
                outcome: self.outcome.clone(),
                authorization: self.authorization.clone(),
                based_on: self.based_on.clone(),
                patient: self.patient.clone(),
                encounter: self.encounter.clone(),
                agent: self.agent.clone(),
                source: validation::require_non_null(self.source.clone(), "source")?,
                entity: self.entity.clone(),
                hash: HashCache::default(),
            };
            if validate {
                event.validate()?;
            }
            Ok(event)
        })
    }
}

/// Whether the event succeeded or failed
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuditEventOutcome {
    base: BackboneBase,
    code: Coding,
    detail: Vec<CodeableConcept>,
    hash: HashCache,
}

impl AuditEventOutcome {
    pub fn builder() -> AuditEventOutcomeBuilder {
        AuditEventOutcomeBuilder::default()
    }

    pub fn to_builder(&self) -> AuditEventOutcomeBuilder {
        AuditEventOutcomeBuilder {
            base: self.base.clone(),
            code: Some(self.code.clone()),
            detail: self.detail.clone(),
            skip_validation: false,
        }
    }

    pub fn code(&self) -> &Coding {
        &self.code
    }

    pub fn detail(&self) -> &[CodeableConcept] {
        &self.detail
    }

    fn validate(&self) -> Result<()> {
        validation::require_value_or_children(self)
    }
}

backbone_element!(AuditEventOutcome, AuditEventOutcomeBuilder);

impl Visitable for AuditEventOutcome {
    fn type_name(&self) -> &'static str {
        "AuditEvent.Outcome"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &OUTCOME_INFO
    }

    fn has_children(&self) -> bool {
        true
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            self.code.accept("code", None, v);
            visitor::accept_list(v, "detail", &self.detail);
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditEventOutcomeBuilder {
    base: BackboneBase,
    code: Option<Coding>,
    detail: Vec<CodeableConcept>,
    skip_validation: bool,
}

impl AuditEventOutcomeBuilder {
    pub fn code(mut self, code: Coding) -> Self {
        self.code = Some(code);
        self
    }

    pub fn detail(mut self, detail: impl Into<CodeableConcept>) -> Self {
        self.detail.push(detail.into());
        self
    }

    pub fn set_detail(mut self, detail: impl IntoIterator<Item = CodeableConcept>) -> Self {
        self.detail = detail.into_iter().collect();
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<AuditEventOutcome> {
        let validate = !self.skip_validation;
        finish("AuditEvent.Outcome", validate, || {
            let outcome = AuditEventOutcome {
                base: self.base.clone(),
                code: validation::require_non_null(self.code.clone(), "code")?,
                detail: self.detail.clone(),
                hash: HashCache::default(),
            };
            if validate {
                outcome.validate()?;
            }
            Ok(outcome)
        })
    }
}

/// Actor involved in the event
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuditEventAgent {
    base: BackboneBase,
    r#type: Option<CodeableConcept>,
    role: Vec<CodeableConcept>,
    who: Reference,
    requestor: Option<Boolean>,
    location: Option<Reference>,
    policy: Vec<Uri>,
    network: Option<AuditEventAgentNetwork>,
    authorization: Vec<CodeableConcept>,
    hash: HashCache,
}

impl AuditEventAgent {
    pub fn builder() -> AuditEventAgentBuilder {
        AuditEventAgentBuilder::default()
    }

    pub fn to_builder(&self) -> AuditEventAgentBuilder {
        AuditEventAgentBuilder {
            base: self.base.clone(),
            r#type: self.r#type.clone(),
            role: self.role.clone(),
            who: Some(self.who.clone()),
            requestor: self.requestor.clone(),
            location: self.location.clone(),
            policy: self.policy.clone(),
            network: self.network.clone(),
            authorization: self.authorization.clone(),
            skip_validation: false,
        }
    }

    /// How agent participated
    pub fn r#type(&self) -> Option<&CodeableConcept> {
        self.r#type.as_ref()
    }

    pub fn role(&self) -> &[CodeableConcept] {
        &self.role
    }

    /// Identifier of who
    pub fn who(&self) -> &Reference {
        &self.who
    }

    /// Whether user is initiator
    pub fn requestor(&self) -> Option<&Boolean> {
        self.requestor.as_ref()
    }

    pub fn location(&self) -> Option<&Reference> {
        self.location.as_ref()
    }

    /// Policy that authorized the agent participation in the event
    pub fn policy(&self) -> &[Uri] {
        &self.policy
    }

    pub fn network(&self) -> Option<&AuditEventAgentNetwork> {
        self.network.as_ref()
    }

    pub fn authorization(&self) -> &[CodeableConcept] {
        &self.authorization
    }

    fn validate(&self) -> Result<()> {
        validation::choice_element(self.network.as_ref(), "network", NETWORK_TYPES)?;
        validation::check_reference_type(Some(&self.who), "who", ACTOR_TARGETS)?;
        validation::check_reference_type(self.location.as_ref(), "location", LOCATION_TARGETS)?;
        validation::check_choice_reference_type(self.network.as_ref(), "network", ENDPOINT_TARGETS)?;
        validation::require_value_or_children(self)
    }
}

backbone_element!(AuditEventAgent, AuditEventAgentBuilder);

impl Visitable for AuditEventAgent {
    fn type_name(&self) -> &'static str {
        "AuditEvent.Agent"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &AGENT_INFO
    }

    fn has_children(&self) -> bool {
        true
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "type", self.r#type.as_ref());
            visitor::accept_list(v, "role", &self.role);
            self.who.accept("who", None, v);
            visitor::accept(v, "requestor", self.requestor.as_ref());
            visitor::accept(v, "location", self.location.as_ref());
            visitor::accept_list(v, "policy", &self.policy);
            visitor::accept(v, "network", self.network.as_ref());
            visitor::accept_list(v, "authorization", &self.authorization);
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditEventAgentBuilder {
    base: BackboneBase,
    r#type: Option<CodeableConcept>,
    role: Vec<CodeableConcept>,
    who: Option<Reference>,
    requestor: Option<Boolean>,
    location: Option<Reference>,
    policy: Vec<Uri>,
    network: Option<AuditEventAgentNetwork>,
    authorization: Vec<CodeableConcept>,
    skip_validation: bool,
}

impl AuditEventAgentBuilder {
    pub fn r#type(mut self, r#type: impl Into<CodeableConcept>) -> Self {
        self.r#type = Some(r#type.into());
        self
    }

    pub fn role(mut self, role: impl Into<CodeableConcept>) -> Self {
        self.role.push(role.into());
        self
    }

    pub fn set_role(mut self, role: impl IntoIterator<Item = CodeableConcept>) -> Self {
        self.role = role.into_iter().collect();
        self
    }

    pub fn who(mut self, who: Reference) -> Self {
        self.who = Some(who);
        self
    }

    pub fn requestor(mut self, requestor: impl Into<Boolean>) -> Self {
        self.requestor = Some(requestor.into());
        self
    }

    pub fn location(mut self, location: Reference) -> Self {
        self.location = Some(location);
        self
    }

    pub fn policy(mut self, policy: Uri) -> Self {
        self.policy.push(policy);
        self
    }

    pub fn set_policy(mut self, policy: impl IntoIterator<Item = Uri>) -> Self {
        self.policy = policy.into_iter().collect();
        self
    }

    /// `Reference`, `Uri` or `FhirString`
    pub fn network(mut self, network: impl Into<AuditEventAgentNetwork>) -> Self {
        self.network = Some(network.into());
        self
    }

    pub fn authorization(mut self, authorization: impl Into<CodeableConcept>) -> Self {
        self.authorization.push(authorization.into());
        self
    }

    pub fn set_authorization(
        mut self,
        authorization: impl IntoIterator<Item = CodeableConcept>,
    ) -> Self {
        self.authorization = authorization.into_iter().collect();
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<AuditEventAgent> {
        let validate = !self.skip_validation;
        finish("AuditEvent.Agent", validate, || {
            let agent = AuditEventAgent {
                base: self.base.clone(),
                r#type: self.r#type.clone(),
                role: self.role.clone(),
                who: validation::require_non_null(self.who.clone(), "who")?,
                requestor: self.requestor.clone(),
                location: self.location.clone(),
                policy: self.policy.clone(),
                network: self.network.clone(),
                authorization: self.authorization.clone(),
                hash: HashCache::default(),
            };
            if validate {
                agent.validate()?;
            }
            Ok(agent)
        })
    }
}

/// Audit Event Reporter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuditEventSource {
    base: BackboneBase,
    site: Option<Reference>,
    observer: Reference,
    r#type: Vec<CodeableConcept>,
    hash: HashCache,
}

impl AuditEventSource {
    pub fn builder() -> AuditEventSourceBuilder {
        AuditEventSourceBuilder::default()
    }

    pub fn to_builder(&self) -> AuditEventSourceBuilder {
        AuditEventSourceBuilder {
            base: self.base.clone(),
            site: self.site.clone(),
            observer: Some(self.observer.clone()),
            r#type: self.r#type.clone(),
            skip_validation: false,
        }
    }

    /// Logical source location within the enterprise
    pub fn site(&self) -> Option<&Reference> {
        self.site.as_ref()
    }

    /// The identity of source detecting the event
    pub fn observer(&self) -> &Reference {
        &self.observer
    }

    pub fn r#type(&self) -> &[CodeableConcept] {
        &self.r#type
    }

    fn validate(&self) -> Result<()> {
        validation::check_reference_type(self.site.as_ref(), "site", LOCATION_TARGETS)?;
        validation::check_reference_type(Some(&self.observer), "observer", ACTOR_TARGETS)?;
        validation::require_value_or_children(self)
    }
}

backbone_element!(AuditEventSource, AuditEventSourceBuilder);

impl Visitable for AuditEventSource {
    fn type_name(&self) -> &'static str {
        "AuditEvent.Source"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &SOURCE_INFO
    }

    fn has_children(&self) -> bool {
        true
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "site", self.site.as_ref());
            self.observer.accept("observer", None, v);
            visitor::accept_list(v, "type", &self.r#type);
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditEventSourceBuilder {
    base: BackboneBase,
    site: Option<Reference>,
    observer: Option<Reference>,
    r#type: Vec<CodeableConcept>,
    skip_validation: bool,
}

impl AuditEventSourceBuilder {
    pub fn site(mut self, site: Reference) -> Self {
        self.site = Some(site);
        self
    }

    pub fn observer(mut self, observer: Reference) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn r#type(mut self, r#type: impl Into<CodeableConcept>) -> Self {
        self.r#type.push(r#type.into());
        self
    }

    pub fn set_type(mut self, r#type: impl IntoIterator<Item = CodeableConcept>) -> Self {
        self.r#type = r#type.into_iter().collect();
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<AuditEventSource> {
        let validate = !self.skip_validation;
        finish("AuditEvent.Source", validate, || {
            let source = AuditEventSource {
                base: self.base.clone(),
                site: self.site.clone(),
                observer: validation::require_non_null(self.observer.clone(), "observer")?,
                r#type: self.r#type.clone(),
                hash: HashCache::default(),
            };
            if validate {
                source.validate()?;
            }
            Ok(source)
        })
    }
}

/// Data or objects used
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuditEventEntity {
    base: BackboneBase,
    what: Option<Reference>,
    role: Option<CodeableConcept>,
    security_label: Vec<CodeableConcept>,
    query: Option<Base64Binary>,
    detail: Vec<AuditEventEntityDetail>,
    agent: Vec<AuditEventAgent>,
    hash: HashCache,
}

impl AuditEventEntity {
    pub fn builder() -> AuditEventEntityBuilder {
        AuditEventEntityBuilder::default()
    }

    pub fn to_builder(&self) -> AuditEventEntityBuilder {
        AuditEventEntityBuilder {
            base: self.base.clone(),
            what: self.what.clone(),
            role: self.role.clone(),
            security_label: self.security_label.clone(),
            query: self.query.clone(),
            detail: self.detail.clone(),
            agent: self.agent.clone(),
            skip_validation: false,
        }
    }

    /// Specific instance of resource
    pub fn what(&self) -> Option<&Reference> {
        self.what.as_ref()
    }

    pub fn role(&self) -> Option<&CodeableConcept> {
        self.role.as_ref()
    }

    pub fn security_label(&self) -> &[CodeableConcept] {
        &self.security_label
    }

    /// Query parameters
    pub fn query(&self) -> Option<&Base64Binary> {
        self.query.as_ref()
    }

    pub fn detail(&self) -> &[AuditEventEntityDetail] {
        &self.detail
    }

    /// Entity is attributed to this agent
    pub fn agent(&self) -> &[AuditEventAgent] {
        &self.agent
    }

    fn validate(&self) -> Result<()> {
        validation::require_value_or_children(self)
    }
}

backbone_element!(AuditEventEntity, AuditEventEntityBuilder);

impl Visitable for AuditEventEntity {
    fn type_name(&self) -> &'static str {
        "AuditEvent.Entity"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &ENTITY_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children()
            || self.what.is_some()
            || self.role.is_some()
            || !self.security_label.is_empty()
            || self.query.is_some()
            || !self.detail.is_empty()
            || !self.agent.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "what", self.what.as_ref());
            visitor::accept(v, "role", self.role.as_ref());
            visitor::accept_list(v, "securityLabel", &self.security_label);
            visitor::accept(v, "query", self.query.as_ref());
            visitor::accept_list(v, "detail", &self.detail);
            visitor::accept_list(v, "agent", &self.agent);
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditEventEntityBuilder {
    base: BackboneBase,
    what: Option<Reference>,
    role: Option<CodeableConcept>,
    security_label: Vec<CodeableConcept>,
    query: Option<Base64Binary>,
    detail: Vec<AuditEventEntityDetail>,
    agent: Vec<AuditEventAgent>,
    skip_validation: bool,
}

impl AuditEventEntityBuilder {
    pub fn what(mut self, what: Reference) -> Self {
        self.what = Some(what);
        self
    }

    pub fn role(mut self, role: impl Into<CodeableConcept>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn security_label(mut self, security_label: impl Into<CodeableConcept>) -> Self {
        self.security_label.push(security_label.into());
        self
    }

    pub fn set_security_label(
        mut self,
        security_label: impl IntoIterator<Item = CodeableConcept>,
    ) -> Self {
        self.security_label = security_label.into_iter().collect();
        self
    }

    pub fn query(mut self, query: impl Into<Base64Binary>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn detail(mut self, detail: AuditEventEntityDetail) -> Self {
        self.detail.push(detail);
        self
    }

    pub fn set_detail(mut self, detail: impl IntoIterator<Item = AuditEventEntityDetail>) -> Self {
        self.detail = detail.into_iter().collect();
        self
    }

    pub fn agent(mut self, agent: AuditEventAgent) -> Self {
        self.agent.push(agent);
        self
    }

    pub fn set_agent(mut self, agent: impl IntoIterator<Item = AuditEventAgent>) -> Self {
        self.agent = agent.into_iter().collect();
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<AuditEventEntity> {
        let validate = !self.skip_validation;
        finish("AuditEvent.Entity", validate, || {
            let entity = AuditEventEntity {
                base: self.base.clone(),
                what: self.what.clone(),
                role: self.role.clone(),
                security_label: self.security_label.clone(),
                query: self.query.clone(),
                detail: self.detail.clone(),
                agent: self.agent.clone(),
                hash: HashCache::default(),
            };
            if validate {
                entity.validate()?;
            }
            Ok(entity)
        })
    }
}

/// Additional information about the entity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuditEventEntityDetail {
    base: BackboneBase,
    r#type: CodeableConcept,
    value: AuditEventEntityDetailValue,
    hash: HashCache,
}

impl AuditEventEntityDetail {
    pub fn builder() -> AuditEventEntityDetailBuilder {
        AuditEventEntityDetailBuilder::default()
    }

    pub fn to_builder(&self) -> AuditEventEntityDetailBuilder {
        AuditEventEntityDetailBuilder {
            base: self.base.clone(),
            r#type: Some(self.r#type.clone()),
            value: Some(self.value.clone()),
            skip_validation: false,
        }
    }

    /// Name of the property
    pub fn r#type(&self) -> &CodeableConcept {
        &self.r#type
    }

    pub fn value(&self) -> &AuditEventEntityDetailValue {
        &self.value
    }

    fn validate(&self) -> Result<()> {
        validation::choice_element(Some(&self.value), "value", DETAIL_VALUE_TYPES)?;
        validation::require_value_or_children(self)
    }
}

backbone_element!(AuditEventEntityDetail, AuditEventEntityDetailBuilder);

impl Visitable for AuditEventEntityDetail {
    fn type_name(&self) -> &'static str {
        "AuditEvent.Entity.Detail"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &ENTITY_DETAIL_INFO
    }

    fn has_children(&self) -> bool {
        true
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            self.r#type.accept("type", None, v);
            self.value.accept("value", None, v);
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditEventEntityDetailBuilder {
    base: BackboneBase,
    r#type: Option<CodeableConcept>,
    value: Option<AuditEventEntityDetailValue>,
    skip_validation: bool,
}

impl AuditEventEntityDetailBuilder {
    pub fn r#type(mut self, r#type: impl Into<CodeableConcept>) -> Self {
        self.r#type = Some(r#type.into());
        self
    }

    pub fn value(mut self, value: impl Into<AuditEventEntityDetailValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<AuditEventEntityDetail> {
        let validate = !self.skip_validation;
        finish("AuditEvent.Entity.Detail", validate, || {
            let detail = AuditEventEntityDetail {
                base: self.base.clone(),
                r#type: validation::require_non_null(self.r#type.clone(), "type")?,
                value: validation::require_choice_element(
                    self.value.clone(),
                    "value",
                    DETAIL_VALUE_TYPES,
                )?,
                hash: HashCache::default(),
            };
            if validate {
                detail.validate()?;
            }
            Ok(detail)
        })
    }
}

pub static AUDIT_EVENT_INFO: TypeInfo = TypeInfo {
    name: "AuditEvent",
    kind: TypeKind::Resource,
    base: Some("DomainResource"),
    url: Some("http://hl7.org/fhir/StructureDefinition/AuditEvent"),
    fields: &[
        FieldInfo::new("category", &["CodeableConcept"])
            .list()
            .summary()
            .binding(
                "AuditEventType",
                BindingStrength::Example,
                "http://hl7.org/fhir/ValueSet/audit-event-type",
            ),
        FieldInfo::new("code", &["CodeableConcept"])
            .required()
            .summary()
            .binding(
                "AuditEventSubType",
                BindingStrength::Example,
                "http://hl7.org/fhir/ValueSet/audit-event-sub-type",
            ),
        FieldInfo::new("action", &["code"]).summary().binding(
            "AuditEventAction",
            BindingStrength::Required,
            "http://hl7.org/fhir/ValueSet/audit-event-action|5.0.0",
        ),
        FieldInfo::new("severity", &["code"]).summary().binding(
            "AuditEventSeverity",
            BindingStrength::Required,
            "http://hl7.org/fhir/ValueSet/audit-event-severity|5.0.0",
        ),
        FieldInfo::new("occurred", OCCURRED_TYPES),
        FieldInfo::new("recorded", &["instant"]).required().summary(),
        FieldInfo::new("outcome", &["AuditEvent.Outcome"]).summary(),
        FieldInfo::new("authorization", &["CodeableConcept"])
            .list()
            .summary()
            .binding("AuditPurposeOfUse", BindingStrength::Example, PURPOSE_OF_USE),
        FieldInfo::new("basedOn", &["Reference"])
            .list()
            .targets(BASED_ON_TARGETS),
        FieldInfo::new("patient", &["Reference"]).targets(PATIENT_TARGETS),
        FieldInfo::new("encounter", &["Reference"]).targets(ENCOUNTER_TARGETS),
        FieldInfo::new("agent", &["AuditEvent.Agent"])
            .required()
            .list()
            .summary(),
        FieldInfo::new("source", &["AuditEvent.Source"])
            .required()
            .summary(),
        FieldInfo::new("entity", &["AuditEvent.Entity"]).list().summary(),
    ],
    constraints: &[
        ConstraintInfo {
            id: "auditEvent-0",
            level: ConstraintLevel::Warning,
            location: "outcome.code",
            description: "SHOULD contain a code from value set http://hl7.org/fhir/ValueSet/audit-event-outcome",
            expression: "$this.memberOf('http://hl7.org/fhir/ValueSet/audit-event-outcome', 'preferred')",
        },
        ConstraintInfo {
            id: "auditEvent-1",
            level: ConstraintLevel::Warning,
            location: "agent.type",
            description: "SHOULD contain a code from value set http://hl7.org/fhir/ValueSet/participation-role-type",
            expression: "$this.memberOf('http://hl7.org/fhir/ValueSet/participation-role-type', 'preferred')",
        },
        ConstraintInfo {
            id: "auditEvent-2",
            level: ConstraintLevel::Warning,
            location: "source.type",
            description: "SHOULD contain a code from value set http://hl7.org/fhir/ValueSet/security-source-type",
            expression: "$this.memberOf('http://hl7.org/fhir/ValueSet/security-source-type', 'preferred')",
        },
    ],
};

pub static OUTCOME_INFO: TypeInfo = TypeInfo {
    name: "AuditEvent.Outcome",
    kind: TypeKind::BackboneElement,
    base: Some("BackboneElement"),
    url: None,
    fields: &[
        FieldInfo::new("code", &["Coding"]).required().summary().binding(
            "AuditEventOutcome",
            BindingStrength::Preferred,
            "http://hl7.org/fhir/ValueSet/audit-event-outcome",
        ),
        FieldInfo::new("detail", &["CodeableConcept"])
            .list()
            .summary()
            .binding(
                "AuditEventOutcomeDetail",
                BindingStrength::Example,
                "http://hl7.org/fhir/ValueSet/audit-event-outcome-detail",
            ),
    ],
    constraints: &[],
};

pub static AGENT_INFO: TypeInfo = TypeInfo {
    name: "AuditEvent.Agent",
    kind: TypeKind::BackboneElement,
    base: Some("BackboneElement"),
    url: None,
    fields: &[
        FieldInfo::new("type", &["CodeableConcept"]).binding(
            "AuditAgentType",
            BindingStrength::Preferred,
            "http://hl7.org/fhir/ValueSet/participation-role-type",
        ),
        FieldInfo::new("role", &["CodeableConcept"]).list().binding(
            "AuditAgentRole",
            BindingStrength::Example,
            "http://hl7.org/fhir/ValueSet/security-role-type",
        ),
        FieldInfo::new("who", &["Reference"])
            .required()
            .summary()
            .targets(ACTOR_TARGETS),
        FieldInfo::new("requestor", &["boolean"]).summary(),
        FieldInfo::new("location", &["Reference"]).targets(LOCATION_TARGETS),
        FieldInfo::new("policy", &["uri"]).list(),
        FieldInfo::new("network", NETWORK_TYPES).targets(ENDPOINT_TARGETS),
        FieldInfo::new("authorization", &["CodeableConcept"])
            .list()
            .binding("AuditPurposeOfUse", BindingStrength::Example, PURPOSE_OF_USE),
    ],
    constraints: &[],
};

pub static SOURCE_INFO: TypeInfo = TypeInfo {
    name: "AuditEvent.Source",
    kind: TypeKind::BackboneElement,
    base: Some("BackboneElement"),
    url: None,
    fields: &[
        FieldInfo::new("site", &["Reference"]).targets(LOCATION_TARGETS),
        FieldInfo::new("observer", &["Reference"])
            .required()
            .summary()
            .targets(ACTOR_TARGETS),
        FieldInfo::new("type", &["CodeableConcept"]).list().binding(
            "AuditEventSourceType",
            BindingStrength::Preferred,
            "http://hl7.org/fhir/ValueSet/security-source-type",
        ),
    ],
    constraints: &[],
};

pub static ENTITY_INFO: TypeInfo = TypeInfo {
    name: "AuditEvent.Entity",
    kind: TypeKind::BackboneElement,
    base: Some("BackboneElement"),
    url: None,
    fields: &[
        FieldInfo::new("what", &["Reference"]).summary(),
        FieldInfo::new("role", &["CodeableConcept"]).binding(
            "AuditEventEntityRole",
            BindingStrength::Example,
            "http://hl7.org/fhir/ValueSet/object-role",
        ),
        FieldInfo::new("securityLabel", &["CodeableConcept"])
            .list()
            .binding(
                "SecurityLabels",
                BindingStrength::Example,
                "http://hl7.org/fhir/ValueSet/security-label-examples",
            ),
        FieldInfo::new("query", &["base64Binary"]).summary(),
        FieldInfo::new("detail", &["AuditEvent.Entity.Detail"]).list(),
        FieldInfo::new("agent", &["AuditEvent.Agent"]).list(),
    ],
    constraints: &[],
};

pub static ENTITY_DETAIL_INFO: TypeInfo = TypeInfo {
    name: "AuditEvent.Entity.Detail",
    kind: TypeKind::BackboneElement,
    base: Some("BackboneElement"),
    url: None,
    fields: &[
        FieldInfo::new("type", &["CodeableConcept"]).required().binding(
            "AuditEventDetailType",
            BindingStrength::Example,
            "http://hl7.org/fhir/ValueSet/audit-event-type",
        ),
        FieldInfo::new("value", DETAIL_VALUE_TYPES).required(),
    ],
    constraints: &[],
};
