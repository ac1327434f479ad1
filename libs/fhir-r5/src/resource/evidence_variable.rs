//! EvidenceVariable
//!
//! The EvidenceVariable resource describes an element that knowledge
//! (Evidence) is about. Characteristics nest: a definition by combination
//! holds further characteristics.

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
    Annotation, BackboneBase, Boolean, Canonical, CharacteristicCombination, CodeableConcept,
    Coded, Coding, ContactDetail, Date, DateTime, EvidenceVariableHandling, Expression,
    FhirString, Id, Identifier, Markdown, Period, PositiveInt, PublicationStatus, Quantity,
    Range, Reference, RelatedArtifact, UsageContext, Uri,
};
use crate::validation;
use crate::visitor::{self, Visitable, Visitor};

const VERSION_ALGORITHM_TYPES: &[&str] = &["string", "Coding"];
const QUANTITY_OR_RANGE: &[&str] = &["Quantity", "Range"];
const TYPE_AND_VALUE_TYPES: &[&str] =
    &["CodeableConcept", "boolean", "Quantity", "Range", "Reference", "id"];
const EVENT_TYPES: &[&str] = &["CodeableConcept", "Reference", "dateTime", "id"];
const CATEGORY_VALUE_TYPES: &[&str] = &["CodeableConcept", "Quantity", "Range"];

const DEFINITION_TARGETS: &[&str] = &["EvidenceVariable", "Group", "Evidence"];
const DEVICE_TARGETS: &[&str] = &["Device", "DeviceMetric"];

choice_enum! {
    /// EvidenceVariable.versionAlgorithm[x]
    pub enum EvidenceVariableVersionAlgorithm {
        String(FhirString),
        Coding(Coding),
    }
}

choice_enum! {
    /// EvidenceVariable.characteristic.instances[x]
    pub enum EvidenceVariableCharacteristicInstances {
        Quantity(Quantity),
        Range(Range),
    }
}

choice_enum! {
    /// EvidenceVariable.characteristic.duration[x]
    pub enum EvidenceVariableCharacteristicDuration {
        Quantity(Quantity),
        Range(Range),
    }
}

choice_enum! {
    /// EvidenceVariable.characteristic.definitionByTypeAndValue.value[x]
    pub enum EvidenceVariableCharacteristicDefinitionByTypeAndValueValue {
        CodeableConcept(CodeableConcept),
        Boolean(Boolean),
        Quantity(Quantity),
        Range(Range),
        Reference(Reference),
        Id(Id),
    }
}

choice_enum! {
    /// EvidenceVariable.characteristic.timeFromEvent.event[x]
    pub enum EvidenceVariableCharacteristicTimeFromEventEvent {
        CodeableConcept(CodeableConcept),
        Reference(Reference),
        DateTime(DateTime),
        Id(Id),
    }
}

choice_enum! {
    /// EvidenceVariable.category.value[x]
    pub enum EvidenceVariableCategoryValue {
        CodeableConcept(CodeableConcept),
        Quantity(Quantity),
        Range(Range),
    }
}

/// A definition of an exposure, outcome, or other variable
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EvidenceVariable {
    base: DomainResourceBase,
    url: Option<Uri>,
    identifier: Vec<Identifier>,
    version: Option<FhirString>,
    version_algorithm: Option<EvidenceVariableVersionAlgorithm>,
    name: Option<FhirString>,
    title: Option<FhirString>,
    short_title: Option<FhirString>,
    status: Coded<PublicationStatus>,
    experimental: Option<Boolean>,
    date: Option<DateTime>,
    publisher: Option<FhirString>,
    contact: Vec<ContactDetail>,
    description: Option<Markdown>,
    note: Vec<Annotation>,
    use_context: Vec<UsageContext>,
    purpose: Option<Markdown>,
    copyright: Option<Markdown>,
    copyright_label: Option<FhirString>,
    approval_date: Option<Date>,
    last_review_date: Option<Date>,
    effective_period: Option<Period>,
    author: Vec<ContactDetail>,
    editor: Vec<ContactDetail>,
    reviewer: Vec<ContactDetail>,
    endorser: Vec<ContactDetail>,
    related_artifact: Vec<RelatedArtifact>,
    actual: Option<Boolean>,
    characteristic: Vec<EvidenceVariableCharacteristic>,
    handling: Option<Coded<EvidenceVariableHandling>>,
    category: Vec<EvidenceVariableCategory>,
    hash: HashCache,
}

impl EvidenceVariable {
    pub fn builder() -> EvidenceVariableBuilder {
        EvidenceVariableBuilder::default()
    }

    pub fn to_builder(&self) -> EvidenceVariableBuilder {
        EvidenceVariableBuilder {
            base: self.base.clone(),
            url: self.url.clone(),
            identifier: self.identifier.clone(),
            version: self.version.clone(),
            version_algorithm: self.version_algorithm.clone(),
            name: self.name.clone(),
            title: self.title.clone(),
            short_title: self.short_title.clone(),
            status: Some(self.status.clone()),
            experimental: self.experimental.clone(),
            date: self.date.clone(),
            publisher: self.publisher.clone(),
            contact: self.contact.clone(),
            description: self.description.clone(),
            note: self.note.clone(),
            use_context: self.use_context.clone(),
            purpose: self.purpose.clone(),
            copyright: self.copyright.clone(),
            copyright_label: self.copyright_label.clone(),
            approval_date: self.approval_date.clone(),
            last_review_date: self.last_review_date.clone(),
            effective_period: self.effective_period.clone(),
            author: self.author.clone(),
            editor: self.editor.clone(),
            reviewer: self.reviewer.clone(),
            endorser: self.endorser.clone(),
            related_artifact: self.related_artifact.clone(),
            actual: self.actual.clone(),
            characteristic: self.characteristic.clone(),
            handling: self.handling.clone(),
            category: self.category.clone(),
            skip_validation: false,
        }
    }

    pub fn url(&self) -> Option<&Uri> {
        self.url.as_ref()
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    pub fn version(&self) -> Option<&FhirString> {
        self.version.as_ref()
    }

    pub fn version_algorithm(&self) -> Option<&EvidenceVariableVersionAlgorithm> {
        self.version_algorithm.as_ref()
    }

    pub fn name(&self) -> Option<&FhirString> {
        self.name.as_ref()
    }

    pub fn title(&self) -> Option<&FhirString> {
        self.title.as_ref()
    }

    /// Title for use in informal contexts
    pub fn short_title(&self) -> Option<&FhirString> {
        self.short_title.as_ref()
    }

    pub fn status(&self) -> &Coded<PublicationStatus> {
        &self.status
    }

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

    /// Used for footnotes or explanatory notes
    pub fn note(&self) -> &[Annotation] {
        &self.note
    }

    pub fn use_context(&self) -> &[UsageContext] {
        &self.use_context
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

    pub fn approval_date(&self) -> Option<&Date> {
        self.approval_date.as_ref()
    }

    pub fn last_review_date(&self) -> Option<&Date> {
        self.last_review_date.as_ref()
    }

    pub fn effective_period(&self) -> Option<&Period> {
        self.effective_period.as_ref()
    }

    pub fn author(&self) -> &[ContactDetail] {
        &self.author
    }

    pub fn editor(&self) -> &[ContactDetail] {
        &self.editor
    }

    pub fn reviewer(&self) -> &[ContactDetail] {
        &self.reviewer
    }

    pub fn endorser(&self) -> &[ContactDetail] {
        &self.endorser
    }

    pub fn related_artifact(&self) -> &[RelatedArtifact] {
        &self.related_artifact
    }

    /// Actual or conceptual
    pub fn actual(&self) -> Option<&Boolean> {
        self.actual.as_ref()
    }

    /// A defining factor of the EvidenceVariable
    pub fn characteristic(&self) -> &[EvidenceVariableCharacteristic] {
        &self.characteristic
    }

    pub fn handling(&self) -> Option<&Coded<EvidenceVariableHandling>> {
        self.handling.as_ref()
    }

    /// A grouping for ordinal or polychotomous variables
    pub fn category(&self) -> &[EvidenceVariableCategory] {
        &self.category
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

domain_resource!(EvidenceVariable, EvidenceVariableBuilder);

impl Visitable for EvidenceVariable {
    fn type_name(&self) -> &'static str {
        "EvidenceVariable"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &EVIDENCE_VARIABLE_INFO
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
            visitor::accept(v, "shortTitle", self.short_title.as_ref());
            self.status.accept("status", None, v);
            visitor::accept(v, "experimental", self.experimental.as_ref());
            visitor::accept(v, "date", self.date.as_ref());
            visitor::accept(v, "publisher", self.publisher.as_ref());
            visitor::accept_list(v, "contact", &self.contact);
            visitor::accept(v, "description", self.description.as_ref());
            visitor::accept_list(v, "note", &self.note);
            visitor::accept_list(v, "useContext", &self.use_context);
            visitor::accept(v, "purpose", self.purpose.as_ref());
            visitor::accept(v, "copyright", self.copyright.as_ref());
            visitor::accept(v, "copyrightLabel", self.copyright_label.as_ref());
            visitor::accept(v, "approvalDate", self.approval_date.as_ref());
            visitor::accept(v, "lastReviewDate", self.last_review_date.as_ref());
            visitor::accept(v, "effectivePeriod", self.effective_period.as_ref());
            visitor::accept_list(v, "author", &self.author);
            visitor::accept_list(v, "editor", &self.editor);
            visitor::accept_list(v, "reviewer", &self.reviewer);
            visitor::accept_list(v, "endorser", &self.endorser);
            visitor::accept_list(v, "relatedArtifact", &self.related_artifact);
            visitor::accept(v, "actual", self.actual.as_ref());
            visitor::accept_list(v, "characteristic", &self.characteristic);
            visitor::accept(v, "handling", self.handling.as_ref());
            visitor::accept_list(v, "category", &self.category);
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct EvidenceVariableBuilder {
    base: DomainResourceBase,
    url: Option<Uri>,
    identifier: Vec<Identifier>,
    version: Option<FhirString>,
    version_algorithm: Option<EvidenceVariableVersionAlgorithm>,
    name: Option<FhirString>,
    title: Option<FhirString>,
    short_title: Option<FhirString>,
    status: Option<Coded<PublicationStatus>>,
    experimental: Option<Boolean>,
    date: Option<DateTime>,
    publisher: Option<FhirString>,
    contact: Vec<ContactDetail>,
    description: Option<Markdown>,
    note: Vec<Annotation>,
    use_context: Vec<UsageContext>,
    purpose: Option<Markdown>,
    copyright: Option<Markdown>,
    copyright_label: Option<FhirString>,
    approval_date: Option<Date>,
    last_review_date: Option<Date>,
    effective_period: Option<Period>,
    author: Vec<ContactDetail>,
    editor: Vec<ContactDetail>,
    reviewer: Vec<ContactDetail>,
    endorser: Vec<ContactDetail>,
    related_artifact: Vec<RelatedArtifact>,
    actual: Option<Boolean>,
    characteristic: Vec<EvidenceVariableCharacteristic>,
    handling: Option<Coded<EvidenceVariableHandling>>,
    category: Vec<EvidenceVariableCategory>,
    skip_validation: bool,
}

impl EvidenceVariableBuilder {
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
        version_algorithm: impl Into<EvidenceVariableVersionAlgorithm>,
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

    pub fn short_title(mut self, short_title: impl Into<FhirString>) -> Self {
        self.short_title = Some(short_title.into());
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

    pub fn note(mut self, note: Annotation) -> Self {
        self.note.push(note);
        self
    }

    pub fn set_note(mut self, note: impl IntoIterator<Item = Annotation>) -> Self {
        self.note = note.into_iter().collect();
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

    pub fn approval_date(mut self, approval_date: Date) -> Self {
        self.approval_date = Some(approval_date);
        self
    }

    pub fn last_review_date(mut self, last_review_date: Date) -> Self {
        self.last_review_date = Some(last_review_date);
        self
    }

    pub fn effective_period(mut self, effective_period: Period) -> Self {
        self.effective_period = Some(effective_period);
        self
    }

    pub fn author(mut self, author: ContactDetail) -> Self {
        self.author.push(author);
        self
    }

    pub fn set_author(mut self, author: impl IntoIterator<Item = ContactDetail>) -> Self {
        self.author = author.into_iter().collect();
        self
    }

    pub fn editor(mut self, editor: ContactDetail) -> Self {
        self.editor.push(editor);
        self
    }

    pub fn set_editor(mut self, editor: impl IntoIterator<Item = ContactDetail>) -> Self {
        self.editor = editor.into_iter().collect();
        self
    }

    pub fn reviewer(mut self, reviewer: ContactDetail) -> Self {
        self.reviewer.push(reviewer);
        self
    }

    pub fn set_reviewer(mut self, reviewer: impl IntoIterator<Item = ContactDetail>) -> Self {
        self.reviewer = reviewer.into_iter().collect();
        self
    }

    pub fn endorser(mut self, endorser: ContactDetail) -> Self {
        self.endorser.push(endorser);
        self
    }

    pub fn set_endorser(mut self, endorser: impl IntoIterator<Item = ContactDetail>) -> Self {
        self.endorser = endorser.into_iter().collect();
        self
    }

    pub fn related_artifact(mut self, related_artifact: RelatedArtifact) -> Self {
        self.related_artifact.push(related_artifact);
        self
    }

    pub fn set_related_artifact(
        mut self,
        related_artifact: impl IntoIterator<Item = RelatedArtifact>,
    ) -> Self {
        self.related_artifact = related_artifact.into_iter().collect();
        self
    }

    pub fn actual(mut self, actual: impl Into<Boolean>) -> Self {
        self.actual = Some(actual.into());
        self
    }

    pub fn characteristic(mut self, characteristic: EvidenceVariableCharacteristic) -> Self {
        self.characteristic.push(characteristic);
        self
    }

    pub fn set_characteristic(
        mut self,
        characteristic: impl IntoIterator<Item = EvidenceVariableCharacteristic>,
    ) -> Self {
        self.characteristic = characteristic.into_iter().collect();
        self
    }

    pub fn handling(mut self, handling: impl Into<Coded<EvidenceVariableHandling>>) -> Self {
        self.handling = Some(handling.into());
        self
    }

    pub fn category(mut self, category: EvidenceVariableCategory) -> Self {
        self.category.push(category);
        self
    }

    pub fn set_category(
        mut self,
        category: impl IntoIterator<Item = EvidenceVariableCategory>,
    ) -> Self {
        self.category = category.into_iter().collect();
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<EvidenceVariable> {
        let validate = !self.skip_validation;
        finish("EvidenceVariable", validate, || {
            let variable = EvidenceVariable {
                base: self.base.clone(),
                url: self.url.clone(),
                identifier: self.identifier.clone(),
                version: self.version.clone(),
                version_algorithm: self.version_algorithm.clone(),
                name: self.name.clone(),
                title: self.title.clone(),
                short_title: self.short_title.clone(),
                status: validation::require_non_null(self.status.clone(), "status")?,
                experimental: self.experimental.clone(),
                date: self.date.clone(),
                publisher: self.publisher.clone(),
                contact: self.contact.clone(),
                description: self.description.clone(),
                note: self.note.clone(),
                use_context: self.use_context.clone(),
                purpose: self.purpose.clone(),
                copyright: self.copyright.clone(),
                copyright_label: self.copyright_label.clone(),
                approval_date: self.approval_date.clone(),
                last_review_date: self.last_review_date.clone(),
                effective_period: self.effective_period.clone(),
                author: self.author.clone(),
                editor: self.editor.clone(),
                reviewer: self.reviewer.clone(),
                endorser: self.endorser.clone(),
                related_artifact: self.related_artifact.clone(),
                actual: self.actual.clone(),
                characteristic: self.characteristic.clone(),
                handling: self.handling.clone(),
                category: self.category.clone(),
                hash: HashCache::default(),
            };
            if validate {
                variable.validate()?;
            }
            Ok(variable)
        })
    }
}

/// A defining factor of the EvidenceVariable
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EvidenceVariableCharacteristic {
    base: BackboneBase,
    link_id: Option<Id>,
    description: Option<Markdown>,
    note: Vec<Annotation>,
    exclude: Option<Boolean>,
    definition_reference: Option<Reference>,
    definition_canonical: Option<Canonical>,
    definition_codeable_concept: Option<CodeableConcept>,
    definition_expression: Option<Expression>,
    definition_id: Option<Id>,
    definition_by_type_and_value: Option<EvidenceVariableCharacteristicDefinitionByTypeAndValue>,
    definition_by_combination: Option<EvidenceVariableCharacteristicDefinitionByCombination>,
    instances: Option<EvidenceVariableCharacteristicInstances>,
    duration: Option<EvidenceVariableCharacteristicDuration>,
    time_from_event: Vec<EvidenceVariableCharacteristicTimeFromEvent>,
    hash: HashCache,
}

impl EvidenceVariableCharacteristic {
    pub fn builder() -> EvidenceVariableCharacteristicBuilder {
        EvidenceVariableCharacteristicBuilder::default()
    }

    pub fn to_builder(&self) -> EvidenceVariableCharacteristicBuilder {
        EvidenceVariableCharacteristicBuilder {
            base: self.base.clone(),
            link_id: self.link_id.clone(),
            description: self.description.clone(),
            note: self.note.clone(),
            exclude: self.exclude.clone(),
            definition_reference: self.definition_reference.clone(),
            definition_canonical: self.definition_canonical.clone(),
            definition_codeable_concept: self.definition_codeable_concept.clone(),
            definition_expression: self.definition_expression.clone(),
            definition_id: self.definition_id.clone(),
            definition_by_type_and_value: self.definition_by_type_and_value.clone(),
            definition_by_combination: self.definition_by_combination.clone(),
            instances: self.instances.clone(),
            duration: self.duration.clone(),
            time_from_event: self.time_from_event.clone(),
            skip_validation: false,
        }
    }

    /// Label for internal linking
    pub fn link_id(&self) -> Option<&Id> {
        self.link_id.as_ref()
    }

    pub fn description(&self) -> Option<&Markdown> {
        self.description.as_ref()
    }

    pub fn note(&self) -> &[Annotation] {
        &self.note
    }

    /// Whether the characteristic is an inclusion criterion or exclusion criterion
    pub fn exclude(&self) -> Option<&Boolean> {
        self.exclude.as_ref()
    }

    pub fn definition_reference(&self) -> Option<&Reference> {
        self.definition_reference.as_ref()
    }

    pub fn definition_canonical(&self) -> Option<&Canonical> {
        self.definition_canonical.as_ref()
    }

    pub fn definition_codeable_concept(&self) -> Option<&CodeableConcept> {
        self.definition_codeable_concept.as_ref()
    }

    pub fn definition_expression(&self) -> Option<&Expression> {
        self.definition_expression.as_ref()
    }

    pub fn definition_id(&self) -> Option<&Id> {
        self.definition_id.as_ref()
    }

    pub fn definition_by_type_and_value(
        &self,
    ) -> Option<&EvidenceVariableCharacteristicDefinitionByTypeAndValue> {
        self.definition_by_type_and_value.as_ref()
    }

    /// Used to specify how two or more characteristics are combined
    pub fn definition_by_combination(
        &self,
    ) -> Option<&EvidenceVariableCharacteristicDefinitionByCombination> {
        self.definition_by_combination.as_ref()
    }

    /// Number of occurrences meeting the characteristic
    pub fn instances(&self) -> Option<&EvidenceVariableCharacteristicInstances> {
        self.instances.as_ref()
    }

    /// Length of time in which the characteristic is met
    pub fn duration(&self) -> Option<&EvidenceVariableCharacteristicDuration> {
        self.duration.as_ref()
    }

    pub fn time_from_event(&self) -> &[EvidenceVariableCharacteristicTimeFromEvent] {
        &self.time_from_event
    }

    fn validate(&self) -> Result<()> {
        validation::choice_element(self.instances.as_ref(), "instances", QUANTITY_OR_RANGE)?;
        validation::choice_element(self.duration.as_ref(), "duration", QUANTITY_OR_RANGE)?;
        validation::check_reference_type(
            self.definition_reference.as_ref(),
            "definitionReference",
            DEFINITION_TARGETS,
        )?;
        validation::require_value_or_children(self)
    }
}

backbone_element!(EvidenceVariableCharacteristic, EvidenceVariableCharacteristicBuilder);

impl Visitable for EvidenceVariableCharacteristic {
    fn type_name(&self) -> &'static str {
        "EvidenceVariable.Characteristic"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &CHARACTERISTIC_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children()
            || self.link_id.is_some()
            || self.description.is_some()
            || !self.note.is_empty()
            || self.exclude.is_some()
            || self.definition_reference.is_some()
            || self.definition_canonical.is_some()
            || self.definition_codeable_concept.is_some()
            || self.definition_expression.is_some()
            || self.definition_id.is_some()
            || self.definition_by_type_and_value.is_some()
            || self.definition_by_combination.is_some()
            || self.instances.is_some()
            || self.duration.is_some()
            || !self.time_from_event.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "linkId", self.link_id.as_ref());
            visitor::accept(v, "description", self.description.as_ref());
            visitor::accept_list(v, "note", &self.note);
            visitor::accept(v, "exclude", self.exclude.as_ref());
            visitor::accept(v, "definitionReference", self.definition_reference.as_ref());
            visitor::accept(v, "definitionCanonical", self.definition_canonical.as_ref());
            visitor::accept(
                v,
                "definitionCodeableConcept",
                self.definition_codeable_concept.as_ref(),
            );
            visitor::accept(v, "definitionExpression", self.definition_expression.as_ref());
            visitor::accept(v, "definitionId", self.definition_id.as_ref());
            visitor::accept(
                v,
                "definitionByTypeAndValue",
                self.definition_by_type_and_value.as_ref(),
            );
            visitor::accept(
                v,
                "definitionByCombination",
                self.definition_by_combination.as_ref(),
            );
            visitor::accept(v, "instances", self.instances.as_ref());
            visitor::accept(v, "duration", self.duration.as_ref());
            visitor::accept_list(v, "timeFromEvent", &self.time_from_event);
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct EvidenceVariableCharacteristicBuilder {
    base: BackboneBase,
    link_id: Option<Id>,
    description: Option<Markdown>,
    note: Vec<Annotation>,
    exclude: Option<Boolean>,
    definition_reference: Option<Reference>,
    definition_canonical: Option<Canonical>,
    definition_codeable_concept: Option<CodeableConcept>,
    definition_expression: Option<Expression>,
    definition_id: Option<Id>,
    definition_by_type_and_value: Option<EvidenceVariableCharacteristicDefinitionByTypeAndValue>,
    definition_by_combination: Option<EvidenceVariableCharacteristicDefinitionByCombination>,
    instances: Option<EvidenceVariableCharacteristicInstances>,
    duration: Option<EvidenceVariableCharacteristicDuration>,
    time_from_event: Vec<EvidenceVariableCharacteristicTimeFromEvent>,
    skip_validation: bool,
}

impl EvidenceVariableCharacteristicBuilder {
    pub fn link_id(mut self, link_id: Id) -> Self {
        self.link_id = Some(link_id);
        self
    }

    pub fn description(mut self, description: impl Into<Markdown>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn note(mut self, note: Annotation) -> Self {
        self.note.push(note);
        self
    }

    pub fn set_note(mut self, note: impl IntoIterator<Item = Annotation>) -> Self {
        self.note = note.into_iter().collect();
        self
    }

    pub fn exclude(mut self, exclude: impl Into<Boolean>) -> Self {
        self.exclude = Some(exclude.into());
        self
    }

    pub fn definition_reference(mut self, definition_reference: Reference) -> Self {
        self.definition_reference = Some(definition_reference);
        self
    }

    pub fn definition_canonical(mut self, definition_canonical: Canonical) -> Self {
        self.definition_canonical = Some(definition_canonical);
        self
    }

    pub fn definition_codeable_concept(
        mut self,
        definition_codeable_concept: impl Into<CodeableConcept>,
    ) -> Self {
        self.definition_codeable_concept = Some(definition_codeable_concept.into());
        self
    }

    pub fn definition_expression(mut self, definition_expression: Expression) -> Self {
        self.definition_expression = Some(definition_expression);
        self
    }

    pub fn definition_id(mut self, definition_id: Id) -> Self {
        self.definition_id = Some(definition_id);
        self
    }

    pub fn definition_by_type_and_value(
        mut self,
        definition_by_type_and_value: EvidenceVariableCharacteristicDefinitionByTypeAndValue,
    ) -> Self {
        self.definition_by_type_and_value = Some(definition_by_type_and_value);
        self
    }

    pub fn definition_by_combination(
        mut self,
        definition_by_combination: EvidenceVariableCharacteristicDefinitionByCombination,
    ) -> Self {
        self.definition_by_combination = Some(definition_by_combination);
        self
    }

    /// `Quantity` or `Range`
    pub fn instances(mut self, instances: impl Into<EvidenceVariableCharacteristicInstances>) -> Self {
        self.instances = Some(instances.into());
        self
    }

    /// `Quantity` or `Range`
    pub fn duration(mut self, duration: impl Into<EvidenceVariableCharacteristicDuration>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn time_from_event(
        mut self,
        time_from_event: EvidenceVariableCharacteristicTimeFromEvent,
    ) -> Self {
        self.time_from_event.push(time_from_event);
        self
    }

    pub fn set_time_from_event(
        mut self,
        time_from_event: impl IntoIterator<Item = EvidenceVariableCharacteristicTimeFromEvent>,
    ) -> Self {
        self.time_from_event = time_from_event.into_iter().collect();
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<EvidenceVariableCharacteristic> {
        let validate = !self.skip_validation;
        finish("EvidenceVariable.Characteristic", validate, || {
            let characteristic = EvidenceVariableCharacteristic {
                base: self.base.clone(),
                link_id: self.link_id.clone(),
                description: self.description.clone(),
                note: self.note.clone(),
                exclude: self.exclude.clone(),
                definition_reference: self.definition_reference.clone(),
                definition_canonical: self.definition_canonical.clone(),
                definition_codeable_concept: self.definition_codeable_concept.clone(),
                definition_expression: self.definition_expression.clone(),
                definition_id: self.definition_id.clone(),
                definition_by_type_and_value: self.definition_by_type_and_value.clone(),
                definition_by_combination: self.definition_by_combination.clone(),
                instances: self.instances.clone(),
                duration: self.duration.clone(),
                time_from_event: self.time_from_event.clone(),
                hash: HashCache::default(),
            };
            if validate {
                characteristic.validate()?;
            }
            Ok(characteristic)
        })
    }
}

/// Defines the characteristic using type and value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EvidenceVariableCharacteristicDefinitionByTypeAndValue {
    base: BackboneBase,
    r#type: CodeableConcept,
    method: Vec<CodeableConcept>,
    device: Option<Reference>,
    value: EvidenceVariableCharacteristicDefinitionByTypeAndValueValue,
    offset: Option<CodeableConcept>,
    hash: HashCache,
}

impl EvidenceVariableCharacteristicDefinitionByTypeAndValue {
    pub fn builder() -> EvidenceVariableCharacteristicDefinitionByTypeAndValueBuilder {
        EvidenceVariableCharacteristicDefinitionByTypeAndValueBuilder::default()
    }

    pub fn to_builder(&self) -> EvidenceVariableCharacteristicDefinitionByTypeAndValueBuilder {
        EvidenceVariableCharacteristicDefinitionByTypeAndValueBuilder {
            base: self.base.clone(),
            r#type: Some(self.r#type.clone()),
            method: self.method.clone(),
            device: self.device.clone(),
            value: Some(self.value.clone()),
            offset: self.offset.clone(),
            skip_validation: false,
        }
    }

    /// Expresses the type of characteristic
    pub fn r#type(&self) -> &CodeableConcept {
        &self.r#type
    }

    pub fn method(&self) -> &[CodeableConcept] {
        &self.method
    }

    /// Device used for determining characteristic
    pub fn device(&self) -> Option<&Reference> {
        self.device.as_ref()
    }

    pub fn value(&self) -> &EvidenceVariableCharacteristicDefinitionByTypeAndValueValue {
        &self.value
    }

    /// Reference point for valueQuantity or valueRange
    pub fn offset(&self) -> Option<&CodeableConcept> {
        self.offset.as_ref()
    }

    fn validate(&self) -> Result<()> {
        validation::choice_element(Some(&self.value), "value", TYPE_AND_VALUE_TYPES)?;
        validation::check_reference_type(self.device.as_ref(), "device", DEVICE_TARGETS)?;
        validation::require_value_or_children(self)
    }
}

backbone_element!(
    EvidenceVariableCharacteristicDefinitionByTypeAndValue,
    EvidenceVariableCharacteristicDefinitionByTypeAndValueBuilder
);

impl Visitable for EvidenceVariableCharacteristicDefinitionByTypeAndValue {
    fn type_name(&self) -> &'static str {
        "EvidenceVariable.Characteristic.DefinitionByTypeAndValue"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &DEFINITION_BY_TYPE_AND_VALUE_INFO
    }

    fn has_children(&self) -> bool {
        true
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            self.r#type.accept("type", None, v);
            visitor::accept_list(v, "method", &self.method);
            visitor::accept(v, "device", self.device.as_ref());
            self.value.accept("value", None, v);
            visitor::accept(v, "offset", self.offset.as_ref());
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct EvidenceVariableCharacteristicDefinitionByTypeAndValueBuilder {
    base: BackboneBase,
    r#type: Option<CodeableConcept>,
    method: Vec<CodeableConcept>,
    device: Option<Reference>,
    value: Option<EvidenceVariableCharacteristicDefinitionByTypeAndValueValue>,
    offset: Option<CodeableConcept>,
    skip_validation: bool,
}

impl EvidenceVariableCharacteristicDefinitionByTypeAndValueBuilder {
    pub fn r#type(mut self, r#type: impl Into<CodeableConcept>) -> Self {
        self.r#type = Some(r#type.into());
        self
    }

    pub fn method(mut self, method: impl Into<CodeableConcept>) -> Self {
        self.method.push(method.into());
        self
    }

    pub fn set_method(mut self, method: impl IntoIterator<Item = CodeableConcept>) -> Self {
        self.method = method.into_iter().collect();
        self
    }

    pub fn device(mut self, device: Reference) -> Self {
        self.device = Some(device);
        self
    }

    pub fn value(
        mut self,
        value: impl Into<EvidenceVariableCharacteristicDefinitionByTypeAndValueValue>,
    ) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn offset(mut self, offset: impl Into<CodeableConcept>) -> Self {
        self.offset = Some(offset.into());
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<EvidenceVariableCharacteristicDefinitionByTypeAndValue> {
        let validate = !self.skip_validation;
        finish(
            "EvidenceVariable.Characteristic.DefinitionByTypeAndValue",
            validate,
            || {
                let definition = EvidenceVariableCharacteristicDefinitionByTypeAndValue {
                    base: self.base.clone(),
                    r#type: validation::require_non_null(self.r#type.clone(), "type")?,
                    method: self.method.clone(),
                    device: self.device.clone(),
                    value: validation::require_choice_element(
                        self.value.clone(),
                        "value",
                        TYPE_AND_VALUE_TYPES,
                    )?,
                    offset: self.offset.clone(),
                    hash: HashCache::default(),
                };
                if validate {
                    definition.validate()?;
                }
                Ok(definition)
            },
        )
    }
}

/// Used to specify how two or more characteristics are combined
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EvidenceVariableCharacteristicDefinitionByCombination {
    base: BackboneBase,
    code: Coded<CharacteristicCombination>,
    threshold: Option<PositiveInt>,
    characteristic: Vec<EvidenceVariableCharacteristic>,
    hash: HashCache,
}

impl EvidenceVariableCharacteristicDefinitionByCombination {
    pub fn builder() -> EvidenceVariableCharacteristicDefinitionByCombinationBuilder {
        EvidenceVariableCharacteristicDefinitionByCombinationBuilder::default()
    }

    pub fn to_builder(&self) -> EvidenceVariableCharacteristicDefinitionByCombinationBuilder {
        EvidenceVariableCharacteristicDefinitionByCombinationBuilder {
            base: self.base.clone(),
            code: Some(self.code.clone()),
            threshold: self.threshold.clone(),
            characteristic: self.characteristic.clone(),
            skip_validation: false,
        }
    }

    pub fn code(&self) -> &Coded<CharacteristicCombination> {
        &self.code
    }

    /// Provides the value of "n" when "at-least" or "at-most" codes are used
    pub fn threshold(&self) -> Option<&PositiveInt> {
        self.threshold.as_ref()
    }

    pub fn characteristic(&self) -> &[EvidenceVariableCharacteristic] {
        &self.characteristic
    }

    fn validate(&self) -> Result<()> {
        validation::check_non_empty_list(&self.characteristic, "characteristic")?;
        validation::require_value_or_children(self)
    }
}

backbone_element!(
    EvidenceVariableCharacteristicDefinitionByCombination,
    EvidenceVariableCharacteristicDefinitionByCombinationBuilder
);

impl Visitable for EvidenceVariableCharacteristicDefinitionByCombination {
    fn type_name(&self) -> &'static str {
        "EvidenceVariable.Characteristic.DefinitionByCombination"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &DEFINITION_BY_COMBINATION_INFO
    }

    fn has_children(&self) -> bool {
        true
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            self.code.accept("code", None, v);
            visitor::accept(v, "threshold", self.threshold.as_ref());
            visitor::accept_list(v, "characteristic", &self.characteristic);
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct EvidenceVariableCharacteristicDefinitionByCombinationBuilder {
    base: BackboneBase,
    code: Option<Coded<CharacteristicCombination>>,
    threshold: Option<PositiveInt>,
    characteristic: Vec<EvidenceVariableCharacteristic>,
    skip_validation: bool,
}

impl EvidenceVariableCharacteristicDefinitionByCombinationBuilder {
    pub fn code(mut self, code: impl Into<Coded<CharacteristicCombination>>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn threshold(mut self, threshold: PositiveInt) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn characteristic(mut self, characteristic: EvidenceVariableCharacteristic) -> Self {
        self.characteristic.push(characteristic);
        self
    }

    pub fn set_characteristic(
        mut self,
        characteristic: impl IntoIterator<Item = EvidenceVariableCharacteristic>,
    ) -> Self {
        self.characteristic = characteristic.into_iter().collect();
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<EvidenceVariableCharacteristicDefinitionByCombination> {
        let validate = !self.skip_validation;
        finish(
            "EvidenceVariable.Characteristic.DefinitionByCombination",
            validate,
            || {
                let combination = EvidenceVariableCharacteristicDefinitionByCombination {
                    base: self.base.clone(),
                    code: validation::require_non_null(self.code.clone(), "code")?,
                    threshold: self.threshold.clone(),
                    characteristic: self.characteristic.clone(),
                    hash: HashCache::default(),
                };
                if validate {
                    combination.validate()?;
                }
                Ok(combination)
            },
        )
    }
}

/// Timing in which the characteristic is determined
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EvidenceVariableCharacteristicTimeFromEvent {
    base: BackboneBase,
    description: Option<Markdown>,
    note: Vec<Annotation>,
    event: Option<EvidenceVariableCharacteristicTimeFromEventEvent>,
    quantity: Option<Quantity>,
    range: Option<Range>,
    hash: HashCache,
}

impl EvidenceVariableCharacteristicTimeFromEvent {
    pub fn builder() -> EvidenceVariableCharacteristicTimeFromEventBuilder {
        EvidenceVariableCharacteristicTimeFromEventBuilder::default()
    }

    pub fn to_builder(&self) -> EvidenceVariableCharacteristicTimeFromEventBuilder {
        EvidenceVariableCharacteristicTimeFromEventBuilder {
            base: self.base.clone(),
            description: self.description.clone(),
            note: self.note.clone(),
            event: self.event.clone(),
            quantity: self.quantity.clone(),
            range: self.range.clone(),
            skip_validation: false,
        }
    }

    pub fn description(&self) -> Option<&Markdown> {
        self.description.as_ref()
    }

    pub fn note(&self) -> &[Annotation] {
        &self.note
    }

    /// The event used as a base point (reference point) in time
    pub fn event(&self) -> Option<&EvidenceVariableCharacteristicTimeFromEventEvent> {
        self.event.as_ref()
    }

    pub fn quantity(&self) -> Option<&Quantity> {
        self.quantity.as_ref()
    }

    pub fn range(&self) -> Option<&Range> {
        self.range.as_ref()
    }

    fn validate(&self) -> Result<()> {
        validation::choice_element(self.event.as_ref(), "event", EVENT_TYPES)?;
        validation::require_value_or_children(self)
    }
}

backbone_element!(
    EvidenceVariableCharacteristicTimeFromEvent,
    EvidenceVariableCharacteristicTimeFromEventBuilder
);

impl Visitable for EvidenceVariableCharacteristicTimeFromEvent {
    fn type_name(&self) -> &'static str {
        "EvidenceVariable.Characteristic.TimeFromEvent"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &TIME_FROM_EVENT_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children()
            || self.description.is_some()
            || !self.note.is_empty()
            || self.event.is_some()
            || self.quantity.is_some()
            || self.range.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "description", self.description.as_ref());
            visitor::accept_list(v, "note", &self.note);
            visitor::accept(v, "event", self.event.as_ref());
            visitor::accept(v, "quantity", self.quantity.as_ref());
            visitor::accept(v, "range", self.range.as_ref());
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct EvidenceVariableCharacteristicTimeFromEventBuilder {
    base: BackboneBase,
    description: Option<Markdown>,
    note: Vec<Annotation>,
    event: Option<EvidenceVariableCharacteristicTimeFromEventEvent>,
    quantity: Option<Quantity>,
    range: Option<Range>,
    skip_validation: bool,
}

impl EvidenceVariableCharacteristicTimeFromEventBuilder {
    pub fn description(mut self, description: impl Into<Markdown>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn note(mut self, note: Annotation) -> Self {
        self.note.push(note);
        self
    }

    pub fn set_note(mut self, note: impl IntoIterator<Item = Annotation>) -> Self {
        self.note = note.into_iter().collect();
        self
    }

    /// `CodeableConcept`, `Reference`, `DateTime` or `Id`
    pub fn event(
        mut self,
        event: impl Into<EvidenceVariableCharacteristicTimeFromEventEvent>,
    ) -> Self {
        self.event = Some(event.into());
        self
    }

    pub fn quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<EvidenceVariableCharacteristicTimeFromEvent> {
        let validate = !self.skip_validation;
        finish("EvidenceVariable.Characteristic.TimeFromEvent", validate, || {
            let time_from_event = EvidenceVariableCharacteristicTimeFromEvent {
                base: self.base.clone(),
                description: self.description.clone(),
                note: self.note.clone(),
                event: self.event.clone(),
                quantity: self.quantity.clone(),
                range: self.range.clone(),
                hash: HashCache::default(),
            };
            if validate {
                time_from_event.validate()?;
            }
            Ok(time_from_event)
        })
    }
}

/// A grouping for ordinal or polychotomous variables
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EvidenceVariableCategory {
    base: BackboneBase,
    name: Option<FhirString>,
    value: Option<EvidenceVariableCategoryValue>,
    hash: HashCache,
}

impl EvidenceVariableCategory {
    pub fn builder() -> EvidenceVariableCategoryBuilder {
        EvidenceVariableCategoryBuilder::default()
    }

    pub fn to_builder(&self) -> EvidenceVariableCategoryBuilder {
        EvidenceVariableCategoryBuilder {
            base: self.base.clone(),
            name: self.name.clone(),
            value: self.value.clone(),
            skip_validation: false,
        }
    }

    /// Description of the grouping
    pub fn name(&self) -> Option<&FhirString> {
        self.name.as_ref()
    }

    pub fn value(&self) -> Option<&EvidenceVariableCategoryValue> {
        self.value.as_ref()
    }

    fn validate(&self) -> Result<()> {
        validation::choice_element(self.value.as_ref(), "value", CATEGORY_VALUE_TYPES)?;
        validation::require_value_or_children(self)
    }
}

backbone_element!(EvidenceVariableCategory, EvidenceVariableCategoryBuilder);

impl Visitable for EvidenceVariableCategory {
    fn type_name(&self) -> &'static str {
        "EvidenceVariable.Category"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &CATEGORY_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children() || self.name.is_some() || self.value.is_some()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "name", self.name.as_ref());
            visitor::accept(v, "value", self.value.as_ref());
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct EvidenceVariableCategoryBuilder {
    base: BackboneBase,
    name: Option<FhirString>,
    value: Option<EvidenceVariableCategoryValue>,
    skip_validation: bool,
}

impl EvidenceVariableCategoryBuilder {
    pub fn name(mut self, name: impl Into<FhirString>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// `CodeableConcept`, `Quantity` or `Range`
    pub fn value(mut self, value: impl Into<EvidenceVariableCategoryValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<EvidenceVariableCategory> {
        let validate = !self.skip_validation;
        finish("EvidenceVariable.Category", validate, || {
            let category = EvidenceVariableCategory {
                base: self.base.clone(),
                name: self.name.clone(),
                value: self.value.clone(),
                hash: HashCache::default(),
            };
            if validate {
                category.validate()?;
            }
            Ok(category)
        })
    }
}

pub static EVIDENCE_VARIABLE_INFO: TypeInfo = TypeInfo {
    name: "EvidenceVariable",
    kind: TypeKind::Resource,
    base: Some("DomainResource"),
    url: Some("http://hl7.org/fhir/StructureDefinition/EvidenceVariable"),
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
        FieldInfo::new("title", &["string"]).summary(),
        FieldInfo::new("shortTitle", &["string"]).summary(),
        FieldInfo::new("status", &["code"]).required().summary().modifier().binding(
            "PublicationStatus",
            BindingStrength::Required,
            "http://hl7.org/fhir/ValueSet/publication-status|5.0.0",
        ),
        FieldInfo::new("experimental", &["boolean"]),
        FieldInfo::new("date", &["dateTime"]).summary(),
        FieldInfo::new("publisher", &["string"]).summary(),
        FieldInfo::new("contact", &["ContactDetail"]).list().summary(),
        FieldInfo::new("description", &["markdown"]).summary(),
        FieldInfo::new("note", &["Annotation"]).list(),
        FieldInfo::new("useContext", &["UsageContext"]).list().summary(),
        FieldInfo::new("purpose", &["markdown"]),
        FieldInfo::new("copyright", &["markdown"]),
        FieldInfo::new("copyrightLabel", &["string"]),
        FieldInfo::new("approvalDate", &["date"]),
        FieldInfo::new("lastReviewDate", &["date"]),
        FieldInfo::new("effectivePeriod", &["Period"]),
        FieldInfo::new("author", &["ContactDetail"]).list(),
        FieldInfo::new("editor", &["ContactDetail"]).list(),
        FieldInfo::new("reviewer", &["ContactDetail"]).list(),
        FieldInfo::new("endorser", &["ContactDetail"]).list(),
        FieldInfo::new("relatedArtifact", &["RelatedArtifact"]).list(),
        FieldInfo::new("actual", &["boolean"]),
        FieldInfo::new("characteristic", &["EvidenceVariable.Characteristic"])
            .list()
            .summary(),
        FieldInfo::new("handling", &["code"]).binding(
            "EvidenceVariableHandling",
            BindingStrength::Required,
            "http://hl7.org/fhir/ValueSet/variable-handling|5.0.0",
        ),
        FieldInfo::new("category", &["EvidenceVariable.Category"]).list(),
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
            location: "EvidenceVariable.url",
            description: "URL should not contain | or # - these characters make processing canonical references problematic",
            expression: "exists() implies matches('^[^|# ]+$')",
        },
        ConstraintInfo {
            id: "evv-1",
            level: ConstraintLevel::Rule,
            location: "EvidenceVariable.characteristic",
            description: "In a characteristic, at most one of these six elements shall be used: definitionReference or definitionCanonical or definitionCodeableConcept or definitionId or definitionByTypeAndValue or definitionByCombination",
            expression: "(definitionReference.count() + definitionCanonical.count() + definitionCodeableConcept.count() + definitionId.count() + definitionByTypeAndValue.count() + definitionByCombination.count())  < 2",
        },
        ConstraintInfo {
            id: "evidenceVariable-2",
            level: ConstraintLevel::Warning,
            location: "(base)",
            description: "SHALL, if possible, contain a code from value set http://hl7.org/fhir/ValueSet/version-algorithm",
            expression: "versionAlgorithm.as(String).exists() implies (versionAlgorithm.as(String).memberOf('http://hl7.org/fhir/ValueSet/version-algorithm', 'extensible'))",
        },
    ],
};

pub static CHARACTERISTIC_INFO: TypeInfo = TypeInfo {
    name: "EvidenceVariable.Characteristic",
    kind: TypeKind::BackboneElement,
    base: Some("BackboneElement"),
    url: None,
    fields: &[
        FieldInfo::new("linkId", &["id"]),
        FieldInfo::new("description", &["markdown"]),
        FieldInfo::new("note", &["Annotation"]).list(),
        FieldInfo::new("exclude", &["boolean"]),
        FieldInfo::new("definitionReference", &["Reference"])
            .summary()
            .targets(DEFINITION_TARGETS),
        FieldInfo::new("definitionCanonical", &["canonical"]).summary(),
        FieldInfo::new("definitionCodeableConcept", &["CodeableConcept"]).summary(),
        FieldInfo::new("definitionExpression", &["Expression"]).summary(),
        FieldInfo::new("definitionId", &["id"]).summary(),
        FieldInfo::new(
            "definitionByTypeAndValue",
            &["EvidenceVariable.Characteristic.DefinitionByTypeAndValue"],
        )
        .summary(),
        FieldInfo::new(
            "definitionByCombination",
            &["EvidenceVariable.Characteristic.DefinitionByCombination"],
        ),
        FieldInfo::new("instances", QUANTITY_OR_RANGE),
        FieldInfo::new("duration", QUANTITY_OR_RANGE),
        FieldInfo::new(
            "timeFromEvent",
            &["EvidenceVariable.Characteristic.TimeFromEvent"],
        )
        .list(),
    ],
    constraints: &[],
};

pub static DEFINITION_BY_TYPE_AND_VALUE_INFO: TypeInfo = TypeInfo {
    name: "EvidenceVariable.Characteristic.DefinitionByTypeAndValue",
    kind: TypeKind::BackboneElement,
    base: Some("BackboneElement"),
    url: None,
    fields: &[
        FieldInfo::new("type", &["CodeableConcept"])
            .required()
            .summary()
            .binding(
                "UsageContextType",
                BindingStrength::Example,
                "http://terminology.hl7.org/ValueSet/usage-context-type",
            ),
        FieldInfo::new("method", &["CodeableConcept"]).list().binding(
            "DefinitionMethod",
            BindingStrength::Example,
            "http://hl7.org/fhir/ValueSet/definition-method",
        ),
        FieldInfo::new("device", &["Reference"]).targets(DEVICE_TARGETS),
        FieldInfo::new("value", TYPE_AND_VALUE_TYPES).required().summary(),
        FieldInfo::new("offset", &["CodeableConcept"]).binding(
            "CharacteristicOffset",
            BindingStrength::Example,
            "http://hl7.org/fhir/ValueSet/characteristic-offset",
        ),
    ],
    constraints: &[],
};

pub static DEFINITION_BY_COMBINATION_INFO: TypeInfo = TypeInfo {
    name: "EvidenceVariable.Characteristic.DefinitionByCombination",
    kind: TypeKind::BackboneElement,
    base: Some("BackboneElement"),
    url: None,
    fields: &[
        FieldInfo::new("code", &["code"]).required().binding(
            "CharacteristicCombination",
            BindingStrength::Required,
            "http://hl7.org/fhir/ValueSet/characteristic-combination|5.0.0",
        ),
        FieldInfo::new("threshold", &["positiveInt"]),
        FieldInfo::new("characteristic", &["EvidenceVariable.Characteristic"])
            .required()
            .list(),
    ],
    constraints: &[],
};

pub static TIME_FROM_EVENT_INFO: TypeInfo = TypeInfo {
    name: "EvidenceVariable.Characteristic.TimeFromEvent",
    kind: TypeKind::BackboneElement,
    base: Some("BackboneElement"),
    url: None,
    fields: &[
        FieldInfo::new("description", &["markdown"]),
        FieldInfo::new("note", &["Annotation"]).list(),
        FieldInfo::new("event", EVENT_TYPES).binding(
            "EvidenceVariableEvent",
            BindingStrength::Example,
            "http://hl7.org/fhir/ValueSet/evidence-variable-event",
        ),
        FieldInfo::new("quantity", &["Quantity"]),
        FieldInfo::new("range", &["Range"]),
    ],
    constraints: &[],
};

pub static CATEGORY_INFO: TypeInfo = TypeInfo {
    name: "EvidenceVariable.Category",
    kind: TypeKind::BackboneElement,
    base: Some("BackboneElement"),
    url: None,
    fields: &[
        FieldInfo::new("name", &["string"]),
        FieldInfo::new("value", CATEGORY_VALUE_TYPES),
    ],
    constraints: &[],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn characteristic(text: &str) -> EvidenceVariableCharacteristic {
        EvidenceVariableCharacteristic::builder()
            .definition_codeable_concept(CodeableConcept::text_only(text))
            .build()
            .unwrap()
    }

    #[test]
    fn test_combination_requires_characteristics() {
        let err = EvidenceVariableCharacteristicDefinitionByCombination::builder()
            .code(CharacteristicCombination::AllOf)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::EmptyList { ref element } if element == "characteristic"));

        let combination = EvidenceVariableCharacteristicDefinitionByCombination::builder()
            .code(CharacteristicCombination::AtLeast)
            .threshold(PositiveInt::new(1).unwrap())
            .characteristic(characteristic("adult"))
            .characteristic(characteristic("smoker"))
            .build()
            .unwrap();
        assert_eq!(combination.characteristic().len(), 2);
    }

    #[test]
    fn test_type_and_value_requires_value() {
        let err = EvidenceVariableCharacteristicDefinitionByTypeAndValue::builder()
            .r#type(CodeableConcept::text_only("age"))
            .build()
            .unwrap_err();
        assert_eq!(err.element(), Some("value"));
    }

    #[test]
    fn test_definition_reference_targets() {
        let err = EvidenceVariableCharacteristic::builder()
            .definition_reference(
                Reference::builder()
                    .reference("Patient/p1")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidReferenceType { ref element, .. } if element == "definitionReference"));

        let ok = EvidenceVariableCharacteristic::builder()
            .definition_reference(
                Reference::builder()
                    .reference("Group/adults")
                    .build()
                    .unwrap(),
            )
            .build();
        assert!(ok.is_ok());
    }

    #[test]
    fn test_nested_characteristics_round_trip() {
        let variable = EvidenceVariable::builder()
            .status(PublicationStatus::Active)
            .characteristic(
                EvidenceVariableCharacteristic::builder()
                    .definition_by_combination(
                        EvidenceVariableCharacteristicDefinitionByCombination::builder()
                            .code(CharacteristicCombination::AnyOf)
                            .characteristic(characteristic("diabetes"))
                            .build()
                            .unwrap(),
                    )
                    .build()
                    .unwrap(),
            )
            .handling(EvidenceVariableHandling::Dichotomous)
            .build()
            .unwrap();
        assert_eq!(variable, variable.to_builder().build().unwrap());
        assert_eq!(variable.hash_code(), variable.to_builder().build().unwrap().hash_code());
    }
}
