//! Meta and Narrative

use std::any::Any;

use crate::builder::{finish, ElementBuilder};
use crate::error::Result;
use crate::model_support::{BindingStrength, FieldInfo, TypeInfo, TypeKind};
use crate::types::element::complex_element;
use crate::types::{Canonical, Coded, Coding, ElementBase, Id, Instant, NarrativeStatus, Uri, Xhtml};
use crate::validation;
use crate::visitor::{self, Visitable, Visitor};

/// Metadata about a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Meta {
    base: ElementBase,
    version_id: Option<Id>,
    last_updated: Option<Instant>,
    source: Option<Uri>,
    profile: Vec<Canonical>,
    security: Vec<Coding>,
    tag: Vec<Coding>,
}

impl Meta {
    pub fn builder() -> MetaBuilder {
        MetaBuilder::default()
    }

    pub fn to_builder(&self) -> MetaBuilder {
        MetaBuilder {
            base: self.base.clone(),
            version_id: self.version_id.clone(),
            last_updated: self.last_updated.clone(),
            source: self.source.clone(),
            profile: self.profile.clone(),
            security: self.security.clone(),
            tag: self.tag.clone(),
            skip_validation: false,
        }
    }

    pub fn version_id(&self) -> Option<&Id> {
        self.version_id.as_ref()
    }

    pub fn last_updated(&self) -> Option<&Instant> {
        self.last_updated.as_ref()
    }

    pub fn source(&self) -> Option<&Uri> {
        self.source.as_ref()
    }

    pub fn profile(&self) -> &[Canonical] {
        &self.profile
    }

    pub fn security(&self) -> &[Coding] {
        &self.security
    }

    pub fn tag(&self) -> &[Coding] {
        &self.tag
    }

    fn validate(&self) -> Result<()> {
        validation::require_value_or_children(self)
    }
}

complex_element!(Meta);

impl Visitable for Meta {
    fn type_name(&self) -> &'static str {
        "Meta"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &META_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children()
            || self.version_id.is_some()
            || self.last_updated.is_some()
            || self.source.is_some()
            || !self.profile.is_empty()
            || !self.security.is_empty()
            || !self.tag.is_empty()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept(v, "versionId", self.version_id.as_ref());
            visitor::accept(v, "lastUpdated", self.last_updated.as_ref());
            visitor::accept(v, "source", self.source.as_ref());
            visitor::accept_list(v, "profile", &self.profile);
            visitor::accept_list(v, "security", &self.security);
            visitor::accept_list(v, "tag", &self.tag);
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetaBuilder {
    base: ElementBase,
    version_id: Option<Id>,
    last_updated: Option<Instant>,
    source: Option<Uri>,
    profile: Vec<Canonical>,
    security: Vec<Coding>,
    tag: Vec<Coding>,
    skip_validation: bool,
}

impl ElementBuilder for MetaBuilder {
    fn element_base(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl MetaBuilder {
    pub fn version_id(mut self, version_id: Id) -> Self {
        self.version_id = Some(version_id);
        self
    }

    pub fn last_updated(mut self, last_updated: impl Into<Instant>) -> Self {
        self.last_updated = Some(last_updated.into());
        self
    }

    pub fn source(mut self, source: Uri) -> Self {
        self.source = Some(source);
        self
    }

    pub fn profile(mut self, profile: Canonical) -> Self {
        self.profile.push(profile);
        self
    }

    pub fn set_profile(mut self, profile: impl IntoIterator<Item = Canonical>) -> Self {
        self.profile = profile.into_iter().collect();
        self
    }

    pub fn security(mut self, security: Coding) -> Self {
        self.security.push(security);
        self
    }

    pub fn set_security(mut self, security: impl IntoIterator<Item = Coding>) -> Self {
        self.security = security.into_iter().collect();
        self
    }

    pub fn tag(mut self, tag: Coding) -> Self {
        self.tag.push(tag);
        self
    }

    pub fn set_tag(mut self, tag: impl IntoIterator<Item = Coding>) -> Self {
        self.tag = tag.into_iter().collect();
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<Meta> {
        let validate = !self.skip_validation;
        finish("Meta", validate, || {
            let meta = Meta {
                base: self.base.clone(),
                version_id: self.version_id.clone(),
                last_updated: self.last_updated.clone(),
                source: self.source.clone(),
                profile: self.profile.clone(),
                security: self.security.clone(),
                tag: self.tag.clone(),
            };
            if validate {
                meta.validate()?;
            }
            Ok(meta)
        })
    }
}

/// Human-readable summary of the resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Narrative {
    base: ElementBase,
    status: Coded<NarrativeStatus>,
    div: Xhtml,
}

impl Narrative {
    pub fn builder() -> NarrativeBuilder {
        NarrativeBuilder::default()
    }

    pub fn to_builder(&self) -> NarrativeBuilder {
        NarrativeBuilder {
            base: self.base.clone(),
            status: Some(self.status.clone()),
            div: Some(self.div.clone()),
            skip_validation: false,
        }
    }

    pub fn status(&self) -> &Coded<NarrativeStatus> {
        &self.status
    }

    pub fn div(&self) -> &Xhtml {
        &self.div
    }

    fn validate(&self) -> Result<()> {
        validation::require_value_or_children(self)
    }
}

complex_element!(Narrative);

impl Visitable for Narrative {
    fn type_name(&self) -> &'static str {
        "Narrative"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &NARRATIVE_INFO
    }

    fn has_children(&self) -> bool {
        true
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            self.status.accept("status", None, v);
            self.div.accept("div", None, v);
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct NarrativeBuilder {
    base: ElementBase,
    status: Option<Coded<NarrativeStatus>>,
    div: Option<Xhtml>,
    skip_validation: bool,
}

impl ElementBuilder for NarrativeBuilder {
    fn element_base(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl NarrativeBuilder {
    pub fn status(mut self, status: impl Into<Coded<NarrativeStatus>>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn div(mut self, div: Xhtml) -> Self {
        self.div = Some(div);
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<Narrative> {
        let validate = !self.skip_validation;
        finish("Narrative", validate, || {
            let narrative = Narrative {
                base: self.base.clone(),
                status: validation::require_non_null(self.status.clone(), "status")?,
                div: validation::require_non_null(self.div.clone(), "div")?,
            };
            if validate {
                narrative.validate()?;
            }
            Ok(narrative)
        })
    }
}

pub static META_INFO: TypeInfo = TypeInfo {
    name: "Meta",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    url: Some("http://hl7.org/fhir/StructureDefinition/Meta"),
    fields: &[
        FieldInfo::new("versionId", &["id"]).summary(),
        FieldInfo::new("lastUpdated", &["instant"]).summary(),
        FieldInfo::new("source", &["uri"]).summary(),
        FieldInfo::new("profile", &["canonical"]).list().summary(),
        FieldInfo::new("security", &["Coding"])
            .list()
            .summary()
            .binding(
                "SecurityLabels",
                BindingStrength::Extensible,
                "http://hl7.org/fhir/ValueSet/security-labels",
            ),
        FieldInfo::new("tag", &["Coding"]).list().summary().binding(
            "Tags",
            BindingStrength::Example,
            "http://hl7.org/fhir/ValueSet/common-tags",
        ),
    ],
    constraints: &[],
};

pub static NARRATIVE_INFO: TypeInfo = TypeInfo {
    name: "Narrative",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    url: Some("http://hl7.org/fhir/StructureDefinition/Narrative"),
    fields: &[
        FieldInfo::new("status", &["code"]).required().binding(
            "NarrativeStatus",
            BindingStrength::Required,
            "http://hl7.org/fhir/ValueSet/narrative-status|5.0.0",
        ),
        FieldInfo::new("div", &["xhtml"]).required(),
    ],
    constraints: &[],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_narrative_requires_status_and_div() {
        let err = Narrative::builder()
            .div(Xhtml::new("<div xmlns=\"http://www.w3.org/1999/xhtml\">ok</div>").unwrap())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::MissingRequired { ref element } if element == "status"));

        let narrative = Narrative::builder()
            .status(NarrativeStatus::Generated)
            .div(Xhtml::new("<div xmlns=\"http://www.w3.org/1999/xhtml\">ok</div>").unwrap())
            .build()
            .unwrap();
        assert_eq!(narrative.status().value(), Some(NarrativeStatus::Generated));
    }

    #[test]
    fn test_meta_lists() {
        let meta = Meta::builder()
            .version_id(Id::new("2").unwrap())
            .profile(Canonical::new("http://example.org/StructureDefinition/a").unwrap())
            .profile(Canonical::new("http://example.org/StructureDefinition/b").unwrap())
            .build()
            .unwrap();
        assert_eq!(meta.profile().len(), 2);
        assert!(meta.tag().is_empty());
    }
}
