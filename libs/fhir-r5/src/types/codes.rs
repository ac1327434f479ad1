//! Coded values bound to a required value set
//!
//! `Coded<E>` is a `code` primitive whose value is restricted to the enum `E`.

use std::any::Any;
use std::fmt::{self, Debug};
use std::hash::Hash;

use crate::builder::{finish, ElementBuilder};
use crate::error::{Error, Result};
use crate::model_support::TypeInfo;
use crate::types::primitives::CODE_INFO;
use crate::types::{Element, ElementBase, Extension};
use crate::validation;
use crate::visitor::{self, PrimitiveValue, Visitable, Visitor};

/// An enumerated code value
pub trait CodeValue: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Canonical URL of the value set the codes belong to
    const VALUE_SET: &'static str;

    /// All codes in declaration order
    const VALUES: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn from_code(code: &str) -> Option<Self> {
        Self::VALUES.iter().copied().find(|v| v.as_str() == code)
    }
}

/// A `code` element restricted to the values of `E`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coded<E: CodeValue> {
    base: ElementBase,
    value: Option<E>,
}

impl<E: CodeValue> Coded<E> {
    pub fn builder() -> CodedBuilder<E> {
        CodedBuilder::default()
    }

    pub fn to_builder(&self) -> CodedBuilder<E> {
        CodedBuilder {
            base: self.base.clone(),
            value: self.value,
            skip_validation: false,
        }
    }

    /// Parse a code string, failing when it is not a member of `E`.
    pub fn parse(code: &str) -> Result<Self> {
        E::from_code(code).map(Self::from).ok_or_else(|| {
            Error::invalid_value(
                "code",
                code,
                format!("not a member of value set {}", E::VALUE_SET),
            )
        })
    }

    pub fn value(&self) -> Option<E> {
        self.value
    }

    fn validate(&self) -> Result<()> {
        validation::require_value_or_children(self)
    }
}

impl<E: CodeValue> From<E> for Coded<E> {
    fn from(value: E) -> Self {
        Coded {
            base: ElementBase::default(),
            value: Some(value),
        }
    }
}

impl<E: CodeValue> Element for Coded<E> {
    fn id(&self) -> Option<&str> {
        self.base.id()
    }

    fn extension(&self) -> &[Extension] {
        self.base.extension()
    }

    fn has_value(&self) -> bool {
        self.value.is_some()
    }

    fn primitive_value(&self) -> Option<PrimitiveValue<'_>> {
        self.value.map(|v| PrimitiveValue::String(v.as_str()))
    }
}

impl<E: CodeValue> Visitable for Coded<E> {
    fn type_name(&self) -> &'static str {
        "code"
    }

    fn type_info(&self) -> &'static TypeInfo {
        &CODE_INFO
    }

    fn has_children(&self) -> bool {
        self.base.has_children()
    }

    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        visitor::visit_node(visitor, name, index, self, |v| {
            self.base.accept_children(v);
            visitor::accept_value(v, "value", self.primitive_value());
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone)]
pub struct CodedBuilder<E: CodeValue> {
    base: ElementBase,
    value: Option<E>,
    skip_validation: bool,
}

impl<E: CodeValue> Default for CodedBuilder<E> {
    fn default() -> Self {
        Self {
            base: ElementBase::default(),
            value: None,
            skip_validation: false,
        }
    }
}

impl<E: CodeValue> ElementBuilder for CodedBuilder<E> {
    fn element_base(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl<E: CodeValue> CodedBuilder<E> {
    pub fn value(mut self, value: E) -> Self {
        self.value = Some(value);
        self
    }

    pub fn validating(mut self, validating: bool) -> Self {
        self.skip_validation = !validating;
        self
    }

    pub fn build(&self) -> Result<Coded<E>> {
        let validate = !self.skip_validation;
        finish("code", validate, || {
            let coded = Coded {
                base: self.base.clone(),
                value: self.value,
            };
            if validate {
                coded.validate()?;
            }
            Ok(coded)
        })
    }
}

macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $value_set:literal {
            $($variant:ident => $code:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl CodeValue for $name {
            const VALUE_SET: &'static str = $value_set;
            const VALUES: &'static [Self] = &[$($name::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

code_enum!(
    /// Indicator for type of action performed during the event that generated the audit
    AuditEventAction, "http://hl7.org/fhir/ValueSet/audit-event-action" {
        Create => "C",
        Read => "R",
        Update => "U",
        Delete => "D",
        Execute => "E",
    }
);

code_enum!(
    /// The severity of the audit entry
    AuditEventSeverity, "http://hl7.org/fhir/ValueSet/audit-event-severity" {
        Emergency => "emergency",
        Alert => "alert",
        Critical => "critical",
        Error => "error",
        Warning => "warning",
        Notice => "notice",
        Informational => "informational",
        Debug => "debug",
    }
);

code_enum!(
    /// The lifecycle status of an artifact
    PublicationStatus, "http://hl7.org/fhir/ValueSet/publication-status" {
        Draft => "draft",
        Active => "active",
        Retired => "retired",
        Unknown => "unknown",
    }
);

code_enum!(
    /// The status of a resource narrative
    NarrativeStatus, "http://hl7.org/fhir/ValueSet/narrative-status" {
        Generated => "generated",
        Extensions => "extensions",
        Additional => "additional",
        Empty => "empty",
    }
);

code_enum!(
    /// How the Quantity should be understood and represented
    QuantityComparator, "http://hl7.org/fhir/ValueSet/quantity-comparator" {
        LessThan => "<",
        LessOrEqual => "<=",
        GreaterOrEqual => ">=",
        GreaterThan => ">",
        Sufficient => "ad",
    }
);

code_enum!(
    /// Telecommunications form for contact point
    ContactPointSystem, "http://hl7.org/fhir/ValueSet/contact-point-system" {
        Phone => "phone",
        Fax => "fax",
        Email => "email",
        Pager => "pager",
        Url => "url",
        Sms => "sms",
        Other => "other",
    }
);

code_enum!(
    /// Use of contact point
    ContactPointUse, "http://hl7.org/fhir/ValueSet/contact-point-use" {
        Home => "home",
        Work => "work",
        Temp => "temp",
        Old => "old",
        Mobile => "mobile",
    }
);

code_enum!(
    /// Identifies the purpose for this identifier, if known
    IdentifierUse, "http://hl7.org/fhir/ValueSet/identifier-use" {
        Usual => "usual",
        Official => "official",
        Temp => "temp",
        Secondary => "secondary",
        Old => "old",
    }
);

code_enum!(
    /// The type of relationship to the related artifact
    RelatedArtifactType, "http://hl7.org/fhir/ValueSet/related-artifact-type" {
        Documentation => "documentation",
        Justification => "justification",
        Citation => "citation",
        Predecessor => "predecessor",
        Successor => "successor",
        DerivedFrom => "derived-from",
        DependsOn => "depends-on",
        ComposedOf => "composed-of",
        PartOf => "part-of",
        Amends => "amends",
        AmendedWith => "amended-with",
        Appends => "appends",
        AppendedWith => "appended-with",
        Cites => "cites",
        CitedBy => "cited-by",
        CommentsOn => "comments-on",
        CommentIn => "comment-in",
        Contains => "contains",
        ContainedIn => "contained-in",
        Corrects => "corrects",
        CorrectionIn => "correction-in",
        Replaces => "replaces",
        ReplacedWith => "replaced-with",
        Retracts => "retracts",
        RetractedBy => "retracted-by",
        Signs => "signs",
        SimilarTo => "similar-to",
        Supports => "supports",
        SupportedWith => "supported-with",
        Transforms => "transforms",
        TransformedInto => "transformed-into",
        TransformedWith => "transformed-with",
        Documents => "documents",
        SpecificationOf => "specification-of",
        CreatedWith => "created-with",
        CiteAs => "cite-as",
    }
);

code_enum!(
    /// Publication status of an artifact being referred to
    RelatedArtifactPublicationStatus, "http://hl7.org/fhir/ValueSet/publication-status" {
        Draft => "draft",
        Active => "active",
        Retired => "retired",
        Unknown => "unknown",
    }
);

code_enum!(
    /// Logical grouping of characteristics
    CharacteristicCombination, "http://hl7.org/fhir/ValueSet/characteristic-combination" {
        AllOf => "all-of",
        AnyOf => "any-of",
        AtLeast => "at-least",
        AtMost => "at-most",
        Statistical => "statistical",
        NetEffect => "net-effect",
        Dataset => "dataset",
    }
);

code_enum!(
    /// The handling of the variable in statistical analysis for exposures or outcomes
    EvidenceVariableHandling, "http://hl7.org/fhir/ValueSet/variable-handling" {
        Continuous => "continuous",
        Dichotomous => "dichotomous",
        Ordinal => "ordinal",
        Polychotomous => "polychotomous",
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_strings() {
        assert_eq!(AuditEventAction::Execute.as_str(), "E");
        assert_eq!(QuantityComparator::LessOrEqual.to_string(), "<=");
        assert_eq!(
            RelatedArtifactType::from_code("derived-from"),
            Some(RelatedArtifactType::DerivedFrom)
        );
        assert_eq!(AuditEventSeverity::from_code("fatal"), None);
    }

    #[test]
    fn test_coded_parse() {
        let status = Coded::<PublicationStatus>::parse("active").unwrap();
        assert_eq!(status.value(), Some(PublicationStatus::Active));
        assert_eq!(status.primitive_value(), Some(PrimitiveValue::String("active")));

        let err = Coded::<PublicationStatus>::parse("published").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { .. }));
    }

    #[test]
    fn test_coded_builder() {
        let coded = Coded::builder()
            .id("a1")
            .value(AuditEventAction::Read)
            .build()
            .unwrap();
        assert_eq!(coded, coded.to_builder().build().unwrap());
        assert_eq!(coded.type_name(), "code");
        assert!(Coded::<AuditEventAction>::builder().build().is_err());
    }
}
