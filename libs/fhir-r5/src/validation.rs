//! Build-time validation rules
//!
//! Builders call these while assembling a record. The first failing rule
//! aborts construction. Rules the type system already guarantees (no null list
//! entries, a choice holding exactly one type) have no runtime counterpart.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model_support::is_resource_type;
use crate::types::{Choice, Element, Reference};

/// A required scalar must be present. Returns the unwrapped value.
pub fn require_non_null<T>(value: Option<T>, element: &str) -> Result<T> {
    value.ok_or_else(|| Error::MissingRequired {
        element: element.to_string(),
    })
}

/// A list field; when `required` it must contain at least one entry.
pub fn check_list<T>(list: &[T], element: &str, required: bool) -> Result<()> {
    if required && list.is_empty() {
        return Err(Error::EmptyList {
            element: element.to_string(),
        });
    }
    Ok(())
}

/// A required list must contain at least one entry.
pub fn check_non_empty_list<T>(list: &[T], element: &str) -> Result<()> {
    check_list(list, element, true)
}

/// An optional choice, if present, must hold one of `allowed`.
pub fn choice_element<C: Choice>(value: Option<&C>, element: &str, allowed: &[&str]) -> Result<()> {
    match value {
        Some(choice) => check_choice_type(choice, element, allowed),
        None => Ok(()),
    }
}

/// A required choice must be present and hold one of `allowed`.
pub fn require_choice_element<C: Choice>(
    value: Option<C>,
    element: &str,
    allowed: &[&str],
) -> Result<C> {
    let choice = require_non_null(value, element)?;
    check_choice_type(&choice, element, allowed)?;
    Ok(choice)
}

fn check_choice_type<C: Choice>(choice: &C, element: &str, allowed: &[&str]) -> Result<()> {
    let actual = choice.type_name();
    if allowed.contains(&actual) {
        Ok(())
    } else {
        Err(Error::InvalidChoiceType {
            element: element.to_string(),
            actual: actual.to_string(),
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        })
    }
}

/// Check the target resource type of a reference against `allowed`.
///
/// The type comes from a literal reference (`Patient/123`,
/// `Patient/123/_history/2`, `https://host/fhir/Patient/123`) or from
/// `Reference.type`. Contained (`#id`) and `urn:` references are only checked
/// through `Reference.type`.
/// A reference with no discoverable type passes. `"Resource"` in `allowed`
/// admits any type.
pub fn check_reference_type(
    reference: Option<&Reference>,
    element: &str,
    allowed: &[&str],
) -> Result<()> {
    let Some(reference) = reference else {
        return Ok(());
    };

    let declared = reference.r#type().and_then(|t| t.value()).map(String::as_str);
    if let Some(declared) = declared {
        if !is_resource_type(declared) {
            return Err(Error::InvalidResourceType {
                element: element.to_string(),
                resource_type: declared.to_string(),
            });
        }
    }

    let literal = reference.reference().and_then(|r| r.value()).map(String::as_str);
    let mut resource_type = declared;

    if let Some(literal) = literal {
        if !is_local_or_urn(literal) {
            if let Some(parsed) = parse_literal_reference(literal) {
                if let Some(declared) = declared {
                    if declared != parsed {
                        return Err(Error::ReferenceTypeMismatch {
                            element: element.to_string(),
                            reference: literal.to_string(),
                            resource_type: declared.to_string(),
                        });
                    }
                }
                resource_type = Some(parsed);
            }
        }
    }

    match resource_type {
        Some(found) if !allowed.contains(&"Resource") && !allowed.contains(&found) => {
            Err(Error::InvalidReferenceType {
                element: element.to_string(),
                reference: literal.unwrap_or(found).to_string(),
                allowed: allowed.iter().map(|s| s.to_string()).collect(),
            })
        }
        _ => Ok(()),
    }
}

/// [`check_reference_type`] for every entry of a list.
pub fn check_reference_types(list: &[Reference], element: &str, allowed: &[&str]) -> Result<()> {
    list.iter()
        .try_for_each(|r| check_reference_type(Some(r), element, allowed))
}

/// Check a choice value against reference targets when it holds a `Reference`.
pub fn check_choice_reference_type<C: Choice>(
    value: Option<&C>,
    element: &str,
    allowed: &[&str],
) -> Result<()> {
    check_reference_type(value.and_then(|c| c.as_reference()), element, allowed)
}

/// Every element needs a value, an extension or a child element.
pub fn require_value_or_children(element: &dyn Element) -> Result<()> {
    if element.has_value() || element.has_children() {
        Ok(())
    } else {
        Err(Error::VacuousElement {
            type_name: element.type_name().to_string(),
        })
    }
}

/// Lexical form of the `id` primitive, also used for `Resource.id`.
pub fn check_id(value: &str) -> Result<()> {
    let valid = !value.is_empty()
        && value.len() <= 64
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
    if valid {
        Ok(())
    } else {
        Err(Error::invalid_value(
            "id",
            value,
            "must be 1-64 characters of [A-Za-z0-9-.]",
        ))
    }
}

fn is_local_or_urn(literal: &str) -> bool {
    literal.starts_with('#') || literal.starts_with("urn:")
}

/// Resource type of a relative or absolute literal reference, if it has one.
fn parse_literal_reference(literal: &str) -> Option<&str> {
    static LITERAL_REFERENCE: OnceLock<Regex> = OnceLock::new();
    let re = LITERAL_REFERENCE.get_or_init(|| {
        Regex::new(
            r"^(?:https?://[^ ]*/)?(?P<type>[A-Z][A-Za-z]+)/[A-Za-z0-9\-\.]{1,64}(?:/_history/[A-Za-z0-9\-\.]{1,64})?$",
        )
        .expect("literal reference regex must compile")
    });

    let path = literal.split('?').next().unwrap_or(literal);
    let captures = re.captures(path)?;
    let resource_type = captures.name("type")?.as_str();
    is_resource_type(resource_type).then_some(resource_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FhirString, Uri};

    fn literal(value: &str) -> Reference {
        Reference::builder().reference(value).build().unwrap()
    }

    const WHO: &[&str] = &["Practitioner", "Organization", "Patient"];

    #[test]
    fn test_require_non_null() {
        assert_eq!(require_non_null(Some(1), "code").unwrap(), 1);
        let err = require_non_null::<i32>(None, "code").unwrap_err();
        assert_eq!(err.element(), Some("code"));
        assert!(matches!(err, Error::MissingRequired { .. }));
    }

    #[test]
    fn test_check_list() {
        assert!(check_list::<i32>(&[], "agent", false).is_ok());
        assert!(check_non_empty_list(&[1], "agent").is_ok());
        let err = check_non_empty_list::<i32>(&[], "agent").unwrap_err();
        assert!(matches!(err, Error::EmptyList { ref element } if element == "agent"));
    }

    #[test]
    fn test_reference_literal_types() {
        assert!(check_reference_type(Some(&literal("Patient/123")), "who", WHO).is_ok());
        assert!(
            check_reference_type(Some(&literal("Patient/123/_history/2")), "who", WHO).is_ok()
        );
        assert!(check_reference_type(Some(&literal("Patient/123?x=1")), "who", WHO).is_ok());

        let err = check_reference_type(Some(&literal("Location/1")), "who", WHO).unwrap_err();
        assert!(matches!(err, Error::InvalidReferenceType { .. }));
        assert_eq!(err.element(), Some("who"));
    }

    #[test]
    fn test_reference_unchecked_forms() {
        for value in [
            "#contained",
            "urn:uuid:9d4b1a1e-1c2d-4b65-9d5f-3e7c1c6a0b11",
            "http://example.org/fhir/metadata",
            "not a reference",
        ] {
            assert!(
                check_reference_type(Some(&literal(value)), "who", WHO).is_ok(),
                "{value} should not be type-checked"
            );
        }
        assert!(check_reference_type(None, "who", WHO).is_ok());
    }

    #[test]
    fn test_reference_absolute_url() {
        let ok = literal("https://example.org/fhir/Patient/123/_history/2");
        assert!(check_reference_type(Some(&ok), "who", WHO).is_ok());

        let err = check_reference_type(
            Some(&literal("http://example.org/fhir/Location/1")),
            "who",
            WHO,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidReferenceType { ref reference, .. }
            if reference == "http://example.org/fhir/Location/1"));
    }

    #[test]
    fn test_reference_declared_type() {
        let typed = Reference::builder()
            .r#type(Uri::new("Location").unwrap())
            .display(FhirString::from("Ward 3"))
            .build()
            .unwrap();
        let err = check_reference_type(Some(&typed), "who", WHO).unwrap_err();
        assert!(matches!(err, Error::InvalidReferenceType { .. }));

        let bogus = Reference::builder()
            .r#type(Uri::new("Nonsense").unwrap())
            .build()
            .unwrap();
        let err = check_reference_type(Some(&bogus), "who", WHO).unwrap_err();
        assert!(matches!(err, Error::InvalidResourceType { .. }));

        let mismatch = Reference::builder()
            .reference("Patient/1")
            .r#type(Uri::new("Practitioner").unwrap())
            .build()
            .unwrap();
        let err = check_reference_type(Some(&mismatch), "who", WHO).unwrap_err();
        assert!(matches!(err, Error::ReferenceTypeMismatch { .. }));
    }

    #[test]
    fn test_reference_any_resource() {
        let r = literal("Location/1");
        assert!(check_reference_type(Some(&r), "focus", &["Resource"]).is_ok());
    }

    #[test]
    fn test_check_id() {
        assert!(check_id("abc-123.x").is_ok());
        assert!(check_id("").is_err());
        assert!(check_id("has space").is_err());
        assert!(check_id(&"a".repeat(65)).is_err());
    }
}
