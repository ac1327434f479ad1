//! Primitive datatypes
//!
//! A primitive element holds an optional value plus the `Element` fields. It
//! must have a value or at least one extension. Values are checked against
//! the lexical rule of their type by `new()` and `builder().build()`; `From`
//! conversions exist only where the Rust value type cannot hold an invalid
//! value.

use std::any::Any;
use std::sync::OnceLock;

use chrono::{DateTime as ChronoDateTime, FixedOffset, NaiveTime, Utc};
use regex::Regex;
use rust_decimal::Decimal as RustDecimal;

use crate::builder::{finish, ElementBuilder};
use crate::error::{Error, Result};
use crate::model_support::{FieldInfo, TypeInfo, TypeKind};
use crate::types::{ElementBase, Extension};
use crate::validation;
use crate::visitor::{self, PrimitiveValue, Visitable, Visitor};

macro_rules! primitive_type {
    (
        $(#[$meta:meta])*
        $name:ident, $builder:ident, $value:ty, $fhir:literal, $info:ident,
        $to_value:path, $check:path
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            base: ElementBase,
            value: Option<$value>,
        }

        impl $name {
            /// Create a primitive holding `value`, checking its lexical form.
            pub fn new(value: impl Into<$value>) -> Result<Self> {
                Self::builder().value(value).build()
            }

            pub fn builder() -> $builder {
                $builder::default()
            }

            pub fn to_builder(&self) -> $builder {
                $builder {
                    base: self.base.clone(),
                    value: self.value.clone(),
                    skip_validation: false,
                }
            }

            pub fn value(&self) -> Option<&$value> {
                self.value.as_ref()
            }

            fn validate(&self) -> Result<()> {
                if let Some(value) = &self.value {
                    $check(value)?;
                }
                validation::require_value_or_children(self)
            }
        }

        impl crate::types::Element for $name {
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
                self.value.as_ref().map(|v| $to_value(v))
            }
        }

        impl Visitable for $name {
            fn type_name(&self) -> &'static str {
                $fhir
            }

            fn type_info(&self) -> &'static TypeInfo {
                &$info
            }

            fn has_children(&self) -> bool {
                self.base.has_children()
            }

            fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
                visitor::visit_node(visitor, name, index, self, |v| {
                    self.base.accept_children(v);
                    visitor::accept_value(
                        v,
                        "value",
                        crate::types::Element::primitive_value(self),
                    );
                });
            }

            fn as_any(&self) -> &dyn Any {
                self
            }
        }

        #[derive(Debug, Clone, Default)]
        pub struct $builder {
            base: ElementBase,
            value: Option<$value>,
            skip_validation: bool,
        }

        impl ElementBuilder for $builder {
            fn element_base(&mut self) -> &mut ElementBase {
                &mut self.base
            }
        }

        impl $builder {
            pub fn value(mut self, value: impl Into<$value>) -> Self {
                self.value = Some(value.into());
                self
            }

            pub fn validating(mut self, validating: bool) -> Self {
                self.skip_validation = !validating;
                self
            }

            pub fn build(&self) -> Result<$name> {
                let validate = !self.skip_validation;
                finish($fhir, validate, || {
                    let primitive = $name {
                        base: self.base.clone(),
                        value: self.value.clone(),
                    };
                    if validate {
                        primitive.validate()?;
                    }
                    Ok(primitive)
                })
            }
        }

        pub static $info: TypeInfo = TypeInfo {
            name: $fhir,
            kind: TypeKind::PrimitiveType,
            base: Some("Element"),
            url: Some(concat!("http://hl7.org/fhir/StructureDefinition/", $fhir)),
            fields: &[FieldInfo::new("value", &[$fhir])],
            constraints: &[],
        };
    };
}

macro_rules! impl_from {
    ($name:ident: $($from:ty),+) => {
        $(
            impl From<$from> for $name {
                fn from(value: $from) -> Self {
                    $name {
                        base: ElementBase::default(),
                        value: Some(value.into()),
                    }
                }
            }
        )+
    };
}

primitive_type!(
    /// A sequence of Unicode characters
    FhirString, FhirStringBuilder, String, "string", STRING_INFO, str_value, no_check
);
primitive_type!(
    /// `true` or `false`
    Boolean, BooleanBuilder, bool, "boolean", BOOLEAN_INFO, bool_value, no_check
);
primitive_type!(
    /// A signed 32-bit integer
    Integer, IntegerBuilder, i32, "integer", INTEGER_INFO, int_value, no_check
);
primitive_type!(
    /// A signed 64-bit integer
    Integer64, Integer64Builder, i64, "integer64", INTEGER64_INFO, int64_value, no_check
);
primitive_type!(
    /// An integer greater than zero
    PositiveInt, PositiveIntBuilder, i32, "positiveInt", POSITIVE_INT_INFO, int_value,
    check_positive_int
);
primitive_type!(
    /// An integer of zero or more
    UnsignedInt, UnsignedIntBuilder, i32, "unsignedInt", UNSIGNED_INT_INFO, int_value,
    check_unsigned_int
);
primitive_type!(
    /// A rational number with implicit precision
    Decimal, DecimalBuilder, RustDecimal, "decimal", DECIMAL_INFO, decimal_value, no_check
);
primitive_type!(
    /// A Uniform Resource Identifier
    Uri, UriBuilder, String, "uri", URI_INFO, str_value, check_uri
);
primitive_type!(
    /// A Uniform Resource Locator
    Url, UrlBuilder, String, "url", URL_INFO, str_value, check_uri
);
primitive_type!(
    /// A URI that refers to a resource by its canonical URL, optionally with `|version`
    Canonical, CanonicalBuilder, String, "canonical", CANONICAL_INFO, str_value, check_uri
);
primitive_type!(
    /// A token from a controlled set of strings
    Code, CodeBuilder, String, "code", CODE_INFO, str_value, check_code
);
primitive_type!(
    /// A logical or element identifier
    Id, IdBuilder, String, "id", ID_INFO, str_value, check_id
);
primitive_type!(
    /// GitHub flavored markdown
    Markdown, MarkdownBuilder, String, "markdown", MARKDOWN_INFO, str_value, no_check
);
primitive_type!(
    /// A date, date-time or partial date (`2023`, `2023-05`, `2023-05-01T10:00:00Z`)
    DateTime, DateTimeBuilder, String, "dateTime", DATE_TIME_INFO, str_value, check_date_time
);
primitive_type!(
    /// A date or partial date, without time
    Date, DateBuilder, String, "date", DATE_INFO, str_value, check_date
);
primitive_type!(
    /// A point in time with a known offset
    Instant, InstantBuilder, ChronoDateTime<FixedOffset>, "instant", INSTANT_INFO,
    instant_value, no_check
);
primitive_type!(
    /// A time of day
    Time, TimeBuilder, NaiveTime, "time", TIME_INFO, time_value, no_check
);
primitive_type!(
    /// Binary content, base64 encoded on the wire
    Base64Binary, Base64BinaryBuilder, Vec<u8>, "base64Binary", BASE64_BINARY_INFO,
    bytes_value, no_check
);
primitive_type!(
    /// Limited XHTML content
    Xhtml, XhtmlBuilder, String, "xhtml", XHTML_INFO, str_value, check_xhtml
);

impl_from!(FhirString: String, &str);
impl_from!(Markdown: String, &str);
impl_from!(Boolean: bool);
impl_from!(Integer: i32);
impl_from!(Integer64: i64);
impl_from!(Decimal: RustDecimal);
impl_from!(Instant: ChronoDateTime<FixedOffset>, ChronoDateTime<Utc>);
impl_from!(Time: NaiveTime);
impl_from!(Base64Binary: Vec<u8>, &[u8]);

impl FhirString {
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

fn str_value(value: &String) -> PrimitiveValue<'_> {
    PrimitiveValue::String(value)
}

fn bool_value(value: &bool) -> PrimitiveValue<'_> {
    PrimitiveValue::Boolean(*value)
}

fn int_value(value: &i32) -> PrimitiveValue<'_> {
    PrimitiveValue::Integer(*value)
}

fn int64_value(value: &i64) -> PrimitiveValue<'_> {
    PrimitiveValue::Integer64(*value)
}

fn decimal_value(value: &RustDecimal) -> PrimitiveValue<'_> {
    PrimitiveValue::Decimal(value)
}

fn instant_value(value: &ChronoDateTime<FixedOffset>) -> PrimitiveValue<'_> {
    PrimitiveValue::Instant(value)
}

fn time_value(value: &NaiveTime) -> PrimitiveValue<'_> {
    PrimitiveValue::Time(value)
}

fn bytes_value(value: &Vec<u8>) -> PrimitiveValue<'_> {
    PrimitiveValue::Bytes(value)
}

fn no_check<T: ?Sized>(_: &T) -> Result<()> {
    Ok(())
}

fn check_positive_int(value: &i32) -> Result<()> {
    if *value > 0 {
        Ok(())
    } else {
        Err(Error::invalid_value("positiveInt", value.to_string(), "must be greater than 0"))
    }
}

fn check_unsigned_int(value: &i32) -> Result<()> {
    if *value >= 0 {
        Ok(())
    } else {
        Err(Error::invalid_value("unsignedInt", value.to_string(), "must not be negative"))
    }
}

fn check_uri(value: &String) -> Result<()> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(Error::invalid_value(
            "uri",
            value.as_str(),
            "must be non-empty and contain no whitespace",
        ));
    }
    Ok(())
}

fn check_code(value: &String) -> Result<()> {
    static CODE: OnceLock<Regex> = OnceLock::new();
    let re = CODE.get_or_init(|| Regex::new(r"^[^\s]+( [^\s]+)*$").expect("code regex must compile"));
    if re.is_match(value) {
        Ok(())
    } else {
        Err(Error::invalid_value(
            "code",
            value.as_str(),
            "must not have leading, trailing or repeated whitespace",
        ))
    }
}

fn check_id(value: &String) -> Result<()> {
    validation::check_id(value)
}

fn check_date_time(value: &String) -> Result<()> {
    static DATE_TIME: OnceLock<Regex> = OnceLock::new();
    let re = DATE_TIME.get_or_init(|| {
        Regex::new(
            r"^([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)(-(0[1-9]|1[0-2])(-(0[1-9]|[1-2][0-9]|3[0-1])(T([01][0-9]|2[0-3]):[0-5][0-9]:([0-5][0-9]|60)(\.[0-9]{1,9})?(Z|(\+|-)((0[0-9]|1[0-3]):[0-5][0-9]|14:00)))?)?)?$",
        )
        .expect("dateTime regex must compile")
    });
    if re.is_match(value) {
        Ok(())
    } else {
        Err(Error::invalid_value(
            "dateTime",
            value.as_str(),
            "must be YYYY, YYYY-MM, YYYY-MM-DD or YYYY-MM-DDThh:mm:ss+zz:zz",
        ))
    }
}

fn check_date(value: &String) -> Result<()> {
    static DATE: OnceLock<Regex> = OnceLock::new();
    let re = DATE.get_or_init(|| {
        Regex::new(
            r"^([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)(-(0[1-9]|1[0-2])(-(0[1-9]|[1-2][0-9]|3[0-1]))?)?$",
        )
        .expect("date regex must compile")
    });
    if re.is_match(value) {
        Ok(())
    } else {
        Err(Error::invalid_value(
            "date",
            value.as_str(),
            "must be YYYY, YYYY-MM or YYYY-MM-DD",
        ))
    }
}

fn check_xhtml(value: &String) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.starts_with("<div") && (trimmed.ends_with("</div>") || trimmed.ends_with("/>")) {
        Ok(())
    } else {
        Err(Error::invalid_value(
            "xhtml",
            value.as_str(),
            "must be a single <div> element",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Element;
    use chrono::TimeZone;

    #[test]
    fn test_from_conversions_hold_value() {
        let s = FhirString::from("hello");
        assert_eq!(s.as_str(), Some("hello"));
        assert!(s.has_value());
        assert_eq!(Boolean::from(true).value(), Some(&true));
        assert_eq!(Integer64::from(9_i64).value(), Some(&9));
    }

    #[test]
    fn test_lexical_checks() {
        assert!(Code::new("C").is_ok());
        assert!(Code::new("two words").is_ok());
        assert!(Code::new(" leading").is_err());
        assert!(Code::new("double  space").is_err());

        assert!(Id::new("example-1.0").is_ok());
        assert!(Id::new("bad id").is_err());

        assert!(Uri::new("http://hl7.org/fhir").is_ok());
        assert!(Uri::new("has space").is_err());
        assert!(Canonical::new("http://hl7.org/fhir/ValueSet/x|5.0.0").is_ok());

        assert!(PositiveInt::new(1).is_ok());
        assert!(PositiveInt::new(0).is_err());
        assert!(UnsignedInt::new(0).is_ok());
        assert!(UnsignedInt::new(-1).is_err());

        assert!(Xhtml::new("<div xmlns=\"http://www.w3.org/1999/xhtml\">x</div>").is_ok());
        assert!(Xhtml::new("plain text").is_err());
    }

    #[test]
    fn test_date_time_forms() {
        for ok in ["2023", "2023-05", "2023-05-01", "2023-05-01T10:30:00Z", "2023-05-01T10:30:00.123+02:00"] {
            assert!(DateTime::new(ok).is_ok(), "{ok} should be a valid dateTime");
        }
        for bad in ["23", "2023-13", "2023-05-01T10:30:00", "2023-05-01 10:30"] {
            assert!(DateTime::new(bad).is_err(), "{bad} should be rejected");
        }
        assert!(Date::new("2023-05-01").is_ok());
        assert!(Date::new("2023-05-01T10:30:00Z").is_err());
    }

    #[test]
    fn test_value_or_children() {
        let err = Boolean::builder().build().unwrap_err();
        assert!(matches!(err, Error::VacuousElement { ref type_name } if type_name == "boolean"));

        let ext = Extension::builder()
            .url("http://hl7.org/fhir/StructureDefinition/data-absent-reason")
            .value(Code::new("unknown").unwrap())
            .build()
            .unwrap();
        let absent = Boolean::builder().extension(ext).build().unwrap();
        assert!(!absent.has_value());
        assert!(absent.has_children());
    }

    #[test]
    fn test_validation_can_be_disabled() {
        let code = Code::builder()
            .value(" not a code ")
            .validating(false)
            .build()
            .unwrap();
        assert_eq!(code.value().map(String::as_str), Some(" not a code "));
    }

    #[test]
    fn test_instant_from_utc() {
        let utc = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let instant = Instant::from(utc);
        assert_eq!(instant.value().unwrap().offset().local_minus_utc(), 0);
        assert_eq!(instant.type_name(), "instant");
    }

    #[test]
    fn test_round_trip() {
        let original = DateTime::builder()
            .id("dt1")
            .value("2023-05-01")
            .build()
            .unwrap();
        assert_eq!(original.to_builder().build().unwrap(), original);
        assert_eq!(original.id(), Some("dt1"));
    }
}
