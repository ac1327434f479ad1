//! Error types for FHIR R5 model construction

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required element: '{element}'")]
    MissingRequired { element: String },

    #[error("Missing required element: '{element}' must contain at least one item")]
    EmptyList { element: String },

    #[error("Invalid type: {actual} for choice element: '{element}' must be one of: {allowed:?}")]
    InvalidChoiceType {
        element: String,
        actual: String,
        allowed: Vec<String>,
    },

    #[error("Resource type found in reference value: '{reference}' for element: '{element}' must be one of: {allowed:?}")]
    InvalidReferenceType {
        element: String,
        reference: String,
        allowed: Vec<String>,
    },

    #[error("Resource type found in Reference.type: '{resource_type}' for element: '{element}' must be a valid resource type name")]
    InvalidResourceType {
        element: String,
        resource_type: String,
    },

    #[error("Resource type found in reference value: '{reference}' for element: '{element}' does not match Reference.type: {resource_type}")]
    ReferenceTypeMismatch {
        element: String,
        reference: String,
        resource_type: String,
    },

    #[error("global-1: All FHIR elements must have a @value or children ({type_name})")]
    VacuousElement { type_name: String },

    #[error("Invalid {type_name} value '{value}': {reason}")]
    InvalidValue {
        type_name: String,
        value: String,
        reason: String,
    },

    #[error("JSON generation error: {0}")]
    Generation(#[from] serde_json::Error),
}

impl Error {
    /// Name of the element the failed rule was attached to, if any.
    pub fn element(&self) -> Option<&str> {
        match self {
            Error::MissingRequired { element }
            | Error::EmptyList { element }
            | Error::InvalidChoiceType { element, .. }
            | Error::InvalidReferenceType { element, .. }
            | Error::InvalidResourceType { element, .. }
            | Error::ReferenceTypeMismatch { element, .. } => Some(element),
            Error::VacuousElement { .. } | Error::InvalidValue { .. } | Error::Generation(_) => {
                None
            }
        }
    }

    pub(crate) fn invalid_value(
        type_name: &str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidValue {
            type_name: type_name.to_string(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
