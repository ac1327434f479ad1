//! Error types for StructureDefinition parsing

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("StructureDefinition missing '{0}'")]
    MissingField(&'static str),

    #[error("Invalid StructureDefinition {name}: {reason}")]
    InvalidStructureDefinition { name: String, reason: String },

    #[error("Unsupported StructureDefinition {name}: {reason}")]
    Unsupported { name: String, reason: String },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Error::InvalidStructureDefinition {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(name: &str, reason: impl Into<String>) -> Self {
        Error::Unsupported {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
