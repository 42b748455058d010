//! Error types for the forms engine
//!
//! The engine operations themselves (read, update, conversion, display)
//! never fail; they degrade to zero values. These errors cover the
//! surrounding surfaces: schema definition, session lookups, submission
//! and configuration.

use thiserror::Error;

use crate::domain::value_objects::{FieldId, ValidationErrors};

/// Forms engine error type
#[derive(Error, Debug)]
pub enum FormsError {
    /// Two fields share an id
    #[error("duplicate field id: {0}")]
    DuplicateField(FieldId),

    /// Field id is blank
    #[error("field id cannot be empty")]
    EmptyFieldId,

    /// Field schema is internally inconsistent
    #[error("invalid schema for field {field}: {reason}")]
    InvalidSchema { field: FieldId, reason: String },

    /// No field with this id exists in the form
    #[error("unknown field: {0}")]
    UnknownField(FieldId),

    /// Submission blocked by business-rule violations
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(ValidationErrors),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

impl FormsError {
    /// Validation errors carried by a rejected submission
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Result type for the forms engine
pub type Result<T> = std::result::Result<T, FormsError>;
