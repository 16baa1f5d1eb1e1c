//! Schema construction and validation errors.

use thiserror::Error;

/// Errors that can occur when building field and form schemas.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Field name not specified. Call FieldBuilder::new(name) with a non-empty name")]
    MissingName,

    #[error("Field '{0}' has no rules. Add at least one rule")]
    NoRules(String),

    #[error("No fields defined. Add at least one field")]
    NoFields,

    #[error("Field '{0}' is declared twice")]
    DuplicateField(String),

    #[error("Field '{field}' refers to undeclared field '{references}'")]
    UnknownReference { field: String, references: String },

    #[error("Input '{0}' has no schema entry")]
    UnboundInput(String),

    #[error("Select '{0}' needs a one-of rule listing exactly its options")]
    UnconstrainedSelect(String),
}

/// A single field failing its first rule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}
