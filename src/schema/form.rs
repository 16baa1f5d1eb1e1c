//! Whole-form validation.

use crate::schema::rules::FieldSchema;
use crate::schema::result::{RawValues, ValidationResult};
use stillwater::validation::Validation;

/// Ordered set of field schemas for one form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormSchema {
    fields: Vec<FieldSchema>,
}

impl FormSchema {
    pub(crate) fn new(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldSchema::name)
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Validate every field, accumulating ALL failing fields.
    ///
    /// Each failing field reports only its first failing rule. Passing
    /// fields are left out of `Invalid`.
    pub fn validate(&self, raw: &RawValues) -> ValidationResult {
        let checks: Vec<_> = self.fields.iter().map(|field| field.check(raw)).collect();

        match Validation::all_vec(checks) {
            Validation::Success(values) => ValidationResult::Valid(values.into_iter().collect()),
            Validation::Failure(errors) => ValidationResult::Invalid(
                errors
                    .iter()
                    .map(|error| (error.field.clone(), error.message.clone()))
                    .collect(),
            ),
        }
    }

    /// Fields with a rule that reads `name`'s value.
    pub fn dependents<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |field| field.rules().iter().any(|rule| rule.reference() == Some(name)))
            .map(FieldSchema::name)
    }

    /// Check one field; cross-field rules still see every posted value.
    pub fn validate_field(&self, name: &str, raw: &RawValues) -> Option<String> {
        self.field(name)?
            .first_failure(raw)
            .map(|rule| rule.message().to_string())
    }
}
