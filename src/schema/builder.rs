//! Fluent builders for field and form schemas.

use crate::schema::error::BuildError;
use crate::schema::form::FormSchema;
use crate::schema::rules::{FieldKind, FieldSchema, Pattern, Rule};
use std::collections::HashSet;

/// Builder for a single field's rule set.
///
/// Rules may be added in any order; `build` sorts them into evaluation tier
/// order (length-min, length-max, pattern, required) keeping the call order
/// within a tier.
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    name: String,
    kind: FieldKind,
    rules: Vec<Rule>,
}

impl FieldBuilder {
    /// Start a text field (trimmed).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Text,
            rules: Vec::new(),
        }
    }

    /// Start a field whose value is never trimmed.
    pub fn secret(name: impl Into<String>) -> Self {
        Self::new(name).kind(FieldKind::Secret)
    }

    /// Start a checkbox field.
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name).kind(FieldKind::Flag)
    }

    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn min_len(mut self, min: usize, message: impl Into<String>) -> Self {
        self.rules.push(Rule::MinLength {
            min,
            message: message.into(),
        });
        self
    }

    /// Maximum length with the default message.
    pub fn max_len(self, max: usize) -> Self {
        let message = format!("{} must be at most {} characters", self.name, max);
        self.max_len_with(max, message)
    }

    pub fn max_len_with(mut self, max: usize, message: impl Into<String>) -> Self {
        self.rules.push(Rule::MaxLength {
            max,
            message: message.into(),
        });
        self
    }

    pub fn matches(mut self, pattern: Pattern, message: impl Into<String>) -> Self {
        self.rules.push(Rule::Matches {
            pattern,
            message: message.into(),
        });
        self
    }

    pub fn email(self, message: impl Into<String>) -> Self {
        self.matches(Pattern::Email, message)
    }

    /// Value must equal the one posted for `other`.
    pub fn equals_field(mut self, other: impl Into<String>, message: impl Into<String>) -> Self {
        self.rules.push(Rule::EqualsField {
            other: other.into(),
            message: message.into(),
        });
        self
    }

    pub fn one_of<I, T>(mut self, options: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.rules.push(Rule::OneOf {
            options: options.into_iter().map(Into::into).collect(),
            message: message.into(),
        });
        self
    }

    pub fn accepted(mut self, message: impl Into<String>) -> Self {
        self.rules.push(Rule::Accepted {
            message: message.into(),
        });
        self
    }

    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.rules.push(Rule::Required {
            message: message.into(),
        });
        self
    }

    pub fn build(self) -> Result<FieldSchema, BuildError> {
        if self.name.trim().is_empty() {
            return Err(BuildError::MissingName);
        }
        if self.rules.is_empty() {
            return Err(BuildError::NoRules(self.name));
        }

        let mut rules = self.rules;
        rules.sort_by_key(Rule::tier);

        Ok(FieldSchema {
            name: self.name,
            kind: self.kind,
            rules,
        })
    }
}

/// Builder for a whole form.
#[derive(Debug, Default)]
pub struct FormSchemaBuilder {
    fields: Vec<FieldSchema>,
}

impl FormSchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field using a builder.
    /// Returns an error if the builder fails validation.
    pub fn field(mut self, builder: FieldBuilder) -> Result<Self, BuildError> {
        self.fields.push(builder.build()?);
        Ok(self)
    }

    /// Add a pre-built field.
    pub fn add_field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Build the form schema.
    /// Fails on duplicate names or references to undeclared fields.
    pub fn build(self) -> Result<FormSchema, BuildError> {
        if self.fields.is_empty() {
            return Err(BuildError::NoFields);
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(BuildError::DuplicateField(field.name.clone()));
            }
        }

        for field in &self.fields {
            for reference in field.rules.iter().filter_map(Rule::reference) {
                if !seen.contains(reference) {
                    return Err(BuildError::UnknownReference {
                        field: field.name.clone(),
                        references: reference.to_string(),
                    });
                }
            }
        }

        Ok(FormSchema::new(self.fields))
    }
}
