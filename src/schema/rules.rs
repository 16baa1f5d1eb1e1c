//! Field rules and per-field evaluation.

use crate::schema::error::FieldError;
use crate::schema::result::{FieldValue, RawValues, CHECKED};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

static LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("letters pattern is valid"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

static PASSWORD_CLASSES: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [r"[a-z]", r"[A-Z]", r"[0-9]", r"[$&+,:;=?@#|<>.^*()%!-]"]
        .map(|class| Regex::new(class).expect("password class pattern is valid"))
});

/// Named patterns a field value can be matched against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pattern {
    /// ASCII letters and whitespace only.
    Letters,
    /// Email address. The empty string is left to `Required`.
    Email,
    /// At least one lowercase, uppercase, digit and special character.
    StrongPassword,
}

impl Pattern {
    pub fn matches(self, value: &str) -> bool {
        match self {
            Self::Letters => LETTERS.is_match(value),
            Self::Email => value.is_empty() || EMAIL.is_match(value),
            Self::StrongPassword => PASSWORD_CLASSES.iter().all(|class| class.is_match(value)),
        }
    }
}

/// A single check with the message shown when it fails.
///
/// Every rule except `Required` passes on an absent value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rule {
    MinLength { min: usize, message: String },
    MaxLength { max: usize, message: String },
    Matches { pattern: Pattern, message: String },
    /// Must equal another field's posted value.
    EqualsField { other: String, message: String },
    OneOf { options: Vec<String>, message: String },
    /// Must be the ticked-checkbox sentinel.
    Accepted { message: String },
    Required { message: String },
}

impl Rule {
    /// Evaluation tier: length-min, length-max, pattern-like, required.
    pub(crate) fn tier(&self) -> u8 {
        match self {
            Self::MinLength { .. } => 0,
            Self::MaxLength { .. } => 1,
            Self::Matches { .. }
            | Self::EqualsField { .. }
            | Self::OneOf { .. }
            | Self::Accepted { .. } => 2,
            Self::Required { .. } => 3,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::MinLength { message, .. }
            | Self::MaxLength { message, .. }
            | Self::Matches { message, .. }
            | Self::EqualsField { message, .. }
            | Self::OneOf { message, .. }
            | Self::Accepted { message }
            | Self::Required { message } => message,
        }
    }

    /// Field this rule reads besides its own.
    pub fn reference(&self) -> Option<&str> {
        match self {
            Self::EqualsField { other, .. } => Some(other),
            _ => None,
        }
    }

    pub fn passes(&self, value: Option<&str>, raw: &RawValues) -> bool {
        let Some(value) = value else {
            return !matches!(self, Self::Required { .. });
        };

        match self {
            Self::MinLength { min, .. } => value.chars().count() >= *min,
            Self::MaxLength { max, .. } => value.chars().count() <= *max,
            Self::Matches { pattern, .. } => pattern.matches(value),
            Self::EqualsField { other, .. } => raw.get(other) == Some(value),
            Self::OneOf { options, .. } => options.iter().any(|option| option == value),
            Self::Accepted { .. } => value == CHECKED,
            Self::Required { .. } => !value.is_empty(),
        }
    }
}

/// How a field's posted string is read and coerced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Trimmed before checking and in the validated output.
    Text,
    /// Checked and returned verbatim.
    Secret,
    /// Checkbox; coerced to a boolean.
    Flag,
}

/// Name, kind and ordered rules of one field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub(crate) name: String,
    pub(crate) kind: FieldKind,
    pub(crate) rules: Vec<Rule>,
}

impl FieldSchema {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    fn input<'a>(&self, raw: &'a RawValues) -> Option<&'a str> {
        let value = raw.get(&self.name);
        match self.kind {
            FieldKind::Text => value.map(str::trim),
            FieldKind::Secret | FieldKind::Flag => value,
        }
    }

    /// Allowed values, when the field has a one-of rule.
    pub fn options(&self) -> Option<&[String]> {
        self.rules.iter().find_map(|rule| match rule {
            Rule::OneOf { options, .. } => Some(options.as_slice()),
            _ => None,
        })
    }

    /// First rule this field fails, in tier order.
    pub fn first_failure(&self, raw: &RawValues) -> Option<&Rule> {
        let value = self.input(raw);
        self.rules.iter().find(|rule| !rule.passes(value, raw))
    }

    /// Check the field and coerce its value.
    pub fn check(&self, raw: &RawValues) -> Validation<(String, FieldValue), NonEmptyVec<FieldError>> {
        if let Some(rule) = self.first_failure(raw) {
            return Validation::fail(FieldError {
                field: self.name.clone(),
                message: rule.message().to_string(),
            });
        }

        let value = self.input(raw);
        let coerced = match self.kind {
            FieldKind::Text | FieldKind::Secret => {
                FieldValue::Text(value.unwrap_or_default().to_string())
            }
            FieldKind::Flag => FieldValue::Flag(value == Some(CHECKED)),
        };
        Validation::success((self.name.clone(), coerced))
    }
}
