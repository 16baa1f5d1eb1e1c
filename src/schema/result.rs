//! Raw form input and validation outcomes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value a checkbox posts when ticked.
pub const CHECKED: &str = "on";

/// Field name → first error message, for every failing field.
pub type FieldErrors = BTreeMap<String, String>;

/// Values as the rendering surface posts them.
///
/// A missing key means the input posted nothing (an unticked checkbox, or a
/// field the surface never rendered).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawValues {
    values: BTreeMap<String, String>,
}

impl RawValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    /// Presentation-boundary conversion for checkboxes.
    pub fn set_checked(&mut self, name: impl Into<String>, checked: bool) {
        let name = name.into();
        if checked {
            self.values.insert(name, CHECKED.to_string());
        } else {
            self.values.remove(&name);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A validated, coerced field value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

/// Validated form values keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    values: BTreeMap<String, FieldValue>,
}

impl FormData {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(FieldValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(FieldValue::Flag(flag)) => Some(*flag),
            _ => None,
        }
    }

    /// Drop a field, e.g. one that only exists for validation.
    pub fn without(mut self, name: &str) -> Self {
        self.values.remove(name);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, FieldValue)> for FormData {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Outcome of validating one form submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationResult {
    Valid(FormData),
    Invalid(FieldErrors),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Message for one field, if it failed.
    pub fn error(&self, name: &str) -> Option<&str> {
        match self {
            Self::Invalid(errors) => errors.get(name).map(String::as_str),
            Self::Valid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_checked_uses_sentinel() {
        let mut raw = RawValues::new();
        raw.set_checked("terms", true);
        assert_eq!(raw.get("terms"), Some(CHECKED));

        raw.set_checked("terms", false);
        assert_eq!(raw.get("terms"), None);
    }

    #[test]
    fn form_data_accessors_respect_kind() {
        let data: FormData = [
            ("email".to_string(), FieldValue::Text("a@b.com".to_string())),
            ("terms".to_string(), FieldValue::Flag(true)),
        ]
        .into_iter()
        .collect();

        assert_eq!(data.text("email"), Some("a@b.com"));
        assert_eq!(data.flag("email"), None);
        assert_eq!(data.flag("terms"), Some(true));
        assert_eq!(data.without("terms").len(), 1);
    }

    #[test]
    fn field_values_serialize_untagged() {
        let json = serde_json::to_string(&FieldValue::Flag(true)).unwrap();
        assert_eq!(json, "true");
        let json = serde_json::to_string(&FieldValue::Text("x".to_string())).unwrap();
        assert_eq!(json, "\"x\"");
    }
}
