//! Rendering-surface bindings for form inputs.
//!
//! A [`FieldSpec`] describes one input (name, label, control kind). The
//! controller turns specs into [`FieldView`]s, read-only snapshots a surface
//! renders, and [`FieldBinding`]s, which also route edits back into the
//! controller. Errors shown on a field are the ones set by the last submit
//! attempt, or by the last edit when live validation is on.

use crate::controller::FormController;
use crate::schema::CHECKED;
use crate::strength::{self, StrengthReport};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An edit or lookup named a field the form does not declare.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown field '{0}'")]
pub struct UnknownField(pub String);

/// Kind of input control.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    Text,
    Password,
    /// Password input with a live strength checklist.
    StrongPassword,
    Checkbox,
    Select { options: Vec<String> },
}

/// Presentation metadata for one input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    name: String,
    label: Option<String>,
    placeholder: Option<String>,
    with_asterisk: bool,
    control: Control,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, control: Control) -> Self {
        Self {
            name: name.into(),
            label: None,
            placeholder: None,
            with_asterisk: false,
            control,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, Control::Text)
    }

    pub fn password(name: impl Into<String>) -> Self {
        Self::new(name, Control::Password)
    }

    pub fn strong_password(name: impl Into<String>) -> Self {
        Self::new(name, Control::StrongPassword)
    }

    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::new(name, Control::Checkbox)
    }

    pub fn select<I, T>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::new(
            name,
            Control::Select {
                options: options.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Mark the input as required in the rendered label.
    pub fn with_asterisk(mut self) -> Self {
        self.with_asterisk = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label_text(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn placeholder_text(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn shows_asterisk(&self) -> bool {
        self.with_asterisk
    }

    pub fn control(&self) -> &Control {
        &self.control
    }
}

/// Snapshot of one input for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldView<'a> {
    pub spec: &'a FieldSpec,
    pub value: Option<&'a str>,
    pub error: Option<&'a str>,
}

impl FieldView<'_> {
    pub fn name(&self) -> &str {
        self.spec.name()
    }

    /// Checkbox state; `None` for other controls.
    pub fn checked(&self) -> Option<bool> {
        matches!(self.spec.control(), Control::Checkbox).then(|| self.value == Some(CHECKED))
    }

    /// Live strength report for strength-annotated password inputs.
    pub fn strength(&self) -> Option<StrengthReport> {
        matches!(self.spec.control(), Control::StrongPassword)
            .then(|| strength::score(self.value.unwrap_or_default()))
    }

    /// Options of a select control.
    pub fn options(&self) -> Option<&[String]> {
        match self.spec.control() {
            Control::Select { options } => Some(options),
            _ => None,
        }
    }
}

/// Read/write handle on one input of a form.
#[derive(Debug)]
pub struct FieldBinding<'a> {
    controller: &'a mut FormController,
    name: String,
}

impl<'a> FieldBinding<'a> {
    pub(crate) fn new(controller: &'a mut FormController, name: String) -> Self {
        Self { controller, name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.controller.values().get(&self.name)
    }

    pub fn error(&self) -> Option<&str> {
        self.controller.error(&self.name)
    }

    /// Change handler for text-like inputs.
    pub fn set(&mut self, value: impl Into<String>) {
        self.controller.apply_edit(&self.name, Some(value.into()));
    }

    /// Change handler for checkboxes.
    pub fn set_checked(&mut self, checked: bool) {
        let value = checked.then(|| CHECKED.to_string());
        self.controller.apply_edit(&self.name, value);
    }
}

/// The submit button: its label and whether to show a loading indicator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitControl {
    pub label: String,
    pub loading: bool,
}
