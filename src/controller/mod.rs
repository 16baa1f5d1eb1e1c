//! Form submission controller.
//!
//! One [`FormController`] per mounted form. It owns the posted values, the
//! per-field errors and the [`SubmissionState`], and drives the submit cycle:
//!
//! 1. [`begin`](FormController::begin) validates and, if the form is valid,
//!    moves to `Submitting` and hands out a [`PendingSubmission`].
//! 2. The host performs the remote call.
//! 3. [`finish`](FormController::finish) applies the result: success, an
//!    inline error on the field the API rejected, or a form-level error.
//!
//! [`submit`](FormController::submit) runs all three for hosts that can
//! await in place. A submit trigger arriving while an attempt is in flight is
//! ignored.

mod error;

pub use error::FormError;

use crate::client::ClientError;
use crate::core::{Guard, State, StateHistory, StateTransition, SubmissionState, SubmitSuccess};
use crate::fields::{Control, FieldBinding, FieldSpec, FieldView, SubmitControl, UnknownField};
use crate::schema::{BuildError, FieldErrors, FormData, FormSchema, RawValues, ValidationResult};
use chrono::Utc;
use error::{attribute, Attribution};
use std::future::Future;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// When field errors are recomputed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Only on submit.
    #[default]
    OnSubmit,
    /// Also for the edited field on every change.
    OnChange,
}

/// Validated data of an attempt that is waiting for its remote call.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingSubmission {
    id: Uuid,
    data: FormData,
}

impl PendingSubmission {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }
}

/// Result of starting an attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum Begin {
    /// Valid; perform the remote call and pass its result to `finish`.
    Ready(PendingSubmission),
    /// Field errors were set; nothing was sent.
    Invalid,
    /// Another attempt is in flight; this trigger was dropped.
    Busy,
}

/// What a host observes once an attempt settles.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Succeeded(SubmitSuccess),
    /// Field errors are set; read them through the field views.
    Invalid,
    Failed(FormError),
    /// Duplicate trigger or stale result; state unchanged.
    Ignored,
}

/// State of one mounted form.
#[derive(Debug)]
pub struct FormController {
    schema: FormSchema,
    inputs: Vec<FieldSpec>,
    values: RawValues,
    errors: FieldErrors,
    state: SubmissionState,
    history: StateHistory<SubmissionState>,
    can_submit: Guard<SubmissionState>,
    mode: ValidationMode,
    attempt: usize,
    in_flight: Option<Uuid>,
}

impl FormController {
    /// Mount a form.
    ///
    /// Every input must have a schema entry, and a select's entry must carry
    /// a one-of rule with the same options the select offers.
    pub fn new(schema: FormSchema, inputs: Vec<FieldSpec>) -> Result<Self, BuildError> {
        for input in &inputs {
            let field = schema
                .field(input.name())
                .ok_or_else(|| BuildError::UnboundInput(input.name().to_string()))?;
            if let Control::Select { options } = input.control() {
                if field.options() != Some(options.as_slice()) {
                    return Err(BuildError::UnconstrainedSelect(input.name().to_string()));
                }
            }
        }

        Ok(Self {
            schema,
            inputs,
            values: RawValues::new(),
            errors: FieldErrors::new(),
            state: SubmissionState::Idle,
            history: StateHistory::new(),
            can_submit: Guard::new(|state: &SubmissionState| !state.is_in_flight()),
            mode: ValidationMode::OnSubmit,
            attempt: 0,
            in_flight: None,
        })
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn history(&self) -> &StateHistory<SubmissionState> {
        &self.history
    }

    pub fn values(&self) -> &RawValues {
        &self.values
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Form-level error of the last attempt.
    pub fn form_error(&self) -> Option<&FormError> {
        self.state.failure()
    }

    /// Set a field's posted value.
    pub fn edit(&mut self, name: &str, value: impl Into<String>) -> Result<(), UnknownField> {
        self.ensure_known(name)?;
        self.apply_edit(name, Some(value.into()));
        Ok(())
    }

    /// Tick or untick a checkbox.
    pub fn set_checked(&mut self, name: &str, checked: bool) -> Result<(), UnknownField> {
        self.ensure_known(name)?;
        let value = checked.then(|| crate::schema::CHECKED.to_string());
        self.apply_edit(name, value);
        Ok(())
    }

    fn ensure_known(&self, name: &str) -> Result<(), UnknownField> {
        if self.schema.contains(name) {
            Ok(())
        } else {
            Err(UnknownField(name.to_string()))
        }
    }

    pub(crate) fn apply_edit(&mut self, name: &str, value: Option<String>) {
        match value {
            Some(value) => self.values.set(name, value),
            None => {
                self.values.remove(name);
            }
        }

        if self.state.is_final() {
            self.transition(SubmissionState::Idle, 0);
        }

        if self.mode == ValidationMode::OnChange {
            self.revalidate(name);

            // Fields comparing against this one, once the user has touched them.
            let dependents: Vec<String> = self
                .schema
                .dependents(name)
                .filter(|field| self.values.get(field).is_some() || self.errors.contains_key(*field))
                .map(str::to_string)
                .collect();
            for dependent in dependents {
                self.revalidate(&dependent);
            }
        }
    }

    fn revalidate(&mut self, name: &str) {
        match self.schema.validate_field(name, &self.values) {
            Some(message) => {
                self.errors.insert(name.to_string(), message);
            }
            None => {
                self.errors.remove(name);
            }
        }
    }

    /// Render snapshot of one input.
    pub fn field(&self, name: &str) -> Option<FieldView<'_>> {
        self.inputs
            .iter()
            .find(|input| input.name() == name)
            .map(|spec| self.view(spec))
    }

    /// Render snapshots of every input, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = FieldView<'_>> {
        self.inputs.iter().map(|spec| self.view(spec))
    }

    fn view<'a>(&'a self, spec: &'a FieldSpec) -> FieldView<'a> {
        FieldView {
            spec,
            value: self.values.get(spec.name()),
            error: self.error(spec.name()),
        }
    }

    /// Read/write handle on one input.
    pub fn bind(&mut self, name: &str) -> Option<FieldBinding<'_>> {
        let name = self.inputs.iter().find(|input| input.name() == name)?.name().to_string();
        Some(FieldBinding::new(self, name))
    }

    pub fn submit_control(&self, label: impl Into<String>) -> SubmitControl {
        SubmitControl {
            label: label.into(),
            loading: matches!(self.state, SubmissionState::Submitting),
        }
    }

    fn transition(&mut self, to: SubmissionState, attempt: usize) {
        let from = std::mem::replace(&mut self.state, to.clone());
        debug!(from = from.name(), to = to.name(), attempt, "form state changed");
        self.history = self.history.record(StateTransition {
            from,
            to,
            timestamp: Utc::now(),
            attempt,
        });
    }

    /// Validate the current values and, if valid, enter `Submitting`.
    pub fn begin(&mut self) -> Begin {
        if !self.can_submit.check(&self.state) {
            debug!(state = self.state.name(), "submit ignored while in flight");
            return Begin::Busy;
        }

        self.attempt += 1;
        let attempt = self.attempt;
        self.transition(SubmissionState::Validating, attempt);

        match self.schema.validate(&self.values) {
            ValidationResult::Invalid(errors) => {
                debug!(attempt, failing = errors.len(), "submit rejected by validation");
                self.errors = errors;
                self.transition(SubmissionState::Idle, attempt);
                Begin::Invalid
            }
            ValidationResult::Valid(data) => {
                self.errors.clear();
                let id = Uuid::new_v4();
                self.in_flight = Some(id);
                self.transition(SubmissionState::Submitting, attempt);
                info!(%id, attempt, "submission started");
                Begin::Ready(PendingSubmission { id, data })
            }
        }
    }

    /// Apply the remote result of a pending submission.
    ///
    /// Results for anything but the current in-flight attempt are ignored.
    pub fn finish(
        &mut self,
        pending: PendingSubmission,
        result: Result<SubmitSuccess, ClientError>,
    ) -> Outcome {
        if self.in_flight != Some(pending.id) {
            warn!(id = %pending.id, "ignoring result of a submission that is not in flight");
            return Outcome::Ignored;
        }
        self.in_flight = None;
        let attempt = self.attempt;

        match result {
            Ok(success) => {
                info!(attempt, "submission succeeded");
                self.transition(SubmissionState::Succeeded(success.clone()), attempt);
                Outcome::Succeeded(success)
            }
            Err(error) => match attribute(error, &self.schema) {
                Attribution::Field { field, message } => {
                    info!(attempt, %field, "submission rejected for field");
                    self.errors = FieldErrors::from([(field, message)]);
                    self.transition(SubmissionState::Idle, attempt);
                    Outcome::Invalid
                }
                Attribution::Form(form_error) => {
                    warn!(attempt, error = %form_error, "submission failed");
                    self.transition(SubmissionState::Failed(form_error.clone()), attempt);
                    Outcome::Failed(form_error)
                }
            },
        }
    }

    /// Validate, run `action` with the validated data, and apply its result.
    pub async fn submit<F, Fut>(&mut self, action: F) -> Outcome
    where
        F: FnOnce(FormData) -> Fut,
        Fut: Future<Output = Result<SubmitSuccess, ClientError>>,
    {
        match self.begin() {
            Begin::Ready(pending) => {
                let result = action(pending.data.clone()).await;
                self.finish(pending, result)
            }
            Begin::Invalid => Outcome::Invalid,
            Begin::Busy => Outcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::AuthTokens;
    use crate::schema::{FieldBuilder, FormSchemaBuilder};
    use crate::schema::registry::{login_schema, register_schema, EMAIL, PASSWORD, TERMS};

    fn login_controller() -> FormController {
        FormController::new(
            login_schema(),
            vec![FieldSpec::text(EMAIL), FieldSpec::password(PASSWORD)],
        )
        .unwrap()
    }

    fn filled_login() -> FormController {
        let mut controller = login_controller();
        controller.edit(EMAIL, "a@b.com").unwrap();
        controller.edit(PASSWORD, "Abcdef1!").unwrap();
        controller
    }

    fn tokens() -> AuthTokens {
        AuthTokens {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires: None,
        }
    }

    #[test]
    fn new_rejects_inputs_without_schema() {
        let result = FormController::new(login_schema(), vec![FieldSpec::checkbox(TERMS)]);
        assert_eq!(result.err(), Some(BuildError::UnboundInput(TERMS.to_string())));
    }

    fn role_schema(options: Option<&[&str]>) -> FormSchema {
        let mut role = FieldBuilder::new("role").required("Role is required");
        if let Some(options) = options {
            role = role.one_of(options.iter().copied(), "Pick one of the listed roles");
        }
        FormSchemaBuilder::new()
            .field(role)
            .and_then(FormSchemaBuilder::build)
            .unwrap()
    }

    #[test]
    fn select_without_matching_one_of_is_rejected() {
        let select = || FieldSpec::select("role", ["admin", "editor"]);

        let result = FormController::new(role_schema(None), vec![select()]);
        assert_eq!(
            result.err(),
            Some(BuildError::UnconstrainedSelect("role".to_string()))
        );

        let result = FormController::new(role_schema(Some(&["admin"])), vec![select()]);
        assert_eq!(
            result.err(),
            Some(BuildError::UnconstrainedSelect("role".to_string()))
        );
    }

    #[test]
    fn select_value_outside_options_fails_validation() {
        let mut controller = FormController::new(
            role_schema(Some(&["admin", "editor"])),
            vec![FieldSpec::select("role", ["admin", "editor"])],
        )
        .unwrap();

        controller.edit("role", "root").unwrap();
        assert_eq!(controller.begin(), Begin::Invalid);
        assert_eq!(controller.error("role"), Some("Pick one of the listed roles"));

        controller.edit("role", "editor").unwrap();
        let Begin::Ready(pending) = controller.begin() else {
            panic!("Expected ready submission");
        };
        assert_eq!(pending.data().text("role"), Some("editor"));
    }

    #[test]
    fn starts_idle() {
        let controller = login_controller();
        assert_eq!(controller.state(), &SubmissionState::Idle);
        assert!(controller.history().transitions().is_empty());
    }

    #[test]
    fn edit_rejects_unknown_field() {
        let mut controller = login_controller();
        assert_eq!(
            controller.edit("nickname", "x"),
            Err(UnknownField("nickname".to_string()))
        );
    }

    #[test]
    fn invalid_submit_sets_errors_and_returns_to_idle() {
        let mut controller = login_controller();
        controller.edit(EMAIL, "a@b.com").unwrap();
        controller.edit(PASSWORD, "abc").unwrap();

        assert_eq!(controller.begin(), Begin::Invalid);
        assert_eq!(controller.state(), &SubmissionState::Idle);
        assert_eq!(
            controller.error(PASSWORD),
            Some("Password must be at least 8 characters")
        );
        assert_eq!(controller.history().names(), vec!["Idle", "Validating", "Idle"]);
    }

    #[test]
    fn valid_submit_enters_submitting() {
        let mut controller = filled_login();

        let Begin::Ready(pending) = controller.begin() else {
            panic!("Expected ready submission");
        };
        assert_eq!(pending.data().text(EMAIL), Some("a@b.com"));
        assert_eq!(controller.state(), &SubmissionState::Submitting);
        assert!(controller.submit_control("Login").loading);
    }

    #[test]
    fn duplicate_submit_is_ignored_while_in_flight() {
        let mut controller = filled_login();

        assert!(matches!(controller.begin(), Begin::Ready(_)));
        let transitions = controller.history().transitions().len();

        assert_eq!(controller.begin(), Begin::Busy);
        assert_eq!(controller.state(), &SubmissionState::Submitting);
        assert_eq!(controller.history().transitions().len(), transitions);
    }

    #[test]
    fn finish_success_reaches_succeeded() {
        let mut controller = filled_login();
        let Begin::Ready(pending) = controller.begin() else {
            panic!("Expected ready submission");
        };

        let outcome = controller.finish(pending, Ok(SubmitSuccess::Authenticated(tokens())));

        assert_eq!(outcome, Outcome::Succeeded(SubmitSuccess::Authenticated(tokens())));
        assert_eq!(controller.state().tokens(), Some(&tokens()));
        assert_eq!(
            controller.history().names(),
            vec!["Idle", "Validating", "Submitting", "Succeeded"]
        );
    }

    #[test]
    fn stale_result_is_ignored() {
        let mut controller = filled_login();
        let Begin::Ready(pending) = controller.begin() else {
            panic!("Expected ready submission");
        };
        let stale = pending.clone();

        controller.finish(pending, Err(ClientError::InvalidCredentials));
        let outcome = controller.finish(stale, Ok(SubmitSuccess::LoggedOut));

        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(controller.form_error(), Some(&FormError::InvalidCredentials));
    }

    #[test]
    fn field_conflict_becomes_inline_error() {
        let mut controller = FormController::new(register_schema(), vec![]).unwrap();
        for (name, value) in [
            ("first_name", "John"),
            ("last_name", "Doe"),
            (EMAIL, "john@example.com"),
            (PASSWORD, "Abcdef1!"),
            ("confirm_password", "Abcdef1!"),
        ] {
            controller.edit(name, value).unwrap();
        }
        controller.set_checked(TERMS, true).unwrap();

        let Begin::Ready(pending) = controller.begin() else {
            panic!("Expected ready submission");
        };
        let outcome = controller.finish(
            pending,
            Err(ClientError::Conflict {
                field: EMAIL.to_string(),
                reason: "has to be unique".to_string(),
            }),
        );

        assert_eq!(outcome, Outcome::Invalid);
        assert_eq!(controller.error(EMAIL), Some("Email is already in use"));
        assert_eq!(controller.state(), &SubmissionState::Idle);
        assert!(controller.form_error().is_none());
    }

    #[test]
    fn transport_failure_is_surfaced() {
        let mut controller = filled_login();
        let Begin::Ready(pending) = controller.begin() else {
            panic!("Expected ready submission");
        };

        let outcome = controller.finish(pending, Err(ClientError::Transport("refused".to_string())));

        assert!(matches!(outcome, Outcome::Failed(FormError::Unavailable { .. })));
        assert!(controller.state().is_error());
    }

    #[test]
    fn editing_after_failure_returns_to_idle() {
        let mut controller = filled_login();
        let Begin::Ready(pending) = controller.begin() else {
            panic!("Expected ready submission");
        };
        controller.finish(pending, Err(ClientError::InvalidCredentials));

        controller.edit(PASSWORD, "Abcdef1?").unwrap();

        assert_eq!(controller.state(), &SubmissionState::Idle);
        assert_eq!(controller.history().transitions().last().map(|t| t.attempt), Some(0));
    }

    #[test]
    fn errors_are_not_touched_mid_typing_by_default() {
        let mut controller = login_controller();
        controller.begin();
        assert!(controller.error(EMAIL).is_some());

        controller.edit(EMAIL, "a@b.com").unwrap();
        assert_eq!(controller.error(EMAIL), Some("Email is required"));
    }

    #[test]
    fn live_validation_updates_edited_field() {
        let mut controller = login_controller().with_mode(ValidationMode::OnChange);

        controller.edit(EMAIL, "nope").unwrap();
        assert_eq!(controller.error(EMAIL), Some("Invalid email address"));
        assert_eq!(controller.error(PASSWORD), None);

        controller.edit(EMAIL, "a@b.com").unwrap();
        assert_eq!(controller.error(EMAIL), None);
    }

    #[test]
    fn live_validation_rechecks_confirmation_when_password_changes() {
        let mut controller = FormController::new(register_schema(), vec![])
            .unwrap()
            .with_mode(ValidationMode::OnChange);

        controller.edit(PASSWORD, "Abcdef1!").unwrap();
        controller.edit("confirm_password", "Abcdef1?").unwrap();
        assert_eq!(controller.error("confirm_password"), Some("Passwords must match"));

        controller.edit(PASSWORD, "Abcdef1?").unwrap();
        assert_eq!(controller.error("confirm_password"), None);

        controller.edit(PASSWORD, "Abcdef1#").unwrap();
        assert_eq!(controller.error("confirm_password"), Some("Passwords must match"));
    }

    #[test]
    fn live_validation_leaves_untouched_dependents_alone() {
        let mut controller = FormController::new(register_schema(), vec![])
            .unwrap()
            .with_mode(ValidationMode::OnChange);

        controller.edit(PASSWORD, "Abcdef1!").unwrap();

        assert_eq!(controller.error("confirm_password"), None);
    }

    #[test]
    fn binding_reads_and_writes_field() {
        let mut controller = login_controller();

        let mut email = controller.bind(EMAIL).unwrap();
        email.set("a@b.com");
        assert_eq!(email.value(), Some("a@b.com"));
        assert_eq!(email.error(), None);

        assert!(controller.bind("terms").is_none());
        assert_eq!(controller.field(EMAIL).and_then(|f| f.value), Some("a@b.com"));
    }

    #[tokio::test]
    async fn submit_runs_action_with_validated_data() {
        let mut controller = filled_login();

        let outcome = controller
            .submit(|data| async move {
                assert_eq!(data.text(PASSWORD), Some("Abcdef1!"));
                Ok(SubmitSuccess::Authenticated(tokens()))
            })
            .await;

        assert!(matches!(outcome, Outcome::Succeeded(_)));
    }

    #[tokio::test]
    async fn submit_skips_action_when_invalid() {
        let mut controller = login_controller();
        let mut called = false;

        let outcome = controller
            .submit(|_| {
                called = true;
                async { Ok(SubmitSuccess::LoggedOut) }
            })
            .await;

        assert_eq!(outcome, Outcome::Invalid);
        assert!(!called);
    }
}
