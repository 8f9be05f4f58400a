//! Submission lifecycle
//!
//! ```text
//! idle       --submit, invalid--> idle        (all fields touched, nothing sent)
//! idle       --submit, valid----> submitting
//! submitting --transport ok-----> success     (form reset)
//! submitting --transport err----> error       (values kept)
//! success | error --submit------> a new attempt, as from idle
//! ```
//!
//! A submit while `submitting` is ignored, so at most one payload is ever
//! in flight.

use super::field::FieldName;
use super::form_state::FormState;
use super::validation::{ErrorMap, Validator};
use crate::error::Result;
use crate::transport::{RegistrationPayload, Transport, TransportError};

/// Lifecycle stage of the most recent submit attempt
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Success,
    /// The attempt failed; carries the message to show
    Error(String),
}

impl SubmissionPhase {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Success => "success",
            Self::Error(_) => "error",
        }
    }
}

/// Outcome of asking the controller to start a submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAttempt {
    /// A submission is already in flight; nothing changed
    Rejected,
    /// Validation failed; every field is now touched
    Invalid(ErrorMap),
    /// The form is valid and this payload must be sent
    Dispatch(RegistrationPayload),
}

/// Owns the form and drives it through the submission lifecycle
#[derive(Debug, Clone)]
pub struct SubmissionController {
    form: FormState,
    phase: SubmissionPhase,
}

impl SubmissionController {
    pub fn new(validator: Validator) -> Self {
        Self {
            form: FormState::new(validator),
            phase: SubmissionPhase::Idle,
        }
    }

    /// Controller for the user registration form
    pub fn registration() -> Result<Self> {
        Ok(Self::new(Validator::registration()?))
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, SubmissionPhase::Submitting)
    }

    /// Message of the failed submission, only in the error phase
    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            SubmissionPhase::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Errors the user is allowed to see
    pub fn visible_errors(&self) -> ErrorMap {
        self.form.visible_errors()
    }

    /// Overwrite a field. Ignored while a submission is in flight.
    pub fn set_value(&mut self, field: FieldName, value: impl Into<String>) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.form.set_value(field, value);
        true
    }

    /// Append a typed character. Ignored while a submission is in flight.
    pub fn push_char(&mut self, field: FieldName, c: char) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.form.push_char(field, c);
        true
    }

    /// Delete the last character. Ignored while a submission is in flight.
    pub fn pop_char(&mut self, field: FieldName) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.form.pop_char(field);
        true
    }

    /// Mark a field as interacted with (e.g. on blur)
    pub fn touch(&mut self, field: FieldName) {
        self.form.touch(field);
    }

    /// Start a submission: validate the current values and, when they are
    /// valid, enter `submitting` and hand back the payload to send.
    pub fn begin_submit(&mut self) -> SubmitAttempt {
        if self.is_submitting() {
            tracing::debug!("submit ignored, a submission is already in flight");
            return SubmitAttempt::Rejected;
        }

        self.phase = SubmissionPhase::Idle;
        self.form.touch_all();
        let errors = self.form.revalidate().clone();
        if !errors.is_empty() {
            tracing::info!(
                invalid_fields = errors.len(),
                "submission blocked by validation"
            );
            return SubmitAttempt::Invalid(errors);
        }

        let Some(payload) = RegistrationPayload::from_values(self.form.values()) else {
            // Only reachable with a rule set that lets a non-numeric age through
            tracing::warn!("age is not a number, submission blocked");
            self.form.insert_error(FieldName::Age, "Age must be a number");
            return SubmitAttempt::Invalid(self.form.errors().clone());
        };

        self.phase = SubmissionPhase::Submitting;
        tracing::info!("submitting registration");
        SubmitAttempt::Dispatch(payload)
    }

    /// Record the transport's answer for the submission in flight
    pub fn complete(&mut self, result: std::result::Result<(), TransportError>) {
        if !self.is_submitting() {
            tracing::warn!(
                phase = self.phase.label(),
                "transport result received with no submission in flight"
            );
            return;
        }

        match result {
            Ok(()) => {
                tracing::info!("registration succeeded");
                self.form.reset();
                self.phase = SubmissionPhase::Success;
            }
            Err(err) => {
                tracing::warn!(error = %err.message(), "registration failed");
                self.phase = SubmissionPhase::Error(err.message().to_string());
            }
        }
    }

    /// Run a whole submission against `transport`
    pub async fn submit(&mut self, transport: &dyn Transport) -> &SubmissionPhase {
        if let SubmitAttempt::Dispatch(payload) = self.begin_submit() {
            let result = transport.submit(payload).await;
            self.complete(result);
        }
        &self.phase
    }
}
