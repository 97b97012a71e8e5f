//! Registration submission flow.
//!
//! `Idle -> Validating -> Submitting -> Success | Error`, with validation
//! failures going straight from `Validating` to `Error`. The flow keeps the
//! terminal state of the last attempt until [`SubmissionFlow::acknowledge`].

use crate::client::StudentsApi;
use crate::error::UnknownField;
use crate::flag::BusyFlag;
use crate::types::{
    FormField, RegistrationForm, RegistrationRequest, SubmissionOutcome, SUCCESS_MESSAGE,
};
use crate::validate::validate;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub const SUBMIT_LABEL: &str = "Submit Registration";
pub const SUBMITTING_LABEL: &str = "Submitting...";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlowState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Success,
    Error,
}

/// Owns the form and drives one submission at a time.
///
/// Callers must not start a second `submit` while [`is_submitting`] is true;
/// the flow does not reject overlapping calls itself.
///
/// [`is_submitting`]: SubmissionFlow::is_submitting
pub struct SubmissionFlow {
    api: Arc<dyn StudentsApi>,
    form: RegistrationForm,
    state: FlowState,
    outcome: SubmissionOutcome,
    submitting: BusyFlag,
}

impl SubmissionFlow {
    pub fn new(api: Arc<dyn StudentsApi>) -> Self {
        Self {
            api,
            form: RegistrationForm::default(),
            state: FlowState::Idle,
            outcome: SubmissionOutcome::None,
            submitting: BusyFlag::new(),
        }
    }

    /// Set one field. No validation, no I/O.
    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Set one field by its input name.
    pub fn update_named(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), UnknownField> {
        let field: FormField = name.parse()?;
        self.update_field(field, value);
        Ok(())
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn outcome(&self) -> &SubmissionOutcome {
        &self.outcome
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_set()
    }

    /// Handle for observing the submitting flag from elsewhere.
    pub fn submitting_flag(&self) -> BusyFlag {
        self.submitting.clone()
    }

    /// Label for the submit control.
    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Return to `Idle` after a terminal state has been shown.
    pub fn acknowledge(&mut self) {
        if matches!(self.state, FlowState::Success | FlowState::Error) {
            self.state = FlowState::Idle;
        }
    }

    /// Validate the current form and, if it passes, post it once.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> SubmissionOutcome {
        self.outcome = SubmissionOutcome::None;
        self.state = FlowState::Validating;

        if let Err(e) = validate(&self.form) {
            debug!(error = ?e, "Form failed validation");
            return self.finish(FlowState::Error, SubmissionOutcome::error(e.to_string()));
        }

        let request = RegistrationRequest::from(&self.form);

        let result = {
            let _submitting = self.submitting.raise();
            self.state = FlowState::Submitting;
            self.api.submit_registration(&request).await
        };

        match result {
            Ok(()) => {
                info!(instrument = %request.instrument, "Registration submitted");
                self.form = RegistrationForm::default();
                self.finish(FlowState::Success, SubmissionOutcome::success(SUCCESS_MESSAGE))
            }
            Err(e) => {
                warn!(status = ?e.status(), "Registration failed: {}", e);
                self.finish(FlowState::Error, SubmissionOutcome::error(e.to_string()))
            }
        }
    }

    fn finish(&mut self, state: FlowState, outcome: SubmissionOutcome) -> SubmissionOutcome {
        self.state = state;
        self.outcome = outcome.clone();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockStudentsApi;
    use crate::error::SubmissionError;
    use std::sync::OnceLock;

    fn fill_valid(flow: &mut SubmissionFlow) {
        flow.update_field(FormField::StudentName, "Alex Rivera");
        flow.update_field(FormField::Email, "alex@example.com");
        flow.update_field(FormField::Course, "Children Piano");
        flow.update_field(FormField::Grade, "3");
    }

    #[test]
    fn test_update_field_is_idempotent() {
        let mut flow = SubmissionFlow::new(Arc::new(MockStudentsApi::new()));
        flow.update_field(FormField::Phone, "555-0100");
        let once = flow.form().clone();
        flow.update_field(FormField::Phone, "555-0100");
        assert_eq!(flow.form(), &once);
        assert_eq!(flow.state(), FlowState::Idle);
    }

    #[test]
    fn test_update_named() {
        let mut flow = SubmissionFlow::new(Arc::new(MockStudentsApi::new()));
        flow.update_named("parent_name", "Jane Rivera").unwrap();
        assert_eq!(flow.form().parent_name, "Jane Rivera");

        let err = flow.update_named("nickname", "AJ").unwrap_err();
        assert_eq!(err, UnknownField("nickname".into()));
    }

    #[tokio::test]
    async fn test_validation_failure_skips_network() {
        let mut api = MockStudentsApi::new();
        api.expect_submit_registration().never();

        let mut flow = SubmissionFlow::new(Arc::new(api));
        flow.update_field(FormField::Email, "alex@example.com");

        let outcome = flow.submit().await;
        assert_eq!(
            outcome,
            SubmissionOutcome::error("Please fill in all required fields.")
        );
        assert_eq!(flow.state(), FlowState::Error);
        assert!(!flow.is_submitting());
        assert_eq!(flow.form().email, "alex@example.com");
    }

    #[tokio::test]
    async fn test_success_resets_form() {
        let expected = RegistrationRequest {
            full_name: "Alex Rivera".into(),
            email: "alex@example.com".into(),
            phone: "".into(),
            instrument: "Children Piano".into(),
            experience_level: "Grade 3".into(),
        };

        let observed = Arc::new(OnceLock::<BusyFlag>::new());
        let seen = observed.clone();

        let mut api = MockStudentsApi::new();
        api.expect_submit_registration()
            .withf(move |req| req == &expected)
            .times(1)
            .returning(move |_| {
                assert!(seen.get().is_some_and(BusyFlag::is_set));
                Ok(())
            });

        let mut flow = SubmissionFlow::new(Arc::new(api));
        observed.set(flow.submitting_flag()).unwrap();
        fill_valid(&mut flow);

        let outcome = flow.submit().await;
        assert_eq!(outcome, SubmissionOutcome::success(SUCCESS_MESSAGE));
        assert_eq!(flow.outcome(), &outcome);
        assert_eq!(flow.state(), FlowState::Success);
        assert!(flow.form().is_empty());
        assert!(!flow.is_submitting());
        assert_eq!(flow.submit_label(), SUBMIT_LABEL);

        flow.acknowledge();
        assert_eq!(flow.state(), FlowState::Idle);
    }

    #[tokio::test]
    async fn test_server_error_keeps_form() {
        let mut api = MockStudentsApi::new();
        api.expect_submit_registration().times(1).returning(|_| {
            Err(SubmissionError::Api {
                status: 409,
                message: "Email already registered".into(),
            })
        });

        let mut flow = SubmissionFlow::new(Arc::new(api));
        fill_valid(&mut flow);
        let before = flow.form().clone();

        let outcome = flow.submit().await;
        assert_eq!(outcome, SubmissionOutcome::error("Email already registered"));
        assert_eq!(flow.state(), FlowState::Error);
        assert_eq!(flow.form(), &before);
        assert!(!flow.is_submitting());
    }

    #[tokio::test]
    async fn test_new_attempt_replaces_outcome() {
        let mut api = MockStudentsApi::new();
        api.expect_submit_registration().returning(|_| Ok(()));

        let mut flow = SubmissionFlow::new(Arc::new(api));
        assert_eq!(flow.submit().await, SubmissionOutcome::error("Please fill in all required fields."));

        fill_valid(&mut flow);
        assert!(flow.submit().await.is_success());
        assert!(flow.outcome().is_success());
    }
}
