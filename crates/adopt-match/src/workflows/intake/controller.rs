use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::client::MatchService;
use super::domain::{
    ApplicantInput, ErrorSet, FieldValue, IntakeSnapshot, SubmissionPhase, SubmissionResult,
};
use super::normalizer::normalize;
use super::registry::FieldName;
use super::validation::validate;

/// Submit request that never turned into a call to the matching service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitRejection {
    #[error("form has {} invalid field(s): {}", .0.len(), .0.summary())]
    Invalid(ErrorSet),
    #[error("a submission is already in flight")]
    InFlight,
}

struct FormState {
    phase: SubmissionPhase,
    input: ApplicantInput,
    errors: ErrorSet,
    result: Option<SubmissionResult>,
    updated_at: DateTime<Utc>,
}

impl FormState {
    fn transition(&mut self, phase: SubmissionPhase) {
        self.phase = phase;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Edits after a finished attempt start the form over.
    fn reopen(&mut self) {
        if self.phase.is_terminal() {
            self.phase = SubmissionPhase::Idle;
        }
        self.touch();
    }
}

/// Owns the applicant form and drives validate -> normalize -> submit for each submit action.
pub struct SubmissionController<S> {
    service: Arc<S>,
    state: Mutex<FormState>,
    in_flight: AtomicBool,
}

impl<S> SubmissionController<S>
where
    S: MatchService + 'static,
{
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            state: Mutex::new(FormState {
                phase: SubmissionPhase::Idle,
                input: ApplicantInput::default(),
                errors: ErrorSet::default(),
                result: None,
                updated_at: Utc::now(),
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Record a new value for one field.
    pub fn on_field_change(&self, name: FieldName, value: FieldValue) {
        let mut state = self.state();
        state.input.set(name, value);
        state.reopen();
    }

    pub fn clear_field(&self, name: FieldName) {
        let mut state = self.state();
        state.input.remove(name);
        state.reopen();
    }

    /// Discard the form contents along with any errors and the last result.
    pub fn reset(&self) {
        let mut state = self.state();
        state.input = ApplicantInput::default();
        state.errors = ErrorSet::default();
        state.result = None;
        state.reopen();
    }

    /// Submit the form as it currently stands.
    pub async fn submit(&self) -> Result<SubmissionResult, SubmitRejection> {
        let flight = self.begin()?;
        self.run(flight).await
    }

    /// Replace the whole form and submit it in one step.
    pub async fn submit_input(
        &self,
        input: ApplicantInput,
    ) -> Result<SubmissionResult, SubmitRejection> {
        let flight = self.begin()?;
        {
            let mut state = self.state();
            state.input = input;
            state.touch();
        }
        self.run(flight).await
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.state().phase
    }

    pub fn errors(&self) -> ErrorSet {
        self.state().errors.clone()
    }

    pub fn last_result(&self) -> Option<SubmissionResult> {
        self.state().result.clone()
    }

    pub fn input(&self) -> ApplicantInput {
        self.state().input.clone()
    }

    pub fn snapshot(&self) -> IntakeSnapshot {
        let state = self.state();
        IntakeSnapshot {
            phase: state.phase,
            input: state.input.clone(),
            errors: state.errors.clone(),
            result: state.result.clone(),
            updated_at: state.updated_at,
        }
    }

    fn begin(&self) -> Result<InFlight<'_, S>, SubmitRejection> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("rejecting submit while a request is in flight");
            return Err(SubmitRejection::InFlight);
        }

        Ok(InFlight { controller: self })
    }

    async fn run(&self, _flight: InFlight<'_, S>) -> Result<SubmissionResult, SubmitRejection> {
        let payload = {
            let mut state = self.state();
            state.transition(SubmissionPhase::Validating);

            match validate(&state.input) {
                Ok(record) => {
                    state.errors = ErrorSet::default();
                    state.result = None;
                    state.transition(SubmissionPhase::Submitting);
                    debug!("applicant validated, submitting to matching service");
                    normalize(&record)
                }
                Err(errors) => {
                    warn!(
                        invalid_fields = errors.len(),
                        "applicant form failed validation"
                    );
                    state.errors = errors.clone();
                    state.result = None;
                    state.transition(SubmissionPhase::Idle);
                    return Err(SubmitRejection::Invalid(errors));
                }
            }
        };

        let result = match self.service.request_match(&payload).await {
            Ok(body) => {
                info!("match request accepted");
                SubmissionResult::Success(body)
            }
            Err(error) => {
                warn!(
                    error = %error,
                    status = ?error.status(),
                    detail = error.detail(),
                    "match request failed"
                );
                SubmissionResult::Failure(error)
            }
        };

        let mut state = self.state();
        state.result = Some(result.clone());
        state.transition(if result.is_success() {
            SubmissionPhase::Succeeded
        } else {
            SubmissionPhase::Failed
        });

        Ok(result)
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds the single in-flight slot; releasing it also abandons a pending call.
struct InFlight<'a, S> {
    controller: &'a SubmissionController<S>,
}

impl<S> Drop for InFlight<'_, S> {
    fn drop(&mut self) {
        {
            let mut state = self
                .controller
                .state
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if state.phase == SubmissionPhase::Submitting {
                state.transition(SubmissionPhase::Idle);
            }
        }
        self.controller.in_flight.store(false, Ordering::Release);
    }
}
