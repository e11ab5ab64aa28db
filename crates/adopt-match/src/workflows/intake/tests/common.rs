use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::{json, Value};
use tokio::sync::Notify;

use crate::workflows::intake::client::{MatchService, MatchServiceError};
use crate::workflows::intake::domain::{ApplicantInput, MatchRequestPayload};
use crate::workflows::intake::registry::FieldName;
use crate::workflows::intake::SubmissionController;

/// Female, 34, asian, 90210 applicant with a text income.
pub(super) fn scenario_a_input() -> ApplicantInput {
    ApplicantInput::new()
        .with(FieldName::Gender, "female")
        .with(FieldName::Age, 34u32)
        .with(FieldName::Ethnicity, "asian")
        .with(FieldName::Location, "90210")
        .with(FieldName::Income, "50000")
        .with(FieldName::MaritalStatus, true)
        .with(FieldName::Employed, true)
        .with(FieldName::Disabled, false)
}

pub(super) fn scenario_a_payload() -> Value {
    json!({
        "age": 34,
        "gender": 0,
        "ethnicity": "asian",
        "location": "90210",
        "marital_status": 1,
        "income": "50000",
        "employed": 1,
        "disabled": 0,
    })
}

pub(super) fn match_body() -> Value {
    json!({ "matches": [{ "child_id": "c-102", "score": 0.82 }] })
}

/// Answers every request with a canned outcome and records the payloads it saw.
pub(super) struct RecordingService {
    outcome: Result<Value, MatchServiceError>,
    calls: Mutex<Vec<MatchRequestPayload>>,
}

impl RecordingService {
    pub(super) fn accepting(body: Value) -> Self {
        Self {
            outcome: Ok(body),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn failing(error: MatchServiceError) -> Self {
        Self {
            outcome: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn calls(&self) -> Vec<MatchRequestPayload> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }
}

#[async_trait]
impl MatchService for RecordingService {
    async fn request_match(
        &self,
        payload: &MatchRequestPayload,
    ) -> Result<Value, MatchServiceError> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(payload.clone());
        self.outcome.clone()
    }
}

/// Holds each request open until the test releases it.
#[derive(Default)]
pub(super) struct GatedService {
    pub(super) entered: Notify,
    pub(super) release: Notify,
    calls: AtomicUsize,
}

impl GatedService {
    pub(super) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MatchService for GatedService {
    async fn request_match(
        &self,
        _payload: &MatchRequestPayload,
    ) -> Result<Value, MatchServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(match_body())
    }
}

pub(super) fn server_error() -> MatchServiceError {
    MatchServiceError::Protocol {
        status: 500,
        body: "internal error".to_string(),
    }
}

pub(super) fn connection_refused() -> MatchServiceError {
    MatchServiceError::Transport {
        detail: "error trying to connect: connection refused".to_string(),
    }
}

pub(super) fn controller_with(
    service: RecordingService,
) -> (
    Arc<SubmissionController<RecordingService>>,
    Arc<RecordingService>,
) {
    let service = Arc::new(service);
    let controller = Arc::new(SubmissionController::new(service.clone()));
    (controller, service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
