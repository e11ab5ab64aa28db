use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::client::MatchService;
use super::controller::{SubmissionController, SubmitRejection};
use super::domain::{ApplicantInput, FieldValue, SubmissionResult};
use super::registry::{field_views, FieldName};

/// Body of a single field edit; `null` clears the field.
#[derive(Debug, Deserialize)]
pub struct FieldChange {
    #[serde(default)]
    pub value: Option<FieldValue>,
}

/// Router exposing the form binding used by rendering clients.
pub fn intake_router<S>(controller: Arc<SubmissionController<S>>) -> Router
where
    S: MatchService + 'static,
{
    Router::new()
        .route("/api/v1/intake/fields", get(fields_handler))
        .route("/api/v1/intake/fields/:field", put(field_change_handler::<S>))
        .route("/api/v1/intake/state", get(state_handler::<S>))
        .route("/api/v1/intake/submit", post(submit_handler::<S>))
        .route("/api/v1/intake/match", post(match_handler::<S>))
        .route("/api/v1/intake/reset", post(reset_handler::<S>))
        .with_state(controller)
}

pub(crate) async fn fields_handler() -> Response {
    (StatusCode::OK, Json(field_views())).into_response()
}

pub(crate) async fn state_handler<S>(
    State(controller): State<Arc<SubmissionController<S>>>,
) -> Response
where
    S: MatchService + 'static,
{
    (StatusCode::OK, Json(controller.snapshot())).into_response()
}

pub(crate) async fn field_change_handler<S>(
    State(controller): State<Arc<SubmissionController<S>>>,
    Path(field): Path<String>,
    change: Result<Json<FieldChange>, JsonRejection>,
) -> Response
where
    S: MatchService + 'static,
{
    let Json(change) = match change {
        Ok(change) => change,
        Err(rejection) => return rejection_response(rejection),
    };

    let name = match field.parse::<FieldName>() {
        Ok(name) => name,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::NOT_FOUND, Json(payload)).into_response();
        }
    };

    match change.value {
        Some(value) => controller.on_field_change(name, value),
        None => controller.clear_field(name),
    }

    (StatusCode::OK, Json(controller.snapshot())).into_response()
}

pub(crate) async fn submit_handler<S>(
    State(controller): State<Arc<SubmissionController<S>>>,
) -> Response
where
    S: MatchService + 'static,
{
    let outcome = controller.submit().await;
    submission_response(&controller, outcome)
}

pub(crate) async fn match_handler<S>(
    State(controller): State<Arc<SubmissionController<S>>>,
    input: Result<Json<ApplicantInput>, JsonRejection>,
) -> Response
where
    S: MatchService + 'static,
{
    let Json(input) = match input {
        Ok(input) => input,
        Err(rejection) => return rejection_response(rejection),
    };

    let outcome = controller.submit_input(input).await;
    submission_response(&controller, outcome)
}

pub(crate) async fn reset_handler<S>(
    State(controller): State<Arc<SubmissionController<S>>>,
) -> Response
where
    S: MatchService + 'static,
{
    controller.reset();
    (StatusCode::OK, Json(controller.snapshot())).into_response()
}

/// Malformed bodies get the same json error shape as the other rejections.
fn rejection_response(rejection: JsonRejection) -> Response {
    let payload = json!({ "error": rejection.body_text() });
    (rejection.status(), Json(payload)).into_response()
}

fn submission_response<S>(
    controller: &SubmissionController<S>,
    outcome: Result<SubmissionResult, SubmitRejection>,
) -> Response
where
    S: MatchService + 'static,
{
    let status = match &outcome {
        Ok(SubmissionResult::Success(_)) => StatusCode::OK,
        Ok(SubmissionResult::Failure(_)) => StatusCode::BAD_GATEWAY,
        Err(SubmitRejection::Invalid(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        Err(SubmitRejection::InFlight) => {
            let payload = json!({ "error": SubmitRejection::InFlight.to_string() });
            return (StatusCode::CONFLICT, Json(payload)).into_response();
        }
    };

    (status, Json(controller.snapshot())).into_response()
}
