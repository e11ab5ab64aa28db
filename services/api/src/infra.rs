use adopt_match::config::MatchServiceConfig;
use adopt_match::error::AppError;
use adopt_match::workflows::intake::{HttpMatchClient, SubmissionController};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type IntakeController = SubmissionController<HttpMatchClient>;

pub(crate) fn build_controller(
    config: &MatchServiceConfig,
) -> Result<Arc<IntakeController>, AppError> {
    let client = HttpMatchClient::new(config)?;
    Ok(Arc::new(SubmissionController::new(Arc::new(client))))
}
