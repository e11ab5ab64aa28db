use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::intake::{ErrorSet, MatchServiceError, SubmitRejection};

/// Failures that end a command or stop the service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("match service client error: {0}")]
    Client(#[from] reqwest::Error),
    #[error("applicant form is invalid: {}", .0.summary())]
    Invalid(ErrorSet),
    #[error("a submission is already in flight")]
    Busy,
    #[error("submission failed: {0}")]
    Submission(#[source] MatchServiceError),
}

impl AppError {
    /// Field errors when the form never reached the matching service.
    pub fn field_errors(&self) -> Option<&ErrorSet> {
        match self {
            AppError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<SubmitRejection> for AppError {
    fn from(rejection: SubmitRejection) -> Self {
        match rejection {
            SubmitRejection::Invalid(errors) => AppError::Invalid(errors),
            SubmitRejection::InFlight => AppError::Busy,
        }
    }
}

impl From<MatchServiceError> for AppError {
    fn from(error: MatchServiceError) -> Self {
        AppError::Submission(error)
    }
}
