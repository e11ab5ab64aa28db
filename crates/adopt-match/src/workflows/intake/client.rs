use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use super::domain::MatchRequestPayload;
use crate::config::MatchServiceConfig;

const ERROR_BODY_PREVIEW: usize = 200;

/// Failure talking to the remote matching service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchServiceError {
    #[error("submission failed, try again")]
    Transport { detail: String },
    #[error("matching service responded with status {status}")]
    Protocol { status: u16, body: String },
    #[error("matching service returned an unreadable response")]
    Decode { detail: String },
}

impl MatchServiceError {
    /// Diagnostic detail that stays out of the user-facing message.
    pub fn detail(&self) -> &str {
        match self {
            MatchServiceError::Transport { detail } | MatchServiceError::Decode { detail } => {
                detail
            }
            MatchServiceError::Protocol { body, .. } => body,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            MatchServiceError::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Outbound seam to the matching service so the controller can be exercised without a network.
#[async_trait]
pub trait MatchService: Send + Sync {
    async fn request_match(
        &self,
        payload: &MatchRequestPayload,
    ) -> Result<serde_json::Value, MatchServiceError>;
}

/// reqwest-backed client for `POST /match`.
#[derive(Debug, Clone)]
pub struct HttpMatchClient {
    http: Client,
    endpoint: reqwest::Url,
}

impl HttpMatchClient {
    pub fn new(config: &MatchServiceConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }
}

#[async_trait]
impl MatchService for HttpMatchClient {
    async fn request_match(
        &self,
        payload: &MatchRequestPayload,
    ) -> Result<serde_json::Value, MatchServiceError> {
        debug!(endpoint = %self.endpoint, "posting match request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            // The status alone classifies the failure; the body is a best-effort preview.
            let body = response.text().await.unwrap_or_default();
            return Err(MatchServiceError::Protocol {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_PREVIEW).collect(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&body).map_err(|err| MatchServiceError::Decode {
            detail: err.to_string(),
        })
    }
}

fn transport(err: reqwest::Error) -> MatchServiceError {
    MatchServiceError::Transport {
        detail: err.to_string(),
    }
}
