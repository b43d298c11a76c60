//! HTTP client for the external prediction endpoint.

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

use crate::config::AppConfig;
use crate::domain::{PredictionResult, RequestPayload};

/// A failed prediction call. `message` is the best diagnostic available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestError {
    pub message: String,
}

impl RequestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Anything that can turn a payload into a prediction.
pub trait Predictor {
    fn predict(&self, payload: &RequestPayload) -> Result<PredictionResult, RequestError>;
}

/// Fire-once client: one POST per call, no retries, no timeout.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: Client,
    endpoint: String,
}

impl PredictionClient {
    pub fn new(base_url: &str) -> Result<Self, RequestError> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| RequestError::new(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: format!("{}/predict", base_url.trim_end_matches('/')),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, RequestError> {
        Self::new(&config.api_base_url)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Predictor for PredictionClient {
    fn predict(&self, payload: &RequestPayload) -> Result<PredictionResult, RequestError> {
        tracing::debug!(endpoint = %self.endpoint, fields = payload.len(), "sending prediction request");

        let resp = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .map_err(|e| {
                tracing::warn!(endpoint = %self.endpoint, error = %e, "prediction request failed");
                RequestError::new(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(endpoint = %self.endpoint, %status, "prediction endpoint returned an error status");
            return Err(RequestError::new(format!("Request failed with status {status}")));
        }

        let result: PredictionResult = resp
            .json()
            .map_err(|e| RequestError::new(format!("Failed to parse prediction response: {e}")))?;

        tracing::info!(
            probability_bad = ?result.probability_bad,
            model_version = ?result.model_version,
            "prediction received"
        );
        Ok(result)
    }
}
