//! reqwest-based [`EvaluatorTransport`]

use ark_application::ports::evaluator_transport::EvaluatorTransport;
use ark_domain::{CoreError, EvaluationResponse};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Posts evaluation bodies as JSON over a shared reqwest client
#[derive(Debug, Clone, Default)]
pub struct HttpEvaluatorTransport {
    client: reqwest::Client,
}

impl HttpEvaluatorTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EvaluatorTransport for HttpEvaluatorTransport {
    async fn post(
        &self,
        url: &str,
        body: &serde_json::Value,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<EvaluationResponse, CoreError> {
        let request = self.client.post(url).timeout(timeout).json(body);

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(CoreError::Cancelled),
            response = request.send() => response,
        };
        let response = response.map_err(|e| {
            warn!(url = %url, error = %e, "Evaluator request failed");
            CoreError::Transport(format!("failed to call evaluator: {e}"))
        })?;

        let status = response.status();
        let text = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(CoreError::Cancelled),
            text = response.text() => text,
        };
        let text = text
            .map_err(|e| CoreError::Transport(format!("failed to read evaluator response: {e}")))?;

        if status != StatusCode::OK {
            return Err(CoreError::Protocol(format!(
                "evaluator returned status {}",
                status.as_u16()
            )));
        }

        debug!(url = %url, bytes = text.len(), "Evaluator responded");
        serde_json::from_str(&text).map_err(|e| {
            CoreError::Protocol(format!("failed to decode evaluation response: {e}"))
        })
    }
}
