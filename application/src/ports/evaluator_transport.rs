//! Evaluator transport port
//!
//! Defines how an evaluation request body reaches a scoring service. The
//! infrastructure layer provides a reqwest-based adapter.

use async_trait::async_trait;
use ark_domain::{CoreError, EvaluationResponse};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Port for posting evaluation requests
///
/// Implementations POST `body` as JSON to `url` under `timeout` and decode
/// the reply. A non-200 status is a [`CoreError::Protocol`], an undecodable
/// body a [`CoreError::Protocol`] as well, a network failure or timeout a
/// [`CoreError::Transport`], and cancellation [`CoreError::Cancelled`].
///
/// The response's own `error` field is NOT inspected here; that is the
/// caller's concern.
#[async_trait]
pub trait EvaluatorTransport: Send + Sync {
    async fn post(
        &self,
        url: &str,
        body: &serde_json::Value,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<EvaluationResponse, CoreError>;
}
