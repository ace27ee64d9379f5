//! Call Evaluators use case
//!
//! Single, fan-out and unified invocation of external scoring services.
//! Fan-out runs one task per evaluator reference and joins them all before
//! returning; each task's failure lands in its own result slot.

use crate::config::EvaluatorTimeouts;
use crate::ports::evaluation_progress::{EvaluationProgress, NoProgress};
use crate::ports::evaluator_transport::EvaluatorTransport;
use crate::ports::resource_store::StoreError;
use crate::use_cases::resolve_value::{ValueSourceResolver, join_endpoint};
use ark_domain::evaluation::NO_RESULT_MESSAGE;
use ark_domain::{
    CoreError, EvaluationRequest, EvaluationResponse, EvaluationResult, EvaluatorRef, Evaluator,
    Query, UnifiedEvaluationRequest,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Label used for progress events of legacy (query snapshot) calls
const LEGACY_REQUEST_TYPE: &str = "legacy";

/// Errors that can occur while calling one evaluator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluatorError {
    #[error("failed to get evaluator {name}: {source}")]
    Load { name: String, source: StoreError },

    #[error("failed to resolve evaluator address: {0}")]
    Address(CoreError),

    #[error("failed to encode evaluation request: {0}")]
    Encode(String),

    #[error("{0}")]
    Call(CoreError),

    #[error("evaluator returned error: {0}")]
    Rejected(String),

    #[error("unified evaluator returned error: {0}")]
    UnifiedRejected(String),
}

impl EvaluatorError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, EvaluatorError::Call(e) if e.is_cancelled())
    }
}

impl From<EvaluatorError> for CoreError {
    fn from(err: EvaluatorError) -> Self {
        match err {
            EvaluatorError::Load { source, .. } => source.into(),
            EvaluatorError::Address(_) => CoreError::Resolution(err.to_string()),
            EvaluatorError::Encode(_) => CoreError::Protocol(err.to_string()),
            EvaluatorError::Call(e) => e,
            EvaluatorError::Rejected(_) | EvaluatorError::UnifiedRejected(_) => {
                CoreError::Protocol(err.to_string())
            }
        }
    }
}

/// Use case for calling evaluators
pub struct EvaluatorCaller<T: EvaluatorTransport + 'static> {
    resolver: ValueSourceResolver,
    transport: Arc<T>,
    timeouts: EvaluatorTimeouts,
    endpoint: Option<String>,
    progress: Arc<dyn EvaluationProgress>,
}

impl<T: EvaluatorTransport + 'static> Clone for EvaluatorCaller<T> {
    fn clone(&self) -> Self {
        Self {
            resolver: self.resolver.clone(),
            transport: Arc::clone(&self.transport),
            timeouts: self.timeouts,
            endpoint: self.endpoint.clone(),
            progress: Arc::clone(&self.progress),
        }
    }
}

impl<T: EvaluatorTransport + 'static> EvaluatorCaller<T> {
    pub fn new(resolver: ValueSourceResolver, transport: Arc<T>) -> Self {
        Self {
            resolver,
            transport,
            timeouts: EvaluatorTimeouts::default(),
            endpoint: None,
            progress: Arc::new(NoProgress),
        }
    }

    pub fn with_timeouts(mut self, timeouts: EvaluatorTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Path segment appended to every resolved evaluator address
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn EvaluationProgress>) -> Self {
        self.progress = progress;
        self
    }

    /// Score a completed query with one evaluator using the legacy request
    /// shape.
    pub async fn call_single(
        &self,
        query: &Query,
        evaluator_ref: &EvaluatorRef,
        cancel: &CancellationToken,
    ) -> Result<EvaluationResult, EvaluatorError> {
        let name = evaluator_ref.name.as_str();
        self.progress.on_evaluation_start(name, LEGACY_REQUEST_TYPE);

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(EvaluatorError::Call(CoreError::Cancelled)),
            outcome = self.call_single_inner(query, evaluator_ref, cancel) => outcome,
        };

        match &outcome {
            Ok(result) => self.progress.on_evaluation_complete(result),
            Err(e) => self.progress.on_evaluation_failed(name, &e.to_string()),
        }
        outcome
    }

    async fn call_single_inner(
        &self,
        query: &Query,
        evaluator_ref: &EvaluatorRef,
        cancel: &CancellationToken,
    ) -> Result<EvaluationResult, EvaluatorError> {
        let namespace = evaluator_ref.namespace_or(&query.metadata.namespace);
        let evaluator = self.load_evaluator(&evaluator_ref.name, namespace).await?;
        let url = self.resolve_address(&evaluator).await?;

        let request = EvaluationRequest::from_query(query);
        let body = serde_json::to_value(&request).map_err(|e| EvaluatorError::Encode(e.to_string()))?;

        info!(evaluator = %evaluator_ref.name, url = %url, "Calling evaluator");
        let response = self
            .transport
            .post(&url, &body, self.timeouts.default, cancel)
            .await
            .map_err(EvaluatorError::Call)?;

        if let Some(error) = response.error_message() {
            return Err(EvaluatorError::Rejected(error.to_string()));
        }

        debug!(evaluator = %evaluator_ref.name, score = %response.score, passed = response.passed, "Evaluator responded");
        Ok(EvaluationResult::from_response(&evaluator_ref.name, response))
    }

    /// Score a completed query with every referenced evaluator concurrently.
    ///
    /// Always returns exactly one result per reference, in input order. A
    /// failed, timed-out or cancelled call becomes a failure-shaped result
    /// in its own slot; it never aborts the batch.
    pub async fn call_many(
        &self,
        query: &Query,
        evaluator_refs: &[EvaluatorRef],
        cancel: &CancellationToken,
    ) -> Vec<EvaluationResult> {
        if evaluator_refs.is_empty() {
            return Vec::new();
        }

        info!(query = %query.metadata.name, evaluators = evaluator_refs.len(), "Calling evaluators");

        let mut slots: Vec<Option<EvaluationResult>> = vec![None; evaluator_refs.len()];
        let mut join_set = JoinSet::new();

        for (idx, evaluator_ref) in evaluator_refs.iter().enumerate() {
            let caller = self.clone();
            let query = query.clone();
            let evaluator_ref = evaluator_ref.clone();
            let cancel = cancel.clone();

            join_set.spawn(async move {
                let result = match caller.call_single(&query, &evaluator_ref, &cancel).await {
                    Ok(result) => result,
                    Err(e) => {
                        warn!(evaluator = %evaluator_ref.name, error = %e, "Evaluator call failed");
                        EvaluationResult::failure(&evaluator_ref.name, e.to_string())
                    }
                };
                (idx, result)
            });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((idx, result)) => slots[idx] = Some(result),
                Err(e) => warn!("Evaluator task join error: {}", e),
            }
        }

        slots
            .into_iter()
            .zip(evaluator_refs)
            .map(|(slot, evaluator_ref)| {
                slot.unwrap_or_else(|| {
                    EvaluationResult::failure(&evaluator_ref.name, NO_RESULT_MESSAGE)
                })
            })
            .collect()
    }

    /// Call an evaluator with the unified request shape.
    ///
    /// The namespace falls back to `namespace` when the reference has none.
    /// `baseline` requests get the extended timeout.
    pub async fn call_unified(
        &self,
        evaluator_ref: &EvaluatorRef,
        request: UnifiedEvaluationRequest,
        namespace: &str,
        cancel: &CancellationToken,
    ) -> Result<EvaluationResponse, EvaluatorError> {
        let name = evaluator_ref.name.as_str();
        self.progress
            .on_evaluation_start(name, &request.evaluation_type);

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(EvaluatorError::Call(CoreError::Cancelled)),
            outcome = self.call_unified_inner(evaluator_ref, request, namespace, cancel) => outcome,
        };

        match &outcome {
            Ok(response) => self
                .progress
                .on_evaluation_complete(&EvaluationResult::from_response(name, response.clone())),
            Err(e) => self.progress.on_evaluation_failed(name, &e.to_string()),
        }
        outcome
    }

    async fn call_unified_inner(
        &self,
        evaluator_ref: &EvaluatorRef,
        request: UnifiedEvaluationRequest,
        namespace: &str,
        cancel: &CancellationToken,
    ) -> Result<EvaluationResponse, EvaluatorError> {
        let evaluator = self
            .load_evaluator(&evaluator_ref.name, evaluator_ref.namespace_or(namespace))
            .await?;
        let url = self.resolve_address(&evaluator).await?;

        let timeout: Duration = self.timeouts.for_type(&request.evaluation_type);
        let body = serde_json::to_value(&request).map_err(|e| EvaluatorError::Encode(e.to_string()))?;

        info!(
            evaluator = %evaluator_ref.name,
            url = %url,
            request_type = %request.evaluation_type,
            timeout_secs = timeout.as_secs(),
            "Calling unified evaluator"
        );
        let response = self
            .transport
            .post(&url, &body, timeout, cancel)
            .await
            .map_err(EvaluatorError::Call)?;

        if let Some(error) = response.error_message() {
            return Err(EvaluatorError::UnifiedRejected(error.to_string()));
        }

        debug!(
            evaluator = %evaluator_ref.name,
            score = %response.score,
            passed = response.passed,
            metadata_count = response.metadata.len(),
            "Unified evaluator responded"
        );
        Ok(response)
    }

    async fn load_evaluator(&self, name: &str, namespace: &str) -> Result<Evaluator, EvaluatorError> {
        self.resolver
            .store()
            .get_evaluator(namespace, name)
            .await
            .map_err(|source| EvaluatorError::Load {
                name: name.to_string(),
                source,
            })
    }

    async fn resolve_address(&self, evaluator: &Evaluator) -> Result<String, EvaluatorError> {
        let address = self
            .resolver
            .resolve(&evaluator.spec.address, &evaluator.metadata.namespace)
            .await
            .map_err(EvaluatorError::Address)?;
        Ok(join_endpoint(&address, self.endpoint.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::resolve_value::tests::MemoryStore;
    use ark_domain::resource::Response;
    use ark_domain::resource::ValueFromSource;
    use ark_domain::{ObjectMeta, Parameter, ValueSource};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Clone)]
    enum Behavior {
        Respond(EvaluationResponse),
        Delay(Duration, EvaluationResponse),
        Fail(CoreError),
        Hang,
    }

    #[derive(Default)]
    struct FakeTransport {
        behaviors: HashMap<String, Behavior>,
        calls: Mutex<Vec<(String, Duration, serde_json::Value)>>,
    }

    impl FakeTransport {
        fn on(mut self, url: &str, behavior: Behavior) -> Self {
            self.behaviors.insert(url.to_string(), behavior);
            self
        }

        fn calls(&self) -> Vec<(String, Duration, serde_json::Value)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EvaluatorTransport for FakeTransport {
        async fn post(
            &self,
            url: &str,
            body: &serde_json::Value,
            timeout: Duration,
            cancel: &CancellationToken,
        ) -> Result<EvaluationResponse, CoreError> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), timeout, body.clone()));

            let behavior = self
                .behaviors
                .get(url)
                .cloned()
                .unwrap_or_else(|| Behavior::Fail(CoreError::Transport("connection refused".into())));
            match behavior {
                Behavior::Respond(response) => Ok(response),
                Behavior::Fail(e) => Err(e),
                Behavior::Delay(delay, response) => tokio::select! {
                    _ = cancel.cancelled() => Err(CoreError::Cancelled),
                    _ = tokio::time::sleep(delay) => Ok(response),
                },
                Behavior::Hang => {
                    cancel.cancelled().await;
                    Err(CoreError::Cancelled)
                }
            }
        }
    }

    fn score(score: &str, passed: bool) -> EvaluationResponse {
        EvaluationResponse {
            score: score.into(),
            passed,
            ..Default::default()
        }
    }

    fn evaluator(name: &str, namespace: &str) -> Evaluator {
        Evaluator::new(
            ObjectMeta::new(name, namespace),
            ValueSource::literal(format!("http://{name}")),
        )
    }

    fn store() -> MemoryStore {
        MemoryStore::default()
            .with_evaluator(evaluator("slow", "default"))
            .with_evaluator(evaluator("broken", "default"))
            .with_evaluator(evaluator("fast", "default"))
            .with_evaluator(evaluator("shared", "shared"))
    }

    fn query() -> Query {
        Query::new(ObjectMeta::new("q1", "default").with_uid("uid-1"), "What is 2+2?")
            .with_response(Response::new("agent", "math", "4"))
    }

    fn caller(transport: FakeTransport) -> (EvaluatorCaller<FakeTransport>, Arc<FakeTransport>) {
        let transport = Arc::new(transport);
        let resolver = ValueSourceResolver::new(Arc::new(store()));
        (EvaluatorCaller::new(resolver, Arc::clone(&transport)), transport)
    }

    #[tokio::test]
    async fn test_call_many_empty_is_noop() {
        let (caller, transport) = caller(FakeTransport::default());
        let results = caller
            .call_many(&query(), &[], &CancellationToken::new())
            .await;
        assert!(results.is_empty());
        assert!(transport.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_many_preserves_input_order() {
        let transport = FakeTransport::default()
            .on("http://slow", Behavior::Delay(Duration::from_secs(5), score("0.9", true)))
            .on(
                "http://broken",
                Behavior::Fail(CoreError::Protocol("evaluator returned status 500".into())),
            )
            .on("http://fast", Behavior::Respond(score("0.4", false)));
        let (caller, _) = caller(transport);

        let refs = vec![
            EvaluatorRef::new("slow"),
            EvaluatorRef::new("broken"),
            EvaluatorRef::new("fast"),
            EvaluatorRef::new("missing"),
        ];
        let results = caller
            .call_many(&query(), &refs, &CancellationToken::new())
            .await;

        assert_eq!(results.len(), 4);
        let names: Vec<&str> = results.iter().map(|r| r.evaluator_name.as_str()).collect();
        assert_eq!(names, vec!["slow", "broken", "fast", "missing"]);

        assert_eq!(results[0].score, "0.9");
        assert!(results[0].passed);

        assert_eq!(results[1].score, "0");
        assert!(!results[1].passed);
        assert!(
            results[1]
                .error_message()
                .unwrap()
                .contains("evaluator returned status 500")
        );

        assert_eq!(results[2].score, "0.4");
        assert!(results[2].error_message().is_none());

        assert!(
            results[3]
                .error_message()
                .unwrap()
                .starts_with("failed to get evaluator missing")
        );
    }

    #[tokio::test]
    async fn test_call_many_cancellation_fills_slots() {
        let transport = FakeTransport::default()
            .on("http://slow", Behavior::Hang)
            .on("http://fast", Behavior::Respond(score("1", true)));
        let (caller, _) = caller(transport);
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let refs = vec![EvaluatorRef::new("slow"), EvaluatorRef::new("fast")];
        let results = caller.call_many(&query(), &refs, &cancel).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].error_message(), Some("operation cancelled"));
        assert_eq!(results[1].score, "1");
    }

    #[tokio::test]
    async fn test_call_single_sends_legacy_shape() {
        let transport = FakeTransport::default().on("http://fast", Behavior::Respond(score("0.7", true)));
        let (caller, transport) = caller(transport);

        let result = caller
            .call_single(&query(), &EvaluatorRef::new("fast"), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(result.evaluator_name, "fast");
        assert_eq!(result.score, "0.7");

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        let (url, timeout, body) = &calls[0];
        assert_eq!(url, "http://fast");
        assert_eq!(*timeout, Duration::from_secs(30));
        assert_eq!(body["queryId"], "uid-1");
        assert_eq!(body["input"], "What is 2+2?");
        assert_eq!(body["responses"][0]["content"], "4");
        assert_eq!(body["query"]["metadata"]["name"], "q1");
    }

    #[tokio::test]
    async fn test_call_single_namespace_from_ref() {
        let transport =
            FakeTransport::default().on("http://shared", Behavior::Respond(score("1", true)));
        let (caller, _) = caller(transport);

        let cancel = CancellationToken::new();
        let scoped = EvaluatorRef::new("shared").in_namespace("shared");
        assert!(caller.call_single(&query(), &scoped, &cancel).await.is_ok());

        let err = caller
            .call_single(&query(), &EvaluatorRef::new("shared"), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, EvaluatorError::Load { .. }));
    }

    #[tokio::test]
    async fn test_error_field_is_failure() {
        let rejected = EvaluationResponse {
            error: Some("model unavailable".into()),
            ..score("0.5", true)
        };
        let transport = FakeTransport::default().on("http://fast", Behavior::Respond(rejected));
        let (caller, _) = caller(transport);
        let cancel = CancellationToken::new();

        let err = caller
            .call_single(&query(), &EvaluatorRef::new("fast"), &cancel)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "evaluator returned error: model unavailable");

        let err = caller
            .call_unified(
                &EvaluatorRef::new("fast"),
                UnifiedEvaluationRequest::new("direct"),
                "default",
                &cancel,
            )
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "unified evaluator returned error: model unavailable"
        );
    }

    #[tokio::test]
    async fn test_unified_timeout_by_type() {
        let transport = FakeTransport::default().on("http://fast", Behavior::Respond(score("1", true)));
        let (caller, transport) = caller(transport);
        let cancel = CancellationToken::new();

        for kind in ["direct", "baseline", "query"] {
            caller
                .call_unified(
                    &EvaluatorRef::new("fast"),
                    UnifiedEvaluationRequest::new(kind),
                    "default",
                    &cancel,
                )
                .await
                .unwrap();
        }

        let timeouts: Vec<Duration> = transport.calls().iter().map(|c| c.1).collect();
        assert_eq!(
            timeouts,
            vec![
                Duration::from_secs(30),
                Duration::from_secs(120),
                Duration::from_secs(30)
            ]
        );
    }

    #[tokio::test]
    async fn test_unified_sends_request_unchanged() {
        let store = MemoryStore::default().with_evaluator(
            evaluator("judge", "default")
                .with_parameter(Parameter::literal("scope", "accuracy"))
                .with_parameter(Parameter::from_ref(
                    "api-key",
                    ValueFromSource::secret("missing", "token"),
                )),
        );
        let transport = Arc::new(
            FakeTransport::default()
                .on("http://judge/evaluate", Behavior::Respond(score("1", true))),
        );
        let resolver = ValueSourceResolver::new(Arc::new(store));
        let caller =
            EvaluatorCaller::new(resolver, Arc::clone(&transport)).with_endpoint("evaluate");

        let request = UnifiedEvaluationRequest::new("direct").with_parameter("model", "claude");
        let response = caller
            .call_unified(
                &EvaluatorRef::new("judge"),
                request.clone(),
                "default",
                &CancellationToken::new(),
            )
            .await
            .unwrap();
        assert!(response.passed);

        let calls = transport.calls();
        let (url, _, body) = &calls[0];
        assert_eq!(url, "http://judge/evaluate");
        assert_eq!(body, &serde_json::to_value(&request).unwrap());
        assert!(body["parameters"].get("scope").is_none());
    }

    #[test]
    fn test_error_into_core_error() {
        let err: CoreError = EvaluatorError::Rejected("bad".into()).into();
        assert_eq!(err.code(), "PROTOCOL");
        let err: CoreError = EvaluatorError::Call(CoreError::Cancelled).into();
        assert!(err.is_cancelled());
    }
}
