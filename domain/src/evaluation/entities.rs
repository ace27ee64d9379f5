//! Evaluator wire shapes and caller-facing results

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::resource::{Query, Response};

/// Unified evaluation type that runs several model calls internally
pub const EVALUATION_TYPE_BASELINE: &str = "baseline";

/// Score reported for a failed evaluator call
pub const FAILED_SCORE: &str = "0";

/// Metadata message used when an evaluator call produced nothing at all
pub const NO_RESULT_MESSAGE: &str = "no result returned";

/// Legacy request shape, built from a completed query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    pub query_id: String,
    pub input: String,
    pub responses: Vec<Response>,
    /// Full snapshot of the query
    pub query: Query,
}

impl EvaluationRequest {
    pub fn from_query(query: &Query) -> Self {
        Self {
            query_id: query.metadata.uid.clone(),
            input: query.spec.input.clone(),
            responses: query.status.responses.clone(),
            query: query.clone(),
        }
    }
}

/// Request shape of the unified evaluation endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedEvaluationRequest {
    /// Discriminator: `direct`, `baseline`, `query`, `batch`, `event`, ...
    #[serde(rename = "type")]
    pub evaluation_type: String,
    #[serde(default)]
    pub config: serde_json::Map<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub parameters: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluator_name: Option<String>,
}

impl UnifiedEvaluationRequest {
    pub fn new(evaluation_type: impl Into<String>) -> Self {
        Self {
            evaluation_type: evaluation_type.into(),
            ..Default::default()
        }
    }

    pub fn with_config(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.config.insert(key.into(), value);
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn with_evaluator_name(mut self, name: impl Into<String>) -> Self {
        self.evaluator_name = Some(name.into());
        self
    }

    pub fn is_baseline(&self) -> bool {
        self.evaluation_type == EVALUATION_TYPE_BASELINE
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: i64,
    #[serde(default)]
    pub completion_tokens: i64,
    #[serde(default)]
    pub total_tokens: i64,
}

/// What an evaluator backend answers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResponse {
    #[serde(default, deserialize_with = "score_from_string_or_number")]
    pub score: String,
    #[serde(default)]
    pub passed: bool,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_usage: Option<TokenUsage>,
}

impl EvaluationResponse {
    /// The backend's error message, when populated
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

/// Scores are strings on the wire, but some backends send bare numbers.
fn score_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// Caller-facing outcome of one evaluator, produced for every requested
/// evaluator whether its call succeeded or not
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub evaluator_name: String,
    pub score: String,
    pub passed: bool,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl EvaluationResult {
    pub fn from_response(evaluator_name: impl Into<String>, response: EvaluationResponse) -> Self {
        Self {
            evaluator_name: evaluator_name.into(),
            score: response.score,
            passed: response.passed,
            metadata: response.metadata,
        }
    }

    /// Failure-shaped result: score "0", not passed, message under `error`
    pub fn failure(evaluator_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            evaluator_name: evaluator_name.into(),
            score: FAILED_SCORE.to_string(),
            passed: false,
            metadata: HashMap::from([("error".to_string(), message.into())]),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.metadata.get("error").map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ObjectMeta;

    #[test]
    fn test_legacy_request_from_query() {
        let query = Query::new(ObjectMeta::new("q1", "default").with_uid("uid-123"), "What is 2+2?")
            .with_response(Response::new("agent", "math", "4"));

        let request = EvaluationRequest::from_query(&query);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["queryId"], "uid-123");
        assert_eq!(json["input"], "What is 2+2?");
        assert_eq!(json["responses"][0]["target"]["type"], "agent");
        assert_eq!(json["responses"][0]["content"], "4");
        assert_eq!(json["query"]["metadata"]["name"], "q1");
    }

    #[test]
    fn test_unified_request_wire_shape() {
        let request = UnifiedEvaluationRequest::new("direct")
            .with_config("input", serde_json::json!("hi"))
            .with_parameter("scope", "accuracy")
            .with_evaluator_name("judge");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["type"], "direct");
        assert_eq!(json["config"]["input"], "hi");
        assert_eq!(json["parameters"]["scope"], "accuracy");
        assert_eq!(json["evaluatorName"], "judge");
        assert!(!request.is_baseline());
        assert!(UnifiedEvaluationRequest::new("baseline").is_baseline());
    }

    #[test]
    fn test_response_accepts_numeric_score() {
        let response: EvaluationResponse =
            serde_json::from_str(r#"{"score": 0.85, "passed": true}"#).unwrap();
        assert_eq!(response.score, "0.85");
        assert!(response.passed);
        assert!(response.error_message().is_none());

        let response: EvaluationResponse =
            serde_json::from_str(r#"{"score": "0.4", "error": ""}"#).unwrap();
        assert_eq!(response.score, "0.4");
        assert!(response.error_message().is_none());
    }

    #[test]
    fn test_failure_result_shape() {
        let result = EvaluationResult::failure("judge", "evaluator returned status 500");
        assert_eq!(result.evaluator_name, "judge");
        assert_eq!(result.score, "0");
        assert!(!result.passed);
        assert_eq!(result.error_message(), Some("evaluator returned status 500"));
    }
}
