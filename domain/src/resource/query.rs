//! Query resource: a completed (or running) request to one or more targets

use serde::{Deserialize, Serialize};

use super::evaluator::EvaluatorRef;
use super::meta::ObjectMeta;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTarget {
    #[serde(rename = "type")]
    pub target_type: String,
    pub name: String,
}

/// One target's answer to the query input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub target: QueryTarget,
    pub content: String,
}

impl Response {
    pub fn new(
        target_type: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            target: QueryTarget {
                target_type: target_type.into(),
                name: name.into(),
            },
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySpec {
    #[serde(default)]
    pub input: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evaluators: Vec<EvaluatorRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryStatus {
    #[serde(default)]
    pub responses: Vec<Response>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: QuerySpec,
    #[serde(default)]
    pub status: QueryStatus,
}

impl Query {
    pub fn new(metadata: ObjectMeta, input: impl Into<String>) -> Self {
        Self {
            metadata,
            spec: QuerySpec {
                input: input.into(),
                evaluators: Vec::new(),
            },
            status: QueryStatus::default(),
        }
    }

    pub fn with_response(mut self, response: Response) -> Self {
        self.status.responses.push(response);
        self
    }

    pub fn with_evaluator(mut self, evaluator: EvaluatorRef) -> Self {
        self.spec.evaluators.push(evaluator);
        self
    }
}
