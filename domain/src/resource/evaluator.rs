//! Evaluator and Model resources

use serde::{Deserialize, Serialize};

use super::meta::{ObjectMeta, ResourceRef};
use super::value_source::{Parameter, ValueSource};

/// Reference from a query (or evaluation) to an evaluator.
///
/// The namespace defaults to the referencing resource's namespace.
pub type EvaluatorRef = ResourceRef;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatorSpec {
    /// Network address of the scoring service
    pub address: ValueSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Defaults merged into unified requests; the request's own values win
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
}

/// An external service that scores a completed query's responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluator {
    pub metadata: ObjectMeta,
    pub spec: EvaluatorSpec,
}

impl Evaluator {
    pub fn new(metadata: ObjectMeta, address: ValueSource) -> Self {
        Self {
            metadata,
            spec: EvaluatorSpec {
                address,
                description: None,
                parameters: Vec::new(),
            },
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.spec.parameters.push(parameter);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSpec {
    /// Provider type, e.g. `openai`, `azure`, `bedrock`
    #[serde(rename = "type", default)]
    pub model_type: String,
    #[serde(default)]
    pub model: ValueSource,
}

/// A model backend declaration; only its existence matters to this core
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: ModelSpec,
}

impl Model {
    pub fn new(metadata: ObjectMeta, model_type: impl Into<String>) -> Self {
        Self {
            metadata,
            spec: ModelSpec {
                model_type: model_type.into(),
                model: ValueSource::default(),
            },
        }
    }
}
