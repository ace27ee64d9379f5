//! Agent resource: the declaration checked at admission time

use serde::{Deserialize, Serialize};

use super::meta::ObjectMeta;
use super::value_source::Parameter;

/// Model the agent reasons with; namespace defaults to the agent's
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentModelRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Engine that runs the agent instead of the built-in one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionEngineRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// A tool the agent declares it will use
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentTool {
    /// `"built-in"` or `"custom"`
    #[serde(rename = "type")]
    pub tool_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AgentTool {
    pub fn built_in(name: impl Into<String>) -> Self {
        Self {
            tool_type: "built-in".to_string(),
            name: Some(name.into()),
        }
    }

    pub fn custom(name: impl Into<String>) -> Self {
        Self {
            tool_type: "custom".to_string(),
            name: Some(name.into()),
        }
    }

    /// The tool name, if present and non-empty
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_ref: Option<AgentModelRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_engine: Option<ExecutionEngineRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<AgentTool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: AgentSpec,
}

impl Agent {
    pub fn new(metadata: ObjectMeta) -> Self {
        Self {
            metadata,
            spec: AgentSpec::default(),
        }
    }

    pub fn with_model(mut self, name: impl Into<String>) -> Self {
        self.spec.model_ref = Some(AgentModelRef {
            name: name.into(),
            namespace: None,
        });
        self
    }

    pub fn with_execution_engine(mut self, name: impl Into<String>) -> Self {
        self.spec.execution_engine = Some(ExecutionEngineRef {
            name: name.into(),
            namespace: None,
        });
        self
    }

    pub fn with_tool(mut self, tool: AgentTool) -> Self {
        self.spec.tools.push(tool);
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.spec.parameters.push(parameter);
        self
    }

    pub fn namespace(&self) -> &str {
        &self.metadata.namespace
    }
}
