//! Tool domain entities

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::resource::{TOOL_TYPE_HTTP, Tool};

/// Built-in tool that echoes its arguments
pub const NOOP_TOOL: &str = "noop";
/// Built-in tool that ends the agent loop with a final answer
pub const TERMINATE_TOOL: &str = "terminate";
/// Closed set of built-in tool names
pub const BUILTIN_TOOLS: &[&str] = &[NOOP_TOOL, TERMINATE_TOOL];

/// Parsed tool-call arguments
pub type Arguments = Map<String, Value>;

/// Definition of a tool advertised to a model backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool within a registry
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON-schema document for the arguments
    pub parameters: Value,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: empty_object_schema(),
        }
    }

    pub fn with_parameters(mut self, parameters: Value) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn noop() -> Self {
        Self::new(
            NOOP_TOOL,
            "A no-operation tool that does nothing and returns success",
        )
        .with_parameters(json!({
            "type": "object",
            "properties": {
                "message": {
                    "type": "string",
                    "description": "Optional message to include in the response"
                }
            }
        }))
    }

    pub fn terminate() -> Self {
        Self::new(
            TERMINATE_TOOL,
            "Use this function to provide a final response to the user and then end the current conversation",
        )
        .with_parameters(json!({
            "type": "object",
            "properties": {
                "response": {
                    "type": "string",
                    "description": "The message to send before ending the conversation"
                }
            },
            "required": ["response"]
        }))
    }

    /// Definition of a built-in tool by name
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            NOOP_TOOL => Some(Self::noop()),
            TERMINATE_TOOL => Some(Self::terminate()),
            _ => None,
        }
    }

    /// Derive the advertised definition from a Tool resource.
    ///
    /// Description precedence: spec, then the `description` annotation,
    /// then a generated one. Missing input schema means "no parameters".
    pub fn from_tool_resource(tool: &Tool) -> Self {
        let description = tool
            .spec
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .or_else(|| tool.metadata.annotation("description").map(String::from))
            .unwrap_or_else(|| match (&tool.spec.tool_type[..], &tool.spec.http) {
                (TOOL_TYPE_HTTP, Some(http)) => format!("HTTP request to {}", http.url),
                _ => format!("Custom tool: {}", tool.metadata.name),
            });

        let parameters = tool
            .spec
            .input_schema
            .clone()
            .filter(|schema| schema.is_object())
            .unwrap_or_else(empty_object_schema);

        Self {
            name: tool.metadata.name.clone(),
            description,
            parameters,
        }
    }

    /// Render in the function-calling shape accepted by chat-completion APIs
    pub fn to_api_tool(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters,
            }
        })
    }
}

fn empty_object_schema() -> Value {
    json!({"type": "object", "properties": {}})
}

/// Function part of a tool call as emitted by a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded argument object; may be malformed
    #[serde(default)]
    pub arguments: String,
}

/// A model's request to invoke a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub function: FunctionCall,
}

impl ToolCall {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }

    /// Name of the requested tool
    pub fn name(&self) -> &str {
        &self.function.name
    }

    /// Strictly parse the argument text as a JSON object
    pub fn try_arguments(&self) -> Result<Arguments, serde_json::Error> {
        serde_json::from_str(&self.function.arguments)
    }

    /// Parse the argument text, falling back to an empty map when it is not
    /// a JSON object.
    pub fn arguments_or_empty(&self) -> Arguments {
        self.try_arguments().unwrap_or_default()
    }
}

/// Render a JSON value the way it is substituted into templates:
/// strings unquoted, everything else in its JSON form.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render parsed arguments as `map[key:value ...]` with keys sorted
pub fn render_arguments(arguments: &Arguments) -> String {
    let mut keys: Vec<&String> = arguments.keys().collect();
    keys.sort();
    let pairs: Vec<String> = keys
        .into_iter()
        .map(|k| format!("{}:{}", k, value_to_text(&arguments[k])))
        .collect();
    format!("map[{}]", pairs.join(" "))
}
