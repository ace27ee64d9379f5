//! Tool resource: a declared capability an agent may invoke

use serde::{Deserialize, Serialize};

use super::meta::{ObjectMeta, ResourceRef};
use super::value_source::Header;

/// Tool resource type: templated remote HTTP call
pub const TOOL_TYPE_HTTP: &str = "http";
/// Tool resource type: call through a pooled MCP server session
pub const TOOL_TYPE_MCP: &str = "mcp";

/// HTTP call template of an `http` tool
///
/// `url` and `body` may contain `{param}` placeholders filled from the
/// tool-call arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpSpec {
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<Header>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Duration string such as `"10s"` or `"1m30s"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

impl HttpSpec {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_header(mut self, header: Header) -> Self {
        self.headers.push(header);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_timeout(mut self, timeout: impl Into<String>) -> Self {
        self.timeout = Some(timeout.into());
        self
    }
}

/// Binding of an `mcp` tool to a tool exposed by an MCP server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpToolRef {
    pub mcp_server_ref: ResourceRef,
    pub tool_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpec {
    #[serde(rename = "type")]
    pub tool_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON-schema document describing the call arguments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcp: Option<McpToolRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub metadata: ObjectMeta,
    pub spec: ToolSpec,
}

impl Tool {
    pub fn http(metadata: ObjectMeta, http: HttpSpec) -> Self {
        Self {
            metadata,
            spec: ToolSpec {
                tool_type: TOOL_TYPE_HTTP.to_string(),
                http: Some(http),
                ..Default::default()
            },
        }
    }

    pub fn mcp(metadata: ObjectMeta, mcp: McpToolRef) -> Self {
        Self {
            metadata,
            spec: ToolSpec {
                tool_type: TOOL_TYPE_MCP.to_string(),
                mcp: Some(mcp),
                ..Default::default()
            },
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.spec.description = Some(description.into());
        self
    }

    pub fn with_input_schema(mut self, schema: serde_json::Value) -> Self {
        self.spec.input_schema = Some(schema);
        self
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}
