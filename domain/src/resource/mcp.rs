//! MCP server resource: an external Model Context Protocol endpoint

use serde::{Deserialize, Serialize};

use super::meta::ObjectMeta;
use super::value_source::{Header, ValueSource};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpServerSpec {
    pub address: ValueSource,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<Header>,
    /// Only `"http"` is understood by this core
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpServer {
    pub metadata: ObjectMeta,
    pub spec: McpServerSpec,
}

impl McpServer {
    pub fn new(metadata: ObjectMeta, address: ValueSource) -> Self {
        Self {
            metadata,
            spec: McpServerSpec {
                address,
                ..Default::default()
            },
        }
    }
}
