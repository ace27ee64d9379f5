//! MCP tool executor
//!
//! Forwards the call's arguments unchanged to the tool named by the Tool
//! resource's `mcp` binding, on a client borrowed from the registry's pool.

use crate::mcp::McpClientPool;
use ark_application::ports::tool_executor::ToolExecutor;
use ark_application::use_cases::resolve_value::ValueSourceResolver;
use ark_domain::{CoreError, Tool, ToolCall, ToolOutcome, ToolResult};
use async_trait::async_trait;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub struct McpExecutor {
    tool_name: String,
    namespace: String,
    resolver: ValueSourceResolver,
    pool: Arc<McpClientPool>,
}

impl McpExecutor {
    pub fn new(
        tool_name: impl Into<String>,
        namespace: impl Into<String>,
        resolver: ValueSourceResolver,
        pool: Arc<McpClientPool>,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            namespace: namespace.into(),
            resolver,
            pool,
        }
    }

    async fn run(
        &self,
        call: &ToolCall,
        result: ToolResult,
        cancel: &CancellationToken,
    ) -> ToolOutcome {
        let tool = match self.resolver.store().get_tool(&self.namespace, &self.tool_name).await {
            Ok(tool) => tool,
            Err(e) => {
                let message = format!("failed to get tool {}: {}", self.tool_name, e);
                return ToolOutcome::failed(result.with_error(message), e.into());
            }
        };
        let Some(binding) = tool.spec.mcp.as_ref() else {
            return ToolOutcome::failed(
                result.with_error("mcp spec is required"),
                CoreError::Configuration(format!("mcp spec is required for tool {}", self.tool_name)),
            );
        };

        let server_ns = binding.mcp_server_ref.namespace_or(&tool.metadata.namespace);
        let server_name = &binding.mcp_server_ref.name;
        let server = match self.resolver.store().get_mcp_server(server_ns, server_name).await {
            Ok(server) => server,
            Err(e) => {
                let message = format!("failed to get MCP server {server_ns}/{server_name}: {e}");
                return ToolOutcome::failed(result.with_error(message), e.into());
            }
        };

        let connection = async {
            let address = self.resolver.resolve(&server.spec.address, server_ns).await?;
            let headers = self.resolver.resolve_headers(&server.spec.headers, server_ns).await?;
            Ok::<_, CoreError>((address, headers))
        };
        let (address, headers) = match connection.await {
            Ok(connection) => connection,
            Err(e) => {
                let message = match &e {
                    CoreError::Resolution(msg) => msg.clone(),
                    other => other.to_string(),
                };
                return ToolOutcome::failed(result.with_error(message), e);
            }
        };

        let key = pool_key(server_ns, server_name, &address, &headers);
        let outcome = async {
            let client = self.pool.get_or_connect(&key, &address, headers, cancel).await?;
            client
                .call_tool(&binding.tool_name, call.arguments_or_empty(), cancel)
                .await
        };
        let reply = match outcome.await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(tool = %self.tool_name, server = %key, error = %e, "MCP tool call failed");
                let error = CoreError::from(e);
                return ToolOutcome::failed(result.with_error(error.to_string()), error);
            }
        };

        let content = reply.text();
        if reply.is_error {
            let message = format!("MCP tool {} reported an error", binding.tool_name);
            return ToolOutcome::failed(
                result.with_content(content).with_error(message.clone()),
                CoreError::Protocol(message),
            );
        }
        debug!(tool = %self.tool_name, server = %key, bytes = content.len(), "MCP tool responded");
        ToolOutcome::completed(result.with_content(content))
    }
}

#[async_trait]
impl ToolExecutor for McpExecutor {
    async fn execute(&self, call: &ToolCall, cancel: &CancellationToken) -> ToolOutcome {
        self.run(call, ToolResult::for_call(call), cancel).await
    }
}

/// Pool key for one MCP session.
///
/// Resolved headers are folded in as a fingerprint, so a rotated
/// credential opens a fresh session instead of reusing the old one.
fn pool_key(namespace: &str, server: &str, address: &str, headers: &[(String, String)]) -> String {
    if headers.is_empty() {
        return format!("{namespace}/{server}@{address}");
    }
    let mut sorted: Vec<&(String, String)> = headers.iter().collect();
    sorted.sort();
    let mut hasher = DefaultHasher::new();
    sorted.hash(&mut hasher);
    format!("{namespace}/{server}@{address}#{:016x}", hasher.finish())
}

/// Whether a Tool resource is served by [`McpExecutor`]
pub fn is_mcp_tool(tool: &Tool) -> bool {
    tool.spec.tool_type == ark_domain::resource::TOOL_TYPE_MCP
}
