//! Name-keyed tool registry
//!
//! Maps a function name to its advertised [`ToolDefinition`] and the
//! executor that serves it. One registry owns one [`McpClientPool`] for its
//! whole lifetime; every MCP executor it builds shares that pool.

use super::builtin::{NoopExecutor, TerminateExecutor};
use super::http::{HttpExecutor, is_http_tool};
use super::mcp::{McpExecutor, is_mcp_tool};
use crate::mcp::McpClientPool;
use ark_application::config::RuntimeParams;
use ark_application::ports::tool_executor::{ToolDispatcher, ToolExecutor};
use ark_application::use_cases::resolve_value::ValueSourceResolver;
use ark_domain::agent::validation::AgentToolType;
use ark_domain::tool::{NOOP_TOOL, TERMINATE_TOOL};
use ark_domain::{Agent, CoreError, ToolCall, ToolDefinition, ToolOutcome, ToolResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

struct Entry {
    definition: ToolDefinition,
    executor: Arc<dyn ToolExecutor>,
}

pub struct ToolRegistry {
    tools: HashMap<String, Entry>,
    resolver: ValueSourceResolver,
    http: reqwest::Client,
    params: RuntimeParams,
    mcp_pool: Arc<McpClientPool>,
}

impl ToolRegistry {
    pub fn new(resolver: ValueSourceResolver, params: RuntimeParams) -> Self {
        let http = reqwest::Client::new();
        let mcp_pool = Arc::new(McpClientPool::new(http.clone(), params.mcp.clone()));
        Self {
            tools: HashMap::new(),
            resolver,
            http,
            params,
            mcp_pool,
        }
    }

    /// Build the registry an agent's tool list describes.
    ///
    /// Built-in tools are registered by name. Custom tools are loaded from
    /// the store in the agent's namespace and served by the HTTP or MCP
    /// executor according to their declared type.
    pub async fn for_agent(
        agent: &Agent,
        resolver: ValueSourceResolver,
        params: RuntimeParams,
    ) -> Result<Self, CoreError> {
        let mut registry = Self::new(resolver, params);
        let namespace = agent.namespace();

        for (index, declared) in agent.spec.tools.iter().enumerate() {
            let name = declared.name().ok_or_else(|| {
                CoreError::Configuration(format!("tool[{index}]: tool name is required"))
            })?;
            let tool_type: AgentToolType = declared.tool_type.parse().map_err(|t| {
                CoreError::Configuration(format!("tool[{index}]: unsupported tool type '{t}'"))
            })?;

            match tool_type {
                AgentToolType::BuiltIn => registry.register_builtin(name)?,
                AgentToolType::Custom => registry.register_custom(name, namespace).await?,
            }
        }

        info!(agent = %agent.metadata.name, tools = registry.len(), "Tool registry built");
        Ok(registry)
    }

    /// Register a built-in tool (`noop` or `terminate`) by name
    pub fn register_builtin(&mut self, name: &str) -> Result<(), CoreError> {
        let definition = ToolDefinition::builtin(name).ok_or_else(|| {
            CoreError::Configuration(format!("unsupported built-in tool '{name}'"))
        })?;
        let executor: Arc<dyn ToolExecutor> = match name {
            NOOP_TOOL => Arc::new(NoopExecutor),
            TERMINATE_TOOL => Arc::new(TerminateExecutor),
            other => {
                return Err(CoreError::Configuration(format!(
                    "unsupported built-in tool '{other}'"
                )));
            }
        };
        self.register(definition, executor);
        Ok(())
    }

    /// Load a Tool resource and register the executor for its type
    pub async fn register_custom(&mut self, name: &str, namespace: &str) -> Result<(), CoreError> {
        let tool = self.resolver.store().get_tool(namespace, name).await?;
        let definition = ToolDefinition::from_tool_resource(&tool);

        let executor: Arc<dyn ToolExecutor> = if is_http_tool(&tool) {
            Arc::new(
                HttpExecutor::new(name, namespace, self.resolver.clone(), self.http.clone())
                    .with_settings(self.params.http_tools.clone()),
            )
        } else if is_mcp_tool(&tool) {
            Arc::new(McpExecutor::new(
                name,
                namespace,
                self.resolver.clone(),
                self.mcp_pool.clone(),
            ))
        } else {
            return Err(CoreError::Configuration(format!(
                "tool {namespace}/{name}: unsupported tool type '{}'",
                tool.spec.tool_type
            )));
        };

        self.register(definition, executor);
        Ok(())
    }

    /// Insert or replace the entry for `definition.name`
    pub fn register(&mut self, definition: ToolDefinition, executor: Arc<dyn ToolExecutor>) {
        debug!(tool = %definition.name, "Registering tool");
        if self.tools.contains_key(&definition.name) {
            debug!(tool = %definition.name, "Replacing existing registration");
        }
        self.tools
            .insert(definition.name.clone(), Entry { definition, executor });
    }

    /// Definitions in the function-calling shape expected by model APIs
    pub fn to_api_tools(&self) -> Vec<serde_json::Value> {
        self.tools.values().map(|e| e.definition.to_api_tool()).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// The pool shared by every MCP tool of this registry
    pub fn mcp_pool(&self) -> &Arc<McpClientPool> {
        &self.mcp_pool
    }
}

#[async_trait]
impl ToolDispatcher for ToolRegistry {
    fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|e| e.definition.clone()).collect()
    }

    fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    async fn dispatch(&self, call: &ToolCall, cancel: &CancellationToken) -> ToolOutcome {
        let Some(entry) = self.tools.get(call.name()) else {
            warn!(tool = %call.name(), "Dispatch to unregistered tool");
            return ToolOutcome::failed(
                ToolResult::for_call(call).with_error(format!("tool {} not found", call.name())),
                CoreError::NotFound(format!("tool {}", call.name())),
            );
        };
        debug!(tool = %call.name(), id = %call.id, "Dispatching tool call");
        entry.executor.execute(call, cancel).await
    }
}
