//! Tool executor ports
//!
//! [`ToolExecutor`] is the capability every concrete tool variant provides
//! (noop, terminate, HTTP, MCP). [`ToolDispatcher`] is the name-keyed view
//! an agent loop talks to; the infrastructure `ToolRegistry` implements it.

use async_trait::async_trait;
use ark_domain::{ToolCall, ToolDefinition, ToolOutcome};
use tokio_util::sync::CancellationToken;

/// Port for executing one kind of tool
///
/// Executors never return a bare error: the outcome always carries a
/// best-effort [`ToolResult`](ark_domain::ToolResult), with the failure (or
/// the terminate marker) riding alongside as a signal.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, call: &ToolCall, cancel: &CancellationToken) -> ToolOutcome;
}

/// Port for dispatching tool calls by function name
#[async_trait]
pub trait ToolDispatcher: Send + Sync {
    /// All registered definitions, in no particular order
    fn definitions(&self) -> Vec<ToolDefinition>;

    /// Check if a tool is registered
    fn has_tool(&self, name: &str) -> bool;

    /// Route a call to the executor registered under its function name.
    ///
    /// Unknown names yield a result with a populated error AND a
    /// `NotFound` failure signal.
    async fn dispatch(&self, call: &ToolCall, cancel: &CancellationToken) -> ToolOutcome;
}
