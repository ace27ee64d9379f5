//! Built-in tools: `noop` and `terminate`
//!
//! Neither touches the network. Both parse arguments tolerantly: text that
//! is not a JSON object is treated as an empty argument map.

use ark_application::ports::tool_executor::ToolExecutor;
use ark_domain::tool::entities::render_arguments;
use ark_domain::{CoreError, ToolCall, ToolOutcome, ToolResult};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Message reported when `terminate` is called without a string `response`
pub const NO_RESPONSE: &str = "no response";

/// Echoes its parsed arguments; never fails
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopExecutor;

#[async_trait]
impl ToolExecutor for NoopExecutor {
    async fn execute(&self, call: &ToolCall, _cancel: &CancellationToken) -> ToolOutcome {
        let arguments = call.arguments_or_empty();
        debug!(tool = %call.name(), args = arguments.len(), "noop");
        ToolOutcome::completed(ToolResult::for_call(call).with_content(render_arguments(&arguments)))
    }
}

/// Ends the agent loop with the `response` argument as the final answer
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminateExecutor;

#[async_trait]
impl ToolExecutor for TerminateExecutor {
    async fn execute(&self, call: &ToolCall, _cancel: &CancellationToken) -> ToolOutcome {
        let arguments = call.arguments_or_empty();
        let result = ToolResult::for_call(call);

        match arguments.get("response").and_then(|v| v.as_str()) {
            Some(response) => {
                debug!(tool = %call.name(), "terminate requested");
                ToolOutcome::terminate(result.with_content(response))
            }
            None => {
                warn!(tool = %call.name(), "terminate called without a string response");
                ToolOutcome::failed(
                    result.with_error(NO_RESPONSE),
                    CoreError::Validation(NO_RESPONSE.to_string()),
                )
            }
        }
    }
}
