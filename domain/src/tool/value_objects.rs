//! Tool domain value objects: result envelopes and control signals
//!
//! A tool invocation always yields a [`ToolResult`], even when it fails:
//! the model that requested the call should still see whatever partial
//! output exists (e.g. the body of a 404 response). Whether the call
//! failed, or asked the agent loop to stop, travels next to the result as
//! an optional [`ToolSignal`].

use serde::{Deserialize, Serialize};

use super::entities::ToolCall;
use crate::core::error::CoreError;

/// Best-effort result of a tool execution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Id of the tool call this answers
    pub id: String,
    /// Name of the tool that was called
    pub name: String,
    /// Output shown to the model
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    /// Empty result addressed to `call`
    pub fn for_call(call: &ToolCall) -> Self {
        Self {
            id: call.id.clone(),
            name: call.name().to_string(),
            content: String::new(),
            error: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Out-of-band outcome of a tool execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolSignal {
    /// Stop the agent loop; the result content is the final answer
    Terminate,
    /// The call failed
    Failed(CoreError),
}

/// A tool result paired with its optional signal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    pub result: ToolResult,
    pub signal: Option<ToolSignal>,
}

impl ToolOutcome {
    /// Successful execution, no signal
    pub fn completed(result: ToolResult) -> Self {
        Self {
            result,
            signal: None,
        }
    }

    /// Successful execution that asks the agent loop to stop
    pub fn terminate(result: ToolResult) -> Self {
        Self {
            result,
            signal: Some(ToolSignal::Terminate),
        }
    }

    /// Failed execution. The error is mirrored into the result unless the
    /// result already carries its own error text.
    pub fn failed(mut result: ToolResult, error: CoreError) -> Self {
        if result.error.is_none() {
            result.error = Some(error.to_string());
        }
        Self {
            result,
            signal: Some(ToolSignal::Failed(error)),
        }
    }

    pub fn is_terminate(&self) -> bool {
        matches!(self.signal, Some(ToolSignal::Terminate))
    }

    /// The failure, if any
    pub fn error(&self) -> Option<&CoreError> {
        match &self.signal {
            Some(ToolSignal::Failed(e)) => Some(e),
            _ => None,
        }
    }

    /// Split into the result envelope and a `Result` carrying the signal,
    /// for callers that want `?` on failures.
    pub fn into_parts(self) -> (ToolResult, Result<Option<ToolSignal>, CoreError>) {
        match self.signal {
            Some(ToolSignal::Failed(e)) => (self.result, Err(e)),
            other => (self.result, Ok(other)),
        }
    }
}
