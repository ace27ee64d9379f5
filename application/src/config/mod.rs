//! Application-level configuration.
//!
//! This module provides configuration types that control how services behave:
//!
//! - [`EvaluatorTimeouts`]: per-request-type deadlines for evaluator calls
//! - [`HttpToolSettings`]: defaults for HTTP tool execution
//! - [`McpSettings`]: pooled MCP client behavior
//! - [`RuntimeParams`]: container passed from the composition root

pub mod runtime_params;

pub use runtime_params::{EvaluatorTimeouts, HttpToolSettings, McpSettings, RuntimeParams};
