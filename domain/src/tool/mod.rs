//! Tool domain module
//!
//! Pure definitions for the tool-dispatch runtime: what a tool looks like
//! to a model ([`ToolDefinition`]), what a model sends back ([`ToolCall`]),
//! and what an executor produces ([`ToolOutcome`] = [`ToolResult`] +
//! optional [`ToolSignal`]).
//!
//! ```text
//! ┌────────────────┐    ┌──────────────┐    ┌─────────────────────────┐
//! │ ToolDefinition │───▶│ ToolCall     │───▶│ ToolOutcome             │
//! │ (advertised)   │    │ (from model) │    │  result + signal        │
//! └────────────────┘    └──────────────┘    │  (Terminate | Failed)   │
//!                                           └─────────────────────────┘
//! ```
//!
//! Execution itself is an application-layer port (`ToolExecutor`) with
//! infrastructure adapters (noop, terminate, HTTP, MCP).

pub mod entities;
pub mod value_objects;

pub use entities::{
    Arguments, BUILTIN_TOOLS, FunctionCall, NOOP_TOOL, TERMINATE_TOOL, ToolCall, ToolDefinition,
};
pub use value_objects::{ToolOutcome, ToolResult, ToolSignal};
