//! Domain layer for ark-runtime
//!
//! This crate contains the resource shapes, value objects and pure rules of
//! the agent execution core. It has no dependencies on infrastructure or
//! I/O concerns.
//!
//! # Core Concepts
//!
//! ## Tools
//!
//! A model asks for a tool by name ([`ToolCall`]); an executor answers with
//! a best-effort [`ToolResult`] and an optional [`ToolSignal`], either a
//! failure or the intentional `Terminate` marker that ends an agent loop.
//!
//! ## Evaluations
//!
//! Evaluators are external scoring services. Every requested evaluator
//! yields exactly one [`EvaluationResult`], success or failure.
//!
//! ## Admission
//!
//! Agent declarations are checked once per create/update against the
//! rules in [`agent::validation`].

pub mod agent;
pub mod core;
pub mod evaluation;
pub mod resource;
pub mod tool;

// Re-export commonly used types
pub use agent::validation::{AgentToolType, Warnings};
pub use core::error::CoreError;
pub use evaluation::{
    EvaluationRequest, EvaluationResponse, EvaluationResult, EvaluatorRef, TokenUsage,
    UnifiedEvaluationRequest,
};
pub use resource::{
    Agent, ConfigMap, Evaluator, Header, HeaderValue, HttpSpec, Manifest, McpServer, Model,
    ObjectMeta, Parameter, Query, ResourceKind, ResourceRef, Secret, Tool, ValueSource,
};
pub use tool::{Arguments, ToolCall, ToolDefinition, ToolOutcome, ToolResult, ToolSignal};
