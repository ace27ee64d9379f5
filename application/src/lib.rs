//! Application layer for ark-runtime
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{EvaluatorTimeouts, HttpToolSettings, McpSettings, RuntimeParams};
pub use ports::{
    evaluation_progress::{EvaluationProgress, NoProgress},
    evaluator_transport::EvaluatorTransport,
    parameter_validator::ParameterValidator,
    resource_store::{ResourceStore, StoreError},
    tool_executor::{ToolDispatcher, ToolExecutor},
};
pub use use_cases::call_evaluators::{EvaluatorCaller, EvaluatorError};
pub use use_cases::resolve_value::ValueSourceResolver;
pub use use_cases::validate_agent::{AgentValidator, ValidationError};
pub use use_cases::validate_parameters::StoreParameterValidator;
