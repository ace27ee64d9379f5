//! Use cases (application services)

pub mod call_evaluators;
pub mod resolve_value;
pub mod validate_agent;
pub mod validate_parameters;
