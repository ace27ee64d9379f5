//! Port definitions (interfaces for external adapters)
//!
//! Ports define the boundary between the application layer and the outside
//! world. Adapters in the infrastructure layer implement these traits.

pub mod evaluation_progress;
pub mod evaluator_transport;
pub mod parameter_validator;
pub mod resource_store;
pub mod tool_executor;
