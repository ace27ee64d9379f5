//! Agent domain module
//!
//! Admission-time rules over agent declarations. The declaration shape
//! itself lives in [`crate::resource::agent`].

pub mod validation;

pub use validation::{
    AgentToolType, DEFAULT_MODEL_NAME, EXECUTION_ENGINE_A2A, MODEL_VALIDATION_EXEMPT_ENGINES,
    Warnings, is_model_validation_exempt, is_valid_builtin_tool, resolve_model_spec,
};
