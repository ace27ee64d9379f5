//! Admission rules for agent declarations.
//!
//! Pure helpers used by the application-layer `AgentValidator`: which
//! execution engines skip model validation, how the effective model
//! reference is computed, and which tool types / built-in names exist.
//!
//! # Examples
//!
//! ```
//! use ark_domain::agent::validation::{AgentToolType, is_valid_builtin_tool, resolve_model_spec};
//!
//! assert_eq!(resolve_model_spec(None, "team-a"), ("default".to_string(), "team-a".to_string()));
//! assert_eq!("built-in".parse::<AgentToolType>(), Ok(AgentToolType::BuiltIn));
//! assert!(is_valid_builtin_tool("terminate"));
//! assert!(!is_valid_builtin_tool("sleep"));
//! ```

use crate::resource::{Agent, AgentModelRef};
use crate::tool::BUILTIN_TOOLS;

/// Execution engine backed by an external agent-to-agent server
pub const EXECUTION_ENGINE_A2A: &str = "a2a";

/// Engines that run on external, self-managed servers and bring their own model
pub const MODEL_VALIDATION_EXEMPT_ENGINES: &[&str] = &[EXECUTION_ENGINE_A2A];

/// Model looked up when an agent declares no model reference
pub const DEFAULT_MODEL_NAME: &str = "default";

/// Non-fatal admission messages
pub type Warnings = Vec<String>;

/// True when the agent's execution engine is exempt from model validation
pub fn is_model_validation_exempt(agent: &Agent) -> bool {
    agent
        .spec
        .execution_engine
        .as_ref()
        .is_some_and(|engine| MODEL_VALIDATION_EXEMPT_ENGINES.contains(&engine.name.as_str()))
}

/// Compute the effective `(model name, namespace)` for an agent.
///
/// An explicit reference wins (its namespace falling back to the agent's);
/// otherwise the namespace-level default model is used.
pub fn resolve_model_spec(model_ref: Option<&AgentModelRef>, namespace: &str) -> (String, String) {
    match model_ref {
        Some(model_ref) => {
            let ns = model_ref
                .namespace
                .as_deref()
                .filter(|ns| !ns.is_empty())
                .unwrap_or(namespace);
            (model_ref.name.clone(), ns.to_string())
        }
        None => (DEFAULT_MODEL_NAME.to_string(), namespace.to_string()),
    }
}

/// Type of a tool declared on an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentToolType {
    BuiltIn,
    Custom,
}

impl AgentToolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentToolType::BuiltIn => "built-in",
            AgentToolType::Custom => "custom",
        }
    }
}

impl std::str::FromStr for AgentToolType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "built-in" => Ok(AgentToolType::BuiltIn),
            "custom" => Ok(AgentToolType::Custom),
            other => Err(other.to_string()),
        }
    }
}

impl std::fmt::Display for AgentToolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn is_valid_builtin_tool(name: &str) -> bool {
    BUILTIN_TOOLS.contains(&name)
}

/// Comma-separated list of the built-in tool names, for error messages
pub fn supported_builtin_tools() -> String {
    BUILTIN_TOOLS.join(", ")
}
