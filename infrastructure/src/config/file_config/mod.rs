//! Raw TOML configuration data types
//!
//! These structs mirror the config file exactly. Every section is optional
//! and falls back to the runtime defaults.
//!
//! ```toml
//! [runtime]
//! default_namespace = "team-a"
//!
//! [tools]
//! default_timeout = "30s"
//!
//! [evaluators]
//! timeout_secs = 30
//! baseline_timeout_secs = 120
//! path = "evaluate"
//!
//! [mcp]
//! request_timeout_secs = 30
//! client_name = "ark-runtime"
//! ```

mod evaluators;
mod mcp;
mod runtime;
mod tools;

pub use evaluators::FileEvaluatorsConfig;
pub use mcp::FileMcpConfig;
pub use runtime::FileRuntimeConfig;
pub use tools::FileToolsConfig;

use ark_application::config::RuntimeParams;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("{field} cannot be 0")]
    ZeroTimeout { field: &'static str },

    #[error("{field}: invalid duration '{value}'")]
    InvalidDuration { field: &'static str, value: String },

    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub runtime: FileRuntimeConfig,
    /// HTTP tool settings
    pub tools: FileToolsConfig,
    pub evaluators: FileEvaluatorsConfig,
    pub mcp: FileMcpConfig,
}

impl FileConfig {
    /// Validate and convert into the parameters services are built with.
    ///
    /// The first invalid field wins.
    pub fn into_runtime_params(self) -> Result<RuntimeParams, ConfigValidationError> {
        let default_namespace = self.runtime.default_namespace()?;
        Ok(RuntimeParams {
            default_namespace,
            evaluators: self.evaluators.timeouts()?,
            evaluator_path: self.evaluators.path.filter(|p| !p.is_empty()),
            http_tools: self.tools.settings()?,
            mcp: self.mcp.settings()?,
        })
    }
}
