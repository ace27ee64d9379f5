//! Runtime parameters: deadlines and defaults for network-bound work.
//!
//! These are application-layer concerns, filled from the configuration
//! file by the infrastructure loader. `Default` matches the behavior of a
//! core running without any configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Deadlines for evaluator calls.
///
/// | Request | Timeout |
/// |---------|---------|
/// | legacy (`call_single`) | `default` |
/// | unified, any type | `default` |
/// | unified, `baseline` | `baseline` (several sequential model calls) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorTimeouts {
    pub default: Duration,
    pub baseline: Duration,
}

impl Default for EvaluatorTimeouts {
    fn default() -> Self {
        Self {
            default: Duration::from_secs(30),
            baseline: Duration::from_secs(120),
        }
    }
}

impl EvaluatorTimeouts {
    /// Timeout for a unified request of the given type
    pub fn for_type(&self, evaluation_type: &str) -> Duration {
        if evaluation_type == ark_domain::evaluation::EVALUATION_TYPE_BASELINE {
            self.baseline
        } else {
            self.default
        }
    }

    pub fn with_default(mut self, timeout: Duration) -> Self {
        self.default = timeout;
        self
    }

    pub fn with_baseline(mut self, timeout: Duration) -> Self {
        self.baseline = timeout;
        self
    }
}

/// Defaults for HTTP tool execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpToolSettings {
    /// Used when a tool declares no timeout or an unparsable one
    pub default_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpToolSettings {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_secs(30),
            user_agent: format!("ark-runtime/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Pooled MCP client behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpSettings {
    pub request_timeout: Duration,
    /// Reported as `clientInfo.name` during the MCP handshake
    pub client_name: String,
}

impl Default for McpSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            client_name: "ark-runtime".to_string(),
        }
    }
}

/// Everything the composition root hands to services and adapters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeParams {
    /// Namespace used when neither a reference nor its owner names one
    pub default_namespace: String,
    pub evaluators: EvaluatorTimeouts,
    /// Optional path segment appended to evaluator addresses
    pub evaluator_path: Option<String>,
    pub http_tools: HttpToolSettings,
    pub mcp: McpSettings,
}

impl Default for RuntimeParams {
    fn default() -> Self {
        Self {
            default_namespace: "default".to_string(),
            evaluators: EvaluatorTimeouts::default(),
            evaluator_path: None,
            http_tools: HttpToolSettings::default(),
            mcp: McpSettings::default(),
        }
    }
}

impl RuntimeParams {
    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = namespace.into();
        self
    }

    pub fn with_evaluator_timeouts(mut self, timeouts: EvaluatorTimeouts) -> Self {
        self.evaluators = timeouts;
        self
    }
}
