//! `[mcp]` section

use super::ConfigValidationError;
use ark_application::config::McpSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMcpConfig {
    pub request_timeout_secs: u64,
    /// Name announced in the MCP `initialize` handshake
    pub client_name: String,
}

impl Default for FileMcpConfig {
    fn default() -> Self {
        let defaults = McpSettings::default();
        Self {
            request_timeout_secs: defaults.request_timeout.as_secs(),
            client_name: defaults.client_name,
        }
    }
}

impl FileMcpConfig {
    pub(super) fn settings(&self) -> Result<McpSettings, ConfigValidationError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigValidationError::ZeroTimeout {
                field: "mcp.request_timeout_secs",
            });
        }
        if self.client_name.trim().is_empty() {
            return Err(ConfigValidationError::Empty {
                field: "mcp.client_name",
            });
        }
        Ok(McpSettings {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            client_name: self.client_name.clone(),
        })
    }
}
