//! `[runtime]` section

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRuntimeConfig {
    /// Namespace used when a command or reference names none
    pub default_namespace: String,
}

impl Default for FileRuntimeConfig {
    fn default() -> Self {
        Self {
            default_namespace: "default".to_string(),
        }
    }
}

impl FileRuntimeConfig {
    pub(super) fn default_namespace(&self) -> Result<String, ConfigValidationError> {
        if self.default_namespace.trim().is_empty() {
            return Err(ConfigValidationError::Empty {
                field: "runtime.default_namespace",
            });
        }
        Ok(self.default_namespace.clone())
    }
}
