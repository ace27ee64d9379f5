//! `[tools]` section: HTTP tool defaults
//!
//! `default_timeout` uses the same duration syntax as a Tool resource's
//! own `timeout` field (`"30s"`, `"1m30s"`, `"500ms"`).

use super::ConfigValidationError;
use crate::tools::duration::parse_duration;
use ark_application::config::HttpToolSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    pub default_timeout: Option<String>,
    pub user_agent: Option<String>,
}

impl FileToolsConfig {
    pub(super) fn settings(&self) -> Result<HttpToolSettings, ConfigValidationError> {
        let mut settings = HttpToolSettings::default();

        if let Some(text) = &self.default_timeout {
            let timeout = parse_duration(text).ok_or_else(|| ConfigValidationError::InvalidDuration {
                field: "tools.default_timeout",
                value: text.clone(),
            })?;
            if timeout.is_zero() {
                return Err(ConfigValidationError::ZeroTimeout {
                    field: "tools.default_timeout",
                });
            }
            settings.default_timeout = timeout;
        }
        if let Some(user_agent) = self.user_agent.as_ref().filter(|ua| !ua.is_empty()) {
            settings.user_agent = user_agent.clone();
        }
        Ok(settings)
    }
}
