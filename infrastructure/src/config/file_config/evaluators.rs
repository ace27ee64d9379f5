//! `[evaluators]` section

use super::ConfigValidationError;
use ark_application::config::EvaluatorTimeouts;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEvaluatorsConfig {
    /// Timeout for legacy and non-baseline unified calls
    pub timeout_secs: u64,
    /// Timeout for unified `baseline` calls
    pub baseline_timeout_secs: u64,
    /// Path segment appended to every evaluator address
    pub path: Option<String>,
}

impl Default for FileEvaluatorsConfig {
    fn default() -> Self {
        let defaults = EvaluatorTimeouts::default();
        Self {
            timeout_secs: defaults.default.as_secs(),
            baseline_timeout_secs: defaults.baseline.as_secs(),
            path: None,
        }
    }
}

impl FileEvaluatorsConfig {
    pub(super) fn timeouts(&self) -> Result<EvaluatorTimeouts, ConfigValidationError> {
        if self.timeout_secs == 0 {
            return Err(ConfigValidationError::ZeroTimeout {
                field: "evaluators.timeout_secs",
            });
        }
        if self.baseline_timeout_secs == 0 {
            return Err(ConfigValidationError::ZeroTimeout {
                field: "evaluators.baseline_timeout_secs",
            });
        }
        Ok(EvaluatorTimeouts::default()
            .with_default(Duration::from_secs(self.timeout_secs))
            .with_baseline(Duration::from_secs(self.baseline_timeout_secs)))
    }
}
