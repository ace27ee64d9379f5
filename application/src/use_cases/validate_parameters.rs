//! Store-backed parameter validation

use crate::ports::parameter_validator::ParameterValidator;
use crate::use_cases::resolve_value::ValueSourceResolver;
use ark_domain::{CoreError, Parameter};
use async_trait::async_trait;
use std::collections::HashSet;

/// Default [`ParameterValidator`].
///
/// Each parameter needs a non-empty, unique name and exactly one of `value`
/// / `valueFrom`; secret and config-map references must point at existing
/// keys. The first failure wins.
pub struct StoreParameterValidator {
    resolver: ValueSourceResolver,
}

impl StoreParameterValidator {
    pub fn new(resolver: ValueSourceResolver) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl ParameterValidator for StoreParameterValidator {
    async fn validate(&self, parameters: &[Parameter], namespace: &str) -> Result<(), String> {
        let mut seen = HashSet::new();

        for (i, parameter) in parameters.iter().enumerate() {
            if parameter.name.is_empty() {
                return Err(format!("parameter[{i}]: name is required"));
            }
            if !seen.insert(parameter.name.as_str()) {
                return Err(format!("parameter[{i}]: duplicate name '{}'", parameter.name));
            }

            let value_from = parameter.value_from.as_ref().filter(|v| !v.is_empty());
            match (&parameter.value, value_from) {
                (Some(_), Some(_)) => {
                    return Err(format!(
                        "parameter '{}': cannot specify both value and valueFrom",
                        parameter.name
                    ));
                }
                (None, None) => {
                    return Err(format!(
                        "parameter '{}': must specify either value or valueFrom",
                        parameter.name
                    ));
                }
                (Some(_), None) => {}
                (None, Some(value_from)) => {
                    self.resolver
                        .resolve_value_from(value_from, namespace)
                        .await
                        .map_err(|e| {
                            let detail = match e {
                                CoreError::Resolution(msg) => msg,
                                other => other.to_string(),
                            };
                            format!("parameter '{}': {}", parameter.name, detail)
                        })?;
                }
            }
        }
        Ok(())
    }
}
