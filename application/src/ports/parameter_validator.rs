//! Parameter validation port
//!
//! Agent admission delegates the checking of declared parameters to this
//! collaborator; the default implementation lives in
//! [`use_cases::validate_parameters`](crate::use_cases::validate_parameters).

use async_trait::async_trait;
use ark_domain::Parameter;

#[async_trait]
pub trait ParameterValidator: Send + Sync {
    /// Validate parameters declared in `namespace`; the first failure wins
    async fn validate(&self, parameters: &[Parameter], namespace: &str) -> Result<(), String>;
}
