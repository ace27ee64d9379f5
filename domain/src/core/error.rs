//! Domain error types

use thiserror::Error;

/// Failure taxonomy shared by tool dispatch, evaluator calls and value resolution.
///
/// Intentional early termination of an agent loop is *not* represented here;
/// see [`ToolSignal::Terminate`](crate::tool::value_objects::ToolSignal).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A registry entry, executor or control-plane resource is absent
    #[error("{0} not found")]
    NotFound(String),

    /// A required spec field is missing or malformed
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A value source or secret reference could not be resolved
    #[error("resolution failed: {0}")]
    Resolution(String),

    /// Network-level failure (connect, timeout, body read)
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote side answered with a failure status or an explicit error field
    #[error("protocol error: {0}")]
    Protocol(String),

    /// An admission invariant was violated
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("operation cancelled")]
    Cancelled,
}

impl CoreError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CoreError::Cancelled)
    }

    /// Stable code for the error kind, used in tool result envelopes
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::NotFound(_) => "NOT_FOUND",
            CoreError::Configuration(_) => "CONFIGURATION",
            CoreError::Resolution(_) => "RESOLUTION",
            CoreError::Transport(_) => "TRANSPORT",
            CoreError::Protocol(_) => "PROTOCOL",
            CoreError::Validation(_) => "VALIDATION",
            CoreError::Cancelled => "CANCELLED",
        }
    }
}
