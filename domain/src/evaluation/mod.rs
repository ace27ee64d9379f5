//! Evaluation domain module
//!
//! Wire shapes exchanged with external scoring services and the
//! caller-facing [`EvaluationResult`]. Two request shapes coexist: the
//! legacy [`EvaluationRequest`] built from a query snapshot, and the
//! [`UnifiedEvaluationRequest`] keyed by evaluation type.

pub mod entities;

pub use crate::resource::EvaluatorRef;
pub use entities::{
    EVALUATION_TYPE_BASELINE, EvaluationRequest, EvaluationResponse, EvaluationResult,
    FAILED_SCORE, NO_RESULT_MESSAGE, TokenUsage, UnifiedEvaluationRequest,
};
