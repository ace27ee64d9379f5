//! Evaluation progress port
//!
//! Callbacks fired around each evaluator call so callers can track
//! operations (console output, operation trackers, events).

use ark_domain::EvaluationResult;

/// Callback for progress updates during evaluator calls
pub trait EvaluationProgress: Send + Sync {
    /// Called before the evaluator's address is resolved
    fn on_evaluation_start(&self, evaluator: &str, evaluation_type: &str);

    /// Called when a scoring service answered without error
    fn on_evaluation_complete(&self, result: &EvaluationResult);

    /// Called for any failure of a single evaluator call
    fn on_evaluation_failed(&self, evaluator: &str, error: &str);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl EvaluationProgress for NoProgress {
    fn on_evaluation_start(&self, _evaluator: &str, _evaluation_type: &str) {}
    fn on_evaluation_complete(&self, _result: &EvaluationResult) {}
    fn on_evaluation_failed(&self, _evaluator: &str, _error: &str) {}
}
