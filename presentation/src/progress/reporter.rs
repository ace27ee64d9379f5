//! Progress reporting for evaluator calls

use ark_application::ports::evaluation_progress::EvaluationProgress;
use ark_domain::EvaluationResult;
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// One spinner per in-flight evaluator
pub struct ProgressReporter {
    multi: MultiProgress,
    spinners: Mutex<HashMap<String, ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            spinners: Mutex::new(HashMap::new()),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn finish(&self, evaluator: &str, message: String) {
        let spinner = self
            .spinners
            .lock()
            .ok()
            .and_then(|mut spinners| spinners.remove(evaluator));
        if let Some(spinner) = spinner {
            spinner.finish_with_message(message);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationProgress for ProgressReporter {
    fn on_evaluation_start(&self, evaluator: &str, evaluation_type: &str) {
        let spinner = self.multi.add(ProgressBar::new_spinner());
        spinner.set_style(Self::spinner_style());
        spinner.set_prefix(evaluator.to_string());
        spinner.set_message(format!("{evaluation_type} evaluation..."));
        spinner.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut spinners) = self.spinners.lock() {
            spinners.insert(evaluator.to_string(), spinner);
        }
    }

    fn on_evaluation_complete(&self, result: &EvaluationResult) {
        let verdict = if result.passed { "passed".green() } else { "failed".red() };
        self.finish(
            &result.evaluator_name,
            format!("{} score {} ({})", "v".green(), result.score, verdict),
        );
    }

    fn on_evaluation_failed(&self, evaluator: &str, error: &str) {
        self.finish(evaluator, format!("{} {}", "x".red(), error));
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl EvaluationProgress for SimpleProgress {
    fn on_evaluation_start(&self, evaluator: &str, evaluation_type: &str) {
        eprintln!("{} {} ({})", "->".cyan(), evaluator.bold(), evaluation_type);
    }

    fn on_evaluation_complete(&self, result: &EvaluationResult) {
        eprintln!("  {} {} score {}", "v".green(), result.evaluator_name, result.score);
    }

    fn on_evaluation_failed(&self, evaluator: &str, error: &str) {
        eprintln!("  {} {} (failed: {})", "x".red(), evaluator, error);
    }
}
