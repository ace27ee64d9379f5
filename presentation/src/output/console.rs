//! Console output formatter for command results

use colored::Colorize;
use ark_domain::{EvaluationResponse, EvaluationResult, ToolOutcome, ToolSignal};
use serde_json::json;

/// Formats tool outcomes, evaluation results and admission verdicts
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a dispatched tool call
    pub fn format_tool_outcome(outcome: &ToolOutcome) -> String {
        let mut output = String::new();
        let result = &outcome.result;

        output.push_str(&Self::header(&format!("Tool: {}", result.name)));
        output.push_str(&format!("{} {}\n", "Call:".cyan().bold(), result.id));

        match &outcome.signal {
            None => output.push_str(&format!("{} {}\n", "Status:".cyan().bold(), "ok".green())),
            Some(ToolSignal::Terminate) => output.push_str(&format!(
                "{} {}\n",
                "Status:".cyan().bold(),
                "terminate".yellow()
            )),
            Some(ToolSignal::Failed(e)) => output.push_str(&format!(
                "{} {} ({})\n",
                "Status:".cyan().bold(),
                "failed".red(),
                e.code()
            )),
        }
        if let Some(error) = &result.error {
            output.push_str(&format!("{} {}\n", "Error:".red().bold(), error));
        }
        if !result.content.is_empty() {
            output.push_str(&Self::section_header("Content"));
            output.push_str(&result.content);
            output.push('\n');
        }
        output
    }

    pub fn format_tool_outcome_json(outcome: &ToolOutcome) -> String {
        let signal = match &outcome.signal {
            None => json!(null),
            Some(ToolSignal::Terminate) => json!({"type": "terminate"}),
            Some(ToolSignal::Failed(e)) => {
                json!({"type": "failed", "code": e.code(), "message": e.to_string()})
            }
        };
        let value = json!({"result": outcome.result, "signal": signal});
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format one result line per evaluator, in the order given
    pub fn format_evaluations(results: &[EvaluationResult]) -> String {
        let mut output = Self::header("Evaluation Results");
        if results.is_empty() {
            output.push_str(&format!("{}\n", "No evaluators referenced".dimmed()));
            return output;
        }

        let width = results.iter().map(|r| r.evaluator_name.len()).max().unwrap_or(0);
        for result in results {
            let mark = if result.passed { "v".green() } else { "x".red() };
            output.push_str(&format!(
                "  {} {:<width$}  score {}\n",
                mark,
                result.evaluator_name,
                result.score,
                width = width
            ));
            if let Some(error) = result.error_message() {
                output.push_str(&format!("      {} {}\n", "error:".red(), error));
            }
        }

        let passed = results.iter().filter(|r| r.passed).count();
        output.push_str(&format!("\n{} {}/{}\n", "Passed:".cyan().bold(), passed, results.len()));
        output
    }

    pub fn format_evaluations_json(results: &[EvaluationResult]) -> String {
        serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".to_string())
    }

    /// Format the raw answer of a unified evaluator call
    pub fn format_evaluation_response(evaluator: &str, response: &EvaluationResponse) -> String {
        let mut output = Self::header(&format!("Evaluator: {evaluator}"));
        let verdict = if response.passed { "passed".green() } else { "failed".red() };
        output.push_str(&format!("{} {} ({})\n", "Score:".cyan().bold(), response.score, verdict));

        if !response.metadata.is_empty() {
            output.push_str(&Self::section_header("Metadata"));
            let mut keys: Vec<&String> = response.metadata.keys().collect();
            keys.sort();
            for key in keys {
                output.push_str(&format!("  {}: {}\n", key, response.metadata[key]));
            }
        }
        if let Some(usage) = &response.token_usage {
            output.push_str(&format!(
                "{} {} prompt + {} completion = {}\n",
                "Tokens:".dimmed(),
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            ));
        }
        output
    }

    pub fn format_evaluation_response_json(response: &EvaluationResponse) -> String {
        serde_json::to_string_pretty(response).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format an admission verdict
    pub fn format_admission(agent: &str, verdict: &Result<Vec<String>, String>) -> String {
        match verdict {
            Ok(warnings) => {
                let mut output = format!("{} agent {} is valid\n", "v".green(), agent.bold());
                for warning in warnings {
                    output.push_str(&format!("  {} {}\n", "warning:".yellow(), warning));
                }
                output
            }
            Err(error) => format!("{} agent {} rejected: {}\n", "x".red(), agent.bold(), error),
        }
    }

    pub fn format_admission_json(agent: &str, verdict: &Result<Vec<String>, String>) -> String {
        let value = match verdict {
            Ok(warnings) => json!({"agent": agent, "allowed": true, "warnings": warnings}),
            Err(error) => json!({"agent": agent, "allowed": false, "error": error}),
        };
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}\n", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }
}
