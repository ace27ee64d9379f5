//! Presentation layer for ark-runtime
//!
//! This crate contains CLI definitions, output formatters and progress
//! reporters for evaluator calls.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
