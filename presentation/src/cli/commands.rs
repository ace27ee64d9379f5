//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored output
    Text,
    /// JSON output
    Json,
}

/// CLI arguments for ark-runtime
#[derive(Parser, Debug)]
#[command(name = "ark-runtime")]
#[command(author, version, about = "Agent execution core - tools, evaluators and admission checks")]
#[command(long_about = r#"
ark-runtime runs the execution core of an agent platform against resources
declared in YAML or JSON manifests: it validates agents, dispatches tool
calls and calls evaluators.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./ark.toml          Project-level config
3. ~/.config/ark-runtime/config.toml   Global config
4. ARK_* environment variables (ARK_EVALUATORS__TIMEOUT_SECS=60)

Example:
  ark-runtime -m manifests/ validate-agent weather-agent
  ark-runtime -m manifests/ call-tool --agent weather-agent --tool forecast --args '{"city":"Oslo"}'
  ark-runtime -m manifests/ evaluate --query q-123
  ark-runtime -m manifests/ evaluate-unified --evaluator judge --type direct --param scope=accuracy
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Manifest file or directory loaded into the resource store
    #[arg(short, long, global = true, value_name = "PATH")]
    pub manifests: Option<PathBuf>,

    /// Namespace for names given on the command line
    #[arg(short, long, global = true, value_name = "NAMESPACE")]
    pub namespace: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run admission checks for an agent
    ValidateAgent {
        /// Agent name
        name: String,
    },

    /// Build an agent's tool registry and dispatch one call
    CallTool {
        /// Agent whose tools are registered
        #[arg(long)]
        agent: String,
        /// Tool (function) name
        #[arg(long)]
        tool: String,
        /// Call arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },

    /// Call every evaluator referenced by a query
    Evaluate {
        /// Query name
        #[arg(long)]
        query: String,
    },

    /// Call one evaluator with a unified request
    EvaluateUnified {
        /// Evaluator name
        #[arg(long)]
        evaluator: String,
        /// Evaluation type (direct, baseline, query, batch, event)
        #[arg(long = "type", value_name = "TYPE")]
        evaluation_type: String,
        /// Request parameter (repeatable)
        #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
        /// Request config as a JSON object
        #[arg(long = "config-json", value_name = "JSON")]
        config_json: Option<String>,
    },

    /// Show configuration file locations
    Config,
}

impl Command {
    /// Every command but `config` needs resources
    pub fn needs_manifests(&self) -> bool {
        !matches!(self, Command::Config)
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
