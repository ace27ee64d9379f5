//! CLI entrypoint for ark-runtime
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use ark_application::{
    AgentValidator, EvaluationProgress, EvaluatorCaller, NoProgress, ResourceStore, RuntimeParams,
    ToolDispatcher, ValueSourceResolver,
};
use ark_domain::{EvaluatorRef, ToolCall, UnifiedEvaluationRequest};
use ark_infrastructure::{
    ConfigLoader, HttpEvaluatorTransport, InMemoryStore, ToolRegistry, load_manifests,
};
use ark_presentation::{Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.command == Command::Config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        let config = ConfigLoader::load(cli.config.as_deref()).context("failed to load configuration")?;
        println!();
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(ExitCode::SUCCESS);
    }

    let params = ConfigLoader::load(cli.config.as_deref())
        .context("failed to load configuration")?
        .into_runtime_params()
        .context("invalid configuration")?;
    let namespace = cli
        .namespace
        .clone()
        .unwrap_or_else(|| params.default_namespace.clone());

    // === Dependency Injection ===
    let Some(manifests) = cli.manifests.as_deref() else {
        bail!("--manifests is required for this command");
    };
    let store: Arc<dyn ResourceStore> = Arc::new(InMemoryStore::from_manifests(
        load_manifests(manifests, &namespace)?,
    ));
    let resolver = ValueSourceResolver::new(store.clone());

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling in-flight calls");
            on_signal.cancel();
        }
    });

    info!(namespace = %namespace, manifests = %manifests.display(), "Starting ark-runtime");

    let json = cli.output == OutputFormat::Json;
    match cli.command {
        Command::ValidateAgent { name } => {
            let agent = store.get_agent(&namespace, &name).await?;
            let verdict = AgentValidator::new(store.clone())
                .validate_create(&agent)
                .await
                .map_err(|e| e.to_string());
            let output = if json {
                ConsoleFormatter::format_admission_json(&name, &verdict)
            } else {
                ConsoleFormatter::format_admission(&name, &verdict)
            };
            println!("{output}");
            Ok(exit_code(verdict.is_ok()))
        }

        Command::CallTool { agent, tool, args } => {
            let agent = store.get_agent(&namespace, &agent).await?;
            let registry = ToolRegistry::for_agent(&agent, resolver, params).await?;
            let call = ToolCall::new("cli-call-1", tool, args);
            let outcome = registry.dispatch(&call, &cancel).await;
            let output = if json {
                ConsoleFormatter::format_tool_outcome_json(&outcome)
            } else {
                ConsoleFormatter::format_tool_outcome(&outcome)
            };
            println!("{output}");
            Ok(exit_code(outcome.error().is_none()))
        }

        Command::Evaluate { query } => {
            let query = store.get_query(&namespace, &query).await?;
            let caller = evaluator_caller(resolver, &params, progress(cli.quiet || json));
            let results = caller.call_many(&query, &query.spec.evaluators, &cancel).await;
            let output = if json {
                ConsoleFormatter::format_evaluations_json(&results)
            } else {
                ConsoleFormatter::format_evaluations(&results)
            };
            println!("{output}");
            Ok(exit_code(results.iter().all(|r| r.error_message().is_none())))
        }

        Command::EvaluateUnified {
            evaluator,
            evaluation_type,
            params: request_params,
            config_json,
        } => {
            let mut request =
                UnifiedEvaluationRequest::new(evaluation_type).with_evaluator_name(&evaluator);
            for (key, value) in request_params {
                request = request.with_parameter(key, value);
            }
            if let Some(config) = config_json {
                request.config = serde_json::from_str(&config).context("--config-json must be a JSON object")?;
            }

            let caller = evaluator_caller(resolver, &params, progress(cli.quiet || json));
            let response = caller
                .call_unified(&EvaluatorRef::new(&evaluator), request, &namespace, &cancel)
                .await;
            match response {
                Ok(response) => {
                    let output = if json {
                        ConsoleFormatter::format_evaluation_response_json(&response)
                    } else {
                        ConsoleFormatter::format_evaluation_response(&evaluator, &response)
                    };
                    println!("{output}");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }

        Command::Config => Ok(ExitCode::SUCCESS),
    }
}

fn evaluator_caller(
    resolver: ValueSourceResolver,
    params: &RuntimeParams,
    progress: Arc<dyn EvaluationProgress>,
) -> EvaluatorCaller<HttpEvaluatorTransport> {
    let caller = EvaluatorCaller::new(resolver, Arc::new(HttpEvaluatorTransport::default()))
        .with_timeouts(params.evaluators)
        .with_progress(progress);
    match &params.evaluator_path {
        Some(path) => caller.with_endpoint(path.clone()),
        None => caller,
    }
}

fn progress(quiet: bool) -> Arc<dyn EvaluationProgress> {
    if quiet {
        Arc::new(NoProgress)
    } else {
        Arc::new(ProgressReporter::new())
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

/// Initialize logging based on verbosity level; `RUST_LOG` wins when set.
///
/// With `--log-file`, the same events are also written to that file. The
/// returned guard flushes it on drop.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter());

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let directory = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let Some(file_name) = path.file_name() else {
                bail!("--log-file must name a file: {}", path.display());
            };
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();
    Ok(guard)
}
