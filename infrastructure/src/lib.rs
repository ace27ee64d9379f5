//! Infrastructure layer for ark-runtime
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: tool executors and the registry, the reqwest-based
//! evaluator transport, the pooled MCP client, the in-memory resource
//! store with its manifest loader, and configuration file loading.

pub mod config;
pub mod evaluator;
pub mod mcp;
pub mod store;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use evaluator::HttpEvaluatorTransport;
pub use mcp::{McpClient, McpClientPool, McpError};
pub use store::{InMemoryStore, ManifestError, load_manifests};
pub use tools::{HttpExecutor, McpExecutor, NoopExecutor, TerminateExecutor, ToolRegistry};
