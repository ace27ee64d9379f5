//! Tool executors and the name-keyed registry
//!
//! | Tool | Executor | Network |
//! |------|----------|---------|
//! | `noop` | [`NoopExecutor`] | none |
//! | `terminate` | [`TerminateExecutor`] | none |
//! | `type: http` | [`HttpExecutor`] | one request per call |
//! | `type: mcp` | [`McpExecutor`] | pooled MCP session |

pub mod builtin;
pub mod duration;
pub mod http;
pub mod mcp;
pub mod registry;
pub mod template;

pub use builtin::{NoopExecutor, TerminateExecutor};
pub use http::HttpExecutor;
pub use mcp::McpExecutor;
pub use registry::ToolRegistry;
pub use template::{Substitution, substitute, substitute_body, substitute_url};
