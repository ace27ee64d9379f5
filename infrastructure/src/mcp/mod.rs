//! Model Context Protocol client adapter
//!
//! A minimal streamable-HTTP MCP client: JSON-RPC 2.0 requests POSTed to a
//! single endpoint, answered with either `application/json` or a single
//! `text/event-stream` event.
//!
//! - [`McpClient`]: one initialized session with one server
//! - [`McpClientPool`]: lazily connected clients shared by all tool calls
//!   dispatched through one registry

pub mod client;
pub mod error;
pub mod pool;
pub mod protocol;

pub use client::McpClient;
pub use error::McpError;
pub use pool::McpClientPool;
