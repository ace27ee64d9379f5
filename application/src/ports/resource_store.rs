//! Control-plane store port
//!
//! Read-only, namespaced name lookups for the resources this core consumes.
//! The store is passed explicitly into every component that needs it; there
//! is no ambient client.

use async_trait::async_trait;
use ark_domain::{
    Agent, ConfigMap, CoreError, Evaluator, McpServer, Model, Query, ResourceKind, Secret, Tool,
};
use thiserror::Error;

/// Errors reported by a control-plane store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} {namespace}/{name} not found")]
    NotFound {
        kind: ResourceKind,
        namespace: String,
        name: String,
    },

    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(kind: ResourceKind, namespace: &str, name: &str) -> Self {
        StoreError::NotFound {
            kind,
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound {
                kind,
                namespace,
                name,
            } => CoreError::NotFound(format!("{kind} {namespace}/{name}")),
            StoreError::Backend(msg) => CoreError::Transport(msg),
        }
    }
}

/// Keyed lookup of declared resources: `get(namespace, name)` per kind
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn get_tool(&self, namespace: &str, name: &str) -> Result<Tool, StoreError>;

    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Secret, StoreError>;

    async fn get_config_map(&self, namespace: &str, name: &str) -> Result<ConfigMap, StoreError>;

    async fn get_evaluator(&self, namespace: &str, name: &str) -> Result<Evaluator, StoreError>;

    async fn get_model(&self, namespace: &str, name: &str) -> Result<Model, StoreError>;

    async fn get_agent(&self, namespace: &str, name: &str) -> Result<Agent, StoreError>;

    async fn get_query(&self, namespace: &str, name: &str) -> Result<Query, StoreError>;

    async fn get_mcp_server(&self, namespace: &str, name: &str) -> Result<McpServer, StoreError>;
}
