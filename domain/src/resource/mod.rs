//! Control-plane resource shapes
//!
//! These are the declarations this core reads (never writes) from the
//! control-plane store. They mirror the wire shape of the cluster objects
//! (`metadata` + `spec`, camelCase fields) so manifests can be
//! deserialized directly.
//!
//! | Resource | Used by |
//! |----------|---------|
//! | [`Tool`] | HTTP / MCP executors, agent admission |
//! | [`Secret`], [`ConfigMap`] | value-source and header resolution |
//! | [`Evaluator`] | evaluator calls |
//! | [`Model`] | agent admission |
//! | [`Agent`] | agent admission, registry construction |
//! | [`Query`] | legacy evaluation requests |
//! | [`McpServer`] | pooled MCP client |

pub mod agent;
pub mod evaluator;
pub mod mcp;
pub mod meta;
pub mod query;
pub mod secret;
pub mod tool;
pub mod value_source;

pub use agent::{Agent, AgentModelRef, AgentSpec, AgentTool, ExecutionEngineRef};
pub use evaluator::{Evaluator, EvaluatorRef, EvaluatorSpec, Model, ModelSpec};
pub use mcp::{McpServer, McpServerSpec};
pub use meta::{ObjectMeta, ResourceKind, ResourceRef};
pub use query::{Query, QuerySpec, QueryStatus, QueryTarget, Response};
pub use secret::{ConfigMap, Secret};
pub use tool::{HttpSpec, McpToolRef, TOOL_TYPE_HTTP, TOOL_TYPE_MCP, Tool, ToolSpec};
pub use value_source::{
    ConfigMapKeySelector, Header, HeaderValue, HeaderValueSource, Parameter, SecretKeySelector,
    ServiceReference, ValueFromSource, ValueSource,
};

use serde::{Deserialize, Serialize};

/// Any resource, tagged by its `kind` field as found in manifests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Manifest {
    Agent(Agent),
    Tool(Tool),
    Secret(Secret),
    ConfigMap(ConfigMap),
    Evaluator(Evaluator),
    Model(Model),
    Query(Query),
    #[serde(rename = "MCPServer", alias = "McpServer")]
    McpServer(McpServer),
}

impl Manifest {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Manifest::Agent(_) => ResourceKind::Agent,
            Manifest::Tool(_) => ResourceKind::Tool,
            Manifest::Secret(_) => ResourceKind::Secret,
            Manifest::ConfigMap(_) => ResourceKind::ConfigMap,
            Manifest::Evaluator(_) => ResourceKind::Evaluator,
            Manifest::Model(_) => ResourceKind::Model,
            Manifest::Query(_) => ResourceKind::Query,
            Manifest::McpServer(_) => ResourceKind::McpServer,
        }
    }

    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            Manifest::Agent(r) => &r.metadata,
            Manifest::Tool(r) => &r.metadata,
            Manifest::Secret(r) => &r.metadata,
            Manifest::ConfigMap(r) => &r.metadata,
            Manifest::Evaluator(r) => &r.metadata,
            Manifest::Model(r) => &r.metadata,
            Manifest::Query(r) => &r.metadata,
            Manifest::McpServer(r) => &r.metadata,
        }
    }

    pub fn metadata_mut(&mut self) -> &mut ObjectMeta {
        match self {
            Manifest::Agent(r) => &mut r.metadata,
            Manifest::Tool(r) => &mut r.metadata,
            Manifest::Secret(r) => &mut r.metadata,
            Manifest::ConfigMap(r) => &mut r.metadata,
            Manifest::Evaluator(r) => &mut r.metadata,
            Manifest::Model(r) => &mut r.metadata,
            Manifest::Query(r) => &mut r.metadata,
            Manifest::McpServer(r) => &mut r.metadata,
        }
    }
}

macro_rules! manifest_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Manifest {
                fn from(resource: $variant) -> Self {
                    Manifest::$variant(resource)
                }
            }
        )*
    };
}

manifest_from!(Agent, Tool, Secret, ConfigMap, Evaluator, Model, Query, McpServer);
