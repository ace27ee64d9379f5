//! In-memory resource store

use ark_application::ports::resource_store::{ResourceStore, StoreError};
use ark_domain::{
    Agent, ConfigMap, Evaluator, Manifest, McpServer, Model, Query, ResourceKind, Secret, Tool,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

type Key = (ResourceKind, String, String);

/// Resources keyed by `(kind, namespace, name)`; later inserts replace
/// earlier ones.
#[derive(Default)]
pub struct InMemoryStore {
    resources: RwLock<HashMap<Key, Manifest>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_manifests(manifests: impl IntoIterator<Item = Manifest>) -> Self {
        let store = Self::new();
        for manifest in manifests {
            store.insert(manifest);
        }
        store
    }

    pub fn insert(&self, manifest: Manifest) {
        let meta = manifest.metadata();
        let key = (manifest.kind(), meta.namespace.clone(), meta.name.clone());
        match self.resources.write() {
            Ok(mut resources) => {
                resources.insert(key, manifest);
            }
            Err(poisoned) => {
                poisoned.into_inner().insert(key, manifest);
            }
        }
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(self, manifest: impl Into<Manifest>) -> Self {
        self.insert(manifest.into());
        self
    }

    pub fn len(&self) -> usize {
        self.resources.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of every stored resource of `kind`, sorted by namespace and name
    pub fn names(&self, kind: ResourceKind) -> Vec<(String, String)> {
        let Ok(resources) = self.resources.read() else {
            return Vec::new();
        };
        let mut names: Vec<(String, String)> = resources
            .keys()
            .filter(|(k, _, _)| *k == kind)
            .map(|(_, ns, name)| (ns.clone(), name.clone()))
            .collect();
        names.sort();
        names
    }

    fn get<T>(
        &self,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
        extract: fn(Manifest) -> Option<T>,
    ) -> Result<T, StoreError> {
        let resources = self
            .resources
            .read()
            .map_err(|_| StoreError::Backend("resource store lock poisoned".to_string()))?;
        resources
            .get(&(kind, namespace.to_string(), name.to_string()))
            .cloned()
            .and_then(extract)
            .ok_or_else(|| StoreError::not_found(kind, namespace, name))
    }
}

#[async_trait]
impl ResourceStore for InMemoryStore {
    async fn get_tool(&self, namespace: &str, name: &str) -> Result<Tool, StoreError> {
        self.get(ResourceKind::Tool, namespace, name, |m| match m {
            Manifest::Tool(r) => Some(r),
            _ => None,
        })
    }

    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Secret, StoreError> {
        self.get(ResourceKind::Secret, namespace, name, |m| match m {
            Manifest::Secret(r) => Some(r),
            _ => None,
        })
    }

    async fn get_config_map(&self, namespace: &str, name: &str) -> Result<ConfigMap, StoreError> {
        self.get(ResourceKind::ConfigMap, namespace, name, |m| match m {
            Manifest::ConfigMap(r) => Some(r),
            _ => None,
        })
    }

    async fn get_evaluator(&self, namespace: &str, name: &str) -> Result<Evaluator, StoreError> {
        self.get(ResourceKind::Evaluator, namespace, name, |m| match m {
            Manifest::Evaluator(r) => Some(r),
            _ => None,
        })
    }

    async fn get_model(&self, namespace: &str, name: &str) -> Result<Model, StoreError> {
        self.get(ResourceKind::Model, namespace, name, |m| match m {
            Manifest::Model(r) => Some(r),
            _ => None,
        })
    }

    async fn get_agent(&self, namespace: &str, name: &str) -> Result<Agent, StoreError> {
        self.get(ResourceKind::Agent, namespace, name, |m| match m {
            Manifest::Agent(r) => Some(r),
            _ => None,
        })
    }

    async fn get_query(&self, namespace: &str, name: &str) -> Result<Query, StoreError> {
        self.get(ResourceKind::Query, namespace, name, |m| match m {
            Manifest::Query(r) => Some(r),
            _ => None,
        })
    }

    async fn get_mcp_server(&self, namespace: &str, name: &str) -> Result<McpServer, StoreError> {
        self.get(ResourceKind::McpServer, namespace, name, |m| match m {
            Manifest::McpServer(r) => Some(r),
            _ => None,
        })
    }
}
