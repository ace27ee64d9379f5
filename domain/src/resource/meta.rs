//! Object metadata shared by every control-plane resource

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kinds of resources this core reads from the control-plane store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Agent,
    Tool,
    Secret,
    ConfigMap,
    Evaluator,
    Model,
    Query,
    McpServer,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Agent => "agent",
            ResourceKind::Tool => "tool",
            ResourceKind::Secret => "secret",
            ResourceKind::ConfigMap => "configmap",
            ResourceKind::Evaluator => "evaluator",
            ResourceKind::Model => "model",
            ResourceKind::Query => "query",
            ResourceKind::McpServer => "mcpserver",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Name, namespace and free-form annotations of a resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub annotations: HashMap<String, String>,
}

impl ObjectMeta {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = uid.into();
        self
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    /// Get a non-empty annotation value
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations
            .get(key)
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
    }
}

/// A by-name reference to another resource, namespace optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl ResourceRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
        }
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Namespace of the reference, falling back to `default_namespace`
    /// when unset or empty
    pub fn namespace_or<'a>(&'a self, default_namespace: &'a str) -> &'a str {
        match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => ns,
            _ => default_namespace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_fallback() {
        let plain = ResourceRef::new("judge");
        assert_eq!(plain.namespace_or("team-a"), "team-a");

        let explicit = ResourceRef::new("judge").in_namespace("shared");
        assert_eq!(explicit.namespace_or("team-a"), "shared");

        let empty = ResourceRef::new("judge").in_namespace("");
        assert_eq!(empty.namespace_or("team-a"), "team-a");
    }

    #[test]
    fn test_annotation_ignores_empty_values() {
        let meta = ObjectMeta::new("weather", "default")
            .with_annotation("description", "")
            .with_annotation("owner", "platform");

        assert_eq!(meta.annotation("description"), None);
        assert_eq!(meta.annotation("owner"), Some("platform"));
    }

    fn assert_total_eq<T: Eq>(a: &T, b: &T) -> bool {
        a == b
    }

    #[test]
    fn test_resources_embedding_meta_are_eq() {
        use crate::resource::{Agent, Secret};

        let meta = ObjectMeta::new("creds", "default").with_annotation("owner", "platform");
        assert!(assert_total_eq(&meta, &meta.clone()));
        assert!(!assert_total_eq(&meta, &ObjectMeta::new("creds", "other")));

        let secret = Secret::new(meta.clone()).with_entry("token", "abc");
        assert!(assert_total_eq(&secret, &secret.clone()));

        let agent = Agent::new(ObjectMeta::new("helper", "default"));
        assert!(assert_total_eq(&agent, &agent.clone()));
    }

    #[test]
    fn test_meta_deserializes_without_namespace() {
        let meta: ObjectMeta = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert_eq!(meta.name, "x");
        assert!(meta.namespace.is_empty());
    }
}
