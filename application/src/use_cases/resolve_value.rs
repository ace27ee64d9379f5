//! Value source and header resolution
//!
//! Turns literal-or-reference declarations into concrete strings. Secret and
//! config-map lookups go through the [`ResourceStore`] port; the resolver
//! only calls through and attaches context to failures.

use crate::ports::resource_store::ResourceStore;
use ark_domain::resource::{
    ConfigMapKeySelector, SecretKeySelector, ServiceReference, ValueFromSource,
};
use ark_domain::{CoreError, Header, HeaderValue, ValueSource};
use std::sync::Arc;
use tracing::{debug, trace};

/// Resolves [`ValueSource`]s and [`HeaderValue`]s against the store
#[derive(Clone)]
pub struct ValueSourceResolver {
    store: Arc<dyn ResourceStore>,
}

impl ValueSourceResolver {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ResourceStore> {
        &self.store
    }

    /// Resolve a literal-or-reference value declared in `namespace`
    pub async fn resolve(&self, source: &ValueSource, namespace: &str) -> Result<String, CoreError> {
        if let Some(value) = source.value.as_deref().filter(|v| !v.is_empty()) {
            return Ok(value.to_string());
        }
        match &source.value_from {
            Some(value_from) => self.resolve_value_from(value_from, namespace).await,
            None => Err(CoreError::Resolution(
                "value source must specify either value or valueFrom".to_string(),
            )),
        }
    }

    /// Resolve the reference form of a value source
    pub async fn resolve_value_from(
        &self,
        value_from: &ValueFromSource,
        namespace: &str,
    ) -> Result<String, CoreError> {
        if let Some(selector) = &value_from.secret_key_ref {
            return self.secret_value(selector, namespace).await;
        }
        if let Some(selector) = &value_from.config_map_key_ref {
            return self.config_map_value(selector, namespace).await;
        }
        if let Some(service) = &value_from.service_ref {
            return Ok(service_url(service, namespace));
        }
        Err(CoreError::Resolution(
            "valueFrom must specify secretKeyRef, configMapKeyRef or serviceRef".to_string(),
        ))
    }

    /// Resolve one header value.
    ///
    /// A non-empty literal wins; otherwise the secret reference is fetched
    /// from `namespace`. Neither form present is an error.
    pub async fn resolve_header_value(
        &self,
        value: &HeaderValue,
        namespace: &str,
    ) -> Result<String, CoreError> {
        if let Some(literal) = value.literal_value() {
            return Ok(literal.to_string());
        }
        match value.secret_key_ref() {
            Some(selector) => self.secret_value(selector, namespace).await,
            None => Err(CoreError::Resolution(
                "header value must specify either value or valueFrom.secretKeyRef".to_string(),
            )),
        }
    }

    /// Resolve every header in order; the first failure aborts with the
    /// header's name attached.
    pub async fn resolve_headers(
        &self,
        headers: &[Header],
        namespace: &str,
    ) -> Result<Vec<(String, String)>, CoreError> {
        let mut resolved = Vec::with_capacity(headers.len());
        for header in headers {
            let value = self
                .resolve_header_value(&header.value, namespace)
                .await
                .map_err(|e| {
                    CoreError::Resolution(format!(
                        "failed to resolve header {}: {}",
                        header.name,
                        detail(&e)
                    ))
                })?;
            trace!(header = %header.name, "Resolved header");
            resolved.push((header.name.clone(), value));
        }
        Ok(resolved)
    }

    async fn secret_value(
        &self,
        selector: &SecretKeySelector,
        namespace: &str,
    ) -> Result<String, CoreError> {
        debug!(secret = %selector.name, namespace = %namespace, "Fetching secret");
        let secret = self
            .store
            .get_secret(namespace, &selector.name)
            .await
            .map_err(|e| {
                CoreError::Resolution(format!(
                    "failed to get secret {}/{}: {}",
                    namespace, selector.name, e
                ))
            })?;

        if secret.data.is_empty() {
            return Err(CoreError::Resolution(format!(
                "secret {}/{} has no data",
                namespace, selector.name
            )));
        }

        secret.get(&selector.key).map(String::from).ok_or_else(|| {
            CoreError::Resolution(format!(
                "key {} not found in secret {}/{}",
                selector.key, namespace, selector.name
            ))
        })
    }

    async fn config_map_value(
        &self,
        selector: &ConfigMapKeySelector,
        namespace: &str,
    ) -> Result<String, CoreError> {
        let config_map = self
            .store
            .get_config_map(namespace, &selector.name)
            .await
            .map_err(|e| {
                CoreError::Resolution(format!(
                    "failed to get configmap {}/{}: {}",
                    namespace, selector.name, e
                ))
            })?;

        config_map.get(&selector.key).map(String::from).ok_or_else(|| {
            CoreError::Resolution(format!(
                "key {} not found in configmap {}/{}",
                selector.key, namespace, selector.name
            ))
        })
    }
}

/// Strip the `resolution failed: ` prefix so nested context reads cleanly
fn detail(err: &CoreError) -> String {
    match err {
        CoreError::Resolution(msg) => msg.clone(),
        other => other.to_string(),
    }
}

/// In-cluster URL of a service: `http://<name>.<ns>.svc.cluster.local[:port][/path]`
pub fn service_url(service: &ServiceReference, namespace: &str) -> String {
    let ns = service
        .namespace
        .as_deref()
        .filter(|ns| !ns.is_empty())
        .unwrap_or(namespace);
    let mut url = format!("http://{}.{}.svc.cluster.local", service.name, ns);
    if let Some(port) = service.port.as_deref().filter(|p| !p.is_empty()) {
        url.push(':');
        url.push_str(port);
    }
    if let Some(path) = service.path.as_deref().filter(|p| !p.is_empty()) {
        if !path.starts_with('/') {
            url.push('/');
        }
        url.push_str(path);
    }
    url
}

/// Append an optional path segment to an address, inserting the separating
/// slash when the address lacks a trailing one.
pub fn join_endpoint(address: &str, endpoint: Option<&str>) -> String {
    match endpoint.filter(|e| !e.is_empty()) {
        Some(endpoint) if address.ends_with('/') => format!("{address}{endpoint}"),
        Some(endpoint) => format!("{address}/{endpoint}"),
        None => address.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ports::resource_store::StoreError;
    use ark_domain::{
        Agent, ConfigMap, Evaluator, McpServer, Model, ObjectMeta, Query, ResourceKind, Secret,
        Tool,
    };
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// Store double shared by the use-case tests
    #[derive(Default)]
    pub(crate) struct MemoryStore {
        secrets: RwLock<HashMap<(String, String), Secret>>,
        config_maps: RwLock<HashMap<(String, String), ConfigMap>>,
        evaluators: RwLock<HashMap<(String, String), Evaluator>>,
        models: RwLock<HashMap<(String, String), Model>>,
        tools: RwLock<HashMap<(String, String), Tool>>,
    }

    fn key(meta: &ObjectMeta) -> (String, String) {
        (meta.namespace.clone(), meta.name.clone())
    }

    impl MemoryStore {
        pub(crate) fn with_secret(self, secret: Secret) -> Self {
            self.secrets.write().unwrap().insert(key(&secret.metadata), secret);
            self
        }

        pub(crate) fn with_config_map(self, config_map: ConfigMap) -> Self {
            self.config_maps
                .write()
                .unwrap()
                .insert(key(&config_map.metadata), config_map);
            self
        }

        pub(crate) fn with_evaluator(self, evaluator: Evaluator) -> Self {
            self.evaluators
                .write()
                .unwrap()
                .insert(key(&evaluator.metadata), evaluator);
            self
        }

        pub(crate) fn with_model(self, model: Model) -> Self {
            self.models.write().unwrap().insert(key(&model.metadata), model);
            self
        }

        pub(crate) fn with_tool(self, tool: Tool) -> Self {
            self.tools.write().unwrap().insert(key(&tool.metadata), tool);
            self
        }
    }

    fn lookup<T: Clone>(
        map: &RwLock<HashMap<(String, String), T>>,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<T, StoreError> {
        map.read()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::not_found(kind, namespace, name))
    }

    #[async_trait]
    impl ResourceStore for MemoryStore {
        async fn get_tool(&self, namespace: &str, name: &str) -> Result<Tool, StoreError> {
            lookup(&self.tools, ResourceKind::Tool, namespace, name)
        }
        async fn get_secret(&self, namespace: &str, name: &str) -> Result<Secret, StoreError> {
            lookup(&self.secrets, ResourceKind::Secret, namespace, name)
        }
        async fn get_config_map(
            &self,
            namespace: &str,
            name: &str,
        ) -> Result<ConfigMap, StoreError> {
            lookup(&self.config_maps, ResourceKind::ConfigMap, namespace, name)
        }
        async fn get_evaluator(
            &self,
            namespace: &str,
            name: &str,
        ) -> Result<Evaluator, StoreError> {
            lookup(&self.evaluators, ResourceKind::Evaluator, namespace, name)
        }
        async fn get_model(&self, namespace: &str, name: &str) -> Result<Model, StoreError> {
            lookup(&self.models, ResourceKind::Model, namespace, name)
        }
        async fn get_agent(&self, namespace: &str, name: &str) -> Result<Agent, StoreError> {
            Err(StoreError::not_found(ResourceKind::Agent, namespace, name))
        }
        async fn get_query(&self, namespace: &str, name: &str) -> Result<Query, StoreError> {
            Err(StoreError::not_found(ResourceKind::Query, namespace, name))
        }
        async fn get_mcp_server(
            &self,
            namespace: &str,
            name: &str,
        ) -> Result<McpServer, StoreError> {
            Err(StoreError::not_found(ResourceKind::McpServer, namespace, name))
        }
    }

    fn resolver(store: MemoryStore) -> ValueSourceResolver {
        ValueSourceResolver::new(Arc::new(store))
    }

    fn store_with_token() -> MemoryStore {
        MemoryStore::default().with_secret(
            Secret::new(ObjectMeta::new("api-keys", "team-a")).with_entry("token", "s3cr3t"),
        )
    }

    #[tokio::test]
    async fn test_literal_header_wins() {
        let resolver = resolver(MemoryStore::default());
        let value = resolver
            .resolve_header_value(&HeaderValue::literal("Bearer abc"), "team-a")
            .await
            .unwrap();
        assert_eq!(value, "Bearer abc");
    }

    #[tokio::test]
    async fn test_secret_header() {
        let resolver = resolver(store_with_token());
        let value = resolver
            .resolve_header_value(&HeaderValue::secret("api-keys", "token"), "team-a")
            .await
            .unwrap();
        assert_eq!(value, "s3cr3t");
    }

    #[tokio::test]
    async fn test_header_without_any_source_fails() {
        let resolver = resolver(MemoryStore::default());
        let err = resolver
            .resolve_header_value(&HeaderValue::default(), "team-a")
            .await
            .unwrap_err();
        assert!(
            err.to_string()
                .contains("must specify either value or valueFrom.secretKeyRef")
        );
    }

    #[tokio::test]
    async fn test_missing_key_names_key_and_secret() {
        let resolver = resolver(store_with_token());
        let err = resolver
            .resolve_header_value(&HeaderValue::secret("api-keys", "password"), "team-a")
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("key password not found"), "{msg}");
        assert!(msg.contains("team-a/api-keys"), "{msg}");
    }

    #[tokio::test]
    async fn test_missing_secret_fails() {
        let resolver = resolver(MemoryStore::default());
        let err = resolver
            .resolve_header_value(&HeaderValue::secret("nope", "token"), "team-a")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to get secret team-a/nope"));
    }

    #[tokio::test]
    async fn test_empty_secret_reports_no_data() {
        let store =
            MemoryStore::default().with_secret(Secret::new(ObjectMeta::new("empty", "team-a")));
        let err = resolver(store)
            .resolve_header_value(&HeaderValue::secret("empty", "token"), "team-a")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("secret team-a/empty has no data"));
    }

    #[tokio::test]
    async fn test_resolve_headers_attaches_name() {
        let resolver = resolver(store_with_token());
        let headers = vec![
            Header::new("Authorization", HeaderValue::secret("api-keys", "token")),
            Header::new("X-Broken", HeaderValue::default()),
        ];
        let err = resolver.resolve_headers(&headers, "team-a").await.unwrap_err();
        assert!(err.to_string().contains("failed to resolve header X-Broken"));

        let resolved = resolver.resolve_headers(&headers[..1], "team-a").await.unwrap();
        assert_eq!(
            resolved,
            vec![("Authorization".to_string(), "s3cr3t".to_string())]
        );
    }

    #[tokio::test]
    async fn test_resolve_value_sources() {
        let store = store_with_token().with_config_map(
            ConfigMap::new(ObjectMeta::new("settings", "team-a")).with_entry("url", "http://x"),
        );
        let resolver = resolver(store);

        let literal = ValueSource::literal("http://evaluator:8080");
        assert_eq!(
            resolver.resolve(&literal, "team-a").await.unwrap(),
            "http://evaluator:8080"
        );

        let secret = ValueSource::from_ref(ValueFromSource::secret("api-keys", "token"));
        assert_eq!(resolver.resolve(&secret, "team-a").await.unwrap(), "s3cr3t");

        let config = ValueSource::from_ref(ValueFromSource::config_map("settings", "url"));
        assert_eq!(resolver.resolve(&config, "team-a").await.unwrap(), "http://x");

        let missing = ValueSource::from_ref(ValueFromSource::config_map("settings", "port"));
        assert!(resolver.resolve(&missing, "team-a").await.is_err());

        assert!(resolver.resolve(&ValueSource::default(), "team-a").await.is_err());
    }

    #[test]
    fn test_service_url() {
        let service = ServiceReference {
            name: "evaluator".into(),
            namespace: None,
            port: Some("8000".into()),
            path: Some("evaluate".into()),
        };
        assert_eq!(
            service_url(&service, "team-a"),
            "http://evaluator.team-a.svc.cluster.local:8000/evaluate"
        );

        let service = ServiceReference {
            name: "judge".into(),
            namespace: Some("shared".into()),
            port: None,
            path: None,
        };
        assert_eq!(
            service_url(&service, "team-a"),
            "http://judge.shared.svc.cluster.local"
        );
    }

    #[test]
    fn test_join_endpoint() {
        assert_eq!(join_endpoint("http://e:80", None), "http://e:80");
        assert_eq!(join_endpoint("http://e:80", Some("")), "http://e:80");
        assert_eq!(
            join_endpoint("http://e:80", Some("evaluate")),
            "http://e:80/evaluate"
        );
        assert_eq!(
            join_endpoint("http://e:80/", Some("evaluate")),
            "http://e:80/evaluate"
        );
    }
}
