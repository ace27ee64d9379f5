//! HTTP tool executor
//!
//! Each call re-reads the Tool resource, fills the URL and body templates
//! from the call's arguments, resolves headers and issues one request. No
//! retries: a failed attempt is final for that call.

use super::duration::timeout_or_default;
use super::template::{substitute_body, substitute_url};
use ark_application::config::HttpToolSettings;
use ark_application::ports::tool_executor::ToolExecutor;
use ark_application::use_cases::resolve_value::ValueSourceResolver;
use ark_domain::{CoreError, Tool, ToolCall, ToolOutcome, ToolResult};
use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::USER_AGENT;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Methods that carry a substituted body template
const BODY_METHODS: &[&str] = &["POST", "PUT", "PATCH"];

/// Executes the HTTP request declared by a Tool resource
pub struct HttpExecutor {
    tool_name: String,
    namespace: String,
    resolver: ValueSourceResolver,
    client: reqwest::Client,
    settings: HttpToolSettings,
}

impl HttpExecutor {
    pub fn new(
        tool_name: impl Into<String>,
        namespace: impl Into<String>,
        resolver: ValueSourceResolver,
        client: reqwest::Client,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            namespace: namespace.into(),
            resolver,
            client,
            settings: HttpToolSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: HttpToolSettings) -> Self {
        self.settings = settings;
        self
    }

    async fn run(
        &self,
        call: &ToolCall,
        result: ToolResult,
        cancel: &CancellationToken,
    ) -> ToolOutcome {
        let arguments = match call.try_arguments() {
            Ok(arguments) => arguments,
            Err(e) => {
                debug!(tool = %self.tool_name, error = %e, "Unparsable tool arguments, using none");
                Default::default()
            }
        };

        let tool = match self.resolver.store().get_tool(&self.namespace, &self.tool_name).await {
            Ok(tool) => tool,
            Err(e) => {
                let message = format!("failed to get tool {}: {}", self.tool_name, e);
                return ToolOutcome::failed(result.with_error(message), e.into());
            }
        };

        let Some(http) = tool.spec.http.as_ref() else {
            return ToolOutcome::failed(
                result.with_error("http spec is required"),
                CoreError::Configuration(format!("http spec is required for tool {}", self.tool_name)),
            );
        };
        if http.url.is_empty() {
            return ToolOutcome::failed(
                result.with_error("URL is required for http tool"),
                CoreError::Configuration(format!("URL is required for http tool {}", self.tool_name)),
            );
        }

        let method_name = http
            .method
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or("GET")
            .to_ascii_uppercase();
        let method = match Method::from_bytes(method_name.as_bytes()) {
            Ok(method) => method,
            Err(e) => {
                let message = format!("failed to create request: {e}");
                return ToolOutcome::failed(
                    result.with_error(message.clone()),
                    CoreError::Configuration(message),
                );
            }
        };

        let url = substitute_url(&http.url, &arguments);
        let body = http
            .body
            .as_deref()
            .filter(|b| !b.is_empty() && BODY_METHODS.contains(&method_name.as_str()))
            .map(|b| substitute_body(b, &arguments));

        let headers = match self.resolver.resolve_headers(&http.headers, &tool.metadata.namespace).await {
            Ok(headers) => headers,
            Err(e) => {
                let message = match &e {
                    CoreError::Resolution(msg) => msg.clone(),
                    other => other.to_string(),
                };
                return ToolOutcome::failed(result.with_error(message), e);
            }
        };

        let timeout = timeout_or_default(http.timeout.as_deref(), self.settings.default_timeout);

        let mut request = self
            .client
            .request(method, &url)
            .timeout(timeout)
            .header(USER_AGENT, &self.settings.user_agent);
        for (name, value) in &headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        info!(tool = %self.tool_name, method = %method_name, url = %url, timeout_ms = timeout.as_millis() as u64, "Calling HTTP tool");
        self.send(request, &url, result, cancel).await
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
        result: ToolResult,
        cancel: &CancellationToken,
    ) -> ToolOutcome {
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return cancelled(result),
            response = request.send() => response,
        };
        let response = match response {
            Ok(response) => response,
            Err(e) => {
                let message = format!("failed to fetch URL: {e}");
                warn!(tool = %self.tool_name, error = %e, "HTTP tool request failed");
                return ToolOutcome::failed(
                    result.with_error(message.clone()),
                    CoreError::Transport(message),
                );
            }
        };

        // The body is always drained; dropping `response` on any path
        // releases the connection.
        let status = response.status();
        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => return cancelled(result),
            body = response.text() => body,
        };
        let body = match body {
            Ok(body) => body,
            Err(e) => {
                let message = format!("failed to read response: {e}");
                return ToolOutcome::failed(
                    result.with_error(message.clone()),
                    CoreError::Transport(message),
                );
            }
        };

        if status.as_u16() >= 400 {
            let message = format!(
                "HTTP error {}: {} (URL: {})",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                url
            );
            warn!(tool = %self.tool_name, status = status.as_u16(), "HTTP tool returned an error status");
            return ToolOutcome::failed(
                result.with_content(body).with_error(message.clone()),
                CoreError::Protocol(message),
            );
        }

        debug!(tool = %self.tool_name, status = status.as_u16(), bytes = body.len(), "HTTP tool responded");
        ToolOutcome::completed(result.with_content(body))
    }
}

fn cancelled(result: ToolResult) -> ToolOutcome {
    ToolOutcome::failed(result, CoreError::Cancelled)
}

#[async_trait]
impl ToolExecutor for HttpExecutor {
    async fn execute(&self, call: &ToolCall, cancel: &CancellationToken) -> ToolOutcome {
        self.run(call, ToolResult::for_call(call), cancel).await
    }
}

/// Whether a Tool resource is served by [`HttpExecutor`]
pub fn is_http_tool(tool: &Tool) -> bool {
    tool.spec.tool_type == ark_domain::resource::TOOL_TYPE_HTTP
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use ark_domain::{Header, HeaderValue, HttpSpec, ObjectMeta, Secret, ToolSignal};
    use std::sync::Arc;
    use std::time::Duration;

    fn executor(store: InMemoryStore) -> HttpExecutor {
        HttpExecutor::new(
            "api",
            "default",
            ValueSourceResolver::new(Arc::new(store)),
            reqwest::Client::new(),
        )
    }

    fn http_tool(spec: HttpSpec) -> Tool {
        Tool::http(ObjectMeta::new("api", "default"), spec)
    }

    async fn call(executor: &HttpExecutor, args: &str) -> ToolOutcome {
        executor
            .execute(&ToolCall::new("call_1", "api", args), &CancellationToken::new())
            .await
    }

    #[tokio::test]
    async fn test_url_placeholders_are_encoded() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/items/a%20b")
            .with_status(200)
            .with_body("found")
            .create_async()
            .await;

        let store = InMemoryStore::new().with(http_tool(HttpSpec::new(format!(
            "{}/items/{{id}}",
            server.url()
        ))));
        let outcome = call(&executor(store), r#"{"id": "a b"}"#).await;

        mock.assert_async().await;
        assert_eq!(outcome.result.content, "found");
        assert!(outcome.signal.is_none());
        assert_eq!(outcome.result.id, "call_1");
    }

    #[tokio::test]
    async fn test_post_body_is_raw() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/echo")
            .match_body("name=a b")
            .with_status(201)
            .with_body("created")
            .create_async()
            .await;

        let spec = HttpSpec::new(format!("{}/echo", server.url()))
            .with_method("post")
            .with_body("name={id}");
        let store = InMemoryStore::new().with(http_tool(spec));
        let outcome = call(&executor(store), r#"{"id": "a b"}"#).await;

        mock.assert_async().await;
        assert_eq!(outcome.result.content, "created");
        assert!(outcome.error().is_none());
    }

    #[tokio::test]
    async fn test_get_ignores_body_template() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/ping")
            .match_body("")
            .with_body("pong")
            .create_async()
            .await;

        let spec = HttpSpec::new(format!("{}/ping", server.url())).with_body("{id}");
        let store = InMemoryStore::new().with(http_tool(spec));
        let outcome = call(&executor(store), r#"{"id": "x"}"#).await;

        mock.assert_async().await;
        assert_eq!(outcome.result.content, "pong");
    }

    #[tokio::test]
    async fn test_error_status_keeps_body() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/items/7")
            .with_status(404)
            .with_body(r#"{"detail": "no such item"}"#)
            .create_async()
            .await;

        let url = format!("{}/items/{{id}}", server.url());
        let store = InMemoryStore::new().with(http_tool(HttpSpec::new(url)));
        let outcome = call(&executor(store), r#"{"id": 7}"#).await;

        let final_url = format!("{}/items/7", server.url());
        assert_eq!(outcome.result.content, r#"{"detail": "no such item"}"#);
        let error = outcome.result.error.clone().unwrap();
        assert!(error.contains("404"), "{error}");
        assert!(error.contains("Not Found"), "{error}");
        assert!(error.contains(&final_url), "{error}");
        assert!(matches!(outcome.error(), Some(CoreError::Protocol(_))));
    }

    #[tokio::test]
    async fn test_malformed_arguments_do_not_abort() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("GET", "/ping").with_body("pong").create_async().await;

        let store =
            InMemoryStore::new().with(http_tool(HttpSpec::new(format!("{}/ping", server.url()))));
        let outcome = call(&executor(store), "{{{ not json").await;

        mock.assert_async().await;
        assert_eq!(outcome.result.content, "pong");
        assert!(outcome.signal.is_none());
    }

    #[tokio::test]
    async fn test_secret_header_is_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/private")
            .match_header("authorization", "Bearer s3cr3t")
            .match_header("x-team", "platform")
            .with_body("ok")
            .create_async()
            .await;

        let spec = HttpSpec::new(format!("{}/private", server.url()))
            .with_header(Header::new("Authorization", HeaderValue::secret("api", "token")))
            .with_header(Header::new("X-Team", HeaderValue::literal("platform")));
        let store = InMemoryStore::new()
            .with(http_tool(spec))
            .with(Secret::new(ObjectMeta::new("api", "default")).with_entry("token", "Bearer s3cr3t"));
        let outcome = call(&executor(store), "{}").await;

        mock.assert_async().await;
        assert_eq!(outcome.result.content, "ok");
    }

    #[tokio::test]
    async fn test_header_failure_aborts_before_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("GET", "/private").expect(0).create_async().await;

        let spec = HttpSpec::new(format!("{}/private", server.url()))
            .with_header(Header::new("Authorization", HeaderValue::secret("api", "token")));
        let store = InMemoryStore::new().with(http_tool(spec));
        let outcome = call(&executor(store), "{}").await;

        mock.assert_async().await;
        let error = outcome.result.error.clone().unwrap();
        assert!(error.starts_with("failed to resolve header Authorization"), "{error}");
        assert!(matches!(outcome.signal, Some(ToolSignal::Failed(CoreError::Resolution(_)))));
    }

    #[tokio::test]
    async fn test_missing_tool_is_not_found() {
        let outcome = call(&executor(InMemoryStore::new()), "{}").await;
        assert!(outcome.result.error.clone().unwrap().starts_with("failed to get tool api"));
        assert!(matches!(outcome.error(), Some(CoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_missing_http_spec_or_url() {
        let mut tool = http_tool(HttpSpec::new(""));
        let store = InMemoryStore::new().with(tool.clone());
        let outcome = call(&executor(store), "{}").await;
        assert_eq!(outcome.result.error.as_deref(), Some("URL is required for http tool"));
        assert!(matches!(outcome.error(), Some(CoreError::Configuration(_))));

        tool.spec.http = None;
        let store = InMemoryStore::new().with(tool);
        let outcome = call(&executor(store), "{}").await;
        assert_eq!(outcome.result.error.as_deref(), Some("http spec is required"));
    }

    #[tokio::test]
    async fn test_declared_timeout_is_enforced() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // accept and never answer
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let spec = HttpSpec::new(format!("http://{addr}/slow")).with_timeout("200ms");
        let store = InMemoryStore::new().with(http_tool(spec));
        let started = std::time::Instant::now();
        let outcome = call(&executor(store), "{}").await;

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(outcome.result.error.clone().unwrap().starts_with("failed to fetch URL"));
        assert!(matches!(outcome.error(), Some(CoreError::Transport(_))));
    }

    #[tokio::test]
    async fn test_cancellation() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let spec = HttpSpec::new(format!("http://{addr}/slow"));
        let store = InMemoryStore::new().with(http_tool(spec));
        let executor = executor(store);
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let outcome = executor
            .execute(&ToolCall::new("call_1", "api", "{}"), &cancel)
            .await;
        assert_eq!(outcome.error(), Some(&CoreError::Cancelled));
        assert_eq!(outcome.result.error.as_deref(), Some("operation cancelled"));
    }
}
