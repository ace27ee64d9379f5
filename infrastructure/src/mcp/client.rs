//! Streamable-HTTP MCP client
//!
//! One [`McpClient`] owns one initialized session. Every message is a POST
//! to the server address; the server may answer with a JSON body or a
//! single server-sent event carrying the JSON-RPC response.

use super::error::{McpError, Result};
use super::protocol::{
    CallToolParams, CallToolResult, InitializeParams, JsonRpcNotification, JsonRpcRequest,
    JsonRpcResponse, SESSION_HEADER, first_event_data,
};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const ACCEPT_BOTH: &str = "application/json, text/event-stream";

/// An initialized session with one MCP server
#[derive(Debug)]
pub struct McpClient {
    http: reqwest::Client,
    address: String,
    headers: Vec<(String, String)>,
    session_id: Option<String>,
    timeout: Duration,
}

impl McpClient {
    /// Connect and perform the `initialize` handshake.
    ///
    /// The server's `Mcp-Session-Id` (if any) is captured and sent with
    /// every later message, then `notifications/initialized` is posted.
    pub async fn connect(
        http: reqwest::Client,
        address: impl Into<String>,
        headers: Vec<(String, String)>,
        client_name: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<Self> {
        let mut client = Self {
            http,
            address: address.into(),
            headers,
            session_id: None,
            timeout,
        };

        let params = serde_json::to_value(InitializeParams::new(client_name))?;
        let request = JsonRpcRequest::new("initialize", Some(params));
        let (response, session_id) = client.post(&request, cancel).await?;
        let result = into_result(response)?;
        client.session_id = session_id;

        let server = result
            .get("serverInfo")
            .and_then(|info| info.get("name"))
            .and_then(|name| name.as_str())
            .unwrap_or("unknown");
        info!(address = %client.address, server = %server, session = client.session_id.is_some(), "MCP session initialized");

        client
            .notify(&JsonRpcNotification::new("notifications/initialized"), cancel)
            .await?;
        Ok(client)
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Invoke a tool exposed by the server
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Map<String, serde_json::Value>,
        cancel: &CancellationToken,
    ) -> Result<CallToolResult> {
        let params = serde_json::to_value(CallToolParams {
            name: name.to_string(),
            arguments,
        })?;
        let request = JsonRpcRequest::new("tools/call", Some(params));
        debug!(address = %self.address, tool = %name, id = request.id, "MCP tools/call");

        let (response, _) = self.post(&request, cancel).await?;
        let result = into_result(response)?;
        serde_json::from_value(result.clone()).map_err(|e| McpError::ParseError {
            error: e.to_string(),
            raw: result.to_string(),
        })
    }

    fn request(&self, body: &impl Serialize) -> reqwest::RequestBuilder {
        let mut request = self
            .http
            .post(&self.address)
            .timeout(self.timeout)
            .header(ACCEPT, ACCEPT_BOTH)
            .json(body);
        if let Some(session_id) = &self.session_id {
            request = request.header(SESSION_HEADER, session_id);
        }
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        request
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<reqwest::Response> {
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(McpError::Cancelled),
            response = request.send() => response?,
        };
        let status = response.status();
        if !status.is_success() {
            return Err(McpError::HttpStatus {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn post(
        &self,
        request: &JsonRpcRequest,
        cancel: &CancellationToken,
    ) -> Result<(JsonRpcResponse, Option<String>)> {
        let response = self.send(self.request(request), cancel).await?;

        let session_id = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let is_event_stream = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("text/event-stream"));

        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(McpError::Cancelled),
            body = response.text() => body?,
        };

        let payload = if is_event_stream {
            first_event_data(&body).ok_or_else(|| McpError::ParseError {
                error: "event stream carried no data".to_string(),
                raw: body.clone(),
            })?
        } else {
            body
        };

        let response: JsonRpcResponse =
            serde_json::from_str(&payload).map_err(|e| McpError::ParseError {
                error: e.to_string(),
                raw: payload.clone(),
            })?;
        if let Some(id) = &response.id
            && id.as_u64() != Some(request.id)
        {
            return Err(McpError::UnexpectedResponse(format!(
                "expected id {}, got {}",
                request.id, id
            )));
        }
        Ok((response, session_id))
    }

    async fn notify(&self, notification: &JsonRpcNotification, cancel: &CancellationToken) -> Result<()> {
        self.send(self.request(notification), cancel).await?;
        Ok(())
    }
}

fn into_result(response: JsonRpcResponse) -> Result<serde_json::Value> {
    if let Some(error) = response.error {
        return Err(McpError::RpcError {
            code: error.code,
            message: error.message,
        });
    }
    response
        .result
        .ok_or_else(|| McpError::UnexpectedResponse("response has neither result nor error".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    async fn mock_initialize(server: &mut mockito::ServerGuard) -> mockito::Mock {
        server
            .mock("POST", "/mcp")
            .match_body(Matcher::PartialJson(json!({"method": "initialize"})))
            .with_header("content-type", "application/json")
            .with_header("mcp-session-id", "sess-1")
            .with_body(
                json!({"jsonrpc": "2.0", "result": {"serverInfo": {"name": "weather"}}}).to_string(),
            )
            .create_async()
            .await
    }

    async fn mock_initialized(server: &mut mockito::ServerGuard) -> mockito::Mock {
        server
            .mock("POST", "/mcp")
            .match_header("mcp-session-id", "sess-1")
            .match_body(Matcher::PartialJson(json!({"method": "notifications/initialized"})))
            .with_status(202)
            .create_async()
            .await
    }

    async fn connect(server: &mockito::ServerGuard) -> Result<McpClient> {
        McpClient::connect(
            reqwest::Client::new(),
            format!("{}/mcp", server.url()),
            vec![("x-api-key".to_string(), "k".to_string())],
            "ark-runtime",
            Duration::from_secs(5),
            &CancellationToken::new(),
        )
        .await
    }

    #[tokio::test]
    async fn test_handshake_captures_session() {
        let mut server = mockito::Server::new_async().await;
        let init = mock_initialize(&mut server).await;
        let initialized = mock_initialized(&mut server).await;

        let client = connect(&server).await.unwrap();

        init.assert_async().await;
        initialized.assert_async().await;
        assert_eq!(client.session_id(), Some("sess-1"));
        assert!(client.address().ends_with("/mcp"));
    }

    #[tokio::test]
    async fn test_call_tool_json_reply() {
        let mut server = mockito::Server::new_async().await;
        let _init = mock_initialize(&mut server).await;
        let _initialized = mock_initialized(&mut server).await;
        let call = server
            .mock("POST", "/mcp")
            .match_header("mcp-session-id", "sess-1")
            .match_header("x-api-key", "k")
            .match_body(Matcher::PartialJson(json!({
                "method": "tools/call",
                "params": {"name": "forecast", "arguments": {"city": "Oslo"}}
            })))
            .with_header("content-type", "application/json")
            .with_body(
                json!({"jsonrpc": "2.0", "result": {"content": [{"type": "text", "text": "rain"}]}})
                    .to_string(),
            )
            .create_async()
            .await;

        let client = connect(&server).await.unwrap();
        let mut arguments = serde_json::Map::new();
        arguments.insert("city".into(), json!("Oslo"));
        let result = client
            .call_tool("forecast", arguments, &CancellationToken::new())
            .await
            .unwrap();

        call.assert_async().await;
        assert_eq!(result.text(), "rain");
        assert!(!result.is_error);
    }

    #[tokio::test]
    async fn test_call_tool_event_stream_reply() {
        let mut server = mockito::Server::new_async().await;
        let _init = mock_initialize(&mut server).await;
        let _initialized = mock_initialized(&mut server).await;
        let event = json!({"jsonrpc": "2.0", "result": {"content": [{"type": "text", "text": "sunny"}], "isError": false}});
        let _call = server
            .mock("POST", "/mcp")
            .match_body(Matcher::PartialJson(json!({"method": "tools/call"})))
            .with_header("content-type", "text/event-stream")
            .with_body(format!("event: message\ndata: {event}\n\n"))
            .create_async()
            .await;

        let client = connect(&server).await.unwrap();
        let result = client
            .call_tool("forecast", serde_json::Map::new(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(result.text(), "sunny");
    }

    #[tokio::test]
    async fn test_rpc_error_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let _init = mock_initialize(&mut server).await;
        let _initialized = mock_initialized(&mut server).await;
        let _call = server
            .mock("POST", "/mcp")
            .match_body(Matcher::PartialJson(json!({"method": "tools/call"})))
            .with_header("content-type", "application/json")
            .with_body(
                json!({"jsonrpc": "2.0", "error": {"code": -32602, "message": "unknown tool"}})
                    .to_string(),
            )
            .create_async()
            .await;

        let client = connect(&server).await.unwrap();
        let err = client
            .call_tool("missing", serde_json::Map::new(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "JSON-RPC error (code -32602): unknown tool");
    }

    #[tokio::test]
    async fn test_http_status_fails_handshake() {
        let mut server = mockito::Server::new_async().await;
        let _m = server.mock("POST", "/mcp").with_status(503).create_async().await;

        let err = connect(&server).await.unwrap_err();
        assert!(matches!(err, McpError::HttpStatus { status: 503 }));
    }

    #[tokio::test]
    async fn test_cancelled_before_send() {
        let server = mockito::Server::new_async().await;
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = McpClient::connect(
            reqwest::Client::new(),
            format!("{}/mcp", server.url()),
            Vec::new(),
            "ark-runtime",
            Duration::from_secs(5),
            &cancel,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, McpError::Cancelled));
    }
}
