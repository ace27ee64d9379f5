//! Lazily connected, shared MCP clients
//!
//! Keyed by an opaque string (the executor uses `namespace/name@address`).
//! Each key owns a `tokio::sync::OnceCell`, so concurrent first callers
//! wait on a single handshake. A failed handshake leaves the cell empty and
//! the next caller retries.

use super::client::McpClient;
use super::error::Result;
use ark_application::config::McpSettings;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;
use tracing::debug;

type Slot = Arc<OnceCell<Arc<McpClient>>>;

pub struct McpClientPool {
    http: reqwest::Client,
    settings: McpSettings,
    clients: Mutex<HashMap<String, Slot>>,
}

impl McpClientPool {
    pub fn new(http: reqwest::Client, settings: McpSettings) -> Self {
        Self {
            http,
            settings,
            clients: Mutex::new(HashMap::new()),
        }
    }

    pub fn settings(&self) -> &McpSettings {
        &self.settings
    }

    /// Return the client for `key`, connecting to `address` on first use
    pub async fn get_or_connect(
        &self,
        key: &str,
        address: &str,
        headers: Vec<(String, String)>,
        cancel: &CancellationToken,
    ) -> Result<Arc<McpClient>> {
        let slot = self.slot(key);
        let client = slot
            .get_or_try_init(|| async move {
                debug!(key = %key, address = %address, "Connecting MCP client");
                McpClient::connect(
                    self.http.clone(),
                    address,
                    headers,
                    &self.settings.client_name,
                    self.settings.request_timeout,
                    cancel,
                )
                .await
                .map(Arc::new)
            })
            .await?;
        Ok(client.clone())
    }

    fn slot(&self, key: &str) -> Slot {
        let mut clients = self.clients.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        clients.entry(key.to_string()).or_default().clone()
    }

    /// Number of keys seen so far, connected or not
    pub fn len(&self) -> usize {
        self.clients.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when a client for `key` finished its handshake
    pub fn is_connected(&self, key: &str) -> bool {
        self.clients
            .lock()
            .ok()
            .and_then(|c| c.get(key).map(|slot| slot.initialized()))
            .unwrap_or(false)
    }

    /// Drop every client; later calls reconnect
    pub fn clear(&self) {
        if let Ok(mut clients) = self.clients.lock() {
            clients.clear();
        }
    }
}
