//! Blurt JSON-RPC client implementation
//!
//! Sends JSON-RPC 2.0 envelopes over HTTP POST. A request that fails at the
//! transport level (connection error or non-success status) is sent once more,
//! unchanged, through the relay endpoint.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use urlencoding::encode;

use crate::config::Config;
use crate::domain::ports::RemoteFeedApi;
use crate::error::RpcError;

/// Implementation of the remote feed API over HTTP
pub struct JsonRpcClient {
    http: Client,
    endpoint: String,
    relay_url: Option<String>,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    /// `timeout` of `None` leaves requests unbounded
    pub fn new(
        endpoint: &str,
        relay_prefix: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self, RpcError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        let relay_url = relay_prefix.map(|prefix| format!("{}{}", prefix, encode(&endpoint)));

        Ok(Self {
            http,
            endpoint,
            relay_url,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, RpcError> {
        Self::new(
            &config.api_url,
            config.relay_url.as_deref(),
            config.rpc_timeout,
        )
    }

    #[cfg(test)]
    pub fn relay_url(&self) -> Option<&str> {
        self.relay_url.as_deref()
    }

    async fn post(&self, url: &str, request: &RpcRequest<'_>) -> Result<String, RpcError> {
        let response = self.http.post(url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RpcError::Transport {
                status: Some(status.as_u16()),
                message: format!("API request failed with status {}: {}", status, body),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl RemoteFeedApi for JsonRpcClient {
    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };

        tracing::debug!(method, id = request.id, "Calling Blurt API");

        let body = match self.post(&self.endpoint, &request).await {
            Ok(body) => body,
            Err(primary) => {
                let Some(relay) = &self.relay_url else {
                    tracing::error!("API call failed ({}): {}", method, primary);
                    return Err(primary);
                };

                tracing::warn!("Direct API call failed ({}): {}, retrying via relay", method, primary);
                self.post(relay, &request).await.inspect_err(|e| {
                    tracing::error!("API call failed ({}): {}", method, e);
                })?
            }
        };

        parse_envelope(method, &body)
    }
}

fn parse_envelope(method: &str, body: &str) -> Result<Value, RpcError> {
    let envelope: RpcResponse = serde_json::from_str(body)
        .map_err(|e| RpcError::MalformedResponse(format!("{}: {}", method, e)))?;

    if let Some(error) = envelope.error {
        return Err(RpcError::Rpc {
            code: error.code,
            message: error.message,
        });
    }

    envelope
        .result
        .ok_or_else(|| RpcError::MalformedResponse(format!("{}: missing result", method)))
}

// --- Wire Types ---

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Value,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}
