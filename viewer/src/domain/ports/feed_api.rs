//! Remote feed API port
//!
//! The JSON-RPC call abstraction the controller and services depend on.
//! Implementations return the `result` member of the response envelope.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::RpcError;

#[async_trait]
pub trait RemoteFeedApi: Send + Sync {
    /// Invoke `method` with positional `params`.
    ///
    /// A response without a `result` member is a `MalformedResponse`.
    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError>;
}

/// Decode a `result` value into a typed record, treating shape mismatches
/// as a malformed response.
pub fn decode_result<T: DeserializeOwned>(method: &str, result: Value) -> Result<T, RpcError> {
    serde_json::from_value(result)
        .map_err(|e| RpcError::MalformedResponse(format!("{}: {}", method, e)))
}
