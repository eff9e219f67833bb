//! JSON-RPC `eth_call` reader for the home chain.

use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{host::ChainReader, CheckoutError};

/// Reads contracts over HTTP JSON-RPC.
pub struct RpcChainReader {
    client: Client,
    rpc_url: String,
}

impl RpcChainReader {
    /// Create a reader for `rpc_url`. WebSocket URLs are mapped to their HTTP form.
    pub fn new(rpc_url: &str) -> Self {
        let rpc_url = rpc_url.replace("wss://", "https://").replace("ws://", "http://");
        Self { client: Client::new(), rpc_url }
    }

    #[inline]
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

#[async_trait]
impl ChainReader for RpcChainReader {
    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes, CheckoutError> {
        let req = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [{ "to": to, "data": input }, "latest"]
        });

        let resp = self.client.post(&self.rpc_url).json(&req).send().await?;
        let json: Value = resp.json().await?;

        parse_call_result(&json)
    }
}

/// Pull the returned bytes out of an `eth_call` response body.
pub(crate) fn parse_call_result(json: &Value) -> Result<Bytes, CheckoutError> {
    if let Some(err) = json.get("error") {
        let message = err.get("message").and_then(|m| m.as_str()).map(str::to_string);
        return Err(CheckoutError::Rpc(message.unwrap_or_else(|| err.to_string())));
    }

    json.get("result")
        .and_then(|r| r.as_str())
        .ok_or_else(|| CheckoutError::Rpc("No result in response".to_string()))?
        .parse::<Bytes>()
        .map_err(|e| CheckoutError::Rpc(format!("invalid result hex: {e}")))
}
