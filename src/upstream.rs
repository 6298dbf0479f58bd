//! Upstream Ethereum node client
//!
//! `ownerOf` and `tokenURI`/`uri` are answered by forwarding the original
//! calldata to a backing node with `eth_call`. The trait keeps the dispatcher
//! independent of the transport; [`JsonRpcUpstream`] is the production
//! implementation on top of the jsonrpsee HTTP client.

use alloy_primitives::Address;
use async_trait::async_trait;
use jsonrpsee::core::client::{ClientT, Error as ClientError};
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use jsonrpsee::types::ErrorObjectOwned;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Failure talking to the upstream node.
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    /// The node answered with a JSON-RPC error object
    #[error("node returned error {}: {}", .0.code(), .0.message())]
    Rpc(ErrorObjectOwned),

    /// The node could not be reached or its reply could not be read
    #[error("transport error: {0}")]
    Transport(String),

    /// No reply within the deadline
    #[error("no reply within {timeout:?}")]
    Timeout {
        /// The deadline that expired
        timeout: Duration,
    },
}

impl From<ClientError> for UpstreamError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Call(obj) => Self::Rpc(obj),
            other => Self::Transport(other.to_string()),
        }
    }
}

/// Sends read-only contract calls to a backing Ethereum node.
///
/// Implementations must be safe to share across concurrently running requests.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// `eth_call` against `to` at `latest`, returning the raw hex result.
    async fn eth_call(&self, to: Address, data: &str) -> Result<String, UpstreamError>;
}

/// [`UpstreamClient`] over JSON-RPC/HTTP.
///
/// The underlying client pools connections and is `Send + Sync`, so one
/// instance serves every request.
#[derive(Debug)]
pub struct JsonRpcUpstream {
    timeout: Duration,
    client: HttpClient,
}

impl JsonRpcUpstream {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = HttpClientBuilder::default()
            .request_timeout(timeout)
            .build(endpoint.as_str())
            .map_err(UpstreamError::from)?;
        Ok(Self { timeout, client })
    }
}

#[async_trait]
impl UpstreamClient for JsonRpcUpstream {
    async fn eth_call(&self, to: Address, data: &str) -> Result<String, UpstreamError> {
        let tx = json!({ "to": to, "data": data });
        self.client
            .request::<String, _>("eth_call", rpc_params![tx, "latest"])
            .await
            .map_err(|err| match err {
                ClientError::RequestTimeout => UpstreamError::Timeout { timeout: self.timeout },
                other => other.into(),
            })
    }
}
