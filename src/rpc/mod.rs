//! JSON-RPC service
//!
//! Serves the read-only `eth_*` methods wallets probe when talking to a
//! contract, plus `net_version` and `web3_clientVersion`, over HTTP POST at
//! `/rpc`. `eth_call` is routed through the ERC-721 [`Dispatcher`].

pub mod api;
pub mod middleware;
pub mod types;

pub use api::{EthApiServer, NetApiServer, Web3ApiServer};
pub use middleware::RpcPathLayer;
pub use types::{Block, CallRequest};

use crate::constants::CLIENT_VERSION;
use crate::erc721::Dispatcher;
use alloy_primitives::{Address, Bytes, U256, U64};
use jsonrpsee::core::RpcResult;
use jsonrpsee::server::{RpcModule, Server, ServerConfig, ServerHandle};
use jsonrpsee::types::error::{ErrorObjectOwned, INVALID_PARAMS_CODE};
use std::net::SocketAddr;
use tracing::{debug, info};

/// Implementation of the `eth_*`, `net_*` and `web3_*` namespaces.
#[derive(Clone)]
pub struct GatewayRpc {
    dispatcher: Dispatcher,
}

impl GatewayRpc {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Merge every namespace into one module.
    pub fn into_module(self) -> eyre::Result<RpcModule<()>> {
        let mut module = RpcModule::new(());
        module.merge(EthApiServer::into_rpc(self.clone()))?;
        module.merge(NetApiServer::into_rpc(self.clone()))?;
        module.merge(Web3ApiServer::into_rpc(self))?;
        Ok(module)
    }
}

#[async_trait::async_trait]
impl EthApiServer for GatewayRpc {
    async fn chain_id(&self) -> RpcResult<U64> {
        Ok(U64::from(self.dispatcher.config().chain_id))
    }

    async fn block_number(&self) -> RpcResult<U64> {
        Ok(U64::ZERO)
    }

    async fn block_by_number(
        &self,
        tag: String,
        _full_transactions: Option<bool>,
    ) -> RpcResult<Block> {
        let number = types::resolve_block_tag(&tag).ok_or_else(|| {
            ErrorObjectOwned::owned(
                INVALID_PARAMS_CODE,
                format!("invalid block tag {tag:?}"),
                None::<()>,
            )
        })?;
        Ok(Block::empty(number))
    }

    async fn call(&self, request: CallRequest, _tag: Option<String>) -> RpcResult<Bytes> {
        let data = request.calldata();
        match self.dispatcher.dispatch(request.to, data).await {
            Ok(output) => Ok(output),
            Err(err) => {
                debug!(target: "rpc::eth", to = %request.to, data, %err, "eth_call rejected");
                Err(err.into())
            }
        }
    }

    async fn balance(&self, _address: Address, _tag: Option<String>) -> RpcResult<U256> {
        Ok(U256::ZERO)
    }

    async fn code(&self, _address: Address, _tag: Option<String>) -> RpcResult<Bytes> {
        Ok(Bytes::new())
    }
}

#[async_trait::async_trait]
impl NetApiServer for GatewayRpc {
    async fn version(&self) -> RpcResult<String> {
        Ok(self.dispatcher.config().chain_id.to_string())
    }
}

#[async_trait::async_trait]
impl Web3ApiServer for GatewayRpc {
    async fn client_version(&self) -> RpcResult<String> {
        Ok(CLIENT_VERSION.to_string())
    }
}

/// Bind the HTTP server and start serving `rpc` at `/rpc`.
///
/// Returns the bound address (useful when `addr` uses port 0) and the handle
/// used to stop the server.
pub async fn start_server(
    addr: SocketAddr,
    rpc: GatewayRpc,
    max_connections: u32,
) -> eyre::Result<(SocketAddr, ServerHandle)> {
    let config = ServerConfig::builder().max_connections(max_connections).build();
    let http_middleware = tower::ServiceBuilder::new().layer(RpcPathLayer::default());

    let server = Server::builder()
        .set_config(config)
        .set_http_middleware(http_middleware)
        .build(addr)
        .await?;
    let local_addr = server.local_addr()?;
    let handle = server.start(rpc.into_module()?);
    info!(target: "rpc", %local_addr, "JSON-RPC server listening");
    Ok((local_addr, handle))
}
