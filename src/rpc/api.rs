use alloy_primitives::{Address, Bytes, U256, U64};
use jsonrpsee::{core::RpcResult, proc_macros::rpc};

use super::types::{Block, CallRequest};

/// The read-only `eth_*` surface wallets need to talk to the contract.
#[rpc(server, namespace = "eth")]
pub trait EthApi {
    /// Returns the configured chain id.
    #[method(name = "chainId")]
    async fn chain_id(&self) -> RpcResult<U64>;

    /// Always `0x0`.
    #[method(name = "blockNumber")]
    async fn block_number(&self) -> RpcResult<U64>;

    /// Returns an empty block.
    #[method(name = "getBlockByNumber")]
    async fn block_by_number(&self, tag: String, full_transactions: Option<bool>)
        -> RpcResult<Block>;

    /// Executes an ERC-721 read call against the configured contract.
    #[method(name = "call")]
    async fn call(&self, request: CallRequest, tag: Option<String>) -> RpcResult<Bytes>;

    /// Always `0x0`.
    #[method(name = "getBalance")]
    async fn balance(&self, address: Address, tag: Option<String>) -> RpcResult<U256>;

    /// Always empty.
    #[method(name = "getCode")]
    async fn code(&self, address: Address, tag: Option<String>) -> RpcResult<Bytes>;
}

/// `net_*` namespace.
#[rpc(server, namespace = "net")]
pub trait NetApi {
    /// Chain id as a decimal string.
    #[method(name = "version")]
    async fn version(&self) -> RpcResult<String>;
}

/// `web3_*` namespace.
#[rpc(server, namespace = "web3")]
pub trait Web3Api {
    #[method(name = "clientVersion")]
    async fn client_version(&self) -> RpcResult<String>;
}
