use crate::config::{parse_chain_id, ConfigError, ServiceConfig};
use crate::constants::{DEFAULT_LISTEN_ADDR, DEFAULT_UPSTREAM_TIMEOUT_MS};
use alloy_primitives::Address;
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

/// CLI arguments for the gateway
#[derive(Parser, Debug)]
#[command(name = "erc721-gateway", about = "ERC-721 JSON-RPC gateway", version)]
pub struct Cli {
    /// Chain ID reported to clients (decimal or 0x-prefixed hex)
    #[arg(long, env = "CHAIN_ID", value_parser = parse_chain_id)]
    pub chain_id: u64,

    /// Address of the ERC-721 contract this gateway answers for
    #[arg(long, env = "CONTRACT_ADDRESS")]
    pub contract_address: Address,

    /// Upstream Ethereum JSON-RPC endpoint for ownerOf / tokenURI
    #[arg(long, env = "UPSTREAM_URL")]
    pub upstream_url: Url,

    /// Address used as `to` on upstream calls.
    /// Defaults to --contract-address.
    #[arg(long, env = "UPSTREAM_CONTRACT")]
    pub upstream_contract: Option<Address>,

    /// Deadline for each upstream call in milliseconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_MS", default_value_t = DEFAULT_UPSTREAM_TIMEOUT_MS)]
    pub upstream_timeout_ms: u64,

    /// HTTP listen address; JSON-RPC is served at /rpc
    #[arg(long, env = "LISTEN_ADDR", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Maximum number of concurrent RPC connections.
    #[arg(long, env = "RPC_MAX_CONNECTIONS", default_value = "500")]
    pub rpc_max_connections: u32,

    /// Enable structured JSON logging instead of human-readable output.
    ///
    /// Useful for log aggregation systems (ELK, Loki, Datadog, etc.).
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

impl Cli {
    /// Validate the arguments into the immutable service configuration.
    pub fn to_config(&self) -> Result<ServiceConfig, ConfigError> {
        ServiceConfig::new(
            self.chain_id,
            self.contract_address,
            self.upstream_url.clone(),
            self.upstream_contract,
            Duration::from_millis(self.upstream_timeout_ms),
        )
    }
}
