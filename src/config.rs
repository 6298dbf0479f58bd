//! Service configuration, fixed at process start.

use alloy_primitives::Address;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Invalid configuration value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid chain id {0:?}: expected a decimal or 0x-prefixed hex integer")]
    InvalidChainId(String),

    #[error("upstream URL {0} must use http or https")]
    UnsupportedScheme(Url),

    #[error("upstream timeout must be greater than zero")]
    ZeroTimeout,
}

/// Parse a chain id given as decimal (`1337`) or hex (`0x539`).
pub fn parse_chain_id(text: &str) -> Result<u64, ConfigError> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(digits) => u64::from_str_radix(digits, 16),
        None => text.parse(),
    };
    parsed.map_err(|_| ConfigError::InvalidChainId(text.to_string()))
}

/// Immutable gateway configuration, shared by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Chain id reported by `eth_chainId`
    pub chain_id: u64,
    /// The one contract address this gateway answers for
    pub contract_address: Address,
    /// Backing Ethereum JSON-RPC endpoint
    pub upstream_endpoint: Url,
    /// Address used as `to` when forwarding calls upstream
    pub upstream_contract: Address,
    /// Deadline for each upstream call
    pub upstream_timeout: Duration,
}

impl ServiceConfig {
    /// Build a validated configuration. `upstream_contract` defaults to
    /// `contract_address`.
    pub fn new(
        chain_id: u64,
        contract_address: Address,
        upstream_endpoint: Url,
        upstream_contract: Option<Address>,
        upstream_timeout: Duration,
    ) -> Result<Self, ConfigError> {
        if !matches!(upstream_endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(upstream_endpoint));
        }
        if upstream_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Self {
            chain_id,
            contract_address,
            upstream_endpoint,
            upstream_contract: upstream_contract.unwrap_or(contract_address),
            upstream_timeout,
        })
    }
}
