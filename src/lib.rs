//! # ERC-721 Gateway
//!
//! A JSON-RPC server that answers the read side of a single ERC-721 contract
//! on behalf of an off-chain asset authority, so wallets and dApps can query
//! it as if it were deployed on chain. Calldata is decoded per the Ethereum
//! contract ABI, dispatched by selector, and answered either with fixed
//! metadata or by forwarding to an upstream node.

pub mod abi;
pub mod cli;
pub mod config;
pub mod constants;
pub mod encoding;
pub mod erc721;
pub mod errors;
pub mod output;
pub mod rpc;
pub mod upstream;
