/// ERC-721 Metadata interface id (`name() ^ symbol() ^ tokenURI(uint256)`)
pub const ERC721_METADATA_INTERFACE_ID: [u8; 4] = [0x5b, 0x5e, 0x13, 0x9f];
/// Value returned by `name()`
pub const TOKEN_NAME: &str = "Living Assets";
/// Value returned by `symbol()`
pub const TOKEN_SYMBOL: &str = "LA";
/// Value returned by `contractURI()`
pub const CONTRACT_URI: &str = "https://livingassets.io/contractUri";
/// Value returned by `decimals()`
pub const TOKEN_DECIMALS: u8 = 0;
/// Stubbed `balanceOf(address)` answer; per-owner balances are not tracked
pub const STUB_BALANCE: u64 = 1_000_000;
/// Size of one ABI head/tail slot
pub const SLOT_LENGTH: usize = 32;
/// Length of a method selector
pub const SELECTOR_LENGTH: usize = 4;
/// Ethereum address length (20 bytes)
pub const ADDRESS_LENGTH: usize = 20;
/// HTTP path the JSON-RPC endpoint is served on
pub const RPC_PATH: &str = "/rpc";
/// Default listen address for the JSON-RPC server
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8545";
/// Default deadline for a single upstream `eth_call`, in milliseconds
pub const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 10_000;
/// Client version reported by `web3_clientVersion`
pub const CLIENT_VERSION: &str = concat!("erc721-gateway/v", env!("CARGO_PKG_VERSION"));
