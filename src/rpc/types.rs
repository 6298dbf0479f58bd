use alloy_primitives::{Address, Bloom, Bytes, B256, B64, U256, U64};
use serde::{Deserialize, Serialize};

/// Transaction object accepted by `eth_call`.
///
/// Only `to` and the calldata are read; `from`, `gas`, `value` and any other
/// field a wallet sends are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CallRequest {
    pub to: Address,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
}

impl CallRequest {
    /// Calldata hex, preferring `input` over the legacy `data` field.
    pub fn calldata(&self) -> &str {
        self.input.as_deref().or(self.data.as_deref()).unwrap_or("0x")
    }
}

/// Resolve a block tag to a block number. Symbolic tags resolve to 0 since
/// the gateway is not anchored to any chain height.
pub fn resolve_block_tag(tag: &str) -> Option<u64> {
    match tag {
        "latest" | "earliest" | "pending" | "safe" | "finalized" => Some(0),
        _ => {
            let digits = tag.strip_prefix("0x")?;
            u64::from_str_radix(digits, 16).ok()
        }
    }
}

/// Response for `eth_getBlockByNumber`
///
/// Every field is zero or empty; `transactions` is always an array, never null.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub number: U64,
    pub hash: B256,
    pub parent_hash: B256,
    pub nonce: B64,
    pub sha3_uncles: B256,
    pub logs_bloom: Bloom,
    pub transactions_root: B256,
    pub state_root: B256,
    pub receipts_root: B256,
    pub miner: Address,
    pub difficulty: U256,
    pub total_difficulty: U256,
    pub extra_data: Bytes,
    pub size: U64,
    pub gas_limit: U64,
    pub gas_used: U64,
    pub timestamp: U64,
    pub transactions: Vec<B256>,
    pub uncles: Vec<B256>,
}

impl Block {
    pub fn empty(number: u64) -> Self {
        Self {
            number: U64::from(number),
            hash: B256::ZERO,
            parent_hash: B256::ZERO,
            nonce: B64::ZERO,
            sha3_uncles: B256::ZERO,
            logs_bloom: Bloom::ZERO,
            transactions_root: B256::ZERO,
            state_root: B256::ZERO,
            receipts_root: B256::ZERO,
            miner: Address::ZERO,
            difficulty: U256::ZERO,
            total_difficulty: U256::ZERO,
            extra_data: Bytes::new(),
            size: U64::ZERO,
            gas_limit: U64::ZERO,
            gas_used: U64::ZERO,
            timestamp: U64::ZERO,
            transactions: Vec::new(),
            uncles: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_call_request_ignores_extra_fields() {
        let req: CallRequest = serde_json::from_value(json!({
            "from": "0x0000000000000000000000000000000000000001",
            "to": "0x00000000000000000000000000000000000c0de1",
            "gas": "0x5208",
            "data": "0x06fdde03"
        }))
        .unwrap();
        assert_eq!(req.calldata(), "0x06fdde03");
    }

    #[test]
    fn test_call_request_prefers_input() {
        let req: CallRequest = serde_json::from_value(json!({
            "to": "0x00000000000000000000000000000000000c0de1",
            "input": "0x95d89b41",
            "data": "0x06fdde03"
        }))
        .unwrap();
        assert_eq!(req.calldata(), "0x95d89b41");
    }

    #[test]
    fn test_call_request_without_calldata() {
        let req: CallRequest = serde_json::from_value(json!({
            "to": "0x00000000000000000000000000000000000c0de1"
        }))
        .unwrap();
        assert_eq!(req.calldata(), "0x");
    }

    #[test]
    fn test_call_request_requires_to() {
        let res: Result<CallRequest, _> = serde_json::from_value(json!({ "data": "0x06fdde03" }));
        assert!(res.is_err());
    }

    #[test]
    fn test_resolve_block_tag() {
        assert_eq!(resolve_block_tag("latest"), Some(0));
        assert_eq!(resolve_block_tag("finalized"), Some(0));
        assert_eq!(resolve_block_tag("0x10"), Some(16));
        assert_eq!(resolve_block_tag("16"), None);
        assert_eq!(resolve_block_tag("0xzz"), None);
    }

    #[test]
    fn test_block_json_shape() {
        let json = serde_json::to_value(Block::empty(0x2a)).unwrap();
        assert_eq!(json["number"], "0x2a");
        assert_eq!(json["gasLimit"], "0x0");
        assert_eq!(json["transactions"], json!([]));
        assert_eq!(json["uncles"], json!([]));
        assert_eq!(json["extraData"], "0x");
        assert!(json.get("parentHash").is_some());
        assert!(json.get("logsBloom").is_some());
    }
}
