use super::calldata::Calldata;
use super::selectors::{Method, MethodRegistry};
use crate::abi::{decode_string, pack, AbiValue};
use crate::config::ServiceConfig;
use crate::constants::{
    ADDRESS_LENGTH, CONTRACT_URI, ERC721_METADATA_INTERFACE_ID, SLOT_LENGTH, STUB_BALANCE,
    TOKEN_DECIMALS, TOKEN_NAME, TOKEN_SYMBOL,
};
use crate::encoding::{decode_hex, encode_hex};
use crate::errors::GatewayError;
use crate::upstream::{UpstreamClient, UpstreamError};
use alloy_primitives::{Address, Bytes, U256};
use std::sync::Arc;
use tracing::{debug, warn};

/// Answers ERC-721 read calls for the configured contract.
///
/// State-dependent reads (`ownerOf`, `tokenURI`, `uri`) are forwarded to the
/// upstream node; identity and metadata reads are answered locally.
#[derive(Clone)]
pub struct Dispatcher {
    config: Arc<ServiceConfig>,
    registry: Arc<MethodRegistry>,
    upstream: Arc<dyn UpstreamClient>,
}

impl Dispatcher {
    pub fn new(
        config: Arc<ServiceConfig>,
        registry: Arc<MethodRegistry>,
        upstream: Arc<dyn UpstreamClient>,
    ) -> Self {
        Self { config, registry, upstream }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Decode `data`, run the method and return its ABI-encoded result.
    pub async fn dispatch(&self, to: Address, data: &str) -> Result<Bytes, GatewayError> {
        if to != self.config.contract_address {
            return Err(GatewayError::UnknownContract {
                to,
                expected: self.config.contract_address,
            });
        }

        let calldata = Calldata::from_hex(data, &self.registry)?;
        let selector = calldata.selector()?;
        let method = calldata.method()?;
        debug!(target: "erc721::dispatch", %method, %selector, "dispatching call");

        let result = match method {
            Method::OwnerOf => {
                calldata.param("tokenId")?;
                let reply = self.forward(method, &calldata).await?;
                AbiValue::Address(owner_from_reply(method, &reply)?)
            }
            Method::TokenUri | Method::Uri => {
                calldata.params()?;
                let reply = self.forward(method, &calldata).await?;
                AbiValue::String(string_from_reply(method, &reply)?)
            }
            Method::BalanceOf => {
                let owner = calldata.param("owner")?;
                debug!(target: "erc721::dispatch", ?owner, "balanceOf answered with stub balance");
                AbiValue::Uint256(U256::from(STUB_BALANCE))
            }
            Method::SupportsInterface => {
                let interface_id = calldata.param("interfaceId")?;
                let supported = interface_id
                    .as_bytes4()
                    .is_some_and(|id| id.0 == ERC721_METADATA_INTERFACE_ID);
                AbiValue::Bool(supported)
            }
            Method::Name => AbiValue::String(TOKEN_NAME.to_string()),
            Method::Symbol => AbiValue::String(TOKEN_SYMBOL.to_string()),
            Method::ContractUri => AbiValue::String(CONTRACT_URI.to_string()),
            Method::Decimals => AbiValue::Uint8(TOKEN_DECIMALS),
        };
        debug_assert_eq!(result.abi_type(), method.returns(), "{method} result type");

        Ok(Bytes::from(pack(&[result])))
    }

    /// Forward the original calldata to the upstream node, bounded by the
    /// configured deadline.
    async fn forward(&self, method: Method, calldata: &Calldata<'_>) -> Result<String, GatewayError> {
        let data = encode_hex(calldata.as_bytes());
        let timeout = self.config.upstream_timeout;
        let call = self.upstream.eth_call(self.config.upstream_contract, &data);

        let result = match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout { timeout }),
        };
        result.map_err(|source| {
            warn!(target: "erc721::dispatch", %method, calldata = %data, err = %source, "upstream call failed");
            GatewayError::UpstreamFailure { method, calldata: data, source }
        })
    }
}

fn malformed(method: Method, reply: &str, reason: impl ToString) -> GatewayError {
    GatewayError::MalformedUpstream {
        method,
        reply: reply.to_string(),
        reason: reason.to_string(),
    }
}

/// Read an owner address from an upstream reply: either a bare 20-byte
/// address or one ABI address slot.
fn owner_from_reply(method: Method, reply: &str) -> Result<Address, GatewayError> {
    let bytes = decode_hex(reply).map_err(|err| malformed(method, reply, err))?;
    match bytes.len() {
        ADDRESS_LENGTH => Ok(Address::from_slice(&bytes)),
        SLOT_LENGTH if bytes[..12].iter().all(|b| *b == 0) => Ok(Address::from_slice(&bytes[12..])),
        SLOT_LENGTH => Err(malformed(method, reply, "address slot has non-zero upper bytes")),
        len => Err(malformed(method, reply, format!("expected 20 or 32 bytes, got {len}"))),
    }
}

/// Read the string out of an ABI-encoded `string` upstream reply.
fn string_from_reply(method: Method, reply: &str) -> Result<String, GatewayError> {
    let bytes = decode_hex(reply).map_err(|err| malformed(method, reply, err))?;
    decode_string(&bytes).map_err(|err| malformed(method, reply, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::encode::encode_string;
    use crate::abi::{encode_address, unpack, AbiType, Param};
    use crate::upstream::testing::StubUpstream;
    use alloy_primitives::{address, hex};
    use std::time::Duration;
    use url::Url;

    const CONTRACT: Address = address!("00000000000000000000000000000000000c0de1");
    const OWNER: Address = address!("1b0b4a597c764400ea157ab84358c8788a89cd28");
    const ZERO_SLOT: &str = "0000000000000000000000000000000000000000000000000000000000000000";
    const URI_REPLY: &str = concat!(
        "0x",
        "0000000000000000000000000000000000000000000000000000000000000020",
        "0000000000000000000000000000000000000000000000000000000000000003",
        "7572690000000000000000000000000000000000000000000000000000000000",
    );

    fn config() -> Arc<ServiceConfig> {
        Arc::new(
            ServiceConfig::new(
                1337,
                CONTRACT,
                Url::parse("http://localhost:8545").unwrap(),
                None,
                Duration::from_millis(200),
            )
            .unwrap(),
        )
    }

    fn dispatcher(upstream: Arc<StubUpstream>) -> Dispatcher {
        Dispatcher::new(config(), Arc::new(MethodRegistry::new()), upstream)
    }

    fn idle_upstream() -> Arc<StubUpstream> {
        Arc::new(StubUpstream::replying("0x"))
    }

    #[tokio::test]
    async fn test_owner_of_right_aligns_upstream_address() {
        for owner in [OWNER, Address::ZERO, Address::repeat_byte(0xff), CONTRACT] {
            let upstream = Arc::new(StubUpstream::replying(&encode_hex(owner.as_slice())));
            let out = dispatcher(upstream.clone())
                .dispatch(CONTRACT, &format!("0x6352211e{ZERO_SLOT}"))
                .await
                .unwrap();

            assert_eq!(out.len(), 32, "{owner}");
            assert_eq!(&out[..12], &[0u8; 12], "{owner}");
            assert_eq!(&out[12..], owner.as_slice(), "{owner}");
            assert_eq!(upstream.calls(), 1);
            let (to, data) = upstream.last_call().unwrap();
            assert_eq!(to, CONTRACT);
            assert_eq!(data, format!("0x6352211e{ZERO_SLOT}"));
        }
    }

    #[tokio::test]
    async fn test_owner_of_accepts_abi_slot_reply() {
        let reply = encode_hex(encode_address(OWNER));
        let out = dispatcher(Arc::new(StubUpstream::replying(&reply)))
            .dispatch(CONTRACT, &format!("0x6352211e{ZERO_SLOT}"))
            .await
            .unwrap();
        assert_eq!(out.to_vec(), encode_address(OWNER).to_vec());
    }

    #[tokio::test]
    async fn test_owner_of_malformed_reply() {
        let err = dispatcher(Arc::new(StubUpstream::replying("0x1234")))
            .dispatch(CONTRACT, &format!("0x6352211e{ZERO_SLOT}"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::MalformedUpstream { method: Method::OwnerOf, .. }));
    }

    #[tokio::test]
    async fn test_token_uri_reencodes_upstream_string() {
        let out = dispatcher(Arc::new(StubUpstream::replying(URI_REPLY)))
            .dispatch(CONTRACT, &format!("0xc87b56dd{ZERO_SLOT}"))
            .await
            .unwrap();
        assert_eq!(encode_hex(&out), URI_REPLY);
    }

    #[tokio::test]
    async fn test_uri_goes_upstream() {
        let upstream = Arc::new(StubUpstream::replying(URI_REPLY));
        let out = dispatcher(upstream.clone())
            .dispatch(CONTRACT, &format!("0x0e89341c{ZERO_SLOT}"))
            .await
            .unwrap();
        assert_eq!(decode_string(&out).unwrap(), "uri");
        assert_eq!(upstream.calls(), 1);
    }

    #[tokio::test]
    async fn test_token_uri_length_past_buffer() {
        let reply = URI_REPLY.replace(
            "0000000000000000000000000000000000000000000000000000000000000003",
            "00000000000000000000000000000000000000000000000000000000000000ff",
        );
        let err = dispatcher(Arc::new(StubUpstream::replying(&reply)))
            .dispatch(CONTRACT, &format!("0xc87b56dd{ZERO_SLOT}"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::MalformedUpstream { method: Method::TokenUri, .. }));
    }

    #[tokio::test]
    async fn test_balance_of_is_stubbed_locally() {
        let upstream = idle_upstream();
        let d = dispatcher(upstream.clone());
        for owner in [OWNER, Address::ZERO, Address::repeat_byte(0xff), CONTRACT] {
            let out = d
                .dispatch(CONTRACT, &format!("0x70a08231{}", hex::encode(encode_address(owner))))
                .await
                .unwrap();
            assert_eq!(U256::from_be_slice(&out), U256::from(1_000_000u64), "{owner}");
        }
        assert_eq!(upstream.calls(), 0);
    }

    #[tokio::test]
    async fn test_supports_interface_metadata_id() {
        let slot = format!("5b5e139f{}", &ZERO_SLOT[8..]);
        let out = dispatcher(idle_upstream())
            .dispatch(CONTRACT, &format!("0x01ffc9a7{slot}"))
            .await
            .unwrap();
        assert_eq!(out.to_vec(), crate::abi::encode_bool(true).to_vec());
    }

    #[tokio::test]
    async fn test_supports_interface_other_ids_false() {
        for id in ["ffffffff", "01ffc9a7", "80ac58cd", "00000000"] {
            let slot = format!("{id}{}", &ZERO_SLOT[8..]);
            let out = dispatcher(idle_upstream())
                .dispatch(CONTRACT, &format!("0x01ffc9a7{slot}"))
                .await
                .unwrap();
            assert_eq!(out.to_vec(), vec![0u8; 32], "interface {id}");
        }
    }

    #[tokio::test]
    async fn test_metadata_answered_locally() {
        let upstream = idle_upstream();
        let d = dispatcher(upstream.clone());
        let cases = [
            ("0x06fdde03", "Living Assets"),
            ("0x95d89b41", "LA"),
            ("0xe8a3d485", "https://livingassets.io/contractUri"),
        ];
        for (data, expected) in cases {
            let out = d.dispatch(CONTRACT, data).await.unwrap();
            assert_eq!(out.to_vec(), encode_string(expected), "{data}");
        }
        assert_eq!(upstream.calls(), 0);
    }

    #[tokio::test]
    async fn test_decimals_is_zero_slot() {
        let out = dispatcher(idle_upstream()).dispatch(CONTRACT, "0x313ce567").await.unwrap();
        assert_eq!(out.to_vec(), vec![0u8; 32]);
    }

    #[tokio::test]
    async fn test_unknown_selector() {
        let err = dispatcher(idle_upstream()).dispatch(CONTRACT, "0xdeadbeef").await.unwrap_err();
        assert!(matches!(err, GatewayError::UnknownMethod { .. }));
        assert!(err.to_string().contains("0xdeadbeef"));
    }

    #[tokio::test]
    async fn test_wrong_contract_never_reaches_upstream() {
        let upstream = Arc::new(StubUpstream::replying("0x1b0b4a597c764400ea157ab84358c8788a89cd28"));
        let err = dispatcher(upstream.clone())
            .dispatch(OWNER, &format!("0x6352211e{ZERO_SLOT}"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::UnknownContract { to, .. } if to == OWNER));
        assert_eq!(upstream.calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_params_rejected_before_upstream() {
        let upstream = idle_upstream();
        let err = dispatcher(upstream.clone())
            .dispatch(CONTRACT, "0x6352211e00ff")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::MalformedParameters { .. }));
        assert_eq!(upstream.calls(), 0);
    }

    #[tokio::test]
    async fn test_upstream_rpc_error_propagates() {
        let node_err =
            jsonrpsee::types::ErrorObjectOwned::owned(3, "execution reverted", None::<()>);
        let upstream = Arc::new(StubUpstream::failing(UpstreamError::Rpc(node_err)));
        let err = dispatcher(upstream)
            .dispatch(CONTRACT, &format!("0x6352211e{ZERO_SLOT}"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::UpstreamFailure { source: UpstreamError::Rpc(_), method: Method::OwnerOf, .. }
        ));
    }

    #[tokio::test]
    async fn test_upstream_transport_error_names_method_and_calldata() {
        let data = format!("0xc87b56dd{}07", &ZERO_SLOT[2..]);
        let upstream = Arc::new(StubUpstream::failing(UpstreamError::Transport(
            "connection refused".into(),
        )));
        let err = dispatcher(upstream).dispatch(CONTRACT, &data).await.unwrap_err();
        assert!(err.to_string().contains(&data), "{err}");
        assert!(err.to_string().contains("tokenURI"), "{err}");

        let obj: jsonrpsee::types::ErrorObjectOwned = err.into();
        assert_eq!(obj.code(), jsonrpsee::types::error::INTERNAL_ERROR_CODE);
        assert!(obj.message().contains(&data));
        let body: serde_json::Value = serde_json::from_str(obj.data().unwrap().get()).unwrap();
        assert_eq!(body["calldata"], data.as_str());
        assert_eq!(body["method"], "tokenURI");
        assert_eq!(body["upstream"], "transport error: connection refused");
    }

    #[tokio::test]
    async fn test_upstream_deadline() {
        let upstream = Arc::new(StubUpstream::replying(URI_REPLY).with_delay(Duration::from_secs(5)));
        let err = dispatcher(upstream)
            .dispatch(CONTRACT, &format!("0xc87b56dd{ZERO_SLOT}"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::UpstreamFailure { source: UpstreamError::Timeout { .. }, ref calldata, .. }
                if calldata.starts_with("0xc87b56dd")
        ));
    }

    #[tokio::test]
    async fn test_every_method_returns_its_declared_type() {
        let interface_slot = format!("5b5e139f{}", &ZERO_SLOT[8..]);
        let owner_slot = hex::encode(encode_address(OWNER));
        for method in Method::ALL {
            let args = match method.params().first().map(|p| p.ty) {
                Some(AbiType::Address) => owner_slot.clone(),
                Some(AbiType::Bytes4) => interface_slot.clone(),
                Some(_) => ZERO_SLOT.to_string(),
                None => String::new(),
            };
            let reply = match method {
                Method::OwnerOf => encode_hex(OWNER.as_slice()),
                _ => URI_REPLY.to_string(),
            };
            let out = dispatcher(Arc::new(StubUpstream::replying(&reply)))
                .dispatch(CONTRACT, &format!("{}{args}", method.selector()))
                .await
                .unwrap();

            let schema = [Param::new("result", method.returns())];
            let binding = unpack(&schema, &out).unwrap_or_else(|e| panic!("{method}: {e}"));
            assert_eq!(binding.len(), 1, "{method}");
        }
    }

    #[test]
    fn test_owner_from_reply_rejects_dirty_slot() {
        let mut slot = encode_address(OWNER);
        slot[0] = 1;
        let err = owner_from_reply(Method::OwnerOf, &encode_hex(slot)).unwrap_err();
        assert!(matches!(err, GatewayError::MalformedUpstream { .. }));
    }
}
