use crate::abi::AbiError;
use crate::encoding::{encode_hex, HexError};
use crate::erc721::Method;
use crate::upstream::UpstreamError;
use alloy_primitives::{Address, Selector};
use jsonrpsee::types::error::{ErrorObjectOwned, INTERNAL_ERROR_CODE, INVALID_PARAMS_CODE};
use serde_json::json;
use thiserror::Error;

/// Errors raised while answering an `eth_call`
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Request hex did not decode
    #[error(transparent)]
    MalformedHex(#[from] HexError),

    /// Calldata too short to carry a selector
    #[error("calldata {calldata} is shorter than a 4-byte selector")]
    ShortCalldata {
        /// The offending calldata
        calldata: String,
    },

    /// Selector is not one of the recognised ERC-721 methods
    #[error("unknown method selector {selector}")]
    UnknownMethod {
        /// The rejected selector
        selector: Selector,
    },

    /// Arguments do not decode against the method's parameter schema
    #[error("malformed parameters for {method}: {source}")]
    MalformedParameters {
        /// Method being decoded
        method: Method,
        /// Underlying codec failure
        source: AbiError,
    },

    /// Requested parameter name is not part of the method's schema
    #[error("{method} has no parameter named `{name}`")]
    MissingParameter {
        /// Method being decoded
        method: Method,
        /// Requested name
        name: String,
    },

    /// `tx.to` is not the contract this gateway serves
    #[error("unknown contract {to}: this gateway serves {expected}")]
    UnknownContract {
        /// Address the call was sent to
        to: Address,
        /// Configured contract address
        expected: Address,
    },

    /// Upstream node unreachable, timed out or returned an error
    #[error("upstream call for {method} with calldata {calldata} failed: {source}")]
    UpstreamFailure {
        /// Method being forwarded
        method: Method,
        /// Calldata hex sent to the node
        calldata: String,
        /// What went wrong upstream
        source: UpstreamError,
    },

    /// Upstream reply did not have the expected ABI shape
    #[error("malformed upstream reply to {method}: {reason} (reply {reply})")]
    MalformedUpstream {
        /// Method whose reply was being reshaped
        method: Method,
        /// The raw upstream hex
        reply: String,
        /// What was wrong with it
        reason: String,
    },
}

impl GatewayError {
    /// Short-calldata error for a raw buffer.
    pub fn short_calldata(bytes: &[u8]) -> Self {
        Self::ShortCalldata { calldata: encode_hex(bytes) }
    }

    /// JSON-RPC error code this error is reported with.
    pub fn code(&self) -> i32 {
        match self {
            Self::MalformedHex(_)
            | Self::ShortCalldata { .. }
            | Self::UnknownMethod { .. }
            | Self::MalformedParameters { .. }
            | Self::MissingParameter { .. }
            | Self::UnknownContract { .. } => INVALID_PARAMS_CODE,
            Self::UpstreamFailure { source: UpstreamError::Rpc(obj), .. } => obj.code(),
            Self::UpstreamFailure { .. } | Self::MalformedUpstream { .. } => INTERNAL_ERROR_CODE,
        }
    }
}

impl From<GatewayError> for ErrorObjectOwned {
    fn from(err: GatewayError) -> Self {
        let message = err.to_string();
        match err {
            // Node errors are forwarded as the node reported them.
            GatewayError::UpstreamFailure { source: UpstreamError::Rpc(obj), .. } => obj,
            GatewayError::UnknownMethod { selector } => ErrorObjectOwned::owned(
                INVALID_PARAMS_CODE,
                message,
                Some(json!({ "selector": selector.to_string() })),
            ),
            GatewayError::UnknownContract { to, expected } => ErrorObjectOwned::owned(
                INVALID_PARAMS_CODE,
                message,
                Some(json!({ "to": to, "expected": expected })),
            ),
            GatewayError::UpstreamFailure { method, calldata, source } => ErrorObjectOwned::owned(
                INTERNAL_ERROR_CODE,
                message,
                Some(json!({
                    "upstream": source.to_string(),
                    "method": method.name(),
                    "calldata": calldata,
                })),
            ),
            GatewayError::MalformedUpstream { ref reply, .. } => ErrorObjectOwned::owned(
                INTERNAL_ERROR_CODE,
                message,
                Some(json!({ "upstream": reply })),
            ),
            other => ErrorObjectOwned::owned(other.code(), message, None::<()>),
        }
    }
}
