use super::selectors::{Method, MethodRegistry};
use crate::abi::{unpack, AbiValue, ParamBinding};
use crate::constants::SELECTOR_LENGTH;
use crate::encoding::decode_hex;
use crate::errors::GatewayError;
use alloy_primitives::Selector;

/// Raw calldata of one call: selector followed by ABI-encoded arguments.
#[derive(Debug, Clone)]
pub struct Calldata<'r> {
    bytes: Vec<u8>,
    registry: &'r MethodRegistry,
}

impl<'r> Calldata<'r> {
    pub fn new(bytes: Vec<u8>, registry: &'r MethodRegistry) -> Self {
        Self { bytes, registry }
    }

    /// Parse hex calldata (with or without `0x`).
    pub fn from_hex(text: &str, registry: &'r MethodRegistry) -> Result<Self, GatewayError> {
        Ok(Self::new(decode_hex(text)?, registry))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// First four bytes of the calldata.
    pub fn selector(&self) -> Result<Selector, GatewayError> {
        self.bytes
            .get(..SELECTOR_LENGTH)
            .map(Selector::from_slice)
            .ok_or_else(|| GatewayError::short_calldata(&self.bytes))
    }

    /// The recognised method this calldata invokes.
    pub fn method(&self) -> Result<Method, GatewayError> {
        let selector = self.selector()?;
        self.registry
            .lookup(&selector)
            .ok_or(GatewayError::UnknownMethod { selector })
    }

    /// Decode every argument of the current method.
    pub fn params(&self) -> Result<ParamBinding, GatewayError> {
        let method = self.method()?;
        unpack(method.params(), &self.bytes[SELECTOR_LENGTH..])
            .map_err(|source| GatewayError::MalformedParameters { method, source })
    }

    /// Look up one argument by its ABI parameter name.
    pub fn param(&self, name: &str) -> Result<AbiValue, GatewayError> {
        let method = self.method()?;
        if !method.params().iter().any(|p| p.name == name) {
            return Err(GatewayError::MissingParameter { method, name: name.to_string() });
        }
        self.params()?
            .get(name)
            .cloned()
            .ok_or_else(|| GatewayError::MissingParameter { method, name: name.to_string() })
    }
}
