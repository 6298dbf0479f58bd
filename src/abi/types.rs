use alloy_primitives::{Address, FixedBytes, U256};
use std::fmt;

/// The subset of Solidity ABI types the gateway speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbiType {
    Uint8,
    Uint256,
    Address,
    Bool,
    Bytes4,
    String,
}

impl AbiType {
    /// Canonical type name as it appears in a function signature.
    pub const fn canonical(&self) -> &'static str {
        match self {
            Self::Uint8 => "uint8",
            Self::Uint256 => "uint256",
            Self::Address => "address",
            Self::Bool => "bool",
            Self::Bytes4 => "bytes4",
            Self::String => "string",
        }
    }

    /// Dynamic types store an offset in the head and their data in the tail.
    pub const fn is_dynamic(&self) -> bool {
        matches!(self, Self::String)
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

/// A typed ABI value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Uint8(u8),
    Uint256(U256),
    Address(Address),
    Bool(bool),
    Bytes4(FixedBytes<4>),
    String(String),
}

impl AbiValue {
    /// The ABI type this value encodes as.
    pub const fn abi_type(&self) -> AbiType {
        match self {
            Self::Uint8(_) => AbiType::Uint8,
            Self::Uint256(_) => AbiType::Uint256,
            Self::Address(_) => AbiType::Address,
            Self::Bool(_) => AbiType::Bool,
            Self::Bytes4(_) => AbiType::Bytes4,
            Self::String(_) => AbiType::String,
        }
    }

    pub fn as_uint256(&self) -> Option<U256> {
        match self {
            Self::Uint256(v) => Some(*v),
            Self::Uint8(v) => Some(U256::from(*v)),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_bytes4(&self) -> Option<FixedBytes<4>> {
        match self {
            Self::Bytes4(b) => Some(*b),
            _ => None,
        }
    }
}

/// A named parameter in a method schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub ty: AbiType,
}

impl Param {
    pub const fn new(name: &'static str, ty: AbiType) -> Self {
        Self { name, ty }
    }
}

/// Decoded arguments of one call.
///
/// Keeps declaration order (for re-encoding) and answers lookups by the
/// parameter name declared in the ABI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamBinding {
    entries: Vec<(&'static str, AbiValue)>,
}

impl ParamBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'static str, value: AbiValue) {
        self.entries.push((name, value));
    }

    /// Look a value up by parameter name.
    pub fn get(&self, name: &str) -> Option<&AbiValue> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &AbiValue> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
