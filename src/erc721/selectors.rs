use crate::abi::{AbiType, Param};
use alloy_primitives::{keccak256, Selector};
use std::collections::HashMap;
use std::fmt;

/// Compute the Solidity function selector (first 4 bytes of keccak256(signature)).
pub fn function_selector(signature: &str) -> Selector {
    let hash = keccak256(signature.as_bytes());
    Selector::from_slice(&hash[..4])
}

const TOKEN_ID_PARAMS: &[Param] = &[Param::new("tokenId", AbiType::Uint256)];
const ID_PARAMS: &[Param] = &[Param::new("id", AbiType::Uint256)];
const OWNER_PARAMS: &[Param] = &[Param::new("owner", AbiType::Address)];
const INTERFACE_ID_PARAMS: &[Param] = &[Param::new("interfaceId", AbiType::Bytes4)];

/// The ERC-721 read methods the gateway recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    OwnerOf,
    BalanceOf,
    TokenUri,
    Uri,
    SupportsInterface,
    Name,
    ContractUri,
    Decimals,
    Symbol,
}

impl Method {
    pub const ALL: [Method; 9] = [
        Method::OwnerOf,
        Method::BalanceOf,
        Method::TokenUri,
        Method::Uri,
        Method::SupportsInterface,
        Method::Name,
        Method::ContractUri,
        Method::Decimals,
        Method::Symbol,
    ];

    /// Solidity function name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OwnerOf => "ownerOf",
            Self::BalanceOf => "balanceOf",
            Self::TokenUri => "tokenURI",
            Self::Uri => "uri",
            Self::SupportsInterface => "supportsInterface",
            Self::Name => "name",
            Self::ContractUri => "contractURI",
            Self::Decimals => "decimals",
            Self::Symbol => "symbol",
        }
    }

    /// Named parameters, in declaration order.
    pub const fn params(&self) -> &'static [Param] {
        match self {
            Self::OwnerOf | Self::TokenUri => TOKEN_ID_PARAMS,
            Self::Uri => ID_PARAMS,
            Self::BalanceOf => OWNER_PARAMS,
            Self::SupportsInterface => INTERFACE_ID_PARAMS,
            Self::Name | Self::ContractUri | Self::Decimals | Self::Symbol => &[],
        }
    }

    /// Return type of the method.
    pub const fn returns(&self) -> AbiType {
        match self {
            Self::OwnerOf => AbiType::Address,
            Self::BalanceOf => AbiType::Uint256,
            Self::SupportsInterface => AbiType::Bool,
            Self::Decimals => AbiType::Uint8,
            Self::TokenUri | Self::Uri | Self::Name | Self::ContractUri | Self::Symbol => {
                AbiType::String
            }
        }
    }

    /// Canonical signature, e.g. `ownerOf(uint256)`.
    pub fn signature(&self) -> String {
        let types: Vec<_> = self.params().iter().map(|p| p.ty.canonical()).collect();
        format!("{}({})", self.name(), types.join(","))
    }

    pub fn selector(&self) -> Selector {
        function_selector(&self.signature())
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable selector -> method table, built once at startup.
#[derive(Debug, Clone)]
pub struct MethodRegistry {
    methods: HashMap<Selector, Method>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        let methods = Method::ALL.iter().map(|m| (m.selector(), *m)).collect();
        Self { methods }
    }

    pub fn lookup(&self, selector: &Selector) -> Option<Method> {
        self.methods.get(selector).copied()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::fixed_bytes;

    #[test]
    fn test_selectors_match_published_values() {
        let expected = [
            (Method::OwnerOf, fixed_bytes!("6352211e")),
            (Method::BalanceOf, fixed_bytes!("70a08231")),
            (Method::TokenUri, fixed_bytes!("c87b56dd")),
            (Method::SupportsInterface, fixed_bytes!("01ffc9a7")),
            (Method::Name, fixed_bytes!("06fdde03")),
            (Method::Symbol, fixed_bytes!("95d89b41")),
            (Method::Decimals, fixed_bytes!("313ce567")),
            (Method::ContractUri, fixed_bytes!("e8a3d485")),
            (Method::Uri, fixed_bytes!("0e89341c")),
        ];
        for (method, selector) in expected {
            assert_eq!(method.selector(), selector, "selector mismatch for {method}");
        }
    }

    #[test]
    fn test_signatures_are_canonical() {
        assert_eq!(Method::OwnerOf.signature(), "ownerOf(uint256)");
        assert_eq!(Method::BalanceOf.signature(), "balanceOf(address)");
        assert_eq!(Method::SupportsInterface.signature(), "supportsInterface(bytes4)");
        assert_eq!(Method::ContractUri.signature(), "contractURI()");
    }

    #[test]
    fn test_registry_is_injective() {
        let registry = MethodRegistry::new();
        assert_eq!(registry.len(), Method::ALL.len());
        for method in Method::ALL {
            assert_eq!(registry.lookup(&method.selector()), Some(method));
        }
    }

    #[test]
    fn test_registry_unknown_selector() {
        let registry = MethodRegistry::new();
        assert_eq!(registry.lookup(&fixed_bytes!("deadbeef")), None);
    }

    #[test]
    fn test_erc721_metadata_interface_id() {
        // name() ^ symbol() ^ tokenURI(uint256)
        let id: Vec<u8> = Method::Name
            .selector()
            .iter()
            .zip(Method::Symbol.selector().iter())
            .zip(Method::TokenUri.selector().iter())
            .map(|((a, b), c)| a ^ b ^ c)
            .collect();
        assert_eq!(id, crate::constants::ERC721_METADATA_INTERFACE_ID.to_vec());
    }
}
