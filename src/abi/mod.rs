//! Ethereum contract ABI codec
//!
//! Covers only the types ERC-721 read methods use: `uint8`, `uint256`,
//! `address`, `bool`, `bytes4` and dynamic `string`. Every value occupies one
//! 32-byte head slot; strings put an offset in the head and their length and
//! zero-padded payload in the tail.

pub mod decode;
pub mod encode;
pub mod types;

pub use decode::{decode_string, unpack, AbiError};
pub use encode::{encode_address, encode_bool, encode_uint256, pack};
pub use types::{AbiType, AbiValue, Param, ParamBinding};
