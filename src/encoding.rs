//! Hex text <-> octet conversion.
//!
//! Every hex string crossing the RPC boundary carries a `0x` prefix on the way
//! out; on the way in the prefix is optional.

use thiserror::Error;

/// Input that is not valid hexadecimal text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    /// Digit count is odd once the prefix is stripped
    #[error("malformed hex {input:?}: odd number of digits")]
    OddLength {
        /// The offending input
        input: String,
    },

    /// A character outside `[0-9a-fA-F]`
    #[error("malformed hex {input:?}: invalid character {c:?} at position {index}")]
    InvalidCharacter {
        /// The offending input
        input: String,
        /// The rejected character
        c: char,
        /// Position within the digits (after the prefix)
        index: usize,
    },
}

/// Strip an optional `0x` / `0X` prefix.
pub fn strip_prefix(text: &str) -> &str {
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
}

/// Decode hex text (with or without `0x`) into octets.
pub fn decode_hex(text: &str) -> Result<Vec<u8>, HexError> {
    let digits = strip_prefix(text);
    hex::decode(digits).map_err(|err| match err {
        hex::FromHexError::InvalidHexCharacter { c, index } => HexError::InvalidCharacter {
            input: text.to_string(),
            c,
            index,
        },
        // The only other outcomes for `decode` are odd/invalid length.
        _ => HexError::OddLength { input: text.to_string() },
    })
}

/// Encode octets as lowercase hex with a `0x` prefix.
pub fn encode_hex(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}
