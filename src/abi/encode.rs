use super::types::AbiValue;
use crate::constants::SLOT_LENGTH;
use alloy_primitives::{Address, U256};

/// Encode a uint256 into one slot (big-endian).
pub fn encode_uint256(value: U256) -> [u8; SLOT_LENGTH] {
    value.to_be_bytes()
}

/// Encode an address into one slot (left-padded).
pub fn encode_address(addr: Address) -> [u8; SLOT_LENGTH] {
    let mut bytes = [0u8; SLOT_LENGTH];
    bytes[12..32].copy_from_slice(addr.as_slice());
    bytes
}

/// Encode a bool into one slot.
pub fn encode_bool(value: bool) -> [u8; SLOT_LENGTH] {
    let mut bytes = [0u8; SLOT_LENGTH];
    bytes[31] = value as u8;
    bytes
}

/// Encode a fixed-size byte string into one slot (right-padded).
fn encode_fixed_bytes(value: &[u8]) -> [u8; SLOT_LENGTH] {
    let mut bytes = [0u8; SLOT_LENGTH];
    bytes[..value.len()].copy_from_slice(value);
    bytes
}

/// Number of bytes `len` occupies once padded to a slot boundary.
fn padded_len(len: usize) -> usize {
    len.div_ceil(SLOT_LENGTH) * SLOT_LENGTH
}

/// Tail section of a dynamic `string`: length slot + zero-padded UTF-8 payload.
fn encode_string_tail(value: &str) -> Vec<u8> {
    let payload = value.as_bytes();
    let mut out = Vec::with_capacity(SLOT_LENGTH + padded_len(payload.len()));
    out.extend_from_slice(&encode_uint256(U256::from(payload.len())));
    out.extend_from_slice(payload);
    out.resize(SLOT_LENGTH + padded_len(payload.len()), 0);
    out
}

/// ABI-encode an ordered tuple of values.
///
/// Layout: one head slot per value (inline for static types, an offset from
/// the start of the head for dynamic types), followed by the tails of the
/// dynamic values in order.
pub fn pack(values: &[AbiValue]) -> Vec<u8> {
    let head_len = values.len() * SLOT_LENGTH;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for value in values {
        let slot = match value {
            AbiValue::String(s) => {
                let offset = head_len + tail.len();
                tail.extend_from_slice(&encode_string_tail(s));
                encode_uint256(U256::from(offset))
            }
            AbiValue::Uint8(v) => encode_uint256(U256::from(*v)),
            AbiValue::Uint256(v) => encode_uint256(*v),
            AbiValue::Address(a) => encode_address(*a),
            AbiValue::Bool(b) => encode_bool(*b),
            AbiValue::Bytes4(b) => encode_fixed_bytes(b.as_slice()),
        };
        head.extend_from_slice(&slot);
    }

    head.extend_from_slice(&tail);
    head
}

/// ABI-encode a single `string` return value.
#[cfg(test)]
pub(crate) fn encode_string(value: &str) -> Vec<u8> {
    pack(&[AbiValue::String(value.to_string())])
}
