use super::types::{AbiType, AbiValue, Param, ParamBinding};
use crate::constants::SLOT_LENGTH;
use crate::encoding::encode_hex;
use alloy_primitives::{Address, FixedBytes, U256};
use thiserror::Error;

/// A buffer that does not decode against the expected ABI schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// Buffer is not a whole number of 32-byte slots
    #[error("buffer of {len} bytes is not 32-byte aligned: {data}")]
    Misaligned { len: usize, data: String },

    /// Buffer length does not fit the schema
    #[error("expected {expected} bytes, got {got}: {data}")]
    LengthMismatch { expected: usize, got: usize, data: String },

    /// A slot holds bits its type does not allow
    #[error("parameter `{name}` is not a valid {ty}: slot {slot}")]
    DirtySlot { name: &'static str, ty: AbiType, slot: String },

    /// A dynamic offset or length points outside the buffer
    #[error("parameter `{name}` points outside the {len}-byte buffer ({detail})")]
    OutOfBounds { name: &'static str, len: usize, detail: String },

    /// String payload is not UTF-8
    #[error("parameter `{name}` is not valid UTF-8: {payload}")]
    InvalidUtf8 { name: &'static str, payload: String },
}

fn slot_at(data: &[u8], index: usize) -> &[u8] {
    &data[index * SLOT_LENGTH..(index + 1) * SLOT_LENGTH]
}

/// Read a 32-byte big-endian word at `pos` as a `usize`, bounds-checked.
fn read_usize(data: &[u8], pos: usize, name: &'static str, what: &str) -> Result<usize, AbiError> {
    let out_of_bounds = |detail: String| AbiError::OutOfBounds { name, len: data.len(), detail };
    let word = pos
        .checked_add(SLOT_LENGTH)
        .and_then(|end| data.get(pos..end))
        .ok_or_else(|| out_of_bounds(format!("{what} slot at {pos}")))?;
    let value = U256::from_be_slice(word);
    usize::try_from(value).map_err(|_| out_of_bounds(format!("{what} {value}")))
}

fn decode_static(name: &'static str, ty: AbiType, slot: &[u8]) -> Result<AbiValue, AbiError> {
    let dirty = || AbiError::DirtySlot { name, ty, slot: encode_hex(slot) };
    let all_zero = |bytes: &[u8]| bytes.iter().all(|b| *b == 0);

    match ty {
        AbiType::Uint256 => Ok(AbiValue::Uint256(U256::from_be_slice(slot))),
        AbiType::Uint8 => {
            if !all_zero(&slot[..31]) {
                return Err(dirty());
            }
            Ok(AbiValue::Uint8(slot[31]))
        }
        AbiType::Address => {
            if !all_zero(&slot[..12]) {
                return Err(dirty());
            }
            Ok(AbiValue::Address(Address::from_slice(&slot[12..])))
        }
        AbiType::Bool => match (all_zero(&slot[..31]), slot[31]) {
            (true, 0) => Ok(AbiValue::Bool(false)),
            (true, 1) => Ok(AbiValue::Bool(true)),
            _ => Err(dirty()),
        },
        AbiType::Bytes4 => {
            if !all_zero(&slot[4..]) {
                return Err(dirty());
            }
            Ok(AbiValue::Bytes4(FixedBytes::from_slice(&slot[..4])))
        }
        // strings never sit inline in a head slot
        AbiType::String => Err(dirty()),
    }
}

fn decode_string_at(
    data: &[u8],
    head_len: usize,
    head_slot: usize,
    name: &'static str,
) -> Result<String, AbiError> {
    let offset = read_usize(data, head_slot * SLOT_LENGTH, name, "offset")?;
    if offset < head_len {
        return Err(AbiError::OutOfBounds {
            name,
            len: data.len(),
            detail: format!("offset {offset} inside the {head_len}-byte head"),
        });
    }
    let len = read_usize(data, offset, name, "length")?;
    let start = offset + SLOT_LENGTH;
    let payload = start
        .checked_add(len)
        .and_then(|end| data.get(start..end))
        .ok_or_else(|| AbiError::OutOfBounds {
            name,
            len: data.len(),
            detail: format!("string of {len} bytes at {start}"),
        })?;
    String::from_utf8(payload.to_vec())
        .map_err(|_| AbiError::InvalidUtf8 { name, payload: encode_hex(payload) })
}

/// Decode a parameter tuple against `schema`.
///
/// The buffer must be slot-aligned. A schema of static types only must match
/// the buffer length exactly; dynamic types may extend it with tails.
pub fn unpack(schema: &[Param], data: &[u8]) -> Result<ParamBinding, AbiError> {
    if data.len() % SLOT_LENGTH != 0 {
        return Err(AbiError::Misaligned { len: data.len(), data: encode_hex(data) });
    }

    let head_len = schema.len() * SLOT_LENGTH;
    let has_dynamic = schema.iter().any(|p| p.ty.is_dynamic());
    if data.len() < head_len || (!has_dynamic && data.len() != head_len) {
        return Err(AbiError::LengthMismatch {
            expected: head_len,
            got: data.len(),
            data: encode_hex(data),
        });
    }

    let mut binding = ParamBinding::new();
    for (index, param) in schema.iter().enumerate() {
        let value = if param.ty.is_dynamic() {
            AbiValue::String(decode_string_at(data, head_len, index, param.name)?)
        } else {
            decode_static(param.name, param.ty, slot_at(data, index))?
        };
        binding.push(param.name, value);
    }
    Ok(binding)
}

/// Decode an ABI-encoded single `string` return value.
///
/// The length prefix is read as a full 32-byte big-endian integer.
pub fn decode_string(data: &[u8]) -> Result<String, AbiError> {
    let binding = unpack(&[Param::new("value", AbiType::String)], data)?;
    match binding.get("value") {
        Some(AbiValue::String(s)) => Ok(s.clone()),
        _ => Err(AbiError::LengthMismatch {
            expected: 2 * SLOT_LENGTH,
            got: data.len(),
            data: encode_hex(data),
        }),
    }
}
