//! Minimal XDR codec for the `ScVal`s carried in multisig event topics.
//!
//! Only the two shapes the client has to build or read are supported:
//! `Symbol` (event names, used as topic filters) and `U64` (proposal ids).
//! Anything else, owner addresses included, is treated as an opaque
//! base64 string and compared verbatim.

use crate::error::{ClientError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

const SCV_U64: u32 = 5;
const SCV_SYMBOL: u32 = 15;

/// Longest symbol the host accepts.
pub const MAX_SYMBOL_LEN: usize = 32;

/// Encode `name` as a base64 `ScVal::Symbol`.
pub fn encode_symbol(name: &str) -> Result<String> {
    if name.len() > MAX_SYMBOL_LEN {
        return Err(ClientError::ScValDecodeError(format!(
            "symbol longer than {} bytes: {}",
            MAX_SYMBOL_LEN, name
        )));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
    {
        return Err(ClientError::ScValDecodeError(format!(
            "invalid symbol character {:?} in {}",
            c, name
        )));
    }

    let bytes = name.as_bytes();
    let mut buf = Vec::with_capacity(8 + padded_len(bytes.len()));
    buf.extend_from_slice(&SCV_SYMBOL.to_be_bytes());
    buf.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    buf.extend_from_slice(bytes);
    buf.resize(8 + padded_len(bytes.len()), 0);
    Ok(STANDARD.encode(buf))
}

/// Encode `value` as a base64 `ScVal::U64`.
pub fn encode_u64(value: u64) -> String {
    let mut buf = Vec::with_capacity(12);
    buf.extend_from_slice(&SCV_U64.to_be_bytes());
    buf.extend_from_slice(&value.to_be_bytes());
    STANDARD.encode(buf)
}

/// Decode a base64 `ScVal::Symbol`.
pub fn decode_symbol(xdr: &str) -> Result<String> {
    let bytes = STANDARD.decode(xdr)?;
    expect_discriminant(&bytes, SCV_SYMBOL)?;

    let len = read_u32(&bytes, 4)? as usize;
    if len > MAX_SYMBOL_LEN {
        return Err(ClientError::ScValDecodeError(format!(
            "symbol length {} exceeds {}",
            len, MAX_SYMBOL_LEN
        )));
    }
    if bytes.len() != 8 + padded_len(len) {
        return Err(ClientError::ScValDecodeError(format!(
            "symbol of length {} in {} bytes",
            len,
            bytes.len()
        )));
    }

    String::from_utf8(bytes[8..8 + len].to_vec())
        .map_err(|e| ClientError::ScValDecodeError(e.to_string()))
}

/// Decode a base64 `ScVal::U64`.
pub fn decode_u64(xdr: &str) -> Result<u64> {
    let bytes = STANDARD.decode(xdr)?;
    expect_discriminant(&bytes, SCV_U64)?;
    if bytes.len() != 12 {
        return Err(ClientError::ScValDecodeError(format!(
            "u64 in {} bytes",
            bytes.len()
        )));
    }

    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[4..12]);
    Ok(u64::from_be_bytes(raw))
}

fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}

fn read_u32(bytes: &[u8], offset: usize) -> Result<u32> {
    let slice = bytes.get(offset..offset + 4).ok_or_else(|| {
        ClientError::ScValDecodeError(format!("truncated value ({} bytes)", bytes.len()))
    })?;
    let mut raw = [0u8; 4];
    raw.copy_from_slice(slice);
    Ok(u32::from_be_bytes(raw))
}

fn expect_discriminant(bytes: &[u8], expected: u32) -> Result<()> {
    let found = read_u32(bytes, 0)?;
    if found != expected {
        return Err(ClientError::ScValDecodeError(format!(
            "expected ScVal type {}, found {}",
            expected, found
        )));
    }
    Ok(())
}
