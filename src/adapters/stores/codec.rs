//! Binary item codec for blob columns.
//!
//! `item_data`, `price_data` and `revenue_data` are stored as Base64 text
//! wrapping a bincode frame: a single payload for `item_data`, a
//! length-prefixed stack list for the other two. The encoding is
//! self-consistent - both directions go through this module - and makes no
//! attempt at compatibility with any other system.
//!
//! Decoding an empty blob yields an empty list, never an error; list
//! columns default to `''` for shops that have not sold anything yet.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::domain::{ItemPayload, ItemStack};
use crate::error::{Result, StoreError};

/// Encode one payload into Base64 text.
pub fn encode_payload(payload: &ItemPayload) -> Result<String> {
    let bytes = bincode::serialize(payload).map_err(|e| StoreError::Codec(e.to_string()))?;
    Ok(BASE64.encode(bytes))
}

/// Decode one payload from Base64 text. An empty blob is an error here:
/// a listing row without its payload is unreadable.
pub fn decode_payload(blob: &str) -> Result<ItemPayload> {
    if blob.is_empty() {
        return Err(StoreError::Codec("empty payload blob".into()).into());
    }
    let bytes = BASE64
        .decode(blob)
        .map_err(|e| StoreError::Codec(e.to_string()))?;
    Ok(bincode::deserialize(&bytes).map_err(|e| StoreError::Codec(e.to_string()))?)
}

/// Encode a stack list into Base64 text; an empty list encodes to `""`.
pub fn encode_stacks(stacks: &[ItemStack]) -> Result<String> {
    if stacks.is_empty() {
        return Ok(String::new());
    }
    let bytes = bincode::serialize(stacks).map_err(|e| StoreError::Codec(e.to_string()))?;
    Ok(BASE64.encode(bytes))
}

/// Decode a stack list from Base64 text; empty or absent blobs yield an
/// empty list.
pub fn decode_stacks(blob: &str) -> Result<Vec<ItemStack>> {
    if blob.is_empty() {
        return Ok(Vec::new());
    }
    let bytes = BASE64
        .decode(blob)
        .map_err(|e| StoreError::Codec(e.to_string()))?;
    Ok(bincode::deserialize(&bytes).map_err(|e| StoreError::Codec(e.to_string()))?)
}
