//! Record Codec
//!
//! Encodes a record value into the bytes of a record file and back.
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Header (14 bytes)                                            │
//! │   Magic: "SNOW" (4) | Version: u16 (2) | PayloadLen: u32 (4) │
//! │   PayloadCRC: u32 (4)                                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │ Payload (PayloadLen bytes)                                   │
//! │   bincode-encoded record                                     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! All integers are little-endian.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StoreError};

// =============================================================================
// Format Constants
// =============================================================================

/// Magic bytes identifying a SnowStore record file
pub const MAGIC: &[u8; 4] = b"SNOW";

/// Current record format version
pub const VERSION: u16 = 1;

/// Header size: Magic (4) + Version (2) + PayloadLen (4) + CRC (4) = 14 bytes
pub const HEADER_SIZE: usize = 14;

// =============================================================================
// Encode / Decode
// =============================================================================

/// Serialize `value` into a complete record file image (header + payload)
pub fn encode_record<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let payload = bincode::serialize(value)?;

    let payload_len = u32::try_from(payload.len()).map_err(|_| {
        StoreError::Serialization(format!(
            "record payload too large: {} bytes",
            payload.len()
        ))
    })?;
    let crc = crc32fast::hash(&payload);

    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&VERSION.to_le_bytes());
    buf.extend_from_slice(&payload_len.to_le_bytes());
    buf.extend_from_slice(&crc.to_le_bytes());
    buf.extend_from_slice(&payload);

    Ok(buf)
}

/// Validate a record file image and deserialize its payload
pub fn decode_record<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    if bytes.len() < HEADER_SIZE {
        return Err(StoreError::Corruption(format!(
            "record too short: {} bytes, header needs {}",
            bytes.len(),
            HEADER_SIZE
        )));
    }

    let (header, payload) = bytes.split_at(HEADER_SIZE);

    if &header[0..4] != MAGIC {
        return Err(StoreError::Corruption(format!(
            "invalid record magic: expected SNOW, got {:?}",
            &header[0..4]
        )));
    }

    let version = u16::from_le_bytes([header[4], header[5]]);
    if version != VERSION {
        return Err(StoreError::Corruption(format!(
            "unsupported record version: {}",
            version
        )));
    }

    let payload_len = u32::from_le_bytes([header[6], header[7], header[8], header[9]]) as usize;
    if payload.len() != payload_len {
        return Err(StoreError::Corruption(format!(
            "payload length mismatch: header says {}, found {}",
            payload_len,
            payload.len()
        )));
    }

    let expected_crc = u32::from_le_bytes([header[10], header[11], header[12], header[13]]);
    let actual_crc = crc32fast::hash(payload);
    if expected_crc != actual_crc {
        return Err(StoreError::Corruption(format!(
            "CRC mismatch: expected {:#010x}, got {:#010x}",
            expected_crc, actual_crc
        )));
    }

    Ok(bincode::deserialize(payload)?)
}
