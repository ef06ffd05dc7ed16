//! CDR (Common Data Representation) serialization support.
//!
//! All CDR-encoded data is prefixed with a 4-byte encapsulation header:
//! - Bytes 0-1: Representation Identifier (encoding format + endianness)
//! - Bytes 2-3: Options (reserved, set to 0x0000)
//!
//! Only plain CDR v1 is supported, which is what ROS2 uses for messages.

use crate::error::{Error, Result};
use serde::{Serialize, de::DeserializeOwned};

/// CDR Representation Identifier (2 bytes).
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepresentationIdentifier {
    /// CDR Big Endian (v1) - `[0x00, 0x00]`
    CdrBE = 0x0000,
    /// CDR Little Endian (v1) - `[0x00, 0x01]`
    #[default]
    CdrLE = 0x0001,
}

impl RepresentationIdentifier {
    /// Convert to raw bytes (big-endian as per RTPS).
    pub const fn to_bytes(&self) -> [u8; 2] {
        let val = *self as u16;
        [(val >> 8) as u8, val as u8]
    }

    /// Parse from raw bytes.
    pub fn from_bytes(bytes: [u8; 2]) -> Result<Self> {
        match u16::from_be_bytes(bytes) {
            0x0000 => Ok(Self::CdrBE),
            0x0001 => Ok(Self::CdrLE),
            other => Err(Error::Cdr(format!(
                "unsupported representation identifier: 0x{other:04x}"
            ))),
        }
    }
}

/// Size of the encapsulation header in bytes.
pub const HEADER_SIZE: usize = 4;

/// Serialize `value` as CDR little endian, header included.
pub fn serialize<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(HEADER_SIZE);
    bytes.extend_from_slice(&RepresentationIdentifier::CdrLE.to_bytes());
    bytes.extend_from_slice(&[0, 0]);

    let payload = cdr_encoding::to_vec::<T, byteorder::LittleEndian>(value)
        .map_err(|e| Error::Cdr(e.to_string()))?;
    bytes.extend(payload);
    Ok(bytes)
}

/// Deserialize a CDR buffer, header included, honouring its byte order.
pub fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    if bytes.len() < HEADER_SIZE {
        return Err(Error::Cdr(format!(
            "encapsulation header requires {HEADER_SIZE} bytes, got {}",
            bytes.len()
        )));
    }

    let payload = &bytes[HEADER_SIZE..];
    let (value, _) = match RepresentationIdentifier::from_bytes([bytes[0], bytes[1]])? {
        RepresentationIdentifier::CdrLE => {
            cdr_encoding::from_bytes::<T, byteorder::LittleEndian>(payload)
        }
        RepresentationIdentifier::CdrBE => {
            cdr_encoding::from_bytes::<T, byteorder::BigEndian>(payload)
        }
    }
    .map_err(|e| Error::Cdr(e.to_string()))?;

    Ok(value)
}
