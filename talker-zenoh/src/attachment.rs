//! Per-message attachment.
//!
//! Every sample carries metadata in its Zenoh attachment, laid out the way
//! `rmw_zenoh_cpp` expects it:
//!
//! | Offset | Size | Content |
//! |--------|------|---------|
//! | 0 | 8 | Sequence number (i64 LE) |
//! | 8 | 8 | Timestamp in nanoseconds since UNIX epoch (i64 LE) |
//! | 16 | 1 | GID length (always 16) |
//! | 17 | 16 | Publisher GID |

use crate::error::{Error, Result};
use std::time::{SystemTime, UNIX_EPOCH};

/// Size of the attachment in bytes.
pub const ATTACHMENT_SIZE: usize = 33;

/// Size of the GID (Global Identifier).
pub const GID_SIZE: usize = 16;

/// Attachment data for messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Sequence number of the message.
    pub sequence_number: i64,
    /// Timestamp in nanoseconds since UNIX epoch.
    pub timestamp_ns: i64,
    /// Publisher GID.
    pub gid: [u8; GID_SIZE],
}

impl Attachment {
    /// Create a new attachment stamped with the current time.
    pub fn new(sequence_number: i64, gid: [u8; GID_SIZE]) -> Self {
        let timestamp_ns = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as i64)
            .unwrap_or(0);

        Self {
            sequence_number,
            timestamp_ns,
            gid,
        }
    }

    /// Encode the attachment to bytes.
    pub fn to_bytes(&self) -> [u8; ATTACHMENT_SIZE] {
        let mut bytes = [0u8; ATTACHMENT_SIZE];
        bytes[0..8].copy_from_slice(&self.sequence_number.to_le_bytes());
        bytes[8..16].copy_from_slice(&self.timestamp_ns.to_le_bytes());
        bytes[16] = GID_SIZE as u8;
        bytes[17..33].copy_from_slice(&self.gid);
        bytes
    }

    /// Decode an attachment from bytes.
    ///
    /// Only receivers need this; the talker itself never decodes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAttachment` if the bytes are too short or the GID
    /// length is not 16.
    #[doc(hidden)]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < ATTACHMENT_SIZE {
            return Err(Error::InvalidAttachment(format!(
                "expected {ATTACHMENT_SIZE} bytes, got {}",
                bytes.len()
            )));
        }

        let gid_len = bytes[16] as usize;
        if gid_len != GID_SIZE {
            return Err(Error::InvalidAttachment(format!(
                "invalid GID length: expected {GID_SIZE}, got {gid_len}"
            )));
        }

        let mut seq = [0u8; 8];
        seq.copy_from_slice(&bytes[0..8]);
        let mut stamp = [0u8; 8];
        stamp.copy_from_slice(&bytes[8..16]);
        let mut gid = [0u8; GID_SIZE];
        gid.copy_from_slice(&bytes[17..33]);

        Ok(Self {
            sequence_number: i64::from_le_bytes(seq),
            timestamp_ns: i64::from_le_bytes(stamp),
            gid,
        })
    }
}

/// Generate a random GID using UUID v4.
pub fn generate_gid() -> [u8; GID_SIZE] {
    *uuid::Uuid::new_v4().as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let attachment = Attachment {
            sequence_number: 7,
            timestamp_ns: 0x0102,
            gid: [0xAA; GID_SIZE],
        };
        let bytes = attachment.to_bytes();

        assert_eq!(&bytes[0..8], &[7, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[8..16], &[0x02, 0x01, 0, 0, 0, 0, 0, 0]);
        assert_eq!(bytes[16], 16);
        assert!(bytes[17..].iter().all(|b| *b == 0xAA));
        assert_eq!(Attachment::from_bytes(&bytes).unwrap(), attachment);
    }

    #[test]
    fn test_new_is_stamped() {
        let attachment = Attachment::new(0, generate_gid());
        assert!(attachment.timestamp_ns > 0);
    }

    #[test]
    fn test_from_short_bytes() {
        assert!(matches!(
            Attachment::from_bytes(&[0u8; 10]),
            Err(Error::InvalidAttachment(_))
        ));
    }

    #[test]
    fn test_invalid_gid_length() {
        let mut bytes = [0u8; ATTACHMENT_SIZE];
        bytes[16] = 8;
        assert!(matches!(
            Attachment::from_bytes(&bytes),
            Err(Error::InvalidAttachment(_))
        ));
    }

    #[test]
    fn test_gids_are_unique() {
        assert_ne!(generate_gid(), generate_gid());
    }
}
