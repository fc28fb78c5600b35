// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Frame header codec.
//!
//! # Frame Format
//!
//! A stream is a sequence of frames with no stream-level header or trailer:
//!
//! ```text
//! [magic: u32][type_tag: u16][length: u16][payload: length bytes]
//! ```
//!
//! The header is exactly [`HEADER_LEN`] bytes, all integers little-endian.
//! `magic` is always [`MAGIC`]; `type_tag` names the payload schema.

use byteorder::{ByteOrder, LittleEndian};

use crate::{Result, StreamError};

/// Frame boundary sentinel.
pub const MAGIC: u32 = 0xFFFF_FFFF;

/// Size of an encoded frame header.
pub const HEADER_LEN: usize = 8;

/// Largest payload a frame header can describe.
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;

/// Type tag of DeviceApps records.
pub const DEVICE_APPS: u16 = 1;

/// Decoded frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Stream-format sentinel, [`MAGIC`] in well-formed streams
    pub magic: u32,
    /// Payload schema identifier
    pub type_tag: u16,
    /// Payload length in bytes
    pub length: u16,
}

impl FrameHeader {
    /// Build a header for a payload of `length` bytes.
    ///
    /// Fails with [`StreamError::InvalidLength`] when the payload does not
    /// fit into the 16-bit length field.
    pub fn new(type_tag: u16, length: usize) -> Result<Self> {
        let length = u16::try_from(length)
            .map_err(|_| StreamError::invalid_length(length, MAX_PAYLOAD_LEN))?;
        Ok(Self {
            magic: MAGIC,
            type_tag,
            length,
        })
    }

    /// Encode the header into its fixed byte layout.
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        LittleEndian::write_u32(&mut buf[0..4], self.magic);
        LittleEndian::write_u16(&mut buf[4..6], self.type_tag);
        LittleEndian::write_u16(&mut buf[6..8], self.length);
        buf
    }

    /// Decode a header from the first [`HEADER_LEN`] bytes of `bytes`.
    ///
    /// Does not validate the magic sentinel; see [`FrameHeader::has_valid_magic`].
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(StreamError::truncated_header(bytes.len()));
        }

        Ok(Self {
            magic: LittleEndian::read_u32(&bytes[0..4]),
            type_tag: LittleEndian::read_u16(&bytes[4..6]),
            length: LittleEndian::read_u16(&bytes[6..8]),
        })
    }

    /// Check whether the header starts with [`MAGIC`].
    pub fn has_valid_magic(&self) -> bool {
        self.magic == MAGIC
    }

    /// Payload length as `usize`.
    pub fn payload_len(&self) -> usize {
        self.length as usize
    }

    /// Total frame size, header included.
    pub fn frame_len(&self) -> usize {
        HEADER_LEN + self.payload_len()
    }
}

/// Encode a header for a payload of `length` bytes with the given type tag.
pub fn encode_header(type_tag: u16, length: usize) -> Result<[u8; HEADER_LEN]> {
    FrameHeader::new(type_tag, length).map(|h| h.encode())
}

/// A raw frame: header plus undecoded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Offset of the header within the decompressed stream
    pub offset: u64,
    /// Frame header
    pub header: FrameHeader,
    /// Payload bytes, exactly `header.length` long
    pub payload: Vec<u8>,
}

impl Frame {
    /// Type tag of this frame.
    pub fn type_tag(&self) -> u16 {
        self.header.type_tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout_is_little_endian() {
        let bytes = encode_header(DEVICE_APPS, 0x0102).unwrap();
        assert_eq!(bytes, [0xFF, 0xFF, 0xFF, 0xFF, 0x01, 0x00, 0x02, 0x01]);
    }

    #[test]
    fn test_decode_encoded_header() {
        let header = FrameHeader::new(7, 300).unwrap();
        let decoded = FrameHeader::decode(&header.encode()).unwrap();
        assert_eq!(decoded, header);
        assert!(decoded.has_valid_magic());
        assert_eq!(decoded.payload_len(), 300);
        assert_eq!(decoded.frame_len(), 308);
    }

    #[test]
    fn test_max_length_accepted() {
        let header = FrameHeader::new(DEVICE_APPS, MAX_PAYLOAD_LEN).unwrap();
        assert_eq!(header.length, u16::MAX);
    }

    #[test]
    fn test_length_overflow_rejected() {
        let err = FrameHeader::new(DEVICE_APPS, MAX_PAYLOAD_LEN + 1).unwrap_err();
        assert_eq!(
            err,
            StreamError::InvalidLength {
                length: 65536,
                max: 65535
            }
        );
    }

    #[test]
    fn test_decode_short_input() {
        for len in 0..HEADER_LEN {
            let err = FrameHeader::decode(&vec![0xFF; len]).unwrap_err();
            assert_eq!(err, StreamError::TruncatedHeader { available: len });
        }
    }

    #[test]
    fn test_decode_does_not_check_magic() {
        let bytes = [0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x04, 0x00];
        let header = FrameHeader::decode(&bytes).unwrap();
        assert_eq!(header.magic, 0);
        assert!(!header.has_valid_magic());
        assert_eq!(header.type_tag, 1);
        assert_eq!(header.length, 4);
    }
}
