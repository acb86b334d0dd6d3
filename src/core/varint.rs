//! Variable-length unsigned integers as used throughout the wire protocol.
//!
//! Integers are big-endian. Decoding rejects encodings that are not minimal,
//! since peers on the network treat those as malformed.

use crate::error::{ProtocolError, Result};
use bytes::{Buf, BufMut};

const MARKER_U16: u8 = 0xfd;
const MARKER_U32: u8 = 0xfe;
const MARKER_U64: u8 = 0xff;

/// Number of bytes `value` occupies on the wire.
pub const fn varint_len(value: u64) -> usize {
    if value < MARKER_U16 as u64 {
        1
    } else if value <= u16::MAX as u64 {
        3
    } else if value <= u32::MAX as u64 {
        5
    } else {
        9
    }
}

/// Append the encoding of `value` to `buf`.
pub fn encode_varint<B: BufMut>(value: u64, buf: &mut B) {
    if value < MARKER_U16 as u64 {
        buf.put_u8(value as u8);
    } else if value <= u16::MAX as u64 {
        buf.put_u8(MARKER_U16);
        buf.put_u16(value as u16);
    } else if value <= u32::MAX as u64 {
        buf.put_u8(MARKER_U32);
        buf.put_u32(value as u32);
    } else {
        buf.put_u8(MARKER_U64);
        buf.put_u64(value);
    }
}

/// Encode `value` into a fresh buffer.
pub fn varint_bytes(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(varint_len(value));
    encode_varint(value, &mut out);
    out
}

/// Decode one varint from the front of `buf`, advancing it past the bytes read.
///
/// On error `buf` may have been partially advanced.
///
/// # Errors
/// - [`ProtocolError::UnexpectedEof`] if `buf` ends inside the varint
/// - [`ProtocolError::NonCanonicalVarint`] if a shorter encoding exists
pub fn decode_varint(buf: &mut &[u8]) -> Result<u64> {
    ensure(buf, 1)?;
    let marker = buf.get_u8();

    let (value, min) = match marker {
        MARKER_U16 => {
            ensure(buf, 2)?;
            (u64::from(buf.get_u16()), MARKER_U16 as u64)
        }
        MARKER_U32 => {
            ensure(buf, 4)?;
            (u64::from(buf.get_u32()), u64::from(u16::MAX) + 1)
        }
        MARKER_U64 => {
            ensure(buf, 8)?;
            (buf.get_u64(), u64::from(u32::MAX) + 1)
        }
        small => return Ok(u64::from(small)),
    };

    if value < min {
        return Err(ProtocolError::NonCanonicalVarint);
    }
    Ok(value)
}

fn ensure(buf: &[u8], needed: usize) -> Result<()> {
    if buf.len() < needed {
        return Err(ProtocolError::UnexpectedEof {
            needed,
            remaining: buf.len(),
        });
    }
    Ok(())
}
