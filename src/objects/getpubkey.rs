//! Requests for the public key behind an address.
//!
//! Pre-v4 addresses ask by ripe. v4 addresses ask by tag, so relaying
//! nodes cannot link the request to the address.

use super::WireObject;
use crate::config::{LimitsConfig, RIPE_LEN, TAG_LEN};
use crate::core::reader::WireReader;
use crate::error::{FieldContext, ProtocolError, Result};
use bytes::BufMut;
use serde::{Deserialize, Serialize};

/// Request for the key behind a v2/v3 address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GetpubkeyV3 {
    pub ripe: [u8; RIPE_LEN],
}

/// Request for the key behind a v4 address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GetpubkeyV4 {
    pub tag: [u8; TAG_LEN],
}

/// Either request, chosen by the address version it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Getpubkey {
    V3(GetpubkeyV3),
    V4(GetpubkeyV4),
}

// The whole payload is the field; anything but exactly N bytes is rejected.
fn exact<const N: usize>(payload: &[u8]) -> Result<[u8; N]> {
    <[u8; N]>::try_from(payload).map_err(|_| ProtocolError::InvalidInputLength {
        expected: N,
        actual: payload.len(),
    })
}

impl WireObject for GetpubkeyV3 {
    const NAME: &'static str = "getpubkey_v3";

    fn wire_len(&self) -> usize {
        RIPE_LEN
    }

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&self.ripe);
    }

    fn read_from(mut reader: WireReader<'_>, _limits: &LimitsConfig) -> Result<Self> {
        let ripe = exact(reader.take_rest()).field("ripe")?;
        Ok(Self { ripe })
    }
}

impl WireObject for GetpubkeyV4 {
    const NAME: &'static str = "getpubkey_v4";

    fn wire_len(&self) -> usize {
        TAG_LEN
    }

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&self.tag);
    }

    fn read_from(mut reader: WireReader<'_>, _limits: &LimitsConfig) -> Result<Self> {
        let tag = exact(reader.take_rest()).field("tag")?;
        Ok(Self { tag })
    }
}

impl Getpubkey {
    /// Decode a request for an address of `address_version`.
    pub fn deserialize(address_version: u64, payload: &[u8]) -> Result<Self> {
        match address_version {
            2 | 3 => GetpubkeyV3::from_wire(payload).map(Getpubkey::V3),
            4 => GetpubkeyV4::from_wire(payload).map(Getpubkey::V4),
            v => Err(ProtocolError::UnsupportedVersion(v)),
        }
    }

    pub fn serialize(&self) -> Vec<u8> {
        match self {
            Getpubkey::V3(req) => req.to_wire(),
            Getpubkey::V4(req) => req.to_wire(),
        }
    }
}
