//! # Address Codec
//!
//! Conversion between [`Address`] records and `BM-` address strings.
//!
//! ## Wire Format
//! ```text
//! "BM-" + base58( [version(varint)] [stream(varint)] [ripe'] [checksum(4)] )
//! checksum = SHA-512(SHA-512(version || stream || ripe'))[0..4]
//! ```
//!
//! `ripe'` is the ripe with leading zero bytes stripped to shorten the string:
//! - **v2/v3**: at most two leading zero bytes are removed
//! - **v4**: every leading zero byte is removed, and a decoder must reject a
//!   v4 ripe that still starts with zero
//!
//! Decoding pads the ripe back to 20 bytes, so each address value has exactly
//! one valid v4 string.

use crate::config::{
    ADDRESS_PREFIX, CHECKSUM_LEN, MIN_RIPE_LEN_V3, MIN_RIPE_LEN_V4, RIPE_LEN,
    SUPPORTED_ADDRESS_VERSIONS, TAG_LEN,
};
use crate::core::base58;
use crate::core::reader::WireReader;
use crate::core::varint::{encode_varint, varint_len};
use crate::error::constants::{ERR_ADDRESS_TOO_SHORT, ERR_MISSING_PREFIX};
use crate::error::{FieldContext, ProtocolError, Result};
use crate::objects::{Getpubkey, GetpubkeyV3, GetpubkeyV4};
use bytes::BufMut;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use std::str::FromStr;
use tracing::{debug, trace, warn};

/// Leading zero bytes v2/v3 encoding may strip
const MAX_STRIPPED_V3: usize = 2;

/// A network address: which key (ripe) lives in which stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    pub version: u64,
    pub stream: u64,
    pub ripe: [u8; RIPE_LEN],
}

fn check_version(version: u64) -> Result<()> {
    if SUPPORTED_ADDRESS_VERSIONS.contains(&version) {
        Ok(())
    } else {
        Err(ProtocolError::UnsupportedVersion(version))
    }
}

fn double_sha512(data: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(&Sha512::digest(Sha512::digest(data)));
    out
}

fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&double_sha512(data)[..CHECKSUM_LEN]);
    out
}

/// Strip leading zero bytes the way `version` requires.
fn normalize_ripe(version: u64, ripe: &[u8; RIPE_LEN]) -> Result<&[u8]> {
    let zeros = ripe.iter().take_while(|b| **b == 0).count();
    match version {
        2 | 3 => Ok(&ripe[zeros.min(MAX_STRIPPED_V3)..]),
        4 => Ok(&ripe[zeros..]),
        v => Err(ProtocolError::UnsupportedVersion(v)),
    }
}

/// Check a wire ripe against `version`'s bounds and pad it back to 20 bytes.
fn restore_ripe(version: u64, wire: &[u8]) -> Result<[u8; RIPE_LEN]> {
    let min_len = match version {
        2 | 3 => MIN_RIPE_LEN_V3,
        4 => {
            if wire.first() == Some(&0) {
                return Err(ProtocolError::MalformedPadding);
            }
            MIN_RIPE_LEN_V4
        }
        v => return Err(ProtocolError::UnsupportedVersion(v)),
    };

    if !(min_len..=RIPE_LEN).contains(&wire.len()) {
        return Err(ProtocolError::InvalidRipeLength {
            version,
            length: wire.len(),
        });
    }

    let mut ripe = [0u8; RIPE_LEN];
    ripe[RIPE_LEN - wire.len()..].copy_from_slice(wire);
    Ok(ripe)
}

impl Address {
    /// Build an address, checking the version and that `ripe` is 20 bytes.
    pub fn new(version: u64, stream: u64, ripe: &[u8]) -> Result<Self> {
        let ripe = <[u8; RIPE_LEN]>::try_from(ripe).map_err(|_| ProtocolError::InvalidRipeLength {
            version,
            length: ripe.len(),
        })?;
        check_version(version)?;
        Ok(Self {
            version,
            stream,
            ripe,
        })
    }

    /// Encode to a `BM-` string.
    ///
    /// A v4 ripe with more than 16 leading zero bytes still encodes, but the
    /// resulting string carries fewer than 4 ripe bytes and [`Address::decode`]
    /// rejects it with [`ProtocolError::InvalidRipeLength`]. Such an address
    /// cannot round-trip; a `warn!` event is emitted when one is produced.
    ///
    /// ```rust
    /// use bitmessage_codec::{Address, ProtocolError};
    ///
    /// let mut ripe = [0u8; 20];
    /// ripe[18..].copy_from_slice(&[0x01, 0x02]);
    /// let text = Address { version: 4, stream: 1, ripe }.encode()?;
    ///
    /// assert!(matches!(
    ///     Address::decode(&text),
    ///     Err(ProtocolError::InvalidRipeLength { version: 4, length: 2 })
    /// ));
    /// # Ok::<(), ProtocolError>(())
    /// ```
    ///
    /// # Errors
    /// Returns [`ProtocolError::UnsupportedVersion`] unless the version is 2, 3 or 4.
    pub fn encode(&self) -> Result<String> {
        let ripe = normalize_ripe(self.version, &self.ripe)?;
        if self.version == 4 && ripe.len() < MIN_RIPE_LEN_V4 {
            warn!(
                ripe_len = ripe.len(),
                "Encoding v4 address whose ripe is too short to decode"
            );
        }

        let mut data = Vec::with_capacity(
            varint_len(self.version) + varint_len(self.stream) + ripe.len() + CHECKSUM_LEN,
        );
        encode_varint(self.version, &mut data);
        encode_varint(self.stream, &mut data);
        data.put_slice(ripe);
        let sum = checksum(&data);
        data.put_slice(&sum);

        Ok(format!("{ADDRESS_PREFIX}{}", base58::encode(&data)))
    }

    /// Decode a `BM-` string.
    ///
    /// # Errors
    /// - [`ProtocolError::InvalidEncoding`] for a missing prefix or bad base58
    /// - [`ProtocolError::ChecksumMismatch`] if the trailing checksum is wrong
    /// - [`ProtocolError::DeserializeFailed`] if the version or stream varint is malformed
    /// - [`ProtocolError::UnsupportedVersion`] unless the version is 2, 3 or 4
    /// - [`ProtocolError::MalformedPadding`] for a v4 ripe starting with zero
    /// - [`ProtocolError::InvalidRipeLength`] for a ripe outside the version's bound
    pub fn decode(text: &str) -> Result<Self> {
        let result = Self::decode_inner(text);
        match &result {
            Ok(addr) => trace!(version = addr.version, stream = addr.stream, "Decoded address"),
            Err(e) => debug!(error = %e, "Rejected address"),
        }
        result
    }

    fn decode_inner(text: &str) -> Result<Self> {
        let body = text
            .strip_prefix(ADDRESS_PREFIX)
            .ok_or_else(|| ProtocolError::InvalidEncoding(ERR_MISSING_PREFIX.to_string()))?;
        let data = base58::decode(body)?;

        let (payload, actual) = data
            .split_last_chunk::<CHECKSUM_LEN>()
            .ok_or_else(|| ProtocolError::InvalidEncoding(ERR_ADDRESS_TOO_SHORT.to_string()))?;
        let expected = checksum(payload);
        if *actual != expected {
            return Err(ProtocolError::ChecksumMismatch {
                expected,
                actual: *actual,
            });
        }

        let mut reader = WireReader::new(payload);
        let version = reader.read_varint().field("version")?;
        let stream = reader.read_varint().field("stream")?;
        let ripe = restore_ripe(version, reader.take_rest())?;

        Ok(Self {
            version,
            stream,
            ripe,
        })
    }

    /// `SHA-512(SHA-512(version || stream || ripe))` over the full 20-byte ripe.
    fn address_data_hash(&self) -> [u8; 64] {
        let mut data =
            Vec::with_capacity(varint_len(self.version) + varint_len(self.stream) + RIPE_LEN);
        encode_varint(self.version, &mut data);
        encode_varint(self.stream, &mut data);
        data.put_slice(&self.ripe);
        double_sha512(&data)
    }

    /// Tag identifying this address in v4 requests and encrypted pubkeys.
    pub fn tag(&self) -> [u8; TAG_LEN] {
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&self.address_data_hash()[TAG_LEN..]);
        tag
    }

    /// Private key material for decrypting this address's v4 pubkey.
    pub fn pubkey_decryption_key(&self) -> [u8; 32] {
        let mut key = [0u8; 32];
        key.copy_from_slice(&self.address_data_hash()[..32]);
        key
    }

    /// The getpubkey request a node sends to learn this address's key.
    pub fn getpubkey_request(&self) -> Result<Getpubkey> {
        match self.version {
            2 | 3 => Ok(Getpubkey::V3(GetpubkeyV3 { ripe: self.ripe })),
            4 => Ok(Getpubkey::V4(GetpubkeyV4 { tag: self.tag() })),
            v => Err(ProtocolError::UnsupportedVersion(v)),
        }
    }
}

impl FromStr for Address {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}
