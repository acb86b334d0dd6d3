//! # Object Payload Codecs
//!
//! Wire forms of the public-key request and announcement objects.
//!
//! ## Payload Layouts
//! ```text
//! GetpubkeyV3   [ripe(20)]
//! GetpubkeyV4   [tag(32)]
//! PubkeyV2      [behaviour(4)] [signing_key(64)] [encryption_key(64)]
//! PubkeyV3      PubkeyV2 [nonce_trials_per_byte(varint)] [extra_bytes(varint)]
//!               [signature_length(varint)] [signature(N)]
//! EncryptedV4   [tag(32)] [encrypted_data(rest of payload)]
//! DecryptedV4   same as PubkeyV3
//! ```
//!
//! ## Boundary Contract
//! Every decoder takes a slice holding exactly one object payload. Nothing
//! is read beyond it, and `EncryptedV4` takes everything after its tag, so
//! a caller that passes a longer buffer gets the extra bytes folded into the
//! ciphertext. Slice the payload to the object's length first.

pub mod getpubkey;
pub mod pubkey;

pub use getpubkey::{Getpubkey, GetpubkeyV3, GetpubkeyV4};
pub use pubkey::{Behaviour, Pubkey, PubkeyEncryptedV4, PubkeyKind, PubkeyV2, PubkeyV3};

use crate::config::LimitsConfig;
use crate::core::reader::WireReader;
use crate::error::{ProtocolError, Result};
use bytes::BufMut;
use tracing::{debug, trace};

/// An object payload with a byte-exact wire form.
///
/// Method names stay clear of serde's `serialize`/`deserialize`, since the
/// same types also derive serde for persistence.
pub trait WireObject: Sized {
    /// Name used in logs.
    const NAME: &'static str;

    /// Exact number of bytes `write_to` appends.
    fn wire_len(&self) -> usize;

    /// Append the wire form to `buf`.
    fn write_to<B: BufMut>(&self, buf: &mut B);

    /// Parse one object from a reader bounded to its payload.
    fn read_from(reader: WireReader<'_>, limits: &LimitsConfig) -> Result<Self>;

    /// Encode into a fresh buffer.
    fn to_wire(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.wire_len());
        self.write_to(&mut out);
        out
    }

    /// Decode a payload, enforcing the size caps in `limits`.
    ///
    /// `payload` must be exactly the object's payload.
    fn from_wire_with_limits(payload: &[u8], limits: &LimitsConfig) -> Result<Self> {
        let result = if payload.len() > limits.max_object_payload_size {
            Err(ProtocolError::OversizedPayload {
                size: payload.len(),
                limit: limits.max_object_payload_size,
            })
        } else {
            Self::read_from(WireReader::new(payload), limits)
        };

        match &result {
            Ok(_) => trace!(object = Self::NAME, len = payload.len(), "Decoded object payload"),
            Err(e) => debug!(object = Self::NAME, len = payload.len(), error = %e, "Rejected object payload"),
        }
        result
    }

    /// Decode a payload under the default limits.
    fn from_wire(payload: &[u8]) -> Result<Self> {
        Self::from_wire_with_limits(payload, &LimitsConfig::default())
    }
}
