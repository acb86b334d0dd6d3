//! Public-key announcements.
//!
//! Four shapes exist on the network. v2 and v3 are sent in the clear. v4 is
//! sent encrypted under a key derived from the address, with only the tag
//! visible; once decrypted by an outside party its plaintext follows the v3
//! layout.
//!
//! Which shape a payload holds is not self-describing. The caller picks it
//! from the object header (version) and its own state (whether it has
//! decrypted the payload) via [`PubkeyKind::select`].

use super::WireObject;
use crate::config::{
    LimitsConfig, KEY_LEN, NETWORK_MIN_EXTRA_BYTES, NETWORK_MIN_NONCE_TRIALS_PER_BYTE,
    PUBKEY_V2_LEN, TAG_LEN,
};
use crate::core::reader::WireReader;
use crate::core::varint::{encode_varint, varint_len};
use crate::error::{FieldContext, ProtocolError, Result};
use bytes::BufMut;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

/// SEC1 tag for an uncompressed point, omitted on the wire
const UNCOMPRESSED_POINT_TAG: u8 = 0x04;

/// Bitfield of optional behaviours a key owner supports.
///
/// Bits are numbered from the most significant end, so bit 31 is `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Behaviour(pub u32);

impl Behaviour {
    /// Bit 31: the owner sends acknowledgements
    pub const DOES_ACK: u32 = 1;
    /// Bit 30: messages must include the destination ripe/tag
    pub const INCLUDE_DESTINATION: u32 = 1 << 1;

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, flag: u32) -> bool {
        self.0 & flag == flag
    }

    pub fn does_ack(self) -> bool {
        self.contains(Self::DOES_ACK)
    }

    pub fn include_destination(self) -> bool {
        self.contains(Self::INCLUDE_DESTINATION)
    }
}

/// Plaintext v2 pubkey.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PubkeyV2 {
    pub behaviour: Behaviour,
    /// Uncompressed secp256k1 signing key without its 0x04 prefix
    #[serde_as(as = "Bytes")]
    pub signing_key: [u8; KEY_LEN],
    /// Uncompressed secp256k1 encryption key without its 0x04 prefix
    #[serde_as(as = "Bytes")]
    pub encryption_key: [u8; KEY_LEN],
}

/// Plaintext v3 pubkey; also the layout of a decrypted v4 pubkey.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PubkeyV3 {
    pub behaviour: Behaviour,
    #[serde_as(as = "Bytes")]
    pub signing_key: [u8; KEY_LEN],
    #[serde_as(as = "Bytes")]
    pub encryption_key: [u8; KEY_LEN],
    /// Proof-of-work difficulty the owner demands per payload byte
    pub nonce_trials_per_byte: u64,
    /// Bytes added to the payload length when computing difficulty
    pub extra_bytes: u64,
    /// ECDSA signature over the object header and the fields above
    #[serde_as(as = "Bytes")]
    pub signature: Vec<u8>,
}

/// Encrypted v4 pubkey as it travels the network.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PubkeyEncryptedV4 {
    pub tag: [u8; TAG_LEN],
    /// Ciphertext; its length is whatever follows the tag in the payload
    #[serde_as(as = "Bytes")]
    pub encrypted_data: Vec<u8>,
}

/// Wire shape of a pubkey payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PubkeyKind {
    V2,
    V3,
    EncryptedV4,
    DecryptedV4,
}

/// Any pubkey the network carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pubkey {
    V2(PubkeyV2),
    V3(PubkeyV3),
    EncryptedV4(PubkeyEncryptedV4),
    DecryptedV4(PubkeyV3),
}

fn write_keys<B: BufMut>(
    buf: &mut B,
    behaviour: Behaviour,
    signing_key: &[u8; KEY_LEN],
    encryption_key: &[u8; KEY_LEN],
) {
    buf.put_u32(behaviour.bits());
    buf.put_slice(signing_key);
    buf.put_slice(encryption_key);
}

fn read_keys(reader: &mut WireReader<'_>) -> Result<(Behaviour, [u8; KEY_LEN], [u8; KEY_LEN])> {
    let behaviour = Behaviour(reader.read_u32().field("behaviour")?);
    let signing_key = reader.read_array().field("signing_key")?;
    let encryption_key = reader.read_array().field("encryption_key")?;
    Ok((behaviour, signing_key, encryption_key))
}

fn uncompressed(key: &[u8; KEY_LEN]) -> [u8; KEY_LEN + 1] {
    let mut out = [UNCOMPRESSED_POINT_TAG; KEY_LEN + 1];
    out[1..].copy_from_slice(key);
    out
}

impl PubkeyV2 {
    /// Signing key in 65-byte SEC1 uncompressed form.
    pub fn signing_key_uncompressed(&self) -> [u8; KEY_LEN + 1] {
        uncompressed(&self.signing_key)
    }

    /// Encryption key in 65-byte SEC1 uncompressed form.
    pub fn encryption_key_uncompressed(&self) -> [u8; KEY_LEN + 1] {
        uncompressed(&self.encryption_key)
    }
}

impl WireObject for PubkeyV2 {
    const NAME: &'static str = "pubkey_v2";

    fn wire_len(&self) -> usize {
        PUBKEY_V2_LEN
    }

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        write_keys(buf, self.behaviour, &self.signing_key, &self.encryption_key);
    }

    fn read_from(mut reader: WireReader<'_>, _limits: &LimitsConfig) -> Result<Self> {
        let (behaviour, signing_key, encryption_key) = read_keys(&mut reader)?;
        reader.finish().field("encryption_key")?;
        Ok(Self {
            behaviour,
            signing_key,
            encryption_key,
        })
    }
}

impl PubkeyV3 {
    pub fn signing_key_uncompressed(&self) -> [u8; KEY_LEN + 1] {
        uncompressed(&self.signing_key)
    }

    pub fn encryption_key_uncompressed(&self) -> [u8; KEY_LEN + 1] {
        uncompressed(&self.encryption_key)
    }

    /// Difficulty actually applied; peers raise anything below the network minimum.
    pub fn effective_nonce_trials_per_byte(&self) -> u64 {
        self.nonce_trials_per_byte.max(NETWORK_MIN_NONCE_TRIALS_PER_BYTE)
    }

    pub fn effective_extra_bytes(&self) -> u64 {
        self.extra_bytes.max(NETWORK_MIN_EXTRA_BYTES)
    }

    /// Serialized fields covered by the signature, `behaviour` through `extra_bytes`.
    ///
    /// The signer prepends the object header; that lives outside this codec.
    pub fn signed_fields(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.signed_fields_len());
        self.write_signed_fields(&mut out);
        out
    }

    fn signed_fields_len(&self) -> usize {
        PUBKEY_V2_LEN + varint_len(self.nonce_trials_per_byte) + varint_len(self.extra_bytes)
    }

    fn write_signed_fields<B: BufMut>(&self, buf: &mut B) {
        write_keys(buf, self.behaviour, &self.signing_key, &self.encryption_key);
        encode_varint(self.nonce_trials_per_byte, buf);
        encode_varint(self.extra_bytes, buf);
    }
}

impl WireObject for PubkeyV3 {
    const NAME: &'static str = "pubkey_v3";

    fn wire_len(&self) -> usize {
        let sig_len = self.signature.len();
        self.signed_fields_len() + varint_len(sig_len as u64) + sig_len
    }

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        self.write_signed_fields(buf);
        encode_varint(self.signature.len() as u64, buf);
        buf.put_slice(&self.signature);
    }

    fn read_from(mut reader: WireReader<'_>, limits: &LimitsConfig) -> Result<Self> {
        let (behaviour, signing_key, encryption_key) = read_keys(&mut reader)?;
        let nonce_trials_per_byte = reader.read_varint().field("nonce_trials_per_byte")?;
        let extra_bytes = reader.read_varint().field("extra_bytes")?;

        let declared = reader.read_varint().field("signature_length")?;
        let sig_len = reader
            .checked_len(declared, limits.max_signature_len)
            .field("signature")?;
        let signature = reader.read_slice(sig_len).field("signature")?.to_vec();
        reader.finish().field("signature")?;

        Ok(Self {
            behaviour,
            signing_key,
            encryption_key,
            nonce_trials_per_byte,
            extra_bytes,
            signature,
        })
    }
}

impl PubkeyEncryptedV4 {
    /// Decrypt with an outside routine and parse the plaintext as a v3 layout.
    ///
    /// `decrypt` receives the tag and the ciphertext and returns the plaintext.
    pub fn decrypt_with<F>(&self, decrypt: F, limits: &LimitsConfig) -> Result<Pubkey>
    where
        F: FnOnce(&[u8; TAG_LEN], &[u8]) -> Result<Vec<u8>>,
    {
        let plaintext = decrypt(&self.tag, &self.encrypted_data)?;
        Pubkey::deserialize(PubkeyKind::DecryptedV4, &plaintext, limits)
    }
}

impl WireObject for PubkeyEncryptedV4 {
    const NAME: &'static str = "pubkey_encrypted_v4";

    fn wire_len(&self) -> usize {
        TAG_LEN + self.encrypted_data.len()
    }

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&self.tag);
        buf.put_slice(&self.encrypted_data);
    }

    fn read_from(mut reader: WireReader<'_>, limits: &LimitsConfig) -> Result<Self> {
        let tag = reader.read_array().field("tag")?;

        let rest = reader.take_rest();
        if rest.len() > limits.max_encrypted_len {
            return Err(ProtocolError::OversizedField {
                declared: rest.len() as u64,
                limit: limits.max_encrypted_len,
            })
            .field("encrypted_data");
        }

        Ok(Self {
            tag,
            encrypted_data: rest.to_vec(),
        })
    }
}

impl PubkeyKind {
    /// Pick the wire shape from the object version and whether the payload
    /// is still encrypted.
    pub fn select(version: u64, encrypted: bool) -> Result<Self> {
        match (version, encrypted) {
            (2, false) => Ok(PubkeyKind::V2),
            (3, false) => Ok(PubkeyKind::V3),
            (4, true) => Ok(PubkeyKind::EncryptedV4),
            (4, false) => Ok(PubkeyKind::DecryptedV4),
            (2 | 3, true) => Err(ProtocolError::InvalidEncoding(format!(
                "version {version} pubkeys are never encrypted"
            ))),
            (v, _) => Err(ProtocolError::UnsupportedVersion(v)),
        }
    }

    pub fn version(self) -> u64 {
        match self {
            PubkeyKind::V2 => 2,
            PubkeyKind::V3 => 3,
            PubkeyKind::EncryptedV4 | PubkeyKind::DecryptedV4 => 4,
        }
    }

    pub fn is_encrypted(self) -> bool {
        matches!(self, PubkeyKind::EncryptedV4)
    }
}

impl Pubkey {
    /// Decode a payload of the given shape.
    ///
    /// `payload` must be exactly the object's payload; see the module docs.
    pub fn deserialize(kind: PubkeyKind, payload: &[u8], limits: &LimitsConfig) -> Result<Self> {
        match kind {
            PubkeyKind::V2 => PubkeyV2::from_wire_with_limits(payload, limits).map(Pubkey::V2),
            PubkeyKind::V3 => PubkeyV3::from_wire_with_limits(payload, limits).map(Pubkey::V3),
            PubkeyKind::EncryptedV4 => {
                PubkeyEncryptedV4::from_wire_with_limits(payload, limits).map(Pubkey::EncryptedV4)
            }
            PubkeyKind::DecryptedV4 => {
                PubkeyV3::from_wire_with_limits(payload, limits).map(Pubkey::DecryptedV4)
            }
        }
    }

    pub fn serialize(&self) -> Vec<u8> {
        match self {
            Pubkey::V2(key) => key.to_wire(),
            Pubkey::V3(key) | Pubkey::DecryptedV4(key) => key.to_wire(),
            Pubkey::EncryptedV4(key) => key.to_wire(),
        }
    }

    pub fn kind(&self) -> PubkeyKind {
        match self {
            Pubkey::V2(_) => PubkeyKind::V2,
            Pubkey::V3(_) => PubkeyKind::V3,
            Pubkey::EncryptedV4(_) => PubkeyKind::EncryptedV4,
            Pubkey::DecryptedV4(_) => PubkeyKind::DecryptedV4,
        }
    }

    pub fn version(&self) -> u64 {
        self.kind().version()
    }

    pub fn is_encrypted(&self) -> bool {
        self.kind().is_encrypted()
    }
}
