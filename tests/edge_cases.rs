#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Adversarial and boundary inputs from untrusted peers
//! Truncation, oversize claims, non-canonical encodings and payload caps

use bitmessage_codec::config::{LimitsConfig, MAX_OBJECT_PAYLOAD_SIZE, PUBKEY_V2_LEN, TAG_LEN};
use bitmessage_codec::core::base58;
use bitmessage_codec::error::ProtocolError;
use bitmessage_codec::{
    Address, Behaviour, Getpubkey, GetpubkeyV3, GetpubkeyV4, Pubkey, PubkeyEncryptedV4,
    PubkeyKind, PubkeyV2, PubkeyV3, WireObject,
};

fn v3_prefix() -> Vec<u8> {
    PubkeyV2 {
        behaviour: Behaviour::default(),
        signing_key: [0x11; 64],
        encryption_key: [0x22; 64],
    }
    .to_wire()
}

// ============================================================================
// ADDRESS EDGE CASES
// ============================================================================

#[test]
fn test_address_empty_and_prefix_only() {
    assert!(matches!(
        Address::decode(""),
        Err(ProtocolError::InvalidEncoding(_))
    ));
    assert!(matches!(
        Address::decode("BM-"),
        Err(ProtocolError::InvalidEncoding(_))
    ));
}

#[test]
fn test_address_checksum_only() {
    // Exactly four bytes: an empty payload whose checksum does not match
    let text = format!("BM-{}", base58::encode(&[0xde, 0xad, 0xbe, 0xef]));
    assert!(matches!(
        Address::decode(&text),
        Err(ProtocolError::ChecksumMismatch { .. })
    ));
}

#[test]
fn test_address_leading_zero_glyph_means_version_zero() {
    // A valid checksum over [0x00, 0x01, ripe...] still fails on the version
    let mut data = vec![0x00, 0x01];
    data.extend_from_slice(&[0x42; 20]);
    let text = format!("BM-{}", base58::encode(&with_checksum(data)));

    assert!(text.starts_with("BM-1"));
    assert!(matches!(
        Address::decode(&text),
        Err(ProtocolError::UnsupportedVersion(0))
    ));
}

#[test]
fn test_address_truncated_varint_names_field() {
    // Payload is a lone 0xfd marker with a valid checksum
    let text = format!("BM-{}", base58::encode(&with_checksum(vec![0xfd])));
    let err = Address::decode(&text).unwrap_err();
    assert_eq!(err.field(), Some("version"));

    // Version fine, stream varint truncated
    let text = format!("BM-{}", base58::encode(&with_checksum(vec![0x04, 0xfe, 0x00])));
    let err = Address::decode(&text).unwrap_err();
    assert_eq!(err.field(), Some("stream"));
}

#[test]
fn test_address_non_minimal_version_varint() {
    let mut data = vec![0xfd, 0x00, 0x04, 0x01];
    data.extend_from_slice(&[0x42; 20]);
    let text = format!("BM-{}", base58::encode(&with_checksum(data)));

    let err = Address::decode(&text).unwrap_err();
    assert_eq!(err.field(), Some("version"));
    assert!(matches!(err.root_cause(), ProtocolError::NonCanonicalVarint));
}

#[test]
fn test_address_huge_stream() {
    let addr = Address::new(4, u64::MAX, &[0x77; 20]).unwrap();
    let text = addr.encode().unwrap();
    assert_eq!(Address::decode(&text).unwrap(), addr);
}

#[test]
fn test_address_all_zero_v3_ripe() {
    // Two zeros stripped, 18 zero bytes remain and decode back
    let addr = Address::new(3, 1, &[0u8; 20]).unwrap();
    let text = addr.encode().unwrap();
    assert_eq!(Address::decode(&text).unwrap(), addr);
}

#[test]
fn test_address_long_garbage() {
    let text = format!("BM-{}", "z".repeat(4096));
    assert!(Address::decode(&text).is_err());
}

fn with_checksum(mut data: Vec<u8>) -> Vec<u8> {
    use sha2::{Digest, Sha512};
    let hash = Sha512::digest(Sha512::digest(&data));
    data.extend_from_slice(&hash[..4]);
    data
}

// ============================================================================
// GETPUBKEY EDGE CASES
// ============================================================================

#[test]
fn test_getpubkey_empty() {
    assert!(GetpubkeyV3::from_wire(&[]).is_err());
    assert!(GetpubkeyV4::from_wire(&[]).is_err());
    assert!(Getpubkey::deserialize(2, &[]).is_err());
}

#[test]
fn test_getpubkey_oversized_payload() {
    let limits = LimitsConfig::default();
    let payload = vec![0u8; MAX_OBJECT_PAYLOAD_SIZE + 1];
    assert!(matches!(
        GetpubkeyV4::from_wire_with_limits(&payload, &limits),
        Err(ProtocolError::OversizedPayload { .. })
    ));
}

// ============================================================================
// PUBKEY EDGE CASES
// ============================================================================

#[test]
fn test_v2_empty_payload() {
    let err = PubkeyV2::from_wire(&[]).unwrap_err();
    assert_eq!(err.field(), Some("behaviour"));
}

#[test]
fn test_v3_max_width_length_prefix() {
    // Declares 2^64 - 1 signature bytes with nothing behind it
    let mut payload = v3_prefix();
    payload.extend_from_slice(&[0x01, 0x01]);
    payload.push(0xff);
    payload.extend_from_slice(&u64::MAX.to_be_bytes());

    let err = PubkeyV3::from_wire(&payload).unwrap_err();
    assert_eq!(err.field(), Some("signature"));
    assert!(matches!(err.root_cause(), ProtocolError::OversizedField { .. }));
}

#[test]
fn test_v3_length_within_limit_but_beyond_payload() {
    let mut payload = v3_prefix();
    payload.extend_from_slice(&[0x01, 0x01, 0xfd, 0x03, 0xe8]);
    payload.extend_from_slice(&[0x30; 10]);

    let err = PubkeyV3::from_wire(&payload).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        ProtocolError::UnexpectedEof {
            needed: 1000,
            remaining: 10
        }
    ));
}

#[test]
fn test_v3_non_canonical_difficulty() {
    let mut payload = v3_prefix();
    payload.extend_from_slice(&[0xfd, 0x00, 0x10, 0x01, 0x00]);

    let err = PubkeyV3::from_wire(&payload).unwrap_err();
    assert_eq!(err.field(), Some("nonce_trials_per_byte"));
    assert!(matches!(err.root_cause(), ProtocolError::NonCanonicalVarint));
}

#[test]
fn test_v3_trailing_bytes() {
    let mut payload = v3_prefix();
    payload.extend_from_slice(&[0x01, 0x01, 0x00, 0xaa]);

    let err = PubkeyV3::from_wire(&payload).unwrap_err();
    assert_eq!(err.field(), Some("signature"));
    assert!(matches!(err.root_cause(), ProtocolError::TrailingBytes(1)));
}

#[test]
fn test_encrypted_v4_payload_cap() {
    let limits = LimitsConfig {
        max_object_payload_size: 1024,
        ..LimitsConfig::default()
    };
    let payload = vec![0u8; 1025];

    assert!(matches!(
        Pubkey::deserialize(PubkeyKind::EncryptedV4, &payload, &limits),
        Err(ProtocolError::OversizedPayload {
            size: 1025,
            limit: 1024
        })
    ));
}

#[test]
fn test_encrypted_v4_takes_only_the_slice() {
    // The caller bounds the payload; bytes outside the slice are never read
    let mut buffer = vec![0x01; TAG_LEN];
    buffer.extend_from_slice(b"object-one");
    let boundary = buffer.len();
    buffer.extend_from_slice(b"next-object");

    let key = PubkeyEncryptedV4::from_wire(&buffer[..boundary]).unwrap();
    assert_eq!(key.encrypted_data, b"object-one");
}

#[test]
fn test_v2_payload_decoded_as_v3_fails() {
    let payload = v3_prefix();
    assert_eq!(payload.len(), PUBKEY_V2_LEN);

    let err = Pubkey::deserialize(PubkeyKind::V3, &payload, &LimitsConfig::default()).unwrap_err();
    assert_eq!(err.field(), Some("nonce_trials_per_byte"));
}

#[test]
fn test_repeated_adversarial_input() {
    let garbage: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    for len in 0..garbage.len() {
        let slice = &garbage[..len];
        let _ = GetpubkeyV3::from_wire(slice);
        let _ = GetpubkeyV4::from_wire(slice);
        let _ = PubkeyV2::from_wire(slice);
        let _ = PubkeyV3::from_wire(slice);
        let _ = PubkeyEncryptedV4::from_wire(slice);
    }
}
