#![no_main]

use bitmessage_codec::{LimitsConfig, Pubkey, PubkeyKind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz every pubkey shape - test for panics and oversized allocations
    let limits = LimitsConfig::default();
    for kind in [
        PubkeyKind::V2,
        PubkeyKind::V3,
        PubkeyKind::EncryptedV4,
        PubkeyKind::DecryptedV4,
    ] {
        if let Ok(key) = Pubkey::deserialize(kind, data, &limits) {
            assert_eq!(key.serialize(), data);
        }
    }
});
