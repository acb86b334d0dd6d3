#![no_main]

use bitmessage_codec::Getpubkey;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for version in 2..=4 {
        let _ = Getpubkey::deserialize(version, data);
    }
});
