#![no_main]

use bitmessage_codec::Address;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any string that decodes must re-encode to the same string
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(addr) = Address::decode(text) {
            if addr.version == 4 {
                assert_eq!(addr.encode().ok().as_deref(), Some(text));
            }
        }
    }
});
