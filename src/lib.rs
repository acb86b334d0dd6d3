//! # Bitmessage Codec
//!
//! Byte-exact conversion between the Bitmessage wire format and in-memory
//! records for two families of data:
//!
//! - **Addresses**: `BM-` strings carrying a version, a stream number and the
//!   ripe (hash) of a key pair
//! - **Pubkey objects**: requests for a key (`getpubkey`) and the four shapes
//!   of key announcement (`pubkey` v2, v3, encrypted v4, decrypted v4)
//!
//! All decoders treat their input as hostile. Malformed, truncated or
//! oversized data is rejected with a [`ProtocolError`] naming the offending
//! field; nothing panics.
//!
//! Signing, encryption, proof of work and transport belong to other layers.
//!
//! ## Example
//! ```rust
//! use bitmessage_codec::{Address, Getpubkey};
//!
//! let addr: Address = "BM-2cWy7cvHoq3f1rYMerRJp8PT653jjSuEdY".parse()?;
//! assert_eq!(addr.version, 4);
//! assert_eq!(addr.encode()?, "BM-2cWy7cvHoq3f1rYMerRJp8PT653jjSuEdY");
//!
//! let request = addr.getpubkey_request()?;
//! assert!(matches!(request, Getpubkey::V4(_)));
//! # Ok::<(), bitmessage_codec::ProtocolError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod address;
pub mod config;
pub mod core;
pub mod error;
pub mod objects;
pub mod utils;

pub use address::Address;
pub use config::{CodecConfig, LimitsConfig};
pub use error::{ProtocolError, Result};
pub use objects::{
    Behaviour, Getpubkey, GetpubkeyV3, GetpubkeyV4, Pubkey, PubkeyEncryptedV4, PubkeyKind,
    PubkeyV2, PubkeyV3, WireObject,
};
