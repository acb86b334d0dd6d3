//! # Core Wire Primitives
//!
//! Building blocks shared by the address and object codecs.
//!
//! ## Components
//! - **Varint**: the network's big-endian variable-length integer
//! - **Base58**: big-endian base-58 text used by address strings
//! - **Reader**: a cursor bounded to exactly one object payload
//!
//! ## Varint Format
//! ```text
//! value < 0xfd          [value(1)]
//! value <= 0xffff       [0xfd] [u16 BE]
//! value <= 0xffffffff   [0xfe] [u32 BE]
//! otherwise             [0xff] [u64 BE]
//! ```
//!
//! ## Security
//! - Every read checks the remaining length before touching the buffer
//! - Length prefixes are compared against what is actually present before
//!   any allocation

pub mod base58;
pub mod reader;
pub mod varint;
