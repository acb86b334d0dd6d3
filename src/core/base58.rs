//! Base-58 text for address bodies.
//!
//! The buffer is read as one big-endian integer. Leading zero bytes are kept
//! as the alphabet's zero glyph (`'1'`) rather than dropped.

use crate::error::constants::ERR_INVALID_BASE58;
use crate::error::{ProtocolError, Result};

/// Encode `bytes` as base-58 text.
pub fn encode(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

/// Decode base-58 text back into bytes.
///
/// # Errors
/// Returns [`ProtocolError::InvalidEncoding`] for any character outside the
/// alphabet.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    bs58::decode(text)
        .into_vec()
        .map_err(|e| ProtocolError::InvalidEncoding(format!("{ERR_INVALID_BASE58}: {e}")))
}
