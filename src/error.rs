//! # Error Types
//!
//! Error handling for the address and object codecs.
//!
//! Every input this crate decodes comes from an untrusted peer, so every
//! failure is reported as a value. Nothing in the decode paths panics.
//!
//! ## Error Categories
//! - **Address errors**: bad prefix or alphabet, checksum mismatch, unsupported
//!   version, ripe length outside the version's bound, non-canonical padding
//! - **Object errors**: a field that under- or over-runs its expected size,
//!   always reported through [`ProtocolError::DeserializeFailed`] with the
//!   field's name
//! - **Primitive errors**: truncated or non-minimal varints, oversized length
//!   prefixes, trailing bytes
//! - **Configuration errors**: unreadable or invalid configuration
//!
//! ## Example Usage
//! ```rust
//! use bitmessage_codec::error::ProtocolError;
//! use bitmessage_codec::objects::{GetpubkeyV4, WireObject};
//! use tracing::{debug, error};
//!
//! match GetpubkeyV4::from_wire(&[0u8; 31]) {
//!     Ok(req) => debug!(tag_len = req.tag.len(), "Decoded getpubkey"),
//!     Err(ProtocolError::DeserializeFailed { field, source }) => {
//!         error!(field, error = %source, "Rejected getpubkey")
//!     }
//!     Err(e) => error!(error = %e, "Rejected getpubkey"),
//! }
//! ```

use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Address text errors
    pub const ERR_MISSING_PREFIX: &str = "Address is missing the BM- prefix";
    pub const ERR_INVALID_BASE58: &str = "Address is not a valid base58 string";
    pub const ERR_ADDRESS_TOO_SHORT: &str = "Address payload is shorter than its checksum";

    /// Configuration errors
    pub const ERR_CONFIG_OPEN: &str = "Failed to open config file";
    pub const ERR_CONFIG_READ: &str = "Failed to read config file";
    pub const ERR_CONFIG_PARSE: &str = "Failed to parse TOML";
    pub const ERR_CONFIG_WRITE: &str = "Failed to write config file";
}

// ProtocolError is the primary error type for all codec operations
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Invalid input length: expected {expected} bytes, got {actual}")]
    InvalidInputLength { expected: usize, actual: usize },

    #[error("Unsupported address version: {0}")]
    UnsupportedVersion(u64),

    #[error("Checksum mismatch: expected {expected:02x?}, got {actual:02x?}")]
    ChecksumMismatch { expected: [u8; 4], actual: [u8; 4] },

    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("Invalid ripe length {length} for address version {version}")]
    InvalidRipeLength { version: u64, length: usize },

    #[error("Version 4 ripe begins with a zero byte (not canonically encoded)")]
    MalformedPadding,

    #[error("Failed to deserialize {field}: {source}")]
    DeserializeFailed {
        field: &'static str,
        source: Box<ProtocolError>,
    },

    #[error("Unexpected end of data: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("Varint is not minimally encoded")]
    NonCanonicalVarint,

    #[error("Declared length {declared} exceeds limit of {limit} bytes")]
    OversizedField { declared: u64, limit: usize },

    #[error("Payload too large: {size} bytes (limit {limit})")]
    OversizedPayload { size: usize, limit: usize },

    #[error("{0} unexpected trailing bytes")]
    TrailingBytes(usize),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ProtocolError {
    /// Innermost cause, skipping any `DeserializeFailed` wrappers.
    pub fn root_cause(&self) -> &ProtocolError {
        match self {
            ProtocolError::DeserializeFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Name of the outermost field that failed, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ProtocolError::DeserializeFailed { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Attaches a field name to a failed read as it propagates.
pub trait FieldContext<T> {
    /// Wrap the error in [`ProtocolError::DeserializeFailed`] naming `field`.
    fn field(self, field: &'static str) -> Result<T>;
}

impl<T> FieldContext<T> for Result<T> {
    fn field(self, field: &'static str) -> Result<T> {
        self.map_err(|e| ProtocolError::DeserializeFailed {
            field,
            source: Box::new(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_context_wraps_error() {
        let res: Result<()> = Err(ProtocolError::UnexpectedEof {
            needed: 4,
            remaining: 1,
        });
        let err = res.field("behaviour").unwrap_err();

        assert_eq!(err.field(), Some("behaviour"));
        assert!(matches!(
            err.root_cause(),
            ProtocolError::UnexpectedEof {
                needed: 4,
                remaining: 1
            }
        ));
        assert_eq!(
            err.to_string(),
            "Failed to deserialize behaviour: Unexpected end of data: needed 4 bytes, 1 remaining"
        );
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;

        let err = ProtocolError::DeserializeFailed {
            field: "stream",
            source: Box::new(ProtocolError::NonCanonicalVarint),
        };
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("Varint is not minimally encoded"));
    }

    #[test]
    fn test_root_cause_of_plain_error_is_itself() {
        let err = ProtocolError::MalformedPadding;
        assert!(matches!(err.root_cause(), ProtocolError::MalformedPadding));
        assert_eq!(err.field(), None);
    }
}
