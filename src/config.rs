//! # Configuration Management
//!
//! Protocol constants and the runtime configuration for the codec.
//!
//! The wire layouts are fixed by the network, so the constants here are not
//! tunable. What a deployment does tune is how much untrusted data a decoder
//! will accept before rejecting it, and how the crate logs.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()` or `from_toml()`
//! - Direct instantiation with defaults
//!
//! The environment is never consulted; embedding applications decide where
//! configuration comes from.
//!
//! ## Security Considerations
//! - The default object cap (256 KiB) matches the network's own object limit
//! - Signature and ciphertext caps bound any allocation driven by a length
//!   prefix read from a peer

use crate::error::constants::{
    ERR_CONFIG_OPEN, ERR_CONFIG_PARSE, ERR_CONFIG_READ, ERR_CONFIG_WRITE,
};
use crate::error::{ProtocolError, Result};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::Level;

/// Literal marker every address string starts with
pub const ADDRESS_PREFIX: &str = "BM-";

/// Address versions this codec understands
pub const SUPPORTED_ADDRESS_VERSIONS: [u64; 3] = [2, 3, 4];

/// Length of a ripe (RIPEMD-160 of the public keys)
pub const RIPE_LEN: usize = 20;

/// Length of a v4 tag
pub const TAG_LEN: usize = 32;

/// Length of an uncompressed secp256k1 public key without its 0x04 prefix
pub const KEY_LEN: usize = 64;

/// Length of the address checksum
pub const CHECKSUM_LEN: usize = 4;

/// Length of the behaviour bitfield
pub const BEHAVIOUR_LEN: usize = 4;

/// Fixed size of a v2 pubkey payload
pub const PUBKEY_V2_LEN: usize = BEHAVIOUR_LEN + KEY_LEN + KEY_LEN;

/// Shortest ripe a v2/v3 address may carry on the wire (two zero bytes stripped)
pub const MIN_RIPE_LEN_V3: usize = 18;

/// Shortest ripe a v4 address may carry on the wire
pub const MIN_RIPE_LEN_V4: usize = 4;

/// Network cap on an object's payload (2^18 bytes)
pub const MAX_OBJECT_PAYLOAD_SIZE: usize = 1 << 18;

/// Default cap on a pubkey signature
pub const MAX_SIGNATURE_LEN: usize = 1024;

/// Values below this are raised to it by every peer
pub const NETWORK_MIN_NONCE_TRIALS_PER_BYTE: u64 = 1000;

/// Values below this are raised to it by every peer
pub const NETWORK_MIN_EXTRA_BYTES: u64 = 1000;

/// Main codec configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CodecConfig {
    /// Size limits applied to untrusted input
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CodecConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| ProtocolError::ConfigError(format!("{ERR_CONFIG_OPEN}: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| ProtocolError::ConfigError(format!("{ERR_CONFIG_READ}: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| ProtocolError::ConfigError(format!("{ERR_CONFIG_PARSE}: {e}")))
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)
            .map_err(|e| ProtocolError::ConfigError(format!("{ERR_CONFIG_WRITE}: {e}")))?;

        Ok(())
    }

    /// Validate the configuration
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        self.limits.validate()
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProtocolError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Limits applied to payloads handed to the object codecs
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Largest object payload a decoder accepts
    pub max_object_payload_size: usize,

    /// Largest signature a v3/v4 pubkey may declare
    pub max_signature_len: usize,

    /// Largest ciphertext an encrypted v4 pubkey may carry
    pub max_encrypted_len: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_object_payload_size: MAX_OBJECT_PAYLOAD_SIZE,
            max_signature_len: MAX_SIGNATURE_LEN,
            max_encrypted_len: MAX_OBJECT_PAYLOAD_SIZE - TAG_LEN,
        }
    }
}

impl LimitsConfig {
    /// Validate limits configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.max_object_payload_size < PUBKEY_V2_LEN {
            errors.push(format!(
                "Max object payload size too small: {} (minimum: {PUBKEY_V2_LEN})",
                self.max_object_payload_size
            ));
        } else if self.max_object_payload_size > MAX_OBJECT_PAYLOAD_SIZE {
            errors.push(format!(
                "Max object payload size {} exceeds the network limit of {MAX_OBJECT_PAYLOAD_SIZE}",
                self.max_object_payload_size
            ));
        }

        // DER-encoded secp256k1 signatures run up to 72 bytes
        if self.max_signature_len < 72 {
            errors.push(format!(
                "Max signature length too small: {} (minimum: 72)",
                self.max_signature_len
            ));
        } else if self.max_signature_len > self.max_object_payload_size {
            errors.push("Max signature length cannot exceed max object payload size".to_string());
        }

        if self.max_encrypted_len == 0 {
            errors.push("Max encrypted length must be greater than 0".to_string());
        } else if self.max_encrypted_len > self.max_object_payload_size {
            errors.push("Max encrypted length cannot exceed max object payload size".to_string());
        }

        errors
    }
}

/// How [`crate::utils::init_logging`] installs its subscriber.
///
/// The codec only emits `tracing` events; rejected input is logged at `debug`.
#[serde_as]
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter level when `RUST_LOG` is unset
    #[serde_as(as = "DisplayFromStr")]
    pub level: Level,

    /// Emit JSON lines instead of human-readable text
    pub json: bool,

    /// Include the event target (module path) in each line
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json: false,
            with_target: true,
        }
    }
}
