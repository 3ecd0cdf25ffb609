//! Ledger configuration.
//!
//! The administrator identity and challenge phrase are explicit immutable
//! configuration injected at construction, not free-floating constants, so
//! tests can run with their own admin keys.

use serde::{Deserialize, Serialize};
use signet_crypto::Address;

/// Default administrator wallet address.
const DEFAULT_ADMIN: [u8; 20] = [
    0xd6, 0xd3, 0xfe, 0xaa, 0x76, 0x9e, 0x03, 0xef, 0xeb, 0xef, 0x94, 0xfb, 0x10, 0xd3, 0x65,
    0xd9, 0x7a, 0xfa, 0xc0, 0x11,
];

/// Fixed plaintext the administrator signs to prove key possession.
///
/// Not stored, not rotated, no nonce: a captured admin signature over this
/// phrase is replayable indefinitely. Accepted weakness; key possession is
/// the only factor.
pub const DEFAULT_CHALLENGE_PHRASE: &str =
    "I am the administrator of SIGNET and I request to view the messages.";

/// Ledger configuration: the single administrator identity and the challenge
/// phrase it must sign to read the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// The one address allowed to list and export messages.
    pub admin_address: Address,
    /// Exact plaintext the administrator must sign.
    pub challenge_phrase: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            admin_address: Address::from_bytes(DEFAULT_ADMIN),
            challenge_phrase: DEFAULT_CHALLENGE_PHRASE.to_string(),
        }
    }
}

impl LedgerConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.challenge_phrase.is_empty() {
            return Err(ConfigError::EmptyChallengePhrase);
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// The admin challenge phrase must not be empty.
    #[error("challenge phrase cannot be empty")]
    EmptyChallengePhrase,
    /// General configuration error.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
