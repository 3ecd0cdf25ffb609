//! Error types for signature parsing and recovery.

use thiserror::Error;

/// Errors that can occur while parsing or recovering a signature.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature or address is not valid hex, has the wrong length, or
    /// carries out-of-range scalar components.
    #[error("malformed signature")]
    InvalidFormat,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28).
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    /// Signature has a high S value (EIP-2 malleability protection).
    #[error("malleable signature (high S value)")]
    MalleableSignature,

    /// Public key recovery failed cryptographically.
    #[error("failed to recover public key")]
    RecoveryFailed,

    /// Recovered signer does not match the expected address.
    #[error("signer mismatch: expected {expected}, got {actual}")]
    SignerMismatch {
        expected: crate::domain::entities::Address,
        actual: crate::domain::entities::Address,
    },

    /// Producing a signature failed (degenerate key material).
    #[error("signing failed")]
    SigningFailed,
}
