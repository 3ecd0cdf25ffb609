//! # Signature Verifier
//!
//! Recovers the Ethereum-style address that produced a signature over a
//! plaintext message, using the standard personal-message signing scheme
//! (EIP-191 prefixing + secp256k1 public key recovery).
//!
//! ## Architecture
//!
//! Pure domain crate: no I/O, no global state. Verification is a
//! deterministic function of its inputs.
//!
//! ## Security Notes
//!
//! - **Malleability (EIP-2)**: signatures with a high S value are rejected
//! - **Scalar range**: R and S must be in [1, n-1], checked in constant time
//! - Address comparison is byte equality on parsed addresses, so hex casing
//!   never affects identity

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;

// Re-export public API
pub use domain::ecdsa::{
    address_from_pubkey, eip191_hash, keccak256, recover_signer, sign_message, verify_signer,
};
pub use domain::entities::{Address, EcdsaSignature};
pub use domain::errors::SignatureError;

// Signing-side key type, re-exported for clients and tests.
pub use k256::ecdsa::SigningKey;
