//! # Personal-message recovery (secp256k1)
//!
//! Implements the standard `personal_sign` scheme: the plaintext is prefixed
//! with `"\x19Ethereum Signed Message:\n" + byte length`, hashed with
//! Keccak256, and the signer address is recovered from the signature over
//! that hash.
//!
//! ## Security Notes
//!
//! - **Malleability (EIP-2)**: S must be strictly less than n/2
//! - **Scalar range**: R and S must be in [1, n-1]
//! - Range checks use the `subtle` crate for constant-time comparison

use super::entities::{Address, EcdsaSignature};
use super::errors::SignatureError;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use sha3::{Digest, Keccak256};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// secp256k1 curve order n.
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// n/2, the EIP-2 malleability boundary.
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&hasher.finalize());
    hash
}

/// EIP-191 personal-message hash of a plaintext.
pub fn eip191_hash(message: &str) -> [u8; 32] {
    let mut data = Vec::with_capacity(32 + message.len());
    data.extend_from_slice(b"\x19Ethereum Signed Message:\n");
    data.extend_from_slice(message.len().to_string().as_bytes());
    data.extend_from_slice(message.as_bytes());
    keccak256(&data)
}

/// Derive the address from an uncompressed public key.
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let encoded = public_key.to_encoded_point(false);
    // Skip the 0x04 prefix, hash x || y, keep the last 20 bytes.
    let hash = keccak256(&encoded.as_bytes()[1..]);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[12..]);
    Address::from_bytes(bytes)
}

/// Recover the address that signed `message` under the personal-sign scheme.
///
/// Deterministic and side-effect free. Fails with a [`SignatureError`] when
/// the signature cannot be parsed or recovery fails cryptographically.
pub fn recover_signer(
    message: &str,
    signature: &EcdsaSignature,
) -> Result<Address, SignatureError> {
    let recovery_id = parse_recovery_id(signature.v)?;

    if !is_valid_scalar(&signature.r) || !is_valid_scalar(&signature.s) {
        return Err(SignatureError::InvalidFormat);
    }
    if !is_low_s(&signature.s) {
        return Err(SignatureError::MalleableSignature);
    }

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);
    let parsed = Signature::from_slice(&sig_bytes);
    sig_bytes.zeroize();
    let sig = parsed.map_err(|_| SignatureError::InvalidFormat)?;

    let message_hash = eip191_hash(message);
    let recovered_key = VerifyingKey::recover_from_prehash(&message_hash, &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    Ok(address_from_pubkey(&recovered_key))
}

/// Recover the signer and require that it matches `expected`.
pub fn verify_signer(
    message: &str,
    signature: &EcdsaSignature,
    expected: Address,
) -> Result<Address, SignatureError> {
    let recovered = recover_signer(message, signature)?;
    if recovered != expected {
        return Err(SignatureError::SignerMismatch {
            expected,
            actual: recovered,
        });
    }
    Ok(recovered)
}

/// Produce a personal-sign signature over `message`.
///
/// Output is low-S normalized (EIP-2) with v in {27, 28}, matching what
/// wallets emit. Counterpart to [`recover_signer`]; used by clients and tests.
pub fn sign_message(message: &str, key: &SigningKey) -> Result<EcdsaSignature, SignatureError> {
    let message_hash = eip191_hash(message);
    let (sig, recid) = key
        .sign_prehash_recoverable(&message_hash)
        .map_err(|_| SignatureError::SigningFailed)?;

    // Normalizing S flips the recovery id parity.
    let (sig, recid) = match sig.normalize_s() {
        Some(normalized) => {
            let flipped = RecoveryId::try_from(recid.to_byte() ^ 1)
                .map_err(|_| SignatureError::SigningFailed)?;
            (normalized, flipped)
        }
        None => (sig, recid),
    };

    let sig_bytes = sig.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&sig_bytes[..32]);
    s.copy_from_slice(&sig_bytes[32..]);

    Ok(EcdsaSignature {
        r,
        s,
        v: recid.to_byte() + 27,
    })
}

/// Constant-time strict less-than on big-endian 32-byte scalars.
fn ct_less(a: &[u8; 32], b: &[u8; 32]) -> Choice {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let undecided = !(less | greater);
        less |= undecided & Choice::from((a[i] < b[i]) as u8);
        greater |= undecided & Choice::from((a[i] > b[i]) as u8);
    }

    less
}

/// Scalar in [1, n-1], checked in constant time.
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }
    (!is_zero & ct_less(scalar, &SECP256K1_ORDER)).into()
}

/// S strictly below n/2 per EIP-2.
fn is_low_s(s: &[u8; 32]) -> bool {
    ct_less(s, &SECP256K1_HALF_ORDER).into()
}

/// Parse the recovery id from a wire v value (0, 1, 27, or 28).
fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(SignatureError::InvalidRecoveryId(v)),
    };
    RecoveryId::try_from(id).map_err(|_| SignatureError::InvalidRecoveryId(v))
}
