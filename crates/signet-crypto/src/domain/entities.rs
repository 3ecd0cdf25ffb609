//! Core data structures: addresses and wire-format signatures.

use super::errors::SignatureError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Ethereum-style address: last 20 bytes of keccak256(pubkey).
///
/// Parsed from hex case-insensitively and rendered lowercase, so two
/// addresses that differ only in hex casing compare equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 20]);

impl Address {
    /// Wrap raw address bytes.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_part = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        if hex_part.len() != 40 {
            return Err(SignatureError::InvalidFormat);
        }
        let raw = hex::decode(hex_part).map_err(|_| SignatureError::InvalidFormat)?;
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&raw);
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// ECDSA signature on the secp256k1 curve, as produced by `personal_sign`
/// wallets: 65 bytes `r || s || v`, hex encoded on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

impl EcdsaSignature {
    /// Parse the 65-byte `r || s || v` hex encoding, with optional `0x`.
    pub fn from_hex(s: &str) -> Result<Self, SignatureError> {
        let hex_part = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        if hex_part.len() != 130 {
            return Err(SignatureError::InvalidFormat);
        }
        let raw = hex::decode(hex_part).map_err(|_| SignatureError::InvalidFormat)?;

        let mut r = [0u8; 32];
        let mut sig_s = [0u8; 32];
        r.copy_from_slice(&raw[..32]);
        sig_s.copy_from_slice(&raw[32..64]);

        Ok(Self { r, s: sig_s, v: raw[64] })
    }

    /// Encode as `0x`-prefixed `r || s || v` hex.
    pub fn to_hex(&self) -> String {
        let mut raw = Vec::with_capacity(65);
        raw.extend_from_slice(&self.r);
        raw.extend_from_slice(&self.s);
        raw.push(self.v);
        format!("0x{}", hex::encode(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN: &str = "0xd6d3FeAa769e03EfEBeF94fB10D365D97aFAC011";

    #[test]
    fn address_parse_is_case_insensitive() {
        let mixed: Address = ADMIN.parse().unwrap();
        let lower: Address = ADMIN.to_lowercase().parse().unwrap();
        let upper: Address = format!("0x{}", ADMIN[2..].to_uppercase()).parse().unwrap();
        assert_eq!(mixed, lower);
        assert_eq!(mixed, upper);
    }

    #[test]
    fn address_displays_lowercase() {
        let addr: Address = ADMIN.parse().unwrap();
        assert_eq!(addr.to_string(), ADMIN.to_lowercase());
    }

    #[test]
    fn address_parse_without_prefix() {
        let addr: Address = ADMIN[2..].parse().unwrap();
        assert_eq!(addr.to_string(), ADMIN.to_lowercase());
    }

    #[test]
    fn address_rejects_bad_input() {
        assert!("0x1234".parse::<Address>().is_err());
        assert!("not hex at all".parse::<Address>().is_err());
        assert!(format!("0x{}", "g".repeat(40)).parse::<Address>().is_err());
    }

    #[test]
    fn address_serde_round_trip() {
        let addr: Address = ADMIN.parse().unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", ADMIN.to_lowercase()));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn signature_hex_round_trip() {
        let sig = EcdsaSignature {
            r: [0x11; 32],
            s: [0x22; 32],
            v: 27,
        };
        let encoded = sig.to_hex();
        assert_eq!(encoded.len(), 2 + 130);
        assert_eq!(EcdsaSignature::from_hex(&encoded).unwrap(), sig);
    }

    #[test]
    fn signature_rejects_wrong_length() {
        assert_eq!(
            EcdsaSignature::from_hex("0xdeadbeef"),
            Err(SignatureError::InvalidFormat)
        );
        assert_eq!(
            EcdsaSignature::from_hex(&"ff".repeat(64)),
            Err(SignatureError::InvalidFormat)
        );
    }

    #[test]
    fn signature_rejects_non_hex() {
        let bogus = "zz".repeat(65);
        assert_eq!(
            EcdsaSignature::from_hex(&bogus),
            Err(SignatureError::InvalidFormat)
        );
    }
}
