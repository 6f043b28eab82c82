//! Keccak-256 digests for checking serialized headers against recorded hashes.
//!
//! Selection, assembly and encoding never hash; this is the comparison side.

use crate::encoding::strip_hex_prefix;
use crate::error::FixtureError;
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

/// 32-byte hash value (Keccak-256 digest).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct KeccakHash([u8; 32]);

impl KeccakHash {
    pub const ZERO: Self = Self([0u8; 32]);
    pub const LEN: usize = 32;

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Create from a byte slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, FixtureError> {
        let bytes: [u8; 32] = slice.try_into().map_err(|_| {
            FixtureError::InvalidHash(format!("expected 32 bytes, got {}", slice.len()))
        })?;
        Ok(Self(bytes))
    }

    /// Compute Keccak-256 of data
    pub fn compute(data: &[u8]) -> Self {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&Keccak256::digest(data));
        Self(bytes)
    }

    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }

    /// Convert to hex string (no prefix)
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for KeccakHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Debug for KeccakHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeccakHash({})", self)
    }
}

impl FromStr for KeccakHash {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(strip_hex_prefix(s))
            .map_err(|e| FixtureError::InvalidHash(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

impl AsRef<[u8]> for KeccakHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digests() {
        assert_eq!(
            KeccakHash::compute(b"").to_hex(),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        // empty trie root: keccak(rlp(""))
        assert_eq!(
            KeccakHash::compute(&[0x80]).to_hex(),
            "56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421"
        );
        // empty uncles hash: keccak(rlp([]))
        assert_eq!(
            KeccakHash::compute(&[0xc0]).to_hex(),
            "1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347"
        );
    }

    #[test]
    fn test_hash_hex_roundtrip() {
        let hash = KeccakHash::compute(b"test");
        let parsed: KeccakHash = hash.to_string().parse().unwrap();
        assert_eq!(hash, parsed);
        let unprefixed: KeccakHash = hash.to_hex().parse().unwrap();
        assert_eq!(hash, unprefixed);
    }

    #[test]
    fn test_hash_rejects_bad_length() {
        assert!(matches!(
            "0xabcd".parse::<KeccakHash>(),
            Err(FixtureError::InvalidHash(_))
        ));
        assert!(KeccakHash::from_slice(&[0u8; 31]).is_err());
    }

    #[test]
    fn test_hash_zero() {
        assert!(KeccakHash::ZERO.is_zero());
        assert!(!KeccakHash::compute(b"test").is_zero());
    }
}
