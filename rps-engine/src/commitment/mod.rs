pub mod scheme;

pub use scheme::{CommitmentScheme, HmacSha256Scheme};

use crate::{GameError, Result};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const KEY_SIZE: usize = 32;
pub const DIGEST_SIZE: usize = 32;

/// Per-round HMAC key. Hex-encoded on the wire, redacted in `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SecretKey([u8; KEY_SIZE]);

impl SecretKey {
    /// Fresh key from a cryptographically secure source
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let mut bytes = [0u8; KEY_SIZE];
        hex::decode_to_slice(s.trim(), &mut bytes)?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

impl From<SecretKey> for String {
    fn from(key: SecretKey) -> Self {
        key.to_hex()
    }
}

impl TryFrom<String> for SecretKey {
    type Error = GameError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

/// HMAC of a move under a [`SecretKey`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MoveCommitment([u8; DIGEST_SIZE]);

impl MoveCommitment {
    pub fn new(key: &SecretKey, mv: &str) -> Result<Self> {
        HmacSha256Scheme::commit(key.as_bytes(), mv.as_bytes()).map(Self)
    }

    /// Accepts upper- or lowercase hex.
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut bytes = [0u8; DIGEST_SIZE];
        hex::decode_to_slice(s.trim(), &mut bytes)?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn verify(&self, key: &SecretKey, mv: &str) -> Result<bool> {
        HmacSha256Scheme::verify(&self.0, key.as_bytes(), mv.as_bytes())
    }
}

impl fmt::Display for MoveCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<MoveCommitment> for String {
    fn from(commitment: MoveCommitment) -> Self {
        commitment.to_hex()
    }
}

impl TryFrom<String> for MoveCommitment {
    type Error = GameError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

/// Checks a revealed key and move against a published HMAC, all given as text.
pub fn verify_reveal(key_hex: &str, mv: &str, commitment_hex: &str) -> Result<()> {
    let key = SecretKey::from_hex(key_hex)?;
    let commitment = MoveCommitment::from_hex(commitment_hex)?;

    if commitment.verify(&key, mv)? {
        Ok(())
    } else {
        Err(GameError::CommitmentMismatch)
    }
}
