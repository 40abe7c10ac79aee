use crate::{GameError, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Trait for commitment schemes
pub trait CommitmentScheme {
    type Key: ?Sized;
    type Digest;

    fn commit(key: &Self::Key, message: &[u8]) -> Result<Self::Digest>;
    fn verify(digest: &[u8], key: &Self::Key, message: &[u8]) -> Result<bool>;
}

/// HMAC-SHA256 keyed commitment
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256Scheme;

impl HmacSha256Scheme {
    fn mac(key: &[u8], message: &[u8]) -> Result<HmacSha256> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
            .map_err(|e| GameError::Crypto(format!("HMAC key rejected: {}", e)))?;
        mac.update(message);
        Ok(mac)
    }
}

impl CommitmentScheme for HmacSha256Scheme {
    type Key = [u8];
    type Digest = [u8; 32];

    fn commit(key: &[u8], message: &[u8]) -> Result<[u8; 32]> {
        let bytes = Self::mac(key, message)?.finalize().into_bytes();
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&bytes);
        Ok(digest)
    }

    // verify_slice compares in constant time
    fn verify(digest: &[u8], key: &[u8], message: &[u8]) -> Result<bool> {
        Ok(Self::mac(key, message)?.verify_slice(digest).is_ok())
    }
}
