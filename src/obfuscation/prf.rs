//! Keyed pseudo-random function shared by both ciphers.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::ObfuscationError;

type HmacSha256 = Hmac<Sha256>;

/// Domain byte for the integrity check folded into every block.
pub(super) const CHECK_DOMAIN: u8 = 0x00;

/// Domain byte for Feistel round functions.
pub(super) const ROUND_DOMAIN: u8 = 0x01;

/// HMAC-SHA256 keyed once at construction and cloned for every evaluation.
#[derive(Clone)]
pub(super) struct Prf {
    mac: HmacSha256,
}

impl Prf {
    pub(super) fn new(key: &[u8], label: &[u8]) -> Result<Self, ObfuscationError> {
        if key.is_empty() {
            return Err(ObfuscationError::InvalidKey("key must not be empty"));
        }

        let mut mac = HmacSha256::new_from_slice(key)
            .map_err(|_| ObfuscationError::InvalidKey("key rejected by HMAC"))?;
        mac.update(label);

        Ok(Self { mac })
    }

    /// Evaluate the function on `input` and return the first 64 bits of the digest.
    pub(super) fn eval(&self, domain: u8, round: u8, input: u64) -> u64 {
        let mut mac = self.mac.clone();
        mac.update(&[domain, round]);
        mac.update(&input.to_be_bytes());

        let digest = mac.finalize().into_bytes();
        let mut word = [0u8; 8];
        word.copy_from_slice(&digest[..8]);
        u64::from_be_bytes(word)
    }
}
