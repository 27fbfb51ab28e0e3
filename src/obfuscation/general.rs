//! Alphanumeric tokens for record ids.
//!
//! The 128-bit block `(id, check(id))` is run through a balanced binary Feistel
//! network and written in base62. Decoding inverts the network and rejects any
//! block whose lower half is not the keyed check of its upper half.

use super::base62;
use super::prf::{Prf, CHECK_DOMAIN, ROUND_DOMAIN};
use super::ObfuscationError;

const ROUNDS: u8 = 8;

pub(super) struct GeneralCipher {
    prf: Prf,
}

impl GeneralCipher {
    pub(super) fn new(key: &[u8]) -> Result<Self, ObfuscationError> {
        Ok(Self {
            prf: Prf::new(key, b"general")?,
        })
    }

    pub(super) fn encode(&self, id: u64) -> String {
        let (mut left, mut right) = (id, self.check(id));
        for round in 0..ROUNDS {
            let mixed = left ^ self.prf.eval(ROUND_DOMAIN, round, right);
            left = right;
            right = mixed;
        }

        base62::encode((u128::from(left) << 64) | u128::from(right))
    }

    pub(super) fn decode(&self, token: &str) -> Result<u64, ObfuscationError> {
        let block = base62::decode(token).ok_or(ObfuscationError::InvalidToken)?;

        let (mut left, mut right) = ((block >> 64) as u64, block as u64);
        for round in (0..ROUNDS).rev() {
            let previous = right ^ self.prf.eval(ROUND_DOMAIN, round, left);
            right = left;
            left = previous;
        }

        if right != self.check(left) {
            return Err(ObfuscationError::InvalidToken);
        }
        Ok(left)
    }

    fn check(&self, id: u64) -> u64 {
        self.prf.eval(CHECK_DOMAIN, 0, id)
    }
}
