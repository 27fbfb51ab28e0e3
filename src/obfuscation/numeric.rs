//! Fixed-width digit tokens, safe to embed in composite values.
//!
//! The block `id * 10^10 + check(id)` lives in `[0, 10^30)`. It is split into two
//! 15-digit halves and permuted by a Feistel network that mixes with addition
//! modulo `10^15`, so every intermediate value stays a 15-digit decimal.

use super::prf::{Prf, CHECK_DOMAIN, ROUND_DOMAIN};
use super::ObfuscationError;

const ROUNDS: u8 = 10;
const HALF_DIGITS: usize = 15;
const HALF_MODULUS: u64 = 1_000_000_000_000_000;
const CHECK_MODULUS: u64 = 10_000_000_000;

/// Length of every numeric token.
pub const TOKEN_DIGITS: usize = 2 * HALF_DIGITS;

pub(super) struct NumericCipher {
    prf: Prf,
}

impl NumericCipher {
    pub(super) fn new(key: &[u8]) -> Result<Self, ObfuscationError> {
        Ok(Self {
            prf: Prf::new(key, b"numeric")?,
        })
    }

    pub(super) fn encode(&self, id: u64) -> String {
        // u64::MAX * 10^10 + 10^10 < 10^30, so the block always fits both halves.
        let block = u128::from(id) * u128::from(CHECK_MODULUS) + u128::from(self.check(id));
        let mut left = (block / u128::from(HALF_MODULUS)) as u64;
        let mut right = (block % u128::from(HALF_MODULUS)) as u64;

        for round in 0..ROUNDS {
            let mixed = (left + self.round(round, right)) % HALF_MODULUS;
            left = right;
            right = mixed;
        }

        format!("{left:0width$}{right:0width$}", width = HALF_DIGITS)
    }

    pub(super) fn decode(&self, token: &str) -> Result<u64, ObfuscationError> {
        if token.len() != TOKEN_DIGITS || !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ObfuscationError::InvalidToken);
        }

        let mut left = parse_half(&token[..HALF_DIGITS])?;
        let mut right = parse_half(&token[HALF_DIGITS..])?;

        for round in (0..ROUNDS).rev() {
            let previous = (right + HALF_MODULUS - self.round(round, left)) % HALF_MODULUS;
            right = left;
            left = previous;
        }

        let block = u128::from(left) * u128::from(HALF_MODULUS) + u128::from(right);
        let id = u64::try_from(block / u128::from(CHECK_MODULUS))
            .map_err(|_| ObfuscationError::InvalidToken)?;

        if (block % u128::from(CHECK_MODULUS)) as u64 != self.check(id) {
            return Err(ObfuscationError::InvalidToken);
        }
        Ok(id)
    }

    fn round(&self, round: u8, half: u64) -> u64 {
        self.prf.eval(ROUND_DOMAIN, round, half) % HALF_MODULUS
    }

    fn check(&self, id: u64) -> u64 {
        self.prf.eval(CHECK_DOMAIN, 0, id) % CHECK_MODULUS
    }
}

fn parse_half(digits: &str) -> Result<u64, ObfuscationError> {
    digits
        .parse::<u64>()
        .map_err(|_| ObfuscationError::InvalidToken)
}
