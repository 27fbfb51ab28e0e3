//! Canonical base62 text form for 128-bit blocks.

const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Number of base62 digits needed for `u128::MAX`.
pub(super) const MAX_LEN: usize = 22;

pub(super) fn encode(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::with_capacity(MAX_LEN);
    while value > 0 {
        digits.push(ALPHABET[(value % 62) as usize]);
        value /= 62;
    }

    digits.iter().rev().map(|&b| b as char).collect()
}

/// Parse a canonical base62 string. Leading zeros, foreign characters and
/// values past `u128::MAX` are rejected so every block has exactly one spelling.
pub(super) fn decode(text: &str) -> Option<u128> {
    if text.is_empty() || text.len() > MAX_LEN {
        return None;
    }
    if text.len() > 1 && text.starts_with('0') {
        return None;
    }

    text.bytes().try_fold(0u128, |acc, byte| {
        let digit = digit_value(byte)?;
        acc.checked_mul(62)?.checked_add(u128::from(digit))
    })
}

fn digit_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'Z' => Some(byte - b'A' + 10),
        b'a'..=b'z' => Some(byte - b'a' + 36),
        _ => None,
    }
}
