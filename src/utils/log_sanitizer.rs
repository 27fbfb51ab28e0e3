//! Log sanitization utilities for masking opaque identifiers.
//!
//! Tokens and page keys are capabilities of a sort: anyone holding one can ask
//! for the record or page it names. Only a short prefix is written to logs.
//! Both arrive from clients, so every logged character is escaped the way
//! `{:?}` escapes it and the length is bounded.

/// Number of leading token characters kept visible.
const VISIBLE_CHARS: usize = 4;

/// Longest page key timestamp written to logs (the canonical timestamp length).
const MAX_TIMESTAMP_CHARS: usize = 24;

/// Escape control characters, quotes and backslashes, keeping at most `limit` characters.
fn escaped_prefix(text: &str, limit: usize) -> String {
    let mut out: String = text.chars().take(limit).flat_map(char::escape_debug).collect();
    if text.chars().nth(limit).is_some() {
        out.push_str("...");
    }
    out
}

/// Mask an external id token for safe logging.
///
/// Shows only the first 4 characters (or fewer if the token is shorter)
/// followed by asterisks.
///
/// # Examples
/// ```ignore
/// assert_eq!(mask_token("3xK9mPqL2vR8"), "3xK9***");
/// assert_eq!(mask_token("ab"), "ab***");
/// ```
pub fn mask_token(token: &str) -> String {
    let visible: String = token
        .chars()
        .take(VISIBLE_CHARS)
        .flat_map(char::escape_debug)
        .collect();
    format!("{}***", visible)
}

/// Mask a page key for safe logging.
///
/// The timestamp part is escaped and cut to the canonical timestamp length;
/// the id token after the last `-` is masked.
///
/// # Examples
/// ```ignore
/// assert_eq!(
///     mask_page_key("2024-05-01T10:00:00.000Z-123456789012345678901234567890"),
///     "2024-05-01T10:00:00.000Z-1234***"
/// );
/// ```
pub fn mask_page_key(page_key: &str) -> String {
    match page_key.rsplit_once('-') {
        Some((timestamp, token)) => format!(
            "{}-{}",
            escaped_prefix(timestamp, MAX_TIMESTAMP_CHARS),
            mask_token(token)
        ),
        None => mask_token(page_key),
    }
}
