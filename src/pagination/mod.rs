//! Keyset pagination over the `(created_at DESC, id DESC)` ordering.
//!
//! A page key names the last row of a page as `"<timestamp>-<numeric token>"`.
//! The next page holds the rows strictly after that row in feed order, which
//! is the predicate [`PageKey::precedes`] evaluates. Timestamp ties are broken
//! by id, so no row is repeated or skipped across page boundaries.
//!
//! Page keys encode a position, not a snapshot: rows inserted behind the
//! boundary after a page was served are not returned by later pages.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use thiserror::Error;

use crate::constants::{PAGE_KEY_DELIMITER, PAGE_KEY_TIMESTAMP_FORMAT};
use crate::obfuscation::{IdCodec, TokenMode};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationError {
    /// The key failed to parse or verify. Deliberately carries no detail.
    #[error("invalid page key")]
    InvalidPageKey,
}

/// Decoded boundary row of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageKey {
    pub created_at: DateTime<Utc>,
    pub id: u64,
}

impl PageKey {
    pub fn new(created_at: DateTime<Utc>, id: u64) -> Self {
        Self { created_at, id }
    }

    /// Serialize as `"<timestamp>-<numeric token>"`.
    pub fn encode(&self, codec: &IdCodec) -> String {
        format!(
            "{}{}{}",
            self.created_at.format(PAGE_KEY_TIMESTAMP_FORMAT),
            PAGE_KEY_DELIMITER,
            codec.encode(self.id, TokenMode::Numeric)
        )
    }

    /// Parse a key produced by [`PageKey::encode`].
    ///
    /// The key is split on its last delimiter. The timestamp must be in the exact
    /// canonical format and the token must verify under the numeric cipher.
    pub fn decode(raw: &str, codec: &IdCodec) -> Result<Self, PaginationError> {
        let (timestamp, token) = raw
            .rsplit_once(PAGE_KEY_DELIMITER)
            .ok_or(PaginationError::InvalidPageKey)?;

        let created_at = NaiveDateTime::parse_from_str(timestamp, PAGE_KEY_TIMESTAMP_FORMAT)
            .map_err(|_| PaginationError::InvalidPageKey)?
            .and_utc();
        if created_at.format(PAGE_KEY_TIMESTAMP_FORMAT).to_string() != timestamp {
            return Err(PaginationError::InvalidPageKey);
        }

        let id = codec
            .decode(token, TokenMode::Numeric)
            .map_err(|_| PaginationError::InvalidPageKey)?;

        Ok(Self { created_at, id })
    }

    /// Whether the row `(created_at, id)` comes strictly after this boundary in
    /// `(created_at DESC, id DESC)` order.
    pub fn precedes(&self, created_at: DateTime<Utc>, id: u64) -> bool {
        created_at < self.created_at || (created_at == self.created_at && id < self.id)
    }
}

/// A bounded page and the key of its last row when more rows remain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<PageKey>,
}

impl<T> Page<T> {
    /// Cut a fetch of up to `page_size + 1` rows down to one page.
    ///
    /// The extra row only signals that another page exists; the boundary is the
    /// last row that is actually returned.
    pub fn from_overfetch<F>(mut rows: Vec<T>, page_size: usize, key_of: F) -> Self
    where
        F: Fn(&T) -> PageKey,
    {
        let has_next = rows.len() > page_size;
        rows.truncate(page_size);

        let next = if has_next {
            rows.last().map(key_of)
        } else {
            None
        };

        Self { items: rows, next }
    }
}

/// Start of `date` in UTC, the instant date bounds compare against.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Relative URL of the next page: the request's date filters plus the new key.
pub fn next_page_url(
    path: &str,
    after: Option<NaiveDate>,
    before: Option<NaiveDate>,
    page_key: &str,
) -> String {
    let mut params = Vec::with_capacity(3);
    if let Some(after) = after {
        params.push(format!("after={}", after.format("%Y-%m-%d")));
    }
    if let Some(before) = before {
        params.push(format!("before={}", before.format("%Y-%m-%d")));
    }
    params.push(format!("page_key={}", urlencoding::encode(page_key)));

    format!("{}?{}", path, params.join("&"))
}
