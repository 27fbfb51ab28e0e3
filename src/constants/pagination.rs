//! Pagination constants for the payout feed.

/// Fixed number of payouts per page. Clients cannot change it.
pub const RESULTS_PER_PAGE: usize = 10;

/// Separates the timestamp from the numeric id token inside a page key.
pub const PAGE_KEY_DELIMITER: char = '-';

/// Text format of the page key timestamp (UTC, millisecond precision).
pub const PAGE_KEY_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Format accepted for the `after` and `before` query parameters.
pub const DATE_PARAM_FORMAT: &str = "%Y-%m-%d";

/// Public path of the payout feed, used to build `next_page_url`.
pub const PAYOUTS_PATH: &str = "/v2/payouts";
