//! Payout-related request models.

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

/// Query parameters of the payout feed.
///
/// Every field is kept as raw text so that malformed values are reported with
/// the field-specific messages instead of a generic deserialization error.
#[derive(Debug, Default, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PayoutListQuery {
    /// Only payouts created on or after this date (YYYY-MM-DD)
    pub after: Option<String>,
    /// Only payouts created before this date (YYYY-MM-DD)
    pub before: Option<String>,
    /// Opaque key returned as `next_page_key` by the previous page
    pub page_key: Option<String>,
}
