//! Pagination response models.

use serde::Serialize;
use utoipa::ToSchema;

use super::PayoutResponse;

/// One page of the payout feed.
///
/// `next_page_key` and `next_page_url` are present only when more payouts remain.
#[derive(Debug, Serialize, ToSchema)]
pub struct PayoutListResponse {
    /// Whether the request was successful
    pub success: bool,
    /// Payouts, newest first
    pub payouts: Vec<PayoutResponse>,
    /// Key to pass as `page_key` to fetch the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_key: Option<String>,
    /// Relative URL of the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "/v2/payouts?page_key=2024-05-01T10:00:00.000Z-123456789012345678901234567890")]
    pub next_page_url: Option<String>,
}
