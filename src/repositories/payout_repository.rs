//! Storage contract for payouts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::ApiError;
use crate::models::{NewPayout, Payout};
use crate::pagination::PageKey;

/// One page fetch of a seller's displayable payouts.
///
/// All conditions are combined with AND. Results are ordered by
/// `(created_at DESC, id DESC)` and capped at `limit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutQuery {
    pub seller_id: u64,
    /// Inclusive lower bound on `created_at`.
    pub created_from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on `created_at`.
    pub created_before: Option<DateTime<Utc>>,
    /// Only rows strictly after this boundary row.
    pub after_key: Option<PageKey>,
    pub limit: usize,
}

impl PayoutQuery {
    /// Whether `payout` satisfies every condition of the query.
    pub fn matches(&self, payout: &Payout) -> bool {
        payout.seller_id == self.seller_id
            && payout.state.is_displayable()
            && self.created_from.map_or(true, |from| payout.created_at >= from)
            && self
                .created_before
                .map_or(true, |before| payout.created_at < before)
            && self
                .after_key
                .map_or(true, |key| key.precedes(payout.created_at, payout.id))
    }
}

#[async_trait]
pub trait PayoutRepository: Send + Sync {
    /// Persist a payout and assign it the next internal id.
    async fn insert(&self, payout: NewPayout) -> Result<Payout, ApiError>;

    /// Find a displayable payout owned by `seller_id`.
    async fn find_for_seller(&self, seller_id: u64, id: u64) -> Result<Option<Payout>, ApiError>;

    /// Fetch up to `query.limit` payouts in feed order.
    async fn find_page(&self, query: &PayoutQuery) -> Result<Vec<Payout>, ApiError>;
}
