//! Payout service: the seller's paginated payout feed and single-payout lookup.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::constants::{PAYOUTS_PATH, RESULTS_PER_PAGE};
use crate::errors::ApiError;
use crate::models::{PayoutListQuery, PayoutListResponse, PayoutResponse};
use crate::obfuscation::{IdCodec, TokenMode};
use crate::pagination::{next_page_url, start_of_day, Page, PageKey};
use crate::repositories::{PayoutQuery, PayoutRepository};
use crate::utils::{mask_page_key, mask_token};
use crate::validators::parse_date_param;

pub struct PayoutService {
    repository: Arc<dyn PayoutRepository>,
    codec: Arc<IdCodec>,
}

impl PayoutService {
    pub fn new(repository: Arc<dyn PayoutRepository>, codec: Arc<IdCodec>) -> Self {
        Self { repository, codec }
    }

    /// Codec used to issue and read external ids.
    pub fn codec(&self) -> &IdCodec {
        &self.codec
    }

    /// Return one page of the seller's displayable payouts, newest first.
    ///
    /// `before` is validated ahead of `after`, so a request with two bad dates
    /// reports `before`. A blank `page_key` is treated as absent.
    pub async fn list_payouts(
        &self,
        seller_id: u64,
        query: &PayoutListQuery,
    ) -> Result<PayoutListResponse, ApiError> {
        let before = parse_date_param("before", query.before.as_deref())?;
        let after = parse_date_param("after", query.after.as_deref())?;

        let after_key = match query
            .page_key
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
        {
            Some(raw) => Some(PageKey::decode(raw, &self.codec).map_err(|_| {
                warn!(
                    "Rejected page key {} for seller {}",
                    mask_page_key(raw),
                    seller_id
                );
                ApiError::invalid_page_key()
            })?),
            None => None,
        };

        debug!(
            "Listing payouts for seller {} (after: {:?}, before: {:?}, resuming: {})",
            seller_id,
            after,
            before,
            after_key.is_some()
        );

        let rows = self
            .repository
            .find_page(&PayoutQuery {
                seller_id,
                created_from: after.map(start_of_day),
                created_before: before.map(start_of_day),
                after_key,
                limit: RESULTS_PER_PAGE + 1,
            })
            .await?;

        let page = Page::from_overfetch(rows, RESULTS_PER_PAGE, |payout| {
            PageKey::new(payout.created_at, payout.id)
        });

        let next_page_key = page.next.map(|key| key.encode(&self.codec));
        let next_page_url = next_page_key
            .as_deref()
            .map(|key| next_page_url(PAYOUTS_PATH, after, before, key));

        let payouts: Vec<PayoutResponse> = page
            .items
            .into_iter()
            .map(|payout| PayoutResponse::from_payout(payout, &self.codec))
            .collect();

        info!(
            "Returning {} payouts for seller {} (more: {})",
            payouts.len(),
            seller_id,
            next_page_key.is_some()
        );

        Ok(PayoutListResponse {
            success: true,
            payouts,
            next_page_key,
            next_page_url,
        })
    }

    /// Look up one displayable payout of the seller by its external id.
    ///
    /// An undecodable id, another seller's payout and a hidden state all
    /// produce the same not-found error.
    pub async fn get_payout(
        &self,
        seller_id: u64,
        external_id: &str,
    ) -> Result<PayoutResponse, ApiError> {
        let id = match self.codec.decode(external_id, TokenMode::General) {
            Ok(id) => id,
            Err(_) => {
                debug!(
                    "Undecodable payout id {} requested by seller {}",
                    mask_token(external_id),
                    seller_id
                );
                return Err(ApiError::payout_not_found());
            }
        };

        match self.repository.find_for_seller(seller_id, id).await? {
            Some(payout) => Ok(PayoutResponse::from_payout(payout, &self.codec)),
            None => {
                warn!(
                    "Payout {} not found for seller {}",
                    mask_token(external_id),
                    seller_id
                );
                Err(ApiError::payout_not_found())
            }
        }
    }
}
