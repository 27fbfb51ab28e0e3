//! In-process payout repository.
//!
//! Used for local development (`STORAGE_BACKEND=memory`) and by the test-suite.
//! Evaluates [`PayoutQuery`] with the same semantics as the MongoDB filter.

use std::cmp::Reverse;

use async_trait::async_trait;
use log::debug;
use tokio::sync::RwLock;

use crate::errors::ApiError;
use crate::models::{NewPayout, Payout};

use super::{PayoutQuery, PayoutRepository};

#[derive(Default)]
struct MemoryState {
    last_id: u64,
    payouts: Vec<Payout>,
}

/// Thread-safe payout store guarded by a tokio `RwLock`.
#[derive(Default)]
pub struct InMemoryPayoutRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryPayoutRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a payout. Returns whether it existed.
    #[cfg(test)]
    pub async fn delete(&self, id: u64) -> bool {
        let mut state = self.state.write().await;
        let before = state.payouts.len();
        state.payouts.retain(|payout| payout.id != id);
        state.payouts.len() != before
    }

    /// Get the current number of stored payouts.
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.state.read().await.payouts.len()
    }
}

#[async_trait]
impl PayoutRepository for InMemoryPayoutRepository {
    async fn insert(&self, payout: NewPayout) -> Result<Payout, ApiError> {
        let mut state = self.state.write().await;
        state.last_id += 1;

        let payout = payout.into_payout(state.last_id);
        state.payouts.push(payout.clone());
        debug!("Repository: Inserted payout {} for seller {}", payout.id, payout.seller_id);
        Ok(payout)
    }

    async fn find_for_seller(&self, seller_id: u64, id: u64) -> Result<Option<Payout>, ApiError> {
        let state = self.state.read().await;
        Ok(state
            .payouts
            .iter()
            .find(|payout| {
                payout.id == id && payout.seller_id == seller_id && payout.state.is_displayable()
            })
            .cloned())
    }

    async fn find_page(&self, query: &PayoutQuery) -> Result<Vec<Payout>, ApiError> {
        debug!("Repository: Finding payouts with query: {:?}", query);
        let state = self.state.read().await;

        let mut matching: Vec<&Payout> = state
            .payouts
            .iter()
            .filter(|payout| query.matches(payout))
            .collect();
        matching.sort_by_key(|payout| Reverse(payout.sort_key()));

        Ok(matching.into_iter().take(query.limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayoutState;
    use crate::pagination::PageKey;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn new_payout(seller_id: u64, state: PayoutState, created_at: DateTime<Utc>) -> NewPayout {
        NewPayout {
            seller_id,
            amount_cents: 10_000,
            currency: "USD".to_string(),
            state,
            processor: "PAYPAL".to_string(),
            created_at,
        }
    }

    fn query(seller_id: u64) -> PayoutQuery {
        PayoutQuery {
            seller_id,
            created_from: None,
            created_before: None,
            after_key: None,
            limit: 100,
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[actix_web::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryPayoutRepository::new();
        let a = repo
            .insert(new_payout(1, PayoutState::Completed, t0()))
            .await
            .unwrap();
        let b = repo
            .insert(new_payout(1, PayoutState::Completed, t0()))
            .await
            .unwrap();

        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(repo.len().await, 2);
    }

    #[actix_web::test]
    async fn test_find_page_orders_by_time_then_id_descending() {
        let repo = InMemoryPayoutRepository::new();
        for offset in [2, 0, 1, 0] {
            repo.insert(new_payout(1, PayoutState::Completed, t0() + Duration::hours(offset)))
                .await
                .unwrap();
        }

        let ids: Vec<u64> = repo
            .find_page(&query(1))
            .await
            .unwrap()
            .iter()
            .map(|payout| payout.id)
            .collect();
        assert_eq!(ids, vec![1, 3, 4, 2]);
    }

    #[actix_web::test]
    async fn test_find_page_applies_every_condition() {
        let repo = InMemoryPayoutRepository::new();
        repo.insert(new_payout(1, PayoutState::Completed, t0()))
            .await
            .unwrap();
        repo.insert(new_payout(2, PayoutState::Completed, t0()))
            .await
            .unwrap();
        repo.insert(new_payout(1, PayoutState::Failed, t0()))
            .await
            .unwrap();
        repo.insert(new_payout(1, PayoutState::Processing, t0() - Duration::days(3)))
            .await
            .unwrap();

        let all = repo.find_page(&query(1)).await.unwrap();
        assert_eq!(all.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 4]);

        let recent = repo
            .find_page(&PayoutQuery {
                created_from: Some(t0() - Duration::days(1)),
                ..query(1)
            })
            .await
            .unwrap();
        assert_eq!(recent.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1]);

        let older = repo
            .find_page(&PayoutQuery {
                created_before: Some(t0()),
                ..query(1)
            })
            .await
            .unwrap();
        assert_eq!(older.iter().map(|p| p.id).collect::<Vec<_>>(), vec![4]);

        let resumed = repo
            .find_page(&PayoutQuery {
                after_key: Some(PageKey::new(t0(), 1)),
                ..query(1)
            })
            .await
            .unwrap();
        assert_eq!(resumed.iter().map(|p| p.id).collect::<Vec<_>>(), vec![4]);

        let limited = repo
            .find_page(&PayoutQuery {
                limit: 1,
                ..query(1)
            })
            .await
            .unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[actix_web::test]
    async fn test_find_for_seller_is_scoped() {
        let repo = InMemoryPayoutRepository::new();
        let own = repo
            .insert(new_payout(1, PayoutState::Completed, t0()))
            .await
            .unwrap();
        let hidden = repo
            .insert(new_payout(1, PayoutState::Creating, t0()))
            .await
            .unwrap();

        assert_eq!(repo.find_for_seller(1, own.id).await.unwrap(), Some(own.clone()));
        assert_eq!(repo.find_for_seller(2, own.id).await.unwrap(), None);
        assert_eq!(repo.find_for_seller(1, hidden.id).await.unwrap(), None);
        assert_eq!(repo.find_for_seller(1, 999).await.unwrap(), None);
    }

    #[actix_web::test]
    async fn test_delete() {
        let repo = InMemoryPayoutRepository::new();
        let payout = repo
            .insert(new_payout(1, PayoutState::Completed, t0()))
            .await
            .unwrap();

        assert!(repo.delete(payout.id).await);
        assert!(!repo.delete(payout.id).await);
        assert_eq!(repo.len().await, 0);
    }
}
