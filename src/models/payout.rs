use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Lifecycle state of a payout.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PayoutState {
    Creating,
    Processing,
    Unclaimed,
    Completed,
    Failed,
    Cancelled,
    Reversed,
    Returned,
}

impl PayoutState {
    /// States a seller can see in their payout feed.
    pub const DISPLAYABLE: [PayoutState; 5] = [
        PayoutState::Processing,
        PayoutState::Unclaimed,
        PayoutState::Completed,
        PayoutState::Reversed,
        PayoutState::Returned,
    ];

    pub fn is_displayable(&self) -> bool {
        Self::DISPLAYABLE.contains(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutState::Creating => "creating",
            PayoutState::Processing => "processing",
            PayoutState::Unclaimed => "unclaimed",
            PayoutState::Completed => "completed",
            PayoutState::Failed => "failed",
            PayoutState::Cancelled => "cancelled",
            PayoutState::Reversed => "reversed",
            PayoutState::Returned => "returned",
        }
    }
}

impl fmt::Display for PayoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payout document stored in MongoDB.
///
/// `id` is the internal sequential id and never leaves the service in clear.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Payout {
    #[serde(rename = "_id")]
    pub id: u64,
    pub seller_id: u64,
    pub amount_cents: u64,
    pub currency: String,
    pub state: PayoutState,
    pub processor: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Payout {
    /// Composite ordering key of the feed, sorted descending.
    pub fn sort_key(&self) -> (DateTime<Utc>, u64) {
        (self.created_at, self.id)
    }
}

/// A payout that has not been assigned an id yet.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPayout {
    pub seller_id: u64,
    pub amount_cents: u64,
    pub currency: String,
    pub state: PayoutState,
    pub processor: String,
    pub created_at: DateTime<Utc>,
}

impl NewPayout {
    pub fn into_payout(self, id: u64) -> Payout {
        Payout {
            id,
            seller_id: self.seller_id,
            amount_cents: self.amount_cents,
            currency: self.currency,
            state: self.state,
            processor: self.processor,
            created_at: truncate_to_millis(self.created_at),
        }
    }
}

/// Drop sub-millisecond precision. BSON datetimes and page keys both carry
/// milliseconds, so stored timestamps must not be finer than that.
pub fn truncate_to_millis(at: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(at.timestamp_millis()).unwrap_or(at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_displayable_states() {
        assert!(PayoutState::Completed.is_displayable());
        assert!(PayoutState::Processing.is_displayable());
        assert!(!PayoutState::Creating.is_displayable());
        assert!(!PayoutState::Failed.is_displayable());
        assert!(!PayoutState::Cancelled.is_displayable());
    }

    #[test]
    fn test_state_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PayoutState::Unclaimed).unwrap(),
            "\"unclaimed\""
        );
        assert_eq!(PayoutState::Returned.to_string(), "returned");
    }

    #[test]
    fn test_into_payout_truncates_to_millis() {
        let at = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let payout = NewPayout {
            seller_id: 1,
            amount_cents: 100,
            currency: "USD".to_string(),
            state: PayoutState::Completed,
            processor: "PAYPAL".to_string(),
            created_at: at,
        }
        .into_payout(7);

        assert_eq!(payout.id, 7);
        assert_eq!(payout.created_at.timestamp_subsec_nanos(), 123_000_000);
    }
}
