//! Payout response models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Payout, PayoutState};
use crate::obfuscation::{IdCodec, TokenMode};

/// Payout data returned in API responses
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct PayoutResponse {
    /// Opaque payout identifier
    #[schema(example = "3xK9mPqL2vR8sT1uW4yZ6a")]
    pub id: String,
    /// Amount in major currency units
    #[schema(example = "150.00")]
    pub amount: String,
    /// ISO currency code
    #[schema(example = "USD")]
    pub currency: String,
    /// Payout state
    pub status: PayoutState,
    /// Processor that sent the payout
    #[schema(example = "PAYPAL")]
    pub payment_processor: String,
    /// When the payout was created
    pub created_at: DateTime<Utc>,
}

impl PayoutResponse {
    /// Build the external representation, replacing the internal id with its general token.
    pub fn from_payout(payout: Payout, codec: &IdCodec) -> Self {
        Self {
            id: codec.encode(payout.id, TokenMode::General),
            amount: format_amount(payout.amount_cents),
            currency: payout.currency,
            status: payout.state,
            payment_processor: payout.processor,
            created_at: payout.created_at,
        }
    }
}

/// Single payout wrapper
#[derive(Debug, Serialize, ToSchema)]
pub struct PayoutEnvelope {
    /// Whether the request was successful
    pub success: bool,
    pub payout: PayoutResponse,
}

fn format_amount(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}
