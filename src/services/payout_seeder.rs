//! Startup seeding of payouts from a JSON file.
//!
//! The file holds an array of payouts without ids:
//!
//! ```json
//! [{ "seller_id": 1, "amount_cents": 15000, "currency": "USD", "state": "completed",
//!    "processor": "PAYPAL", "created_at": "2024-05-01T10:00:00.123Z" }]
//! ```
//!
//! Every row goes through [`PayoutRepository::insert`], so ids come from the
//! store's sequence and timestamps are cut to milliseconds.

use std::fs;
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::errors::ApiError;
use crate::models::NewPayout;
use crate::repositories::PayoutRepository;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid seed file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to store seeded payout: {0}")]
    Storage(ApiError),
}

/// Parse the contents of a seed file.
pub fn parse_seed(raw: &str) -> Result<Vec<NewPayout>, SeedError> {
    Ok(serde_json::from_str(raw)?)
}

/// Insert `payouts` in file order. Returns how many were stored.
pub async fn seed_payouts(
    repository: &dyn PayoutRepository,
    payouts: Vec<NewPayout>,
) -> Result<usize, SeedError> {
    let count = payouts.len();
    for payout in payouts {
        repository.insert(payout).await.map_err(SeedError::Storage)?;
    }
    Ok(count)
}

/// Read, parse and insert the seed file at `path`.
pub async fn seed_from_file(
    repository: &dyn PayoutRepository,
    path: impl AsRef<Path>,
) -> Result<usize, SeedError> {
    let path = path.as_ref();
    info!("Seeding payouts from {}", path.display());

    let raw = fs::read_to_string(path)?;
    let count = seed_payouts(repository, parse_seed(&raw)?).await?;

    info!("Seeded {} payouts", count);
    Ok(count)
}
