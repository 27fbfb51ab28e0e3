//! Services organized by domain concern.

pub mod payout_seeder;
pub mod payout_service;

pub use payout_seeder::seed_from_file;
pub use payout_service::PayoutService;
