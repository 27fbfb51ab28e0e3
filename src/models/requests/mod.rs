//! Request models for API endpoints.

pub mod payout;

pub use payout::*;
