//! HTTP request handlers organized by domain.

pub mod payout_handler;

pub use payout_handler::*;
