//! Repository layer for database operations.
//!
//! This module provides a clean separation between business logic (services)
//! and storage. Services depend on the [`PayoutRepository`] trait; the MongoDB
//! and in-memory implementations evaluate the same query semantics.

pub mod memory_payout_repository;
pub mod mongo_payout_repository;
pub mod payout_repository;

pub use memory_payout_repository::InMemoryPayoutRepository;
pub use mongo_payout_repository::MongoPayoutRepository;
pub use payout_repository::{PayoutQuery, PayoutRepository};
