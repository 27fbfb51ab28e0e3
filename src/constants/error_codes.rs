//! Error code constants for API responses.
//!
//! These codes provide a machine-readable identifier for each error type,
//! making it easier for API clients to handle errors programmatically.

// Request errors
pub const CODE_INVALID_DATE: &str = "INVALID_DATE";
pub const CODE_INVALID_PAGE_KEY: &str = "INVALID_PAGE_KEY";
pub const CODE_INVALID_QUERY: &str = "INVALID_QUERY";

// Authentication errors
pub const CODE_AUTH_REQUIRED: &str = "AUTH_REQUIRED";
pub const CODE_INVALID_TOKEN: &str = "INVALID_TOKEN";

// Payout errors
pub const CODE_PAYOUT_NOT_FOUND: &str = "PAYOUT_NOT_FOUND";

// Generic errors
pub const CODE_INTERNAL_ERROR: &str = "INTERNAL_ERROR";
