//! Error message constants used throughout the application.

// Authentication errors
pub const ERR_AUTH_REQUIRED: &str = "Authentication required";
pub const ERR_INVALID_AUTH_HEADER: &str = "Missing or invalid authorization header";
pub const ERR_INVALID_TOKEN: &str = "Invalid or expired token";

// Request errors
pub const ERR_INVALID_QUERY: &str = "Invalid query parameters";

// Pagination errors
pub const ERR_INVALID_PAGE_KEY: &str = "Invalid page_key.";

// Payout errors
pub const ERR_PAYOUT_NOT_FOUND: &str = "The payout was not found.";

// Storage errors
pub const ERR_INTERNAL_SERVER: &str = "Internal server error";
pub const ERR_ID_SEQUENCE_UNAVAILABLE: &str = "Failed to allocate a payout id";

/// Message for a date parameter that is not `YYYY-MM-DD`.
pub fn err_invalid_date_format(field: &str) -> String {
    format!(
        "Invalid date format provided in field '{}'. Dates must be in the format YYYY-MM-DD.",
        field
    )
}
