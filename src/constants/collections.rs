//! MongoDB collection names.

pub const COLLECTION_PAYOUTS: &str = "payouts";

/// Per-collection integer sequences used to allocate internal ids.
pub const COLLECTION_COUNTERS: &str = "counters";
