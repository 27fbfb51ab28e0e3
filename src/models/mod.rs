//! Data models organized by type.

pub mod claims;
pub mod payout;
pub mod requests;
pub mod responses;

pub use claims::*;
pub use payout::*;
pub use requests::*;
pub use responses::*;
