//! Middleware module for request processing.

pub mod auth_helpers;
pub mod auth_middleware;
pub mod request_ext;

pub use auth_helpers::*;
pub use auth_middleware::*;
pub use request_ext::*;
