//! Request parameter validation.

pub mod common;

pub use common::*;
