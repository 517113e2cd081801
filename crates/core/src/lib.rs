//! Shared domain types for projecthub.
//!
//! This crate has zero internal dependencies so it can be used by the
//! persistence layer, the HTTP layer, and tests alike.

pub mod antiforgery;
pub mod error;
pub mod search;
pub mod types;
pub mod validation;
