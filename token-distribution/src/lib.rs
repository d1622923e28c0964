//! Compressed-token distribution example.
//!
//! Mirrors the two airdrop flows: a simple single-transaction drop and a
//! batched flow that chunks an arbitrary recipient list into sequential
//! transactions, reporting per-batch outcomes.

pub mod batch;
pub mod error;
pub mod recipients;
pub mod send;

pub use error::{DistributionError, Result};
