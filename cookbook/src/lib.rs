//! Cookbook of compressed-token operations.
//!
//! Each action wires together calls into the compressed-token SDK and the
//! Photon indexer: fetch spendable accounts, select a covering set, build
//! instructions, sign and submit. All proof generation and merkle logic
//! happens inside the SDKs; this crate is orchestration only.

pub mod actions;
pub mod amount;
pub mod config;
pub mod error;
pub mod indexer;
pub mod queries;
pub mod selection;
pub mod trees;

pub use error::{CookbookError, Result};
