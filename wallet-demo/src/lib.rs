//! Wallet-integration demo.
//!
//! Binds a wallet signer (local keypair or custodial HTTP service) to the
//! cookbook's compressed-token operations and serves them over HTTP:
//! balances, transfer, compress, decompress and transaction history.

pub mod config;
pub mod error;
pub mod server;
pub mod signer;

pub use error::{Result, WalletDemoError};
