use light_client::rpc::errors::RpcError;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CookbookError {
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("Indexer request failed: {0}")]
    Indexer(String),

    #[error("Insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance { available: u64, requested: u64 },

    #[error("No compressed token accounts found for owner {owner} and mint {mint}")]
    NoTokenAccounts { owner: Pubkey, mint: Pubkey },

    #[error("Invalid amount {input:?}: {reason}")]
    InvalidAmount { input: String, reason: String },

    #[error("Failed to read keypair from {path}: {message}")]
    Keypair { path: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to build instruction: {0}")]
    Instruction(String),

    #[error("No state tree available")]
    NoStateTree,

    #[error("Account {0} does not exist")]
    AccountNotFound(Pubkey),
}

pub type Result<T> = std::result::Result<T, CookbookError>;
