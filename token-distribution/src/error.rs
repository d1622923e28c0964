use ctoken_cookbook::CookbookError;
use light_client::rpc::errors::RpcError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DistributionError {
    #[error(transparent)]
    Cookbook(#[from] CookbookError),

    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("Invalid recipient on line {line}: {reason}")]
    Recipients { line: usize, reason: String },

    #[error("Recipient list is empty")]
    NoRecipients,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DistributionError>;
