use ctoken_cookbook::CookbookError;
use light_client::rpc::errors::RpcError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletDemoError {
    #[error(transparent)]
    Cookbook(#[from] CookbookError),

    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("Signer error: {0}")]
    Signer(String),

    #[error("Missing configuration: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

pub type Result<T> = std::result::Result<T, WalletDemoError>;
