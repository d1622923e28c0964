//! Environment configuration for the wallet demo.
//!
//! RPC credentials plus the custodial wallet-service credentials, all
//! from the environment (or a `.env` file). Validation happens once at
//! startup so a missing variable fails loudly instead of on the first
//! request.

use std::{env, path::PathBuf};

use solana_sdk::pubkey::Pubkey;

use crate::error::{Result, WalletDemoError};

#[derive(Debug, Clone)]
pub struct WalletServiceConfig {
    /// Base URL of the wallet-signing service.
    pub api_url: String,
    pub app_id: String,
    pub app_secret: String,
    /// Identifier of the treasury wallet at the service.
    pub wallet_id: String,
    /// Public key of the treasury wallet.
    pub wallet_address: Pubkey,
    /// Key material the service requires to authorize signing.
    pub authorization_key: String,
}

#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub rpc_url: String,
    pub indexer_url: String,
    pub api_key: Option<String>,
    pub port: u16,
    /// Remote signing service; when absent the demo signs with the local
    /// keypair instead.
    pub wallet_service: Option<WalletServiceConfig>,
    pub keypair_path: Option<PathBuf>,
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| WalletDemoError::Config(format!("{name} is not set")))
}

impl DemoConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("API_KEY").ok();
        let rpc_url = match env::var("RPC_URL") {
            Ok(url) => url,
            Err(_) => match &api_key {
                Some(key) => format!("{}{key}", ctoken_cookbook::config::DEVNET_RPC_URL_TEMPLATE),
                None => ctoken_cookbook::config::LOCALNET_RPC_URL.to_string(),
            },
        };
        let indexer_url = env::var("PHOTON_URL").unwrap_or_else(|_| {
            if api_key.is_some() {
                rpc_url.clone()
            } else {
                ctoken_cookbook::config::LOCALNET_INDEXER_URL.to_string()
            }
        });
        let port = match env::var("PORT") {
            Ok(value) => value
                .parse()
                .map_err(|_| WalletDemoError::Config(format!("PORT {value:?} is not a number")))?,
            Err(_) => 3000,
        };

        // Wallet-service credentials come as a group: all or none.
        let wallet_service = if env::var("WALLET_API_URL").is_ok() {
            let wallet_address = required("WALLET_ADDRESS")?;
            Some(WalletServiceConfig {
                api_url: required("WALLET_API_URL")?,
                app_id: required("WALLET_APP_ID")?,
                app_secret: required("WALLET_APP_SECRET")?,
                wallet_id: required("WALLET_ID")?,
                wallet_address: wallet_address.parse().map_err(|_| {
                    WalletDemoError::Config(format!(
                        "WALLET_ADDRESS {wallet_address:?} is not a valid pubkey"
                    ))
                })?,
                authorization_key: required("WALLET_AUTHORIZATION_KEY")?,
            })
        } else {
            None
        };

        Ok(DemoConfig {
            rpc_url,
            indexer_url,
            api_key,
            port,
            wallet_service,
            keypair_path: env::var("KEYPAIR_PATH").ok().map(PathBuf::from),
        })
    }
}
