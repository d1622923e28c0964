//! Endpoint and keypair configuration shared by every example.
//!
//! An explicit RPC URL wins, otherwise an API key is expanded into the
//! devnet Helius URL, otherwise localnet. The payer keypair is read from
//! the Solana CLI default location unless overridden.

use std::{env, path::PathBuf};

use solana_sdk::signature::{read_keypair_file, Keypair};

use crate::error::{CookbookError, Result};

pub const DEVNET_RPC_URL_TEMPLATE: &str = "https://devnet.helius-rpc.com?api-key=";
pub const LOCALNET_RPC_URL: &str = "http://127.0.0.1:8899";
pub const LOCALNET_INDEXER_URL: &str = "http://127.0.0.1:8784";

#[derive(Debug, Clone)]
pub struct Config {
    /// Solana RPC endpoint.
    pub rpc_url: String,
    /// Photon indexer endpoint. For Helius endpoints this is the same URL.
    pub indexer_url: String,
    pub api_key: Option<String>,
    pub keypair_path: PathBuf,
}

impl Config {
    /// Build a configuration from optional explicit values, falling back
    /// to the local test validator's endpoints when no API key is set.
    pub fn resolve(
        rpc_url: Option<String>,
        indexer_url: Option<String>,
        api_key: Option<String>,
        keypair_path: Option<PathBuf>,
    ) -> Result<Self> {
        let rpc_url = match (rpc_url, &api_key) {
            (Some(url), _) => url,
            (None, Some(key)) => format!("{DEVNET_RPC_URL_TEMPLATE}{key}"),
            (None, None) => LOCALNET_RPC_URL.to_string(),
        };
        let indexer_url = match indexer_url {
            Some(url) => url,
            // Helius serves the compression API on the same endpoint.
            None if api_key.is_some() => rpc_url.clone(),
            None => LOCALNET_INDEXER_URL.to_string(),
        };
        let keypair_path = match keypair_path {
            Some(path) => path,
            None => default_keypair_path()?,
        };
        Ok(Self {
            rpc_url,
            indexer_url,
            api_key,
            keypair_path,
        })
    }

    pub fn load_payer(&self) -> Result<Keypair> {
        load_keypair(&self.keypair_path)
    }
}

/// The Solana CLI default keypair location, `~/.config/solana/id.json`.
pub fn default_keypair_path() -> Result<PathBuf> {
    let home = env::var("HOME")
        .map_err(|_| CookbookError::Config("HOME is not set; pass --keypair".to_string()))?;
    Ok(PathBuf::from(home).join(".config/solana/id.json"))
}

pub fn load_keypair(path: &PathBuf) -> Result<Keypair> {
    read_keypair_file(path).map_err(|e| CookbookError::Keypair {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use solana_sdk::signer::Signer;

    use super::*;

    #[test]
    fn explicit_url_wins_over_api_key() {
        let config = Config::resolve(
            Some("http://localhost:8899".to_string()),
            None,
            Some("secret".to_string()),
            Some(PathBuf::from("/tmp/id.json")),
        )
        .unwrap();
        assert_eq!(config.rpc_url, "http://localhost:8899");
    }

    #[test]
    fn api_key_expands_to_devnet_url() {
        let config = Config::resolve(
            None,
            None,
            Some("abc123".to_string()),
            Some(PathBuf::from("/tmp/id.json")),
        )
        .unwrap();
        assert_eq!(config.rpc_url, "https://devnet.helius-rpc.com?api-key=abc123");
        assert_eq!(config.indexer_url, config.rpc_url);
    }

    #[test]
    fn defaults_to_localnet() {
        let config =
            Config::resolve(None, None, None, Some(PathBuf::from("/tmp/id.json"))).unwrap();
        assert_eq!(config.rpc_url, LOCALNET_RPC_URL);
        assert_eq!(config.indexer_url, LOCALNET_INDEXER_URL);
    }

    #[test]
    fn keypair_round_trips_through_json_file() {
        let keypair = Keypair::new();
        let serialized = serde_json::to_string(&keypair.to_bytes().to_vec()).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serialized.as_bytes()).unwrap();

        let loaded = load_keypair(&file.path().to_path_buf()).unwrap();
        assert_eq!(loaded.pubkey(), keypair.pubkey());
    }

    #[test]
    fn missing_keypair_file_names_the_path() {
        let err = load_keypair(&PathBuf::from("/does/not/exist.json")).unwrap_err();
        match err {
            CookbookError::Keypair { path, .. } => assert_eq!(path, "/does/not/exist.json"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
