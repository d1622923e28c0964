use std::path::PathBuf;

use clap::{Parser, Subcommand};
use solana_sdk::pubkey::Pubkey;

#[derive(Parser)]
#[clap(author, version, about = "Compressed token cookbook", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Parser, Clone, Debug)]
pub struct ConnectionArgs {
    /// Solana RPC endpoint. Defaults to localnet, or devnet Helius when an
    /// API key is given.
    #[arg(long, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// Photon indexer endpoint. Defaults to the RPC endpoint for Helius
    /// URLs, localnet indexer otherwise.
    #[arg(long, env = "PHOTON_URL")]
    pub indexer_url: Option<String>,

    #[arg(long, env = "API_KEY")]
    pub api_key: Option<String>,

    /// Payer keypair file. Defaults to ~/.config/solana/id.json.
    #[arg(long, env = "KEYPAIR_PATH")]
    pub keypair: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an SPL mint and register its compression token pool.
    CreateMint {
        #[arg(long, default_value_t = 9)]
        decimals: u8,
    },
    /// Register a token pool for an existing SPL mint.
    CreateTokenPool {
        #[arg(long)]
        mint: Pubkey,
    },
    /// Mint compressed tokens to a recipient. The payer keypair is the
    /// mint authority.
    MintTo {
        #[arg(long)]
        mint: Pubkey,
        #[arg(long)]
        recipient: Pubkey,
        /// Amount in base units.
        #[arg(long)]
        amount: u64,
    },
    /// Transfer compressed tokens to a recipient.
    Transfer {
        #[arg(long)]
        mint: Pubkey,
        #[arg(long)]
        to: Pubkey,
        #[arg(long)]
        amount: u64,
    },
    /// Compress SPL tokens from an associated token account.
    Compress {
        #[arg(long)]
        mint: Pubkey,
        #[arg(long)]
        amount: u64,
        /// Recipient of the compressed tokens. Defaults to the payer.
        #[arg(long)]
        to: Option<Pubkey>,
        /// Source SPL token account. Defaults to the payer's associated
        /// token account.
        #[arg(long)]
        source: Option<Pubkey>,
    },
    /// Decompress tokens into an SPL token account.
    Decompress {
        #[arg(long)]
        mint: Pubkey,
        #[arg(long)]
        amount: u64,
        /// Destination SPL token account. Defaults to the payer's
        /// associated token account, created if missing.
        #[arg(long)]
        to: Option<Pubkey>,
    },
    /// Delegate compressed tokens to a delegate.
    Approve {
        #[arg(long)]
        mint: Pubkey,
        #[arg(long)]
        delegate: Pubkey,
        #[arg(long)]
        amount: u64,
    },
    /// Revoke a delegation.
    Revoke {
        #[arg(long)]
        mint: Pubkey,
        #[arg(long)]
        delegate: Pubkey,
    },
    /// Consolidate all compressed accounts for a mint.
    MergeTokenAccounts {
        #[arg(long)]
        mint: Pubkey,
    },
    /// Compress an SPL token account's entire balance.
    CompressSplAccount {
        #[arg(long)]
        mint: Pubkey,
        /// SPL token account to drain. Defaults to the payer's associated
        /// token account.
        #[arg(long)]
        token_account: Option<Pubkey>,
        /// Base units to leave uncompressed.
        #[arg(long)]
        remaining_amount: Option<u64>,
    },
    /// Show compressed balances for an owner. Defaults to the payer.
    Balances {
        #[arg(long)]
        owner: Option<Pubkey>,
    },
    /// Show compression transaction history. Defaults to the payer.
    History {
        #[arg(long)]
        owner: Option<Pubkey>,
    },
}
