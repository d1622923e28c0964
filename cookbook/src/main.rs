mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use ctoken_cookbook::{
    actions::{
        approve, compress, compress_spl_token_account, create_mint, create_token_pool, decompress,
        get_or_create_associated_token_account, merge_token_accounts, mint_to, revoke, transfer,
    },
    config::Config,
    indexer::PhotonClient,
    queries::{owner_balances, transaction_history},
};
use light_client::rpc::{RpcConnection, SolanaRpcConnection};
use solana_sdk::{commitment_config::CommitmentConfig, signer::Signer};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::resolve(
        cli.connection.rpc_url,
        cli.connection.indexer_url,
        cli.connection.api_key,
        cli.connection.keypair,
    )?;
    let payer = config.load_payer()?;
    tracing::info!(rpc_url = %config.rpc_url, payer = %payer.pubkey(), "connecting");

    let mut rpc =
        SolanaRpcConnection::new(config.rpc_url.clone(), Some(CommitmentConfig::confirmed()));
    rpc.payer = payer.insecure_clone();
    let indexer = PhotonClient::new(config.indexer_url.clone(), config.api_key.clone());

    match cli.command {
        Commands::CreateMint { decimals } => {
            let created = create_mint(&mut rpc, &payer, &payer.pubkey(), None, decimals).await?;
            println!("Mint: {}", created.mint);
            println!("Token pool: {}", created.pool);
            println!("Tx: {}", created.signature);
        }
        Commands::CreateTokenPool { mint } => {
            let signature = create_token_pool(&mut rpc, &payer, &mint).await?;
            println!("Mint: {mint}");
            println!("Tx: {signature}");
        }
        Commands::MintTo {
            mint,
            recipient,
            amount,
        } => {
            let signature = mint_to(&mut rpc, &payer, &mint, &payer, &recipient, amount).await?;
            println!("Mint: {mint}");
            println!("Recipient: {recipient}");
            println!("Tx: {signature}");
        }
        Commands::Transfer { mint, to, amount } => {
            let signature =
                transfer(&mut rpc, &indexer, &payer, &mint, amount, &payer, &to).await?;
            println!("Mint: {mint}");
            println!("Recipient: {to}");
            println!("Tx: {signature}");
        }
        Commands::Compress {
            mint,
            amount,
            to,
            source,
        } => {
            let source = match source {
                Some(source) => source,
                None => {
                    get_or_create_associated_token_account(&mut rpc, &payer, &mint, &payer.pubkey())
                        .await?
                }
            };
            let to = to.unwrap_or_else(|| payer.pubkey());
            let signature =
                compress(&mut rpc, &payer, &mint, amount, &payer, &source, &to).await?;
            println!("Mint: {mint}");
            println!("Tx: {signature}");
        }
        Commands::Decompress { mint, amount, to } => {
            let to = match to {
                Some(to) => to,
                None => {
                    get_or_create_associated_token_account(&mut rpc, &payer, &mint, &payer.pubkey())
                        .await?
                }
            };
            let signature =
                decompress(&mut rpc, &indexer, &payer, &mint, amount, &payer, &to).await?;
            println!("Mint: {mint}");
            println!("Token account: {to}");
            println!("Tx: {signature}");
        }
        Commands::Approve {
            mint,
            delegate,
            amount,
        } => {
            let signature =
                approve(&mut rpc, &indexer, &payer, &mint, amount, &payer, &delegate).await?;
            println!("Mint: {mint}");
            println!("Delegate: {delegate}");
            println!("Tx: {signature}");
        }
        Commands::Revoke { mint, delegate } => {
            let signature = revoke(&mut rpc, &indexer, &payer, &mint, &payer, &delegate).await?;
            println!("Mint: {mint}");
            println!("Tx: {signature}");
        }
        Commands::MergeTokenAccounts { mint } => {
            let signatures = merge_token_accounts(&mut rpc, &indexer, &payer, &mint, &payer).await?;
            println!("Mint: {mint}");
            if signatures.is_empty() {
                println!("Nothing to merge");
            }
            for signature in signatures {
                println!("Tx: {signature}");
            }
        }
        Commands::CompressSplAccount {
            mint,
            token_account,
            remaining_amount,
        } => {
            let token_account = match token_account {
                Some(account) => account,
                None => {
                    get_or_create_associated_token_account(&mut rpc, &payer, &mint, &payer.pubkey())
                        .await?
                }
            };
            let signature = compress_spl_token_account(
                &mut rpc,
                &payer,
                &mint,
                &payer,
                &token_account,
                remaining_amount,
            )
            .await?;
            println!("Mint: {mint}");
            println!("Tx: {signature}");
        }
        Commands::Balances { owner } => {
            let owner = owner.unwrap_or_else(|| payer.pubkey());
            let balances = owner_balances(&mut rpc, &indexer, &owner).await?;
            println!("Compressed SOL: {} lamports", balances.lamports);
            if balances.tokens.is_empty() {
                println!("No compressed token balances found");
            }
            for token in balances.tokens {
                println!("Mint: {}", token.mint);
                println!("Balance: {} tokens", token.ui_amount);
            }
        }
        Commands::History { owner } => {
            let owner = owner.unwrap_or_else(|| payer.pubkey());
            let signatures = transaction_history(&indexer, &owner).await?;
            if signatures.is_empty() {
                println!("No transactions found");
            }
            for (index, entry) in signatures.iter().enumerate() {
                println!("{}. {}", index + 1, entry.signature);
                println!("   Slot: {}", entry.slot);
                println!("   Block time: {}", entry.block_time);
            }
        }
    }
    Ok(())
}
