use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ctoken_cookbook::{
    actions::{build_compress_instruction, create_mint, get_or_create_associated_token_account},
    config::Config,
    trees::{select_state_tree, PUBLIC_STATE_TREES},
};
use ctoken_distribution::{
    batch::{build_airdrop_batches, compute_unit_price, AirdropPlan, DEFAULT_RECIPIENTS_PER_BATCH},
    recipients::read_recipients_file,
    send::{sign_and_send_batches, BatchResult},
};
use light_client::rpc::{RpcConnection, SolanaRpcConnection};
use solana_sdk::{
    commitment_config::CommitmentConfig, compute_budget::ComputeBudgetInstruction, pubkey::Pubkey,
    signature::Keypair, signer::Signer,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about = "Compressed token airdrop examples", long_about = None)]
struct Cli {
    #[arg(long, env = "RPC_URL")]
    rpc_url: Option<String>,

    #[arg(long, env = "API_KEY")]
    api_key: Option<String>,

    #[arg(long, env = "KEYPAIR_PATH")]
    keypair: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drop tokens to every recipient in one transaction.
    Simple {
        /// Existing compression-registered mint. A fresh demo mint is
        /// created when omitted.
        #[arg(long)]
        mint: Option<Pubkey>,
        /// File with one recipient pubkey per line.
        #[arg(long)]
        recipients: PathBuf,
        /// Base units per recipient.
        #[arg(long)]
        amount: u64,
    },
    /// Chunk recipients into sequential transactions.
    Batched {
        #[arg(long)]
        mint: Option<Pubkey>,
        #[arg(long)]
        recipients: PathBuf,
        #[arg(long)]
        amount: u64,
        #[arg(long, default_value_t = DEFAULT_RECIPIENTS_PER_BATCH)]
        batch_size: usize,
    },
}

/// Make sure a funded source token account exists: create a demo mint and
/// mint the full drop amount to the payer's ATA when no mint is given.
async fn prepare_source(
    rpc: &mut SolanaRpcConnection,
    payer: &Keypair,
    mint: Option<Pubkey>,
    total: u64,
) -> anyhow::Result<(Pubkey, Pubkey)> {
    let mint = match mint {
        Some(mint) => mint,
        None => {
            let created = create_mint(rpc, payer, &payer.pubkey(), None, 9).await?;
            println!("Mint: {}", created.mint);
            println!("Create mint tx: {}", created.signature);
            created.mint
        }
    };

    let source = get_or_create_associated_token_account(rpc, payer, &mint, &payer.pubkey()).await?;
    println!("Source token account: {source}");

    let mint_ix = spl_token::instruction::mint_to(
        &spl_token::ID,
        &mint,
        &source,
        &payer.pubkey(),
        &[],
        total,
    )?;
    let signature = rpc
        .create_and_send_transaction(&[mint_ix], &payer.pubkey(), &[payer])
        .await?;
    println!("Mint SPL tx: {signature}");

    Ok((mint, source))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let config = Config::resolve(cli.rpc_url, None, cli.api_key, cli.keypair)?;
    let payer = config.load_payer()?;
    let mut rpc =
        SolanaRpcConnection::new(config.rpc_url.clone(), Some(CommitmentConfig::confirmed()));
    rpc.payer = payer.insecure_clone();

    match cli.command {
        Commands::Simple {
            mint,
            recipients,
            amount,
        } => {
            let recipients = read_recipients_file(&recipients)?;
            let total = amount
                .checked_mul(recipients.len() as u64)
                .ok_or_else(|| anyhow::anyhow!("total drop amount overflows u64"))?;
            let (mint, source) = prepare_source(&mut rpc, &payer, mint, total).await?;

            let tree = select_state_tree(&PUBLIC_STATE_TREES)?;
            let chunk: Vec<(Pubkey, u64)> =
                recipients.iter().map(|r| (*r, amount)).collect();
            let [approve_ix, compress_ix] = build_compress_instruction(
                &payer.pubkey(),
                &payer.pubkey(),
                &mint,
                &source,
                &chunk,
                &tree.tree,
            )?;
            let units = 120_000;
            let instructions = vec![
                ComputeBudgetInstruction::set_compute_unit_limit(units),
                ComputeBudgetInstruction::set_compute_unit_price(compute_unit_price(
                    20_000, units,
                )),
                approve_ix,
                compress_ix,
            ];
            let signature = rpc
                .create_and_send_transaction(&instructions, &payer.pubkey(), &[&payer])
                .await?;
            println!("Dropped {amount} to {} recipients", recipients.len());
            println!("Tx: {signature}");
        }
        Commands::Batched {
            mint,
            recipients,
            amount,
            batch_size,
        } => {
            let recipients = read_recipients_file(&recipients)?;
            let total = amount
                .checked_mul(recipients.len() as u64)
                .ok_or_else(|| anyhow::anyhow!("total drop amount overflows u64"))?;
            let (mint, source) = prepare_source(&mut rpc, &payer, mint, total).await?;

            let plan = AirdropPlan {
                payer: payer.pubkey(),
                owner: payer.pubkey(),
                mint,
                source_token_account: source,
                amount_per_recipient: amount,
                recipients_per_batch: batch_size,
            };
            let batches = build_airdrop_batches(&plan, &recipients)?;
            println!("Sending {} batches", batches.len());

            let results = sign_and_send_batches(&mut rpc, &payer, &payer, batches).await?;
            let mut failed = 0usize;
            for result in &results {
                match result {
                    BatchResult::Confirmed { index, signature } => {
                        println!("Batch {index} confirmed: {signature}");
                    }
                    BatchResult::Failed { index, error } => {
                        failed += 1;
                        println!("Batch {index} failed: {error}");
                    }
                }
            }
            println!(
                "Airdrop complete: {}/{} batches confirmed",
                results.len() - failed,
                results.len()
            );
            if failed > 0 {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}
