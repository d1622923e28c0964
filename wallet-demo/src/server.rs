//! HTTP surface of the wallet demo.
//!
//! One endpoint per wallet operation: balances, transfer, compress,
//! decompress and transaction history. Each handler runs the same
//! sequence as the CLI actions, except that signing goes through the
//! configured [`TransactionSigner`].

use std::sync::Arc;

use ctoken_cookbook::{
    actions::{build_compress_instruction, build_decompress_instruction, build_transfer_instruction},
    amount::parse_token_amount,
    indexer::PhotonClient,
    queries::mint_decimals,
    trees::{select_state_tree, PUBLIC_STATE_TREES},
};
use light_client::rpc::{RpcConnection, SolanaRpcConnection};
use serde::{Deserialize, Serialize};
use solana_sdk::{
    commitment_config::CommitmentConfig, compute_budget::ComputeBudgetInstruction,
    instruction::Instruction, message::Message, pubkey::Pubkey, signature::Signature,
    transaction::Transaction,
};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account,
};
use warp::{http::StatusCode, Filter};

use crate::{
    config::DemoConfig,
    error::{Result, WalletDemoError},
    signer::TransactionSigner,
};

const COMPUTE_UNIT_LIMIT: u32 = 300_000;

pub struct AppState {
    pub config: DemoConfig,
    pub signer: Arc<dyn TransactionSigner>,
}

impl AppState {
    fn rpc(&self) -> SolanaRpcConnection {
        SolanaRpcConnection::new(
            self.config.rpc_url.clone(),
            Some(CommitmentConfig::confirmed()),
        )
    }

    fn indexer(&self) -> PhotonClient {
        PhotonClient::new(self.config.indexer_url.clone(), self.config.api_key.clone())
    }

    /// Build an unsigned transaction for the wallet, have the signer sign
    /// it and submit.
    async fn sign_and_submit(&self, instructions: Vec<Instruction>) -> Result<Signature> {
        let mut rpc = self.rpc();
        let blockhash = rpc.get_latest_blockhash().await?;
        let message = Message::new(&instructions, Some(&self.signer.address()));
        let transaction = Transaction::new_unsigned(message);
        let signed = self.signer.sign_transaction(transaction, blockhash).await?;
        let signature = rpc.process_transaction(signed).await?;
        Ok(signature)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignatureResponse {
    pub signature: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenBalanceEntry {
    pub mint: String,
    pub amount: String,
    pub accounts: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BalancesResponse {
    /// Compressed SOL in lamports.
    pub sol: String,
    pub tokens: Vec<TokenBalanceEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub signature: String,
    pub slot: u64,
    pub block_time: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub items: Vec<HistoryEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub mint: String,
    pub to: String,
    /// Decimal UI amount, e.g. "0.001".
    pub amount: String,
    /// Defaults to the mint's decimals.
    pub decimals: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct CompressRequest {
    pub mint: String,
    pub amount: String,
    pub decimals: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct DecompressRequest {
    pub mint: String,
    pub amount: String,
    pub decimals: Option<u8>,
}

fn parse_pubkey(field: &str, value: &str) -> Result<Pubkey> {
    value
        .parse()
        .map_err(|_| WalletDemoError::BadRequest(format!("{field} {value:?} is not a pubkey")))
}

async fn resolve_amount(
    state: &AppState,
    mint: &Pubkey,
    amount: &str,
    decimals: Option<u8>,
) -> Result<u64> {
    let decimals = match decimals {
        Some(decimals) => decimals,
        None => mint_decimals(&mut state.rpc(), mint).await?,
    };
    Ok(parse_token_amount(amount, decimals)?)
}

async fn handle_balances(state: Arc<AppState>, owner: String) -> Result<BalancesResponse> {
    let owner = parse_pubkey("owner", &owner)?;
    let indexer = state.indexer();

    let sol = indexer.get_compressed_balance_by_owner(&owner).await?;
    let accounts = indexer
        .get_compressed_token_accounts_by_owner(&owner, None)
        .await?;

    // Aggregate per mint, keeping the account count for display.
    let mut aggregated: Vec<(Pubkey, u64, usize)> = Vec::new();
    for account in &accounts {
        match aggregated.iter_mut().find(|(mint, _, _)| *mint == account.token.mint) {
            Some((_, total, count)) => {
                *total += account.token.amount;
                *count += 1;
            }
            None => aggregated.push((account.token.mint, account.token.amount, 1)),
        }
    }

    Ok(BalancesResponse {
        sol: sol.to_string(),
        tokens: aggregated
            .into_iter()
            .map(|(mint, total, count)| TokenBalanceEntry {
                mint: mint.to_string(),
                amount: total.to_string(),
                accounts: count,
            })
            .collect(),
    })
}

async fn handle_history(state: Arc<AppState>, owner: String) -> Result<HistoryResponse> {
    let owner = parse_pubkey("owner", &owner)?;
    let items = state
        .indexer()
        .get_compression_signatures_for_token_owner(&owner)
        .await?
        .into_iter()
        .map(|entry| HistoryEntry {
            signature: entry.signature,
            slot: entry.slot,
            block_time: entry.block_time,
        })
        .collect();
    Ok(HistoryResponse { items })
}

async fn handle_transfer(state: Arc<AppState>, request: TransferRequest) -> Result<Signature> {
    let mint = parse_pubkey("mint", &request.mint)?;
    let to = parse_pubkey("to", &request.to)?;
    let amount = resolve_amount(&state, &mint, &request.amount, request.decimals).await?;

    let owner = state.signer.address();
    let instruction =
        build_transfer_instruction(&state.indexer(), &owner, &mint, amount, &owner, &to).await?;

    state
        .sign_and_submit(vec![
            ComputeBudgetInstruction::set_compute_unit_limit(COMPUTE_UNIT_LIMIT),
            instruction,
        ])
        .await
}

async fn handle_compress(state: Arc<AppState>, request: CompressRequest) -> Result<Signature> {
    let mint = parse_pubkey("mint", &request.mint)?;
    let amount = resolve_amount(&state, &mint, &request.amount, request.decimals).await?;

    let owner = state.signer.address();
    let source = get_associated_token_address(&owner, &mint);
    if state.rpc().get_account(source).await?.is_none() {
        return Err(WalletDemoError::BadRequest(format!(
            "no SPL token account {source} to compress from"
        )));
    }

    let tree = select_state_tree(&PUBLIC_STATE_TREES)?;
    let [approve_ix, compress_ix] =
        build_compress_instruction(&owner, &owner, &mint, &source, &[(owner, amount)], &tree.tree)?;

    state
        .sign_and_submit(vec![
            ComputeBudgetInstruction::set_compute_unit_limit(COMPUTE_UNIT_LIMIT),
            approve_ix,
            compress_ix,
        ])
        .await
}

async fn handle_decompress(state: Arc<AppState>, request: DecompressRequest) -> Result<Signature> {
    let mint = parse_pubkey("mint", &request.mint)?;
    let amount = resolve_amount(&state, &mint, &request.amount, request.decimals).await?;

    let owner = state.signer.address();
    let destination = get_associated_token_address(&owner, &mint);

    let mut instructions = vec![ComputeBudgetInstruction::set_compute_unit_limit(
        COMPUTE_UNIT_LIMIT,
    )];
    if state.rpc().get_account(destination).await?.is_none() {
        instructions.push(create_associated_token_account(
            &owner,
            &owner,
            &mint,
            &spl_token::ID,
        ));
    }
    instructions.push(
        build_decompress_instruction(&state.indexer(), &owner, &mint, amount, &owner, &destination)
            .await?,
    );

    state.sign_and_submit(instructions).await
}

fn status_for(error: &WalletDemoError) -> StatusCode {
    match error {
        WalletDemoError::BadRequest(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn json_result<T: Serialize>(
    result: Result<T>,
) -> std::result::Result<warp::reply::WithStatus<warp::reply::Json>, warp::Rejection> {
    match result {
        Ok(value) => Ok(warp::reply::with_status(
            warp::reply::json(&value),
            StatusCode::OK,
        )),
        Err(error) => {
            tracing::warn!(%error, "request failed");
            Ok(warp::reply::with_status(
                warp::reply::json(&ErrorResponse {
                    error: error.to_string(),
                }),
                status_for(&error),
            ))
        }
    }
}

fn with_state(
    state: Arc<AppState>,
) -> impl Filter<Extract = (Arc<AppState>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || state.clone())
}

pub fn routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let health = warp::path("health").and(warp::get()).map(|| {
        warp::reply::json(&HealthResponse {
            status: "ok".to_string(),
        })
    });

    let balances = warp::path!("balances" / String)
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(|owner: String, state: Arc<AppState>| async move {
            json_result(handle_balances(state, owner).await)
        });

    let history = warp::path!("history" / String)
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(|owner: String, state: Arc<AppState>| async move {
            json_result(handle_history(state, owner).await)
        });

    let transfer = warp::path("transfer")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(|request: TransferRequest, state: Arc<AppState>| async move {
            json_result(
                handle_transfer(state, request)
                    .await
                    .map(|signature| SignatureResponse {
                        signature: signature.to_string(),
                    }),
            )
        });

    let compress = warp::path("compress")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(|request: CompressRequest, state: Arc<AppState>| async move {
            json_result(
                handle_compress(state, request)
                    .await
                    .map(|signature| SignatureResponse {
                        signature: signature.to_string(),
                    }),
            )
        });

    let decompress = warp::path("decompress")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state(state))
        .and_then(|request: DecompressRequest, state: Arc<AppState>| async move {
            json_result(
                handle_decompress(state, request)
                    .await
                    .map(|signature| SignatureResponse {
                        signature: signature.to_string(),
                    }),
            )
        });

    health
        .or(balances)
        .or(history)
        .or(transfer)
        .or(compress)
        .or(decompress)
}
