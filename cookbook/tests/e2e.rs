//! End-to-end cookbook flow against a local test validator.
//!
//! Requires `light test-validator` running with the photon indexer
//! (RPC on 8899, indexer on 8784). Ignored by default; run with
//! `cargo test -p ctoken-cookbook -- --ignored`.

use ctoken_cookbook::{
    actions::{create_mint, mint_to, transfer},
    config::{LOCALNET_INDEXER_URL, LOCALNET_RPC_URL},
    indexer::PhotonClient,
};
use light_client::rpc::{RpcConnection, SolanaRpcConnection};
use serial_test::serial;
use solana_sdk::{
    commitment_config::CommitmentConfig, native_token::LAMPORTS_PER_SOL, signature::Keypair,
    signer::Signer,
};

async fn setup() -> (SolanaRpcConnection, PhotonClient, Keypair) {
    let mut rpc = SolanaRpcConnection::new(
        LOCALNET_RPC_URL.to_string(),
        Some(CommitmentConfig::confirmed()),
    );
    let payer = Keypair::new();
    rpc.payer = payer.insecure_clone();
    rpc.airdrop_lamports(&payer.pubkey(), 10 * LAMPORTS_PER_SOL)
        .await
        .unwrap();
    let indexer = PhotonClient::new(LOCALNET_INDEXER_URL.to_string(), None);
    (rpc, indexer, payer)
}

async fn balance_of(indexer: &PhotonClient, owner: &solana_sdk::pubkey::Pubkey) -> u64 {
    indexer
        .get_compressed_token_balances_by_owner(owner)
        .await
        .unwrap()
        .iter()
        .map(|b| b.balance)
        .sum()
}

#[tokio::test]
#[serial]
#[ignore = "requires a running light test-validator with photon"]
async fn mint_and_transfer_moves_balances() {
    let (mut rpc, indexer, payer) = setup().await;

    let created = create_mint(&mut rpc, &payer, &payer.pubkey(), None, 9)
        .await
        .unwrap();

    let sender = Keypair::new();
    mint_to(
        &mut rpc,
        &payer,
        &created.mint,
        &payer,
        &sender.pubkey(),
        1_000_000_000,
    )
    .await
    .unwrap();
    assert_eq!(balance_of(&indexer, &sender.pubkey()).await, 1_000_000_000);

    let recipient = Keypair::new();
    transfer(
        &mut rpc,
        &indexer,
        &payer,
        &created.mint,
        500_000_000,
        &sender,
        &recipient.pubkey(),
    )
    .await
    .unwrap();

    assert_eq!(balance_of(&indexer, &sender.pubkey()).await, 500_000_000);
    assert_eq!(balance_of(&indexer, &recipient.pubkey()).await, 500_000_000);
}

#[tokio::test]
#[serial]
#[ignore = "requires a running light test-validator with photon"]
async fn transfer_with_insufficient_balance_fails() {
    let (mut rpc, indexer, payer) = setup().await;

    let created = create_mint(&mut rpc, &payer, &payer.pubkey(), None, 9)
        .await
        .unwrap();
    let sender = Keypair::new();
    mint_to(&mut rpc, &payer, &created.mint, &payer, &sender.pubkey(), 100)
        .await
        .unwrap();

    let recipient = Keypair::new();
    let result = transfer(
        &mut rpc,
        &indexer,
        &payer,
        &created.mint,
        1_000,
        &sender,
        &recipient.pubkey(),
    )
    .await;
    assert!(result.is_err());
    // Nothing moved.
    assert_eq!(balance_of(&indexer, &sender.pubkey()).await, 100);
}
