use light_client::rpc::RpcConnection;
use light_compressed_token::mint_sdk::create_create_token_pool_instruction;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
};

use crate::error::Result;

/// Register a compression token pool for an existing SPL mint.
///
/// The pool is a token account owned by the compressed-token program's CPI
/// authority; compress operations move SPL tokens into it, decompress
/// operations move them back out. Only the payer signs.
pub async fn create_token_pool<R: RpcConnection>(
    rpc: &mut R,
    payer: &Keypair,
    mint: &Pubkey,
) -> Result<Signature> {
    let instruction = create_create_token_pool_instruction(&payer.pubkey(), mint);
    let signature = rpc
        .create_and_send_transaction(&[instruction], &payer.pubkey(), &[payer])
        .await?;
    Ok(signature)
}
