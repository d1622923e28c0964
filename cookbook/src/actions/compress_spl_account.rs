use light_client::rpc::RpcConnection;
use light_compressed_token::process_compress_spl_token_account::sdk::create_compress_spl_token_account_instruction;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
};

use crate::{
    actions::dedupe_signers,
    error::Result,
    trees::{select_state_tree, PUBLIC_STATE_TREES},
};

/// Compress an SPL token account's entire balance (minus an optional
/// remainder to leave behind) into a compressed account for the owner.
pub async fn compress_spl_token_account<R: RpcConnection>(
    rpc: &mut R,
    payer: &Keypair,
    mint: &Pubkey,
    owner: &Keypair,
    token_account: &Pubkey,
    remaining_amount: Option<u64>,
) -> Result<Signature> {
    let tree = select_state_tree(&PUBLIC_STATE_TREES)?;
    let instruction = create_compress_spl_token_account_instruction(
        &owner.pubkey(),
        remaining_amount,
        None, // cpi_context
        &payer.pubkey(),
        &owner.pubkey(),
        mint,
        &tree.tree,
        token_account,
        false, // is_token_22
        0,     // token_pool_index
    );

    let signers = dedupe_signers(payer, owner);
    let signature = rpc
        .create_and_send_transaction(&[instruction], &payer.pubkey(), &signers)
        .await?;
    Ok(signature)
}
