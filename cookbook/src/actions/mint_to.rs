use light_client::rpc::RpcConnection;
use light_compressed_token::mint_sdk::create_mint_to_instruction;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
};

use crate::{
    actions::dedupe_signers,
    error::{CookbookError, Result},
    trees::{select_state_tree, PUBLIC_STATE_TREES},
};

/// Mint compressed tokens to a single recipient.
pub async fn mint_to<R: RpcConnection>(
    rpc: &mut R,
    payer: &Keypair,
    mint: &Pubkey,
    authority: &Keypair,
    recipient: &Pubkey,
    amount: u64,
) -> Result<Signature> {
    mint_to_many(rpc, payer, mint, authority, &[*recipient], &[amount]).await
}

/// Mint compressed tokens to several recipients in one transaction. The
/// mint authority signs; the payer signs if distinct.
pub async fn mint_to_many<R: RpcConnection>(
    rpc: &mut R,
    payer: &Keypair,
    mint: &Pubkey,
    authority: &Keypair,
    recipients: &[Pubkey],
    amounts: &[u64],
) -> Result<Signature> {
    if recipients.len() != amounts.len() {
        return Err(CookbookError::Instruction(
            "recipients and amounts must have the same length".to_string(),
        ));
    }
    let tree = select_state_tree(&PUBLIC_STATE_TREES)?;
    let instruction = create_mint_to_instruction(
        &payer.pubkey(),
        &authority.pubkey(),
        mint,
        &tree.tree,
        amounts.to_vec(),
        recipients.to_vec(),
        None,
    );

    let signers = dedupe_signers(payer, authority);
    let signature = rpc
        .create_and_send_transaction(&[instruction], &payer.pubkey(), &signers)
        .await?;
    Ok(signature)
}
