use light_client::rpc::RpcConnection;
use light_compressed_token::{
    get_cpi_authority_pda, get_token_pool_pda, transfer_sdk::create_transfer_instruction,
    TokenTransferOutputData,
};
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
};

use crate::{
    actions::dedupe_signers,
    error::{CookbookError, Result},
    trees::{select_state_tree, PUBLIC_STATE_TREES},
};

/// Build the instruction pair that moves SPL tokens into compressed form:
/// a token-program approve delegating the total to the compressed-token
/// program's CPI authority, followed by the compression itself. One
/// compressed account is created per recipient.
pub fn build_compress_instruction(
    payer: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
    source_token_account: &Pubkey,
    recipients: &[(Pubkey, u64)],
    output_tree: &Pubkey,
) -> Result<[Instruction; 2]> {
    let total: u64 = recipients.iter().map(|(_, amount)| amount).sum();
    let approve_ix = spl_token::instruction::approve(
        &spl_token::ID,
        source_token_account,
        &get_cpi_authority_pda().0,
        owner,
        &[],
        total,
    )
    .map_err(|e| CookbookError::Instruction(e.to_string()))?;

    let outputs: Vec<TokenTransferOutputData> = recipients
        .iter()
        .map(|(recipient, amount)| TokenTransferOutputData {
            owner: *recipient,
            amount: *amount,
            lamports: None,
            merkle_tree: *output_tree,
        })
        .collect();

    let compress_ix = create_transfer_instruction(
        payer,
        owner,
        &[], // no compressed inputs
        &outputs,
        &[],
        &None,
        &[],
        *mint,
        None,
        true, // is_compress
        Some(total),
        Some(get_token_pool_pda(mint)),
        Some(*source_token_account),
    )
    .map_err(|e| CookbookError::Instruction(e.to_string()))?;

    Ok([approve_ix, compress_ix])
}

/// Compress SPL tokens from `source_token_account` into a compressed
/// account owned by `to`.
pub async fn compress<R: RpcConnection>(
    rpc: &mut R,
    payer: &Keypair,
    mint: &Pubkey,
    amount: u64,
    owner: &Keypair,
    source_token_account: &Pubkey,
    to: &Pubkey,
) -> Result<Signature> {
    let tree = select_state_tree(&PUBLIC_STATE_TREES)?;
    let instructions = build_compress_instruction(
        &payer.pubkey(),
        &owner.pubkey(),
        mint,
        source_token_account,
        &[(*to, amount)],
        &tree.tree,
    )?;

    let signers = dedupe_signers(payer, owner);
    let signature = rpc
        .create_and_send_transaction(&instructions, &payer.pubkey(), &signers)
        .await?;
    Ok(signature)
}
