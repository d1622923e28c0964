use light_client::rpc::RpcConnection;
use light_compressed_token::{
    get_token_pool_pda, transfer_sdk::create_transfer_instruction, TokenTransferOutputData,
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
    indexer::PhotonClient,
    selection::select_min_token_accounts,
};

/// Build a decompression of `amount` into an SPL token account: select
/// compressed accounts of `owner` covering the amount, prove them and
/// emit a transfer paying out of the token pool. Leftover input value
/// goes back to the owner as a compressed change account.
pub async fn build_decompress_instruction(
    indexer: &PhotonClient,
    payer: &Pubkey,
    mint: &Pubkey,
    amount: u64,
    owner: &Pubkey,
    recipient_token_account: &Pubkey,
) -> Result<Instruction> {
    let accounts = indexer
        .get_compressed_token_accounts_by_owner(owner, Some(mint))
        .await?;
    if accounts.is_empty() {
        return Err(CookbookError::NoTokenAccounts {
            owner: *owner,
            mint: *mint,
        });
    }

    let (inputs, total) = select_min_token_accounts(&accounts, amount)?;
    let hashes: Vec<[u8; 32]> = inputs.iter().map(|a| a.hash).collect();
    let proof = indexer.get_validity_proof(&hashes).await?;

    let change_tree = inputs[0].merkle_context.merkle_tree_pubkey;
    let mut outputs = Vec::new();
    if total > amount {
        outputs.push(TokenTransferOutputData {
            owner: *owner,
            amount: total - amount,
            lamports: None,
            merkle_tree: change_tree,
        });
    }

    let merkle_contexts: Vec<_> = inputs.iter().map(|a| a.merkle_context).collect();
    let token_data: Vec<_> = inputs.iter().map(|a| a.token.clone()).collect();

    create_transfer_instruction(
        payer,
        owner,
        &merkle_contexts,
        &outputs,
        &proof.root_indices,
        &Some(proof.proof),
        &token_data,
        *mint,
        None,
        false, // decompression is the non-compress direction
        Some(amount),
        Some(get_token_pool_pda(mint)),
        Some(*recipient_token_account),
    )
    .map_err(|e| CookbookError::Instruction(e.to_string()))
}

/// Decompress tokens back into an SPL token account and send the
/// transaction.
pub async fn decompress<R: RpcConnection>(
    rpc: &mut R,
    indexer: &PhotonClient,
    payer: &Keypair,
    mint: &Pubkey,
    amount: u64,
    owner: &Keypair,
    recipient_token_account: &Pubkey,
) -> Result<Signature> {
    let instruction = build_decompress_instruction(
        indexer,
        &payer.pubkey(),
        mint,
        amount,
        &owner.pubkey(),
        recipient_token_account,
    )
    .await?;

    let signers = dedupe_signers(payer, owner);
    let signature = rpc
        .create_and_send_transaction(&[instruction], &payer.pubkey(), &signers)
        .await?;
    Ok(signature)
}
