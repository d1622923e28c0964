use light_client::rpc::RpcConnection;
use light_compressed_token::{transfer_sdk::create_transfer_instruction, TokenTransferOutputData};
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

/// Build a transfer of `amount` from `owner` to `to`: fetch the owner's
/// compressed accounts for the mint, select the minimum covering set,
/// prove it and emit one instruction with change back to the owner.
/// Outputs stay in the tree the inputs live in.
pub async fn build_transfer_instruction(
    indexer: &PhotonClient,
    payer: &Pubkey,
    mint: &Pubkey,
    amount: u64,
    owner: &Pubkey,
    to: &Pubkey,
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

    let output_tree = inputs[0].merkle_context.merkle_tree_pubkey;
    let mut outputs = vec![TokenTransferOutputData {
        owner: *to,
        amount,
        lamports: None,
        merkle_tree: output_tree,
    }];
    if total > amount {
        outputs.push(TokenTransferOutputData {
            owner: *owner,
            amount: total - amount,
            lamports: None,
            merkle_tree: output_tree,
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
        None,  // owner_if_delegate_is_signer
        false, // is_compress
        None,  // compression_amount
        None,  // token_pool_pda
        None,  // decompress_token_account
    )
    .map_err(|e| CookbookError::Instruction(e.to_string()))
}

/// Transfer compressed tokens from `owner` to `to` and send the
/// transaction.
pub async fn transfer<R: RpcConnection>(
    rpc: &mut R,
    indexer: &PhotonClient,
    payer: &Keypair,
    mint: &Pubkey,
    amount: u64,
    owner: &Keypair,
    to: &Pubkey,
) -> Result<Signature> {
    let instruction = build_transfer_instruction(
        indexer,
        &payer.pubkey(),
        mint,
        amount,
        &owner.pubkey(),
        to,
    )
    .await?;

    let signers = dedupe_signers(payer, owner);
    let signature = rpc
        .create_and_send_transaction(&[instruction], &payer.pubkey(), &signers)
        .await?;
    Ok(signature)
}
